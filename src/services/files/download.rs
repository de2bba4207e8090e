use super::FilePreviewService;
use crate::errors::Result;
use crate::utils::validate::validate_file_name;

impl FilePreviewService {
    /// 当前预览的下载地址，预览可用与否都存在
    pub fn download_target(&self) -> Option<&str> {
        self.modal.payload().map(|p| p.download_url.as_str())
    }

    /// 不经预览直接下载
    pub fn download_url_for(&self, file_name: &str) -> Result<String> {
        validate_file_name(file_name)?;
        self.backend.file_download_url(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeBackend;
    use std::sync::Arc;

    #[test]
    fn test_direct_download_url() {
        let viewer = FilePreviewService::new(Arc::new(FakeBackend::new()));
        assert_eq!(
            viewer.download_url_for("report.docx").unwrap(),
            "http://fake/api/files/download/report.docx"
        );
        assert!(viewer.download_url_for("a/b.docx").is_err());
    }
}
