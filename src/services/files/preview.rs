use tracing::{debug, warn};

use super::FilePreviewService;
use crate::client::LmsBackend;
use crate::errors::Result;
use crate::models::files::entities::{
    FileKind, FilePreview, PreviewDisplay, PreviewPlan, ViewerProfile, ViewerSource,
};
use crate::utils::file_kind::classify;
use crate::utils::validate::validate_file_name;

/// 由文件名生成渲染计划，不发起任何请求
pub fn build_plan(
    backend: &dyn LmsBackend,
    file_name: &str,
    profile: ViewerProfile,
) -> Result<PreviewPlan> {
    validate_file_name(file_name)?;
    let download_url = backend.file_download_url(file_name)?;

    let plan = match classify(file_name, profile) {
        FileKind::Image => PreviewPlan::Image {
            url: backend.file_view_url(file_name)?,
            download_url,
        },
        FileKind::Pdf => PreviewPlan::Pdf {
            url: backend.file_view_url(file_name)?,
            download_url,
        },
        FileKind::Text => PreviewPlan::Text {
            url: backend.file_view_url(file_name)?,
            download_url,
        },
        FileKind::Unsupported => PreviewPlan::Unsupported { download_url },
    };
    Ok(plan)
}

impl FilePreviewService {
    /// 打开预览；文本类文件会拉取内容，失败时停留在错误状态而不是返回错误
    pub async fn open(&mut self, file_name: &str, source: ViewerSource) -> Result<()> {
        let plan = build_plan(self.backend.as_ref(), file_name, source.profile())?;
        debug!(file_name, kind = ?plan.kind(), source = ?source, "Opening preview");

        let display = match &plan {
            PreviewPlan::Image { url, .. } => PreviewDisplay::Image { url: url.clone() },
            PreviewPlan::Pdf { url, .. } => PreviewDisplay::Pdf { url: url.clone() },
            PreviewPlan::Text { .. } => PreviewDisplay::Loading,
            PreviewPlan::Unsupported { .. } => PreviewDisplay::Unsupported,
        };
        self.modal.open(FilePreview {
            file_name: file_name.to_string(),
            source,
            display,
            download_url: plan.download_url().to_string(),
        });

        if plan.kind() == FileKind::Text {
            let display = match self.backend.fetch_file_text(file_name).await {
                Ok(content) => PreviewDisplay::Text { content },
                Err(e) => {
                    warn!(file_name, error = %e, "Text preview failed");
                    PreviewDisplay::Error {
                        message: format!("无法加载文件内容: {}", e.message()),
                    }
                }
            };
            if let Some(preview) = self.modal.payload_mut() {
                preview.display = display;
            }
        }
        Ok(())
    }

    /// 图片加载失败（由渲染层回调）
    pub fn image_load_failed(&mut self) {
        if let Some(preview) = self.modal.payload_mut()
            && matches!(preview.display, PreviewDisplay::Image { .. })
        {
            warn!(file_name = %preview.file_name, "Image preview failed to load");
            preview.display = PreviewDisplay::Error {
                message: "图片加载失败".to_string(),
            };
        }
    }
}
