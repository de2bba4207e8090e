pub mod download;
pub mod preview;

use std::sync::Arc;

use crate::client::LmsBackend;
use crate::models::common::modal::ModalState;
use crate::models::files::entities::FilePreview;

pub use preview::build_plan;

/// 共享的文件预览器
///
/// 学生提交、已评分提交和评分弹窗三个入口共用，只通过 `ViewerSource` 区分。
pub struct FilePreviewService {
    pub(crate) backend: Arc<dyn LmsBackend>,
    pub(crate) modal: ModalState<FilePreview>,
}

impl FilePreviewService {
    pub fn new(backend: Arc<dyn LmsBackend>) -> Self {
        Self {
            backend,
            modal: ModalState::Closed,
        }
    }

    pub fn current(&self) -> Option<&FilePreview> {
        self.modal.payload()
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn close(&mut self) {
        if let Some(preview) = self.modal.close() {
            tracing::debug!(file_name = %preview.file_name, "Preview closed");
        }
    }
}
