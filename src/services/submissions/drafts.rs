//! 提交草稿：文本必填，附件可选且最多一个

use tracing::debug;

use super::SubmissionService;
use crate::errors::{PortalError, Result};
use crate::models::submissions::requests::SubmissionFile;
use crate::utils::file_kind::{content_type_for, validate_magic_bytes};
use crate::utils::validate::validate_file_name;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionDraft {
    pub text: String,
    pub file: Option<SubmissionFile>,
}

impl SubmissionDraft {
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

impl SubmissionService {
    pub fn draft(&self, assignment_id: i64) -> Option<&SubmissionDraft> {
        self.drafts.get(&assignment_id)
    }

    pub fn set_text(&mut self, assignment_id: i64, text: impl Into<String>) {
        self.drafts.entry(assignment_id).or_default().text = text.into();
    }

    /// 附加文件，替换已有附件
    ///
    /// 文件头与扩展名不符时拒绝，避免把改名的文件当作图片或 PDF 预览。
    pub fn attach_file(
        &mut self,
        assignment_id: i64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<()> {
        validate_file_name(file_name)?;
        if bytes.is_empty() {
            return Err(PortalError::validation(format!("文件 '{file_name}' 为空")));
        }
        if !validate_magic_bytes(&bytes, file_name) {
            return Err(PortalError::validation(format!(
                "文件 '{file_name}' 的内容与扩展名不符"
            )));
        }

        debug!(assignment_id, file_name, size = bytes.len(), "File attached to draft");
        self.drafts.entry(assignment_id).or_default().file = Some(SubmissionFile {
            file_name: file_name.to_string(),
            content_type: content_type_for(file_name).to_string(),
            bytes,
        });
        Ok(())
    }

    pub fn clear_file(&mut self, assignment_id: i64) {
        if let Some(draft) = self.drafts.get_mut(&assignment_id) {
            draft.file = None;
        }
    }

    /// 提交按钮是否可用：文本非空且该作业没有进行中的提交
    pub fn can_submit(&self, assignment_id: i64) -> bool {
        self.draft(assignment_id).is_some_and(SubmissionDraft::has_text)
            && !self.is_submitting(assignment_id)
    }
}
