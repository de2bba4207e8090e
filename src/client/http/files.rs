use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use super::HttpBackend;
use crate::errors::{PortalError, Result};
use crate::models::submissions::{entities::Submission, requests::SubmitAssignmentRequest};
use crate::utils::validate::validate_file_name;

impl HttpBackend {
    pub async fn submit_assignment_impl(
        &self,
        request: SubmitAssignmentRequest,
    ) -> Result<Submission> {
        let url = self.endpoint(&["files", "submit"])?;

        let mut form = Form::new()
            .text("student_id", request.student_id.to_string())
            .text("assignment_id", request.assignment_id.to_string())
            .text("submission_text", request.submission_text);

        if let Some(file) = request.file {
            let size = file.bytes.len();
            let part = Part::bytes(file.bytes)
                .file_name(file.file_name.clone())
                .mime_str(&file.content_type)
                .map_err(|e| {
                    PortalError::validation(format!("文件类型无效 '{}': {e}", file.content_type))
                })?;
            debug!(file_name = %file.file_name, size, "Attaching submission file");
            form = form.part("file", part);
        }

        let response = self
            .send(self.client.post(url).multipart(form), "提交作业")
            .await?;
        let submission: Submission = Self::decode(response, "提交作业").await?;
        info!(
            submission_id = submission.id,
            assignment_id = submission.assignment_id,
            "Assignment submitted"
        );
        Ok(submission)
    }

    /// 404 与空响应都视为未提交
    pub async fn get_submission_status_impl(
        &self,
        student_id: i64,
        assignment_id: i64,
    ) -> Result<Option<Submission>> {
        let url = self.endpoint(&[
            "files",
            "submission",
            &student_id.to_string(),
            &assignment_id.to_string(),
        ])?;
        match self.get_json::<Option<Submission>>(url, "提交状态").await {
            Ok(found) => Ok(found),
            Err(PortalError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn fetch_file_text_impl(&self, file_name: &str) -> Result<String> {
        validate_file_name(file_name)?;
        let url = self.file_url(false, file_name)?;
        let response = self.send(self.client.get(url), "文件内容").await?;
        response
            .text()
            .await
            .map_err(|e| PortalError::file_preview(format!("读取文件内容失败: {e}")))
    }

    pub fn file_view_url_impl(&self, file_name: &str) -> Result<String> {
        validate_file_name(file_name)?;
        Ok(self.file_url(false, file_name)?.to_string())
    }

    pub fn file_download_url_impl(&self, file_name: &str) -> Result<String> {
        validate_file_name(file_name)?;
        Ok(self.file_url(true, file_name)?.to_string())
    }
}
