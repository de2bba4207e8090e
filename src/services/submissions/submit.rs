use tracing::{info, warn};

use super::SubmissionService;
use super::status::refresh_status;
use crate::errors::{PortalError, Result};
use crate::models::submissions::{entities::Submission, requests::SubmitAssignmentRequest};
use crate::utils::validate::validate_required_text;

/// 提交或重新提交作业
///
/// 成功后清空该作业的草稿并重新拉取提交状态；失败时草稿保留。
pub async fn submit(service: &mut SubmissionService, assignment_id: i64) -> Result<Submission> {
    let session = service.notice.track(service.session.current())?;
    let draft = service.drafts.get(&assignment_id).cloned().unwrap_or_default();
    let text = service
        .notice
        .track(validate_required_text("提交内容", &draft.text))?;

    let flag = service.submitting.entry(assignment_id).or_default().clone();
    let Some(_submitting) = flag.try_begin() else {
        return Err(PortalError::action_in_flight("该作业正在提交"));
    };

    let request = SubmitAssignmentRequest {
        student_id: session.user_id,
        assignment_id,
        submission_text: text,
        file: draft.file,
    };
    let result = service.backend.submit_assignment(request).await;
    let created = service.notice.track(result)?;
    info!(
        assignment_id,
        submission_id = created.id,
        "Assignment submission accepted"
    );

    service.drafts.remove(&assignment_id);
    service.statuses.insert(assignment_id, Some(created.clone()));
    if let Err(e) = refresh_status(service, assignment_id).await {
        warn!(assignment_id, error = %e, "Status refresh after submit failed");
    }
    Ok(created)
}
