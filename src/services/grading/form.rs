//! 评分弹窗

use chrono::Utc;
use serde::Serialize;
use ts_rs::TS;
use tracing::{debug, info, warn};

use super::GradingService;
use crate::errors::{PortalError, Result};
use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::utils::validate::validate_score_input;

/// 评分表单，分数保留原始输入直到提交时再解析
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GradingForm {
    pub submission_id: i64,
    pub score: String,
    pub feedback: String,
}

/// 打开评分弹窗，用提交已有的分数和评语填充（未评分时为空）
pub fn open_grading(service: &mut GradingService, submission_id: i64) -> Result<()> {
    let row = service
        .data
        .as_ref()
        .and_then(|d| d.find(submission_id))
        .ok_or_else(|| PortalError::not_found(format!("提交 {submission_id} 不存在")))?;

    let form = GradingForm {
        submission_id,
        score: row
            .submission
            .score
            .map(|s| format!("{}", s.round() as i64))
            .unwrap_or_default(),
        feedback: row.submission.feedback.clone().unwrap_or_default(),
    };
    debug!(submission_id, "Grading modal opened");
    service.modal.open(form);
    Ok(())
}

/// 提交评分
///
/// 分数必填且为整数，不与满分比较。成功后关闭弹窗并重新拉取整个提交列表，
/// 重新拉取失败只更新横幅，评分本身仍算成功。
pub async fn submit_grade(service: &mut GradingService) -> Result<()> {
    let session = service.notice.track(service.session.current())?;
    service.notice.track(session.require_staff())?;
    let form = service
        .modal
        .payload()
        .cloned()
        .ok_or_else(|| PortalError::validation("评分弹窗未打开"))?;
    let score = service.notice.track(validate_score_input(&form.score))?;
    let assignment_id = service
        .assignment_id
        .ok_or_else(|| PortalError::validation("请先选择作业"))?;

    let Some(_grading) = service.grading.try_begin() else {
        return Err(PortalError::action_in_flight("评分正在提交"));
    };

    let request = GradeSubmissionRequest {
        score,
        feedback: form.feedback.trim().to_string(),
        graded_by: session.user_id,
        graded_date: Utc::now(),
    };
    let result = service
        .backend
        .grade_submission(form.submission_id, request)
        .await;
    service.notice.track(result)?;
    info!(
        submission_id = form.submission_id,
        score, "Grade saved, reloading submissions"
    );

    service.modal.close();
    let pending = service.begin_load(assignment_id);
    let load = pending.fetch().await;
    if let Err(e) = service.apply_load(load) {
        warn!(assignment_id, error = %e, "Submission reload after grading failed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_form_seeded_from_submission() {
        let backend = Arc::new(fake());
        let mut service = service(backend);
        service.load_assignment(3).await.unwrap();

        service.open_grading(30).unwrap();
        let form = service.form().unwrap();
        assert_eq!((form.score.as_str(), form.feedback.as_str()), ("", ""));

        service.open_grading(31).unwrap();
        let form = service.form().unwrap();
        assert_eq!(form.score, "85");
        assert_eq!(form.feedback, "good");

        assert!(service.open_grading(99).is_err());
        service.close_grading();
        assert!(service.form().is_none());
    }

    #[tokio::test]
    async fn test_score_validation_blocks_request() {
        let backend = Arc::new(fake());
        let mut service = service(backend.clone());
        service.load_assignment(3).await.unwrap();
        service.open_grading(30).unwrap();

        service.set_score("");
        assert_eq!(service.submit_grade().await.unwrap_err().code(), "E004");
        service.set_score("eighty");
        assert_eq!(service.submit_grade().await.unwrap_err().code(), "E004");
        assert_eq!(backend.calls("grade_submission"), 0);
        assert!(service.form().is_some());
    }

    #[tokio::test]
    async fn test_submit_grade_refetches_and_closes() {
        let backend = Arc::new(fake());
        let mut service = service(backend.clone());
        service.load_assignment(3).await.unwrap();
        service.open_grading(30).unwrap();
        service.set_score(" 92 ");
        service.set_feedback("Well argued");

        service.submit_grade().await.unwrap();

        {
            let state = backend.state.lock().unwrap();
            let (submission_id, request) = state.grades.last().unwrap();
            assert_eq!(*submission_id, 30);
            assert_eq!(request.score, 92);
            assert_eq!(request.feedback, "Well argued");
            assert_eq!(request.graded_by, 9);
        }
        assert!(service.form().is_none());
        assert_eq!(backend.calls("get_assignment_submissions"), 2);
        assert_eq!(service.graded_count(), 2);
        assert_eq!(service.ungraded_count(), 0);
        assert!(!service.is_grading());
    }

    #[tokio::test]
    async fn test_reload_failure_after_grade_still_closes() {
        let backend = Arc::new(fake());
        let mut service = service(backend.clone());
        service.load_assignment(3).await.unwrap();
        service.open_grading(30).unwrap();
        service.set_score("92");
        backend.fail_on("get_assignment_submissions");

        service.submit_grade().await.unwrap();
        assert_eq!(backend.state.lock().unwrap().grades.len(), 1);
        assert!(service.form().is_none());
        assert_eq!(service.notice().current().map(|e| e.code()), Some("E002"));
        assert!(!service.is_grading());
    }

    #[tokio::test]
    async fn test_decimal_score_reopens_as_integer() {
        let backend = Arc::new(fake().with(|s| {
            let data = s.assignment_submissions.get_mut(&3).unwrap();
            data.submissions[1].submission.score = Some(85.5);
        }));
        let mut service = service(backend.clone());
        service.load_assignment(3).await.unwrap();

        service.open_grading(31).unwrap();
        assert_eq!(service.form().unwrap().score, "86");
        service.submit_grade().await.unwrap();
        assert_eq!(backend.state.lock().unwrap().grades[0].1.score, 86);
    }

    #[tokio::test]
    async fn test_score_above_max_is_left_to_backend() {
        let backend = Arc::new(fake());
        let mut service = service(backend.clone());
        service.load_assignment(3).await.unwrap();
        service.open_grading(30).unwrap();
        service.set_score("150");

        service.submit_grade().await.unwrap();
        assert_eq!(backend.state.lock().unwrap().grades[0].1.score, 150);
    }

    #[tokio::test]
    async fn test_failed_grade_keeps_modal_open() {
        let backend = Arc::new(fake());
        backend.fail_on("grade_submission");
        let mut service = service(backend.clone());
        service.load_assignment(3).await.unwrap();
        service.open_grading(30).unwrap();
        service.set_score("70");

        assert!(service.submit_grade().await.is_err());
        assert_eq!(service.form().map(|f| f.score.as_str()), Some("70"));
        assert!(!service.is_grading());
        assert_eq!(backend.calls("get_assignment_submissions"), 1);
    }
}
