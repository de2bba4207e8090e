use futures_util::future::join_all;
use serde::Serialize;
use ts_rs::TS;
use tracing::{debug, warn};

use super::SubmissionService;
use crate::errors::{PortalError, Result};
use crate::models::files::entities::ViewerSource;
use crate::models::submissions::entities::Submission;
use crate::utils::tiers::{GradeColor, grade_percentage};

/// 单个作业在学生视角下的状态
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(tag = "state", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum SubmissionView {
    NotSubmitted,
    // 已提交，等待评分
    Submitted {
        submission: Submission,
    },
    Graded {
        submission: Submission,
        percentage: Option<f64>,
        color: GradeColor,
    },
}

impl SubmissionView {
    pub fn derive(submission: Option<&Submission>, max_points: Option<f64>) -> Self {
        match submission {
            None => SubmissionView::NotSubmitted,
            Some(s) if s.is_graded() => SubmissionView::Graded {
                submission: s.clone(),
                percentage: grade_percentage(s.score, max_points),
                color: GradeColor::for_score(s.score, max_points),
            },
            Some(s) => SubmissionView::Submitted {
                submission: s.clone(),
            },
        }
    }
}

/// 并发拉取每个作业的提交状态，单个失败只影响该作业
pub async fn load_statuses(service: &mut SubmissionService, assignment_ids: &[i64]) -> Result<()> {
    let student_id = service.session.current()?.user_id;
    let _loading = service.loading.begin();

    let backend = service.backend.clone();
    let fetches = assignment_ids.iter().map(|&assignment_id| {
        let backend = backend.clone();
        async move {
            let result = backend
                .get_submission_status(student_id, assignment_id)
                .await;
            (assignment_id, result)
        }
    });

    let mut failed = 0;
    for (assignment_id, result) in join_all(fetches).await {
        let status = match result {
            Ok(status) => status,
            Err(e) => {
                failed += 1;
                warn!(assignment_id, error = %e, "Submission status fetch failed");
                None
            }
        };
        service.statuses.insert(assignment_id, status);
    }
    debug!(
        total = assignment_ids.len(),
        failed, "Submission statuses loaded"
    );
    Ok(())
}

/// 重新拉取单个作业的提交状态
pub(crate) async fn refresh_status(service: &mut SubmissionService, assignment_id: i64) -> Result<()> {
    let student_id = service.session.current()?.user_id;
    let result = service
        .backend
        .get_submission_status(student_id, assignment_id)
        .await;
    let status = service.notice.track(result)?;
    service.statuses.insert(assignment_id, status);
    Ok(())
}

/// 预览本人提交的附件，已评分的提交使用已评分入口
pub async fn preview_submission(service: &mut SubmissionService, assignment_id: i64) -> Result<()> {
    let submission = service
        .submission(assignment_id)
        .ok_or_else(|| PortalError::not_found(format!("作业 {assignment_id} 尚未提交")))?;
    let file_name = submission
        .stored_file_name()
        .ok_or_else(|| PortalError::not_found("该提交没有附件"))?
        .to_string();
    let source = if submission.is_graded() {
        ViewerSource::GradedSubmission
    } else {
        ViewerSource::Submission
    };
    service.preview.open(&file_name, source).await
}
