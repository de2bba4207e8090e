use serde::Serialize;
use std::sync::Arc;
use ts_rs::TS;
use tracing::debug;

use super::GradingService;
use crate::client::LmsBackend;
use crate::errors::{PortalError, Result};
use crate::models::files::entities::ViewerSource;
use crate::models::submissions::entities::{AssignmentSubmissions, SubmissionWithStudent};
use crate::utils::SelectionTicket;
use crate::utils::tiers::{GradeColor, grade_percentage};

/// 评分列表中的一行
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GradingRow {
    #[serde(flatten)]
    #[ts(flatten)]
    pub row: SubmissionWithStudent,
    pub percentage: Option<f64>,
    pub color: GradeColor,
}

pub struct PendingAssignmentLoad {
    ticket: SelectionTicket,
    backend: Arc<dyn LmsBackend>,
    assignment_id: i64,
}

pub struct AssignmentLoad {
    ticket: SelectionTicket,
    assignment_id: i64,
    result: Result<AssignmentSubmissions>,
}

impl PendingAssignmentLoad {
    pub async fn fetch(self) -> AssignmentLoad {
        let result = self
            .backend
            .get_assignment_submissions(self.assignment_id)
            .await;
        AssignmentLoad {
            ticket: self.ticket,
            assignment_id: self.assignment_id,
            result,
        }
    }
}

pub fn begin_load(service: &mut GradingService, assignment_id: i64) -> PendingAssignmentLoad {
    // 切换作业时关闭上一个作业的弹窗
    if service.assignment_id != Some(assignment_id) {
        service.modal.close();
        service.preview.close();
        service.data = None;
    }
    service.assignment_id = Some(assignment_id);
    PendingAssignmentLoad {
        ticket: service.selection.advance(),
        backend: service.backend.clone(),
        assignment_id,
    }
}

pub fn apply_load(service: &mut GradingService, load: AssignmentLoad) -> Result<()> {
    load.ticket.ensure_current("assignment submissions")?;
    let data = service.notice.track(load.result)?;
    debug!(
        assignment_id = load.assignment_id,
        submissions = data.submissions.len(),
        graded = data.graded_count(),
        "Assignment submissions loaded"
    );
    service.data = Some(data);
    Ok(())
}

pub fn rows(service: &GradingService) -> Vec<GradingRow> {
    let Some(data) = &service.data else {
        return Vec::new();
    };
    let max_points = data.assignment.max_points;
    data.submissions
        .iter()
        .map(|row| GradingRow {
            percentage: grade_percentage(row.submission.score, max_points),
            color: GradeColor::for_score(row.submission.score, max_points),
            row: row.clone(),
        })
        .collect()
}

pub async fn preview_submission_file(service: &mut GradingService, submission_id: i64) -> Result<()> {
    let file_name = service
        .data
        .as_ref()
        .and_then(|d| d.find(submission_id))
        .ok_or_else(|| PortalError::not_found(format!("提交 {submission_id} 不存在")))?
        .submission
        .stored_file_name()
        .ok_or_else(|| PortalError::not_found("该提交没有附件"))?
        .to_string();
    service
        .preview
        .open(&file_name, ViewerSource::GradingModal)
        .await
}
