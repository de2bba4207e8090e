use tracing::{info, warn};

use super::CourseAccessService;
use crate::errors::{PortalError, Result};
use crate::models::progress::entities::CompleteLessonRequest;
use crate::utils::tiers::{percentage, round2};

pub fn is_completed(service: &CourseAccessService, lesson_id: i64) -> bool {
    service
        .progress
        .iter()
        .any(|p| p.lesson_id == lesson_id && p.completed)
}

/// 已完成课时占全部课时的百分比，没有课时时为 0
pub fn progress_percentage(service: &CourseAccessService) -> f64 {
    let Some(content) = &service.content else {
        return 0.0;
    };
    let total = content.lessons.len() as i64;
    let done = content
        .lessons
        .iter()
        .filter(|l| is_completed(service, l.id))
        .count() as i64;
    round2(percentage(done, total))
}

/// 标记课时完成（单向，不能撤销）
pub async fn complete_lesson(service: &mut CourseAccessService, lesson_id: i64) -> Result<()> {
    let session = service.notice.track(service.session.current())?;
    let Some(course_id) = service.course_id else {
        return Err(PortalError::validation("请先选择课程"));
    };
    let known = service
        .content
        .as_ref()
        .is_some_and(|c| c.lessons.iter().any(|l| l.id == lesson_id));
    if !known {
        return Err(PortalError::not_found(format!(
            "当前课程中没有课时 {lesson_id}"
        )));
    }
    if is_completed(service, lesson_id) {
        let err = PortalError::invalid_transition(format!("课时 {lesson_id} 已完成"));
        service.notice.record(&err);
        return Err(err);
    }
    let Some(_completing) = service.completing.try_begin() else {
        return Err(PortalError::action_in_flight("正在标记课时完成"));
    };

    let ticket = service.selection.current();
    let request = CompleteLessonRequest {
        student_id: session.user_id,
        lesson_id,
    };
    let result = service.backend.complete_lesson(request).await;
    service.notice.track(result)?;
    info!(lesson_id, course_id, "Lesson completed");

    let refreshed = service
        .backend
        .get_lesson_progress(session.user_id, course_id)
        .await;
    if ticket.ensure_current("lesson progress").is_err() {
        return Ok(());
    }
    match service.notice.track(refreshed) {
        Ok(progress) => service.progress = progress,
        Err(e) => warn!(lesson_id, error = %e, "Progress refresh after completion failed"),
    }
    Ok(())
}
