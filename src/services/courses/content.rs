use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{DeleteTarget, InstructorCoursesService};
use crate::client::LmsBackend;
use crate::errors::{PortalError, Result};
use crate::models::courses::entities::CourseContent;
use crate::utils::SelectionTicket;

pub struct PendingContentLoad {
    ticket: SelectionTicket,
    backend: Arc<dyn LmsBackend>,
    course_id: i64,
}

pub struct ContentLoad {
    ticket: SelectionTicket,
    course_id: i64,
    result: Result<CourseContent>,
}

impl PendingContentLoad {
    pub async fn fetch(self) -> ContentLoad {
        let result = self.backend.get_course_content(self.course_id).await;
        ContentLoad {
            ticket: self.ticket,
            course_id: self.course_id,
            result,
        }
    }
}

pub async fn load_courses(service: &mut InstructorCoursesService) -> Result<()> {
    let session = service.notice.track(service.session.current())?;
    service.notice.track(session.require_staff())?;

    let _loading = service.loading.begin();
    let result = service
        .backend
        .list_instructor_courses(session.user_id)
        .await;
    service.courses = service.notice.track(result)?;
    debug!(count = service.courses.len(), "Instructor courses loaded");
    Ok(())
}

pub fn begin_select_course(
    service: &mut InstructorCoursesService,
    course_id: i64,
) -> Result<PendingContentLoad> {
    service.session.current()?.require_staff()?;

    service.course_id = Some(course_id);
    service.content = None;
    service.confirm_delete.close();
    service.grading.clear();

    Ok(PendingContentLoad {
        ticket: service.selection.advance(),
        backend: service.backend.clone(),
        course_id,
    })
}

pub fn apply_content_load(service: &mut InstructorCoursesService, load: ContentLoad) -> Result<()> {
    load.ticket.ensure_current("course content")?;
    let content = service.notice.track(load.result)?;
    debug!(
        course_id = load.course_id,
        lessons = content.lessons.len(),
        assignments = content.assignments.len(),
        "Course content loaded"
    );
    service.content = Some(content);
    Ok(())
}

/// 增删改之后重新拉取当前课程内容
///
/// 变更已经提交，重新拉取失败只记录到横幅，不影响调用方的结果。
pub(crate) async fn reload_content(service: &mut InstructorCoursesService) {
    let Some(course_id) = service.course_id else {
        return;
    };
    let load = PendingContentLoad {
        ticket: service.selection.current(),
        backend: service.backend.clone(),
        course_id,
    }
    .fetch()
    .await;
    if let Err(e) = apply_content_load(service, load) {
        warn!(course_id, error = %e, "Course content reload after change failed");
    }
}

pub(crate) fn selected_course(service: &InstructorCoursesService) -> Result<i64> {
    service
        .course_id
        .ok_or_else(|| PortalError::validation("请先选择课程"))
}

pub async fn select_assignment(
    service: &mut InstructorCoursesService,
    assignment_id: i64,
) -> Result<()> {
    let known = service
        .content
        .as_ref()
        .is_some_and(|c| c.assignment(assignment_id).is_some());
    if !known {
        return Err(PortalError::not_found(format!(
            "当前课程中没有作业 {assignment_id}"
        )));
    }
    service.grading.load_assignment(assignment_id).await
}

pub async fn confirm_delete(service: &mut InstructorCoursesService) -> Result<()> {
    let target = service
        .confirm_delete
        .payload()
        .cloned()
        .ok_or_else(|| PortalError::validation("没有待确认的删除"))?;
    let Some(_saving) = service.saving.try_begin() else {
        return Err(PortalError::action_in_flight("正在保存课程内容"));
    };

    let result = match &target {
        DeleteTarget::Assignment { id, .. } => service.backend.delete_assignment(*id).await,
        DeleteTarget::Lesson { id, .. } => service.backend.delete_lesson(*id).await,
    };
    service.notice.track(result)?;
    service.confirm_delete.close();

    if let DeleteTarget::Assignment { id, .. } = &target
        && service.grading.assignment_id() == Some(*id)
    {
        service.grading.clear();
    }
    info!(item = ?target, "Course item deleted");
    reload_content(service).await;
    Ok(())
}
