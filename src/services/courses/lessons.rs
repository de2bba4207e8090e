use tracing::info;

use super::InstructorCoursesService;
use super::content::{reload_content, selected_course};
use crate::errors::{PortalError, Result};
use crate::models::courses::{entities::Lesson, requests::LessonPayload};

fn check_payload(service: &InstructorCoursesService, payload: &LessonPayload) -> Result<()> {
    service.session.current()?.require_staff()?;
    let course_id = selected_course(service)?;
    if payload.course_id != course_id {
        return Err(PortalError::validation(format!(
            "课时所属课程 {} 与当前课程 {course_id} 不一致",
            payload.course_id
        )));
    }
    payload.validate()
}

impl InstructorCoursesService {
    pub async fn create_lesson(&mut self, payload: LessonPayload) -> Result<Lesson> {
        let checked = check_payload(self, &payload);
        self.notice.track(checked)?;
        let Some(_saving) = self.saving.try_begin() else {
            return Err(PortalError::action_in_flight("正在保存课程内容"));
        };

        let result = self.backend.create_lesson(payload).await;
        let created = self.notice.track(result)?;
        info!(lesson_id = created.id, "Lesson created");
        reload_content(self).await;
        Ok(created)
    }

    pub async fn update_lesson(&mut self, lesson_id: i64, payload: LessonPayload) -> Result<Lesson> {
        let checked = check_payload(self, &payload);
        self.notice.track(checked)?;
        let Some(_saving) = self.saving.try_begin() else {
            return Err(PortalError::action_in_flight("正在保存课程内容"));
        };

        let result = self.backend.update_lesson(lesson_id, payload).await;
        let updated = self.notice.track(result)?;
        info!(lesson_id, "Lesson updated");
        reload_content(self).await;
        Ok(updated)
    }
}
