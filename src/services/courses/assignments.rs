use tracing::info;

use super::InstructorCoursesService;
use super::content::{reload_content, selected_course};
use crate::errors::{PortalError, Result};
use crate::models::courses::{entities::Assignment, requests::AssignmentPayload};

/// 载荷必须属于当前选中的课程
fn check_payload(service: &InstructorCoursesService, payload: &AssignmentPayload) -> Result<()> {
    service.session.current()?.require_staff()?;
    let course_id = selected_course(service)?;
    if payload.course_id != course_id {
        return Err(PortalError::validation(format!(
            "作业所属课程 {} 与当前课程 {course_id} 不一致",
            payload.course_id
        )));
    }
    payload.validate()
}

impl InstructorCoursesService {
    pub async fn create_assignment(&mut self, payload: AssignmentPayload) -> Result<Assignment> {
        let checked = check_payload(self, &payload);
        self.notice.track(checked)?;
        let Some(_saving) = self.saving.try_begin() else {
            return Err(PortalError::action_in_flight("正在保存课程内容"));
        };

        let result = self.backend.create_assignment(payload).await;
        let created = self.notice.track(result)?;
        info!(assignment_id = created.id, "Assignment created");
        reload_content(self).await;
        Ok(created)
    }

    pub async fn update_assignment(
        &mut self,
        assignment_id: i64,
        payload: AssignmentPayload,
    ) -> Result<Assignment> {
        let checked = check_payload(self, &payload);
        self.notice.track(checked)?;
        let Some(_saving) = self.saving.try_begin() else {
            return Err(PortalError::action_in_flight("正在保存课程内容"));
        };

        let result = self.backend.update_assignment(assignment_id, payload).await;
        let updated = self.notice.track(result)?;
        info!(assignment_id, "Assignment updated");
        reload_content(self).await;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use std::sync::Arc;

    use crate::models::courses::requests::AssignmentPayload;

    fn payload(course_id: i64, title: &str) -> AssignmentPayload {
        AssignmentPayload {
            course_id,
            lesson_id: None,
            title: title.to_string(),
            description: Some("Write a parser".to_string()),
            due_date: Some("2024-04-01T12:00:00Z".to_string()),
            max_points: Some(50.0),
        }
    }

    #[tokio::test]
    async fn test_create_refetches_content() {
        let backend = Arc::new(fake());
        let mut service = service(backend.clone());
        service.select_course(1).await.unwrap();

        let created = service.create_assignment(payload(1, "HW2")).await.unwrap();
        let content = service.content().unwrap();
        assert_eq!(content.assignments.len(), 2);
        assert_eq!(content.assignment(created.id).unwrap().title, "HW2");
        assert_eq!(backend.calls("get_course_content"), 2);
    }

    #[tokio::test]
    async fn test_create_succeeds_when_reload_fails() {
        let backend = Arc::new(fake());
        let mut service = service(backend.clone());
        service.select_course(1).await.unwrap();
        backend.fail_on("get_course_content");

        let created = service.create_assignment(payload(1, "HW2")).await.unwrap();
        assert_eq!(created.title, "HW2");
        assert_eq!(backend.calls("create_assignment"), 1);
        assert_eq!(service.notice().current().map(|e| e.code()), Some("E002"));
        // 保留上一次的内容
        assert_eq!(service.content().unwrap().assignments.len(), 1);
        assert!(!service.is_saving());
    }

    #[tokio::test]
    async fn test_blank_title_is_rejected_locally() {
        let backend = Arc::new(fake());
        let mut service = service(backend.clone());
        service.select_course(1).await.unwrap();

        let err = service.create_assignment(payload(1, "   ")).await.unwrap_err();
        assert_eq!(err.code(), "E004");
        assert_eq!(service.notice().current().map(|e| e.code()), Some("E004"));
        assert_eq!(backend.calls("create_assignment"), 0);
    }

    #[tokio::test]
    async fn test_payload_must_target_selected_course() {
        let backend = Arc::new(fake());
        let mut service = service(backend.clone());

        assert!(service.create_assignment(payload(1, "HW2")).await.is_err());
        service.select_course(1).await.unwrap();
        assert!(service.create_assignment(payload(2, "HW2")).await.is_err());
        assert_eq!(backend.calls("create_assignment"), 0);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let backend = Arc::new(fake());
        let mut service = service(backend);
        service.select_course(1).await.unwrap();

        service
            .update_assignment(3, payload(1, "HW1 (revised)"))
            .await
            .unwrap();
        let updated = service.content().unwrap().assignment(3).unwrap();
        assert_eq!(updated.title, "HW1 (revised)");
        assert_eq!(updated.max_points, Some(50.0));
    }
}
