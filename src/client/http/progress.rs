use super::HttpBackend;
use crate::errors::Result;
use crate::models::progress::entities::{CompleteLessonRequest, LessonProgress};

impl HttpBackend {
    pub async fn get_lesson_progress_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Vec<LessonProgress>> {
        let url = self.endpoint(&[
            "progress",
            &student_id.to_string(),
            "course",
            &course_id.to_string(),
        ])?;
        self.get_json(url, "学习进度").await
    }

    pub async fn complete_lesson_impl(&self, request: CompleteLessonRequest) -> Result<()> {
        let url = self.endpoint(&["progress", "complete"])?;
        self.send_unit(self.client.post(url).json(&request), "完成课时")
            .await
    }
}
