use tracing::info;

use super::HttpBackend;
use crate::errors::Result;
use crate::models::courses::{
    entities::{Assignment, Course, CourseContent, Lesson},
    requests::{AssignmentPayload, LessonPayload},
};
use crate::models::submissions::{
    entities::AssignmentSubmissions, requests::GradeSubmissionRequest,
};

impl HttpBackend {
    pub async fn list_instructor_courses_impl(&self, instructor_id: i64) -> Result<Vec<Course>> {
        let url = self.endpoint(&["instructor", &instructor_id.to_string(), "courses"])?;
        self.get_json(url, "讲师课程").await
    }

    pub async fn list_student_courses_impl(&self, student_id: i64) -> Result<Vec<Course>> {
        let url = self.endpoint(&["students", &student_id.to_string(), "courses"])?;
        self.get_json(url, "学生课程").await
    }

    pub async fn get_course_content_impl(&self, course_id: i64) -> Result<CourseContent> {
        let url = self.endpoint(&["courses", &course_id.to_string(), "content"])?;
        self.get_json(url, "课程内容").await
    }

    pub async fn create_assignment_impl(&self, payload: AssignmentPayload) -> Result<Assignment> {
        let url = self.endpoint(&["assignments"])?;
        let response = self
            .send(self.client.post(url).json(&payload), "创建作业")
            .await?;
        let created: Assignment = Self::decode(response, "创建作业").await?;
        info!(assignment_id = created.id, course_id = payload.course_id, "Assignment created");
        Ok(created)
    }

    pub async fn update_assignment_impl(
        &self,
        assignment_id: i64,
        payload: AssignmentPayload,
    ) -> Result<Assignment> {
        let url = self.endpoint(&["assignments", &assignment_id.to_string()])?;
        let response = self
            .send(self.client.put(url).json(&payload), "更新作业")
            .await?;
        Self::decode(response, "更新作业").await
    }

    pub async fn delete_assignment_impl(&self, assignment_id: i64) -> Result<()> {
        let url = self.endpoint(&["assignments", &assignment_id.to_string()])?;
        self.send_unit(self.client.delete(url), "删除作业").await?;
        info!(assignment_id, "Assignment deleted");
        Ok(())
    }

    pub async fn create_lesson_impl(&self, payload: LessonPayload) -> Result<Lesson> {
        let url = self.endpoint(&["lessons"])?;
        let response = self
            .send(self.client.post(url).json(&payload), "创建课时")
            .await?;
        Self::decode(response, "创建课时").await
    }

    pub async fn update_lesson_impl(&self, lesson_id: i64, payload: LessonPayload) -> Result<Lesson> {
        let url = self.endpoint(&["lessons", &lesson_id.to_string()])?;
        let response = self
            .send(self.client.put(url).json(&payload), "更新课时")
            .await?;
        Self::decode(response, "更新课时").await
    }

    pub async fn delete_lesson_impl(&self, lesson_id: i64) -> Result<()> {
        let url = self.endpoint(&["lessons", &lesson_id.to_string()])?;
        self.send_unit(self.client.delete(url), "删除课时").await?;
        info!(lesson_id, "Lesson deleted");
        Ok(())
    }

    pub async fn get_assignment_submissions_impl(
        &self,
        assignment_id: i64,
    ) -> Result<AssignmentSubmissions> {
        let url = self.endpoint(&["assignments", &assignment_id.to_string(), "submissions"])?;
        self.get_json(url, "作业提交列表").await
    }

    pub async fn grade_submission_impl(
        &self,
        submission_id: i64,
        request: GradeSubmissionRequest,
    ) -> Result<()> {
        let url = self.endpoint(&[
            "assignments",
            "submissions",
            &submission_id.to_string(),
            "grade",
        ])?;
        self.send_unit(self.client.put(url).json(&request), "评分")
            .await?;
        info!(submission_id, score = request.score, "Submission graded");
        Ok(())
    }
}
