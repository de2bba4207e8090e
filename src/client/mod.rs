//! 后端 REST 客户端
//!
//! 所有视图服务都只通过 `LmsBackend` 访问后端，HTTP 实现位于 `http` 模块。

use chrono::NaiveDate;
use std::sync::Arc;

use crate::config::{BackendConfig, FilesConfig};
use crate::errors::Result;
use crate::models::{
    attendance::{
        entities::{
            AttendanceDateEntry, AttendanceRecord, AttendanceSummary, HistoryPage,
            StudentAttendanceStats,
        },
        requests::{HistoryQuery, MarkAttendanceRequest},
    },
    courses::{
        entities::{Assignment, Batch, Course, CourseContent, Lesson},
        requests::{AssignmentPayload, LessonPayload},
    },
    enrollments::{
        entities::Enrollment,
        requests::{EnrollRequest, PaymentProofRequest},
    },
    progress::entities::{CompleteLessonRequest, LessonProgress},
    submissions::{
        entities::{AssignmentSubmissions, Submission},
        requests::{GradeSubmissionRequest, SubmitAssignmentRequest},
    },
    users::entities::RosterStudent,
};

pub mod http;

#[cfg(test)]
pub(crate) mod fake;

#[async_trait::async_trait]
pub trait LmsBackend: Send + Sync {
    /// 课程管理方法
    // 讲师的课程
    async fn list_instructor_courses(&self, instructor_id: i64) -> Result<Vec<Course>>;
    // 学生可访问的课程（缴费已审核）
    async fn list_student_courses(&self, student_id: i64) -> Result<Vec<Course>>;
    // 课程内容（课时 + 作业）
    async fn get_course_content(&self, course_id: i64) -> Result<CourseContent>;
    // 创建作业
    async fn create_assignment(&self, payload: AssignmentPayload) -> Result<Assignment>;
    // 更新作业
    async fn update_assignment(
        &self,
        assignment_id: i64,
        payload: AssignmentPayload,
    ) -> Result<Assignment>;
    // 删除作业
    async fn delete_assignment(&self, assignment_id: i64) -> Result<()>;
    // 创建课时
    async fn create_lesson(&self, payload: LessonPayload) -> Result<Lesson>;
    // 更新课时
    async fn update_lesson(&self, lesson_id: i64, payload: LessonPayload) -> Result<Lesson>;
    // 删除课时
    async fn delete_lesson(&self, lesson_id: i64) -> Result<()>;

    /// 评分方法
    // 作业及全部提交
    async fn get_assignment_submissions(&self, assignment_id: i64)
    -> Result<AssignmentSubmissions>;
    // 评分
    async fn grade_submission(
        &self,
        submission_id: i64,
        request: GradeSubmissionRequest,
    ) -> Result<()>;

    /// 考勤方法
    // 讲师负责的批次
    async fn list_instructor_batches(&self, instructor_id: i64) -> Result<Vec<Batch>>;
    // 批次名册（已规范化）
    async fn get_batch_roster(&self, batch_id: i64) -> Result<Vec<RosterStudent>>;
    // 某日已存储的考勤记录
    async fn get_attendance_for_date(
        &self,
        batch_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>>;
    // 考勤历史（分页 + 过滤）
    async fn get_attendance_history(&self, query: HistoryQuery) -> Result<HistoryPage>;
    // 已点名日期
    async fn get_attendance_dates(&self, batch_id: i64) -> Result<Vec<AttendanceDateEntry>>;
    // 批次汇总
    async fn get_attendance_summary(&self, batch_id: i64) -> Result<AttendanceSummary>;
    // 学生统计
    async fn get_attendance_stats(&self, batch_id: i64) -> Result<Vec<StudentAttendanceStats>>;
    // 批量点名
    async fn mark_attendance(&self, request: MarkAttendanceRequest) -> Result<()>;

    /// 报名方法
    // 可报名批次
    async fn list_available_batches(&self) -> Result<Vec<Batch>>;
    // 学生的报名记录
    async fn list_student_enrollments(&self, student_id: i64) -> Result<Vec<Enrollment>>;
    // 报名
    async fn enroll(&self, request: EnrollRequest) -> Result<()>;
    // 提交缴费凭证
    async fn submit_payment_proof(
        &self,
        enrollment_id: i64,
        request: PaymentProofRequest,
    ) -> Result<()>;

    /// 文件与提交方法
    // 提交作业（multipart）
    async fn submit_assignment(&self, request: SubmitAssignmentRequest) -> Result<Submission>;
    // 学生某作业的提交状态，未提交时为 None
    async fn get_submission_status(
        &self,
        student_id: i64,
        assignment_id: i64,
    ) -> Result<Option<Submission>>;
    // 以文本形式获取文件内容
    async fn fetch_file_text(&self, file_name: &str) -> Result<String>;
    // 查看地址
    fn file_view_url(&self, file_name: &str) -> Result<String>;
    // 下载地址
    fn file_download_url(&self, file_name: &str) -> Result<String>;

    /// 学习进度方法
    async fn get_lesson_progress(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Vec<LessonProgress>>;
    async fn complete_lesson(&self, request: CompleteLessonRequest) -> Result<()>;
}

pub async fn create_backend(
    backend: &BackendConfig,
    files: &FilesConfig,
) -> Result<Arc<dyn LmsBackend>> {
    let client = http::HttpBackend::new(backend, files)?;
    Ok(Arc::new(client))
}
