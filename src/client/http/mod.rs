//! 基于 reqwest 的后端实现
//!
//! 每个请求附带 `x-request-id`，非 2xx 响应统一转换为 `PortalError`。

mod attendance;
mod courses;
mod enrollments;
mod files;
mod progress;

use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{Instrument, debug, warn};
use uuid::Uuid;

use crate::client::LmsBackend;
use crate::config::{BackendConfig, FilesConfig};
use crate::errors::{PortalError, Result};
use crate::models::attendance::{
    entities::{
        AttendanceDateEntry, AttendanceRecord, AttendanceSummary, HistoryPage,
        StudentAttendanceStats,
    },
    requests::{HistoryQuery, MarkAttendanceRequest},
};
use crate::models::common::response::ApiMessage;
use crate::models::courses::{
    entities::{Assignment, Batch, Course, CourseContent, Lesson},
    requests::{AssignmentPayload, LessonPayload},
};
use crate::models::enrollments::{
    entities::Enrollment,
    requests::{EnrollRequest, PaymentProofRequest},
};
use crate::models::progress::entities::{CompleteLessonRequest, LessonProgress};
use crate::models::submissions::{
    entities::{AssignmentSubmissions, Submission},
    requests::{GradeSubmissionRequest, SubmitAssignmentRequest},
};
use crate::models::users::entities::RosterStudent;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct HttpBackend {
    pub(crate) client: Client,
    pub(crate) api_root: Url,
    view_path: Vec<String>,
    download_path: Vec<String>,
}

fn split_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl HttpBackend {
    pub fn new(backend: &BackendConfig, files: &FilesConfig) -> Result<Self> {
        let root = format!(
            "{}/{}",
            backend.base_url.trim_end_matches('/'),
            backend.api_prefix.trim_matches('/')
        );
        let api_root = Url::parse(&root)
            .map_err(|e| PortalError::configuration(format!("后端地址无效 '{root}': {e}")))?;
        if api_root.cannot_be_a_base() {
            return Err(PortalError::configuration(format!(
                "后端地址不能作为基础地址: {root}"
            )));
        }

        let client = Client::builder()
            .user_agent(&backend.user_agent)
            .connect_timeout(Duration::from_millis(backend.timeouts.connect_ms))
            .timeout(Duration::from_millis(backend.timeouts.request_ms))
            .build()
            .map_err(|e| PortalError::network(format!("Failed to build HTTP client: {e}")))?;

        debug!(api_root = %api_root, "HTTP backend created");

        Ok(Self {
            client,
            api_root,
            view_path: split_path(&files.view_path),
            download_path: split_path(&files.download_path),
        })
    }

    /// 在 API 根地址后追加路径段（逐段百分号编码）
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_root.clone();
        url.path_segments_mut()
            .map_err(|_| PortalError::configuration("后端地址不能追加路径"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn file_url(&self, download: bool, file_name: &str) -> Result<Url> {
        let base = if download {
            &self.download_path
        } else {
            &self.view_path
        };
        let mut segments: Vec<&str> = base.iter().map(String::as_str).collect();
        segments.push(file_name);
        self.endpoint(&segments)
    }

    /// 发送请求并检查状态码
    pub(crate) async fn send(&self, builder: RequestBuilder, what: &str) -> Result<Response> {
        let request_id = Uuid::new_v4().to_string();
        let span = tracing::debug_span!("backend_request", request_id = %request_id, what);

        async move {
            let response = builder
                .header(REQUEST_ID_HEADER, &request_id)
                .send()
                .await
                .map_err(|e| PortalError::network(format!("{what}请求失败: {e}")))?;

            let status = response.status();
            if status.is_success() {
                debug!(status = %status, "Backend request succeeded");
                return Ok(response);
            }

            let body = response.text().await.unwrap_or_default();
            let detail = ApiMessage::extract(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());
            warn!(status = %status, detail = %detail, "Backend returned error status");

            if status == StatusCode::NOT_FOUND {
                Err(PortalError::not_found(format!("{what}: {detail}")))
            } else {
                Err(PortalError::http_status(format!(
                    "{what}: {} {detail}",
                    status.as_u16()
                )))
            }
        }
        .instrument(span)
        .await
    }

    /// 解析响应体；结构不符时返回 ShapeMismatch
    pub(crate) async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| PortalError::network(format!("{what}响应读取失败: {e}")))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| PortalError::shape_mismatch(format!("{what}响应结构不符: {e}")))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        let response = self.send(self.client.get(url), what).await?;
        Self::decode(response, what).await
    }

    /// 忽略响应体，只关心是否成功
    pub(crate) async fn send_unit(&self, builder: RequestBuilder, what: &str) -> Result<()> {
        self.send(builder, what).await.map(|_| ())
    }
}

#[async_trait::async_trait]
impl LmsBackend for HttpBackend {
    async fn list_instructor_courses(&self, instructor_id: i64) -> Result<Vec<Course>> {
        self.list_instructor_courses_impl(instructor_id).await
    }

    async fn list_student_courses(&self, student_id: i64) -> Result<Vec<Course>> {
        self.list_student_courses_impl(student_id).await
    }

    async fn get_course_content(&self, course_id: i64) -> Result<CourseContent> {
        self.get_course_content_impl(course_id).await
    }

    async fn create_assignment(&self, payload: AssignmentPayload) -> Result<Assignment> {
        self.create_assignment_impl(payload).await
    }

    async fn update_assignment(
        &self,
        assignment_id: i64,
        payload: AssignmentPayload,
    ) -> Result<Assignment> {
        self.update_assignment_impl(assignment_id, payload).await
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<()> {
        self.delete_assignment_impl(assignment_id).await
    }

    async fn create_lesson(&self, payload: LessonPayload) -> Result<Lesson> {
        self.create_lesson_impl(payload).await
    }

    async fn update_lesson(&self, lesson_id: i64, payload: LessonPayload) -> Result<Lesson> {
        self.update_lesson_impl(lesson_id, payload).await
    }

    async fn delete_lesson(&self, lesson_id: i64) -> Result<()> {
        self.delete_lesson_impl(lesson_id).await
    }

    async fn get_assignment_submissions(
        &self,
        assignment_id: i64,
    ) -> Result<AssignmentSubmissions> {
        self.get_assignment_submissions_impl(assignment_id).await
    }

    async fn grade_submission(
        &self,
        submission_id: i64,
        request: GradeSubmissionRequest,
    ) -> Result<()> {
        self.grade_submission_impl(submission_id, request).await
    }

    async fn list_instructor_batches(&self, instructor_id: i64) -> Result<Vec<Batch>> {
        self.list_instructor_batches_impl(instructor_id).await
    }

    async fn get_batch_roster(&self, batch_id: i64) -> Result<Vec<RosterStudent>> {
        self.get_batch_roster_impl(batch_id).await
    }

    async fn get_attendance_for_date(
        &self,
        batch_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        self.get_attendance_for_date_impl(batch_id, date).await
    }

    async fn get_attendance_history(&self, query: HistoryQuery) -> Result<HistoryPage> {
        self.get_attendance_history_impl(query).await
    }

    async fn get_attendance_dates(&self, batch_id: i64) -> Result<Vec<AttendanceDateEntry>> {
        self.get_attendance_dates_impl(batch_id).await
    }

    async fn get_attendance_summary(&self, batch_id: i64) -> Result<AttendanceSummary> {
        self.get_attendance_summary_impl(batch_id).await
    }

    async fn get_attendance_stats(&self, batch_id: i64) -> Result<Vec<StudentAttendanceStats>> {
        self.get_attendance_stats_impl(batch_id).await
    }

    async fn mark_attendance(&self, request: MarkAttendanceRequest) -> Result<()> {
        self.mark_attendance_impl(request).await
    }

    async fn list_available_batches(&self) -> Result<Vec<Batch>> {
        self.list_available_batches_impl().await
    }

    async fn list_student_enrollments(&self, student_id: i64) -> Result<Vec<Enrollment>> {
        self.list_student_enrollments_impl(student_id).await
    }

    async fn enroll(&self, request: EnrollRequest) -> Result<()> {
        self.enroll_impl(request).await
    }

    async fn submit_payment_proof(
        &self,
        enrollment_id: i64,
        request: PaymentProofRequest,
    ) -> Result<()> {
        self.submit_payment_proof_impl(enrollment_id, request).await
    }

    async fn submit_assignment(&self, request: SubmitAssignmentRequest) -> Result<Submission> {
        self.submit_assignment_impl(request).await
    }

    async fn get_submission_status(
        &self,
        student_id: i64,
        assignment_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_status_impl(student_id, assignment_id)
            .await
    }

    async fn fetch_file_text(&self, file_name: &str) -> Result<String> {
        self.fetch_file_text_impl(file_name).await
    }

    fn file_view_url(&self, file_name: &str) -> Result<String> {
        self.file_view_url_impl(file_name)
    }

    fn file_download_url(&self, file_name: &str) -> Result<String> {
        self.file_download_url_impl(file_name)
    }

    async fn get_lesson_progress(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Vec<LessonProgress>> {
        self.get_lesson_progress_impl(student_id, course_id).await
    }

    async fn complete_lesson(&self, request: CompleteLessonRequest) -> Result<()> {
        self.complete_lesson_impl(request).await
    }
}
