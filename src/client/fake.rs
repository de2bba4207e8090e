//! 测试用内存后端
//!
//! 行为与真实接口保持一致：点名为整表 upsert、评分写回提交、报名初始为 pending。
//! `fail_on` 注入的失败以方法名为键。

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::LmsBackend;
use crate::errors::{PortalError, Result};
use crate::models::attendance::{
    entities::{
        AttendanceDateEntry, AttendanceRecord, AttendanceStatus, AttendanceSummary, HistoryPage,
        HistoryRecord, StudentAttendanceStats,
    },
    requests::{HistoryQuery, MarkAttendanceRequest},
};
use crate::models::courses::{
    entities::{Assignment, Batch, Course, CourseContent, Lesson},
    requests::{AssignmentPayload, LessonPayload},
};
use crate::models::enrollments::{
    entities::{Enrollment, PaymentStatus},
    requests::{EnrollRequest, PaymentProofRequest},
};
use crate::models::progress::entities::{CompleteLessonRequest, LessonProgress};
use crate::models::submissions::{
    entities::{AssignmentSubmissions, Submission},
    requests::{GradeSubmissionRequest, SubmitAssignmentRequest},
};
use crate::models::users::entities::RosterStudent;

#[derive(Debug, Default)]
pub(crate) struct FakeState {
    pub instructor_courses: Vec<Course>,
    pub student_courses: Vec<Course>,
    pub contents: HashMap<i64, CourseContent>,
    pub batches: Vec<Batch>,
    pub rosters: HashMap<i64, Vec<RosterStudent>>,
    pub stored: HashMap<(i64, NaiveDate), Vec<AttendanceRecord>>,
    pub history: Vec<HistoryRecord>,
    pub summary: Option<AttendanceSummary>,
    pub stats: Vec<StudentAttendanceStats>,
    pub available: Vec<Batch>,
    pub enrollments: Vec<Enrollment>,
    pub assignment_submissions: HashMap<i64, AssignmentSubmissions>,
    pub statuses: HashMap<(i64, i64), Submission>,
    pub progress: HashMap<(i64, i64), Vec<LessonProgress>>,
    pub texts: HashMap<String, String>,
    pub next_id: i64,

    pub marks: Vec<MarkAttendanceRequest>,
    pub grades: Vec<(i64, GradeSubmissionRequest)>,
    pub submitted: Vec<SubmitAssignmentRequest>,
    pub history_queries: Vec<HistoryQuery>,
    pub proofs: Vec<(i64, PaymentProofRequest)>,
    pub calls: Vec<String>,
    pub failing: HashSet<String>,
    pub failing_status_for: HashSet<i64>,
}

#[derive(Debug, Default)]
pub(crate) struct FakeBackend {
    pub state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F: FnOnce(&mut FakeState)>(self, f: F) -> Self {
        f(&mut *self.state.lock().unwrap());
        self
    }

    pub fn fail_on(&self, method: &str) {
        self.state.lock().unwrap().failing.insert(method.to_string());
    }

    pub fn recover(&self, method: &str) {
        self.state.lock().unwrap().failing.remove(method);
    }

    pub fn calls(&self, method: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.as_str() == method)
            .count()
    }

    fn enter(&self, method: &str) -> Result<std::sync::MutexGuard<'_, FakeState>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(method.to_string());
        if state.failing.contains(method) {
            return Err(PortalError::http_status(format!("{method}: 500 injected")));
        }
        Ok(state)
    }

    fn next_id(state: &mut FakeState) -> i64 {
        state.next_id += 1;
        1000 + state.next_id
    }
}

pub(crate) fn student(student_id: i64, name: &str, email: &str) -> RosterStudent {
    RosterStudent {
        student_id,
        name: name.to_string(),
        email: email.to_string(),
    }
}

pub(crate) fn submission(id: i64, student_id: i64, assignment_id: i64) -> Submission {
    Submission {
        id,
        student_id,
        assignment_id,
        submission_text: format!("answer {id}"),
        file_path: None,
        file_original_name: None,
        submitted_date: Some("2024-03-05T10:00:00.000Z".to_string()),
        score: None,
        feedback: None,
        graded_date: None,
    }
}

pub(crate) fn assignment(id: i64, course_id: i64, max_points: Option<f64>) -> Assignment {
    Assignment {
        id,
        course_id: Some(course_id),
        lesson_id: None,
        title: format!("HW{id}"),
        description: None,
        due_date: None,
        max_points,
    }
}

pub(crate) fn course(id: i64, title: &str) -> Course {
    Course {
        id,
        title: title.to_string(),
        description: None,
        instructor_id: Some(1),
    }
}

pub(crate) fn lesson(id: i64, course_id: i64, order_index: i64) -> Lesson {
    Lesson {
        id,
        course_id: Some(course_id),
        title: format!("Lesson {id}"),
        content: None,
        video_url: None,
        order_index: Some(order_index),
    }
}

pub(crate) fn batch(id: i64, name: &str) -> Batch {
    Batch {
        id,
        course_id: Some(1),
        name: name.to_string(),
        course_title: None,
        instructor_name: None,
        start_date: None,
        end_date: None,
    }
}

fn recount(records: &[AttendanceRecord], date: NaiveDate) -> AttendanceDateEntry {
    let count = |status| records.iter().filter(|r| r.status == status).count() as i64;
    AttendanceDateEntry {
        date,
        present_count: count(AttendanceStatus::Present),
        absent_count: count(AttendanceStatus::Absent),
        late_count: count(AttendanceStatus::Late),
    }
}

#[async_trait::async_trait]
impl LmsBackend for FakeBackend {
    async fn list_instructor_courses(&self, _instructor_id: i64) -> Result<Vec<Course>> {
        Ok(self.enter("list_instructor_courses")?.instructor_courses.clone())
    }

    async fn list_student_courses(&self, _student_id: i64) -> Result<Vec<Course>> {
        Ok(self.enter("list_student_courses")?.student_courses.clone())
    }

    async fn get_course_content(&self, course_id: i64) -> Result<CourseContent> {
        self.enter("get_course_content")?
            .contents
            .get(&course_id)
            .cloned()
            .ok_or_else(|| PortalError::not_found(format!("course {course_id}")))
    }

    async fn create_assignment(&self, payload: AssignmentPayload) -> Result<Assignment> {
        let mut state = self.enter("create_assignment")?;
        let created = Assignment {
            id: Self::next_id(&mut state),
            course_id: Some(payload.course_id),
            lesson_id: payload.lesson_id,
            title: payload.title,
            description: payload.description,
            due_date: payload.due_date,
            max_points: payload.max_points,
        };
        if let Some(content) = state.contents.get_mut(&payload.course_id) {
            content.assignments.push(created.clone());
        }
        Ok(created)
    }

    async fn update_assignment(
        &self,
        assignment_id: i64,
        payload: AssignmentPayload,
    ) -> Result<Assignment> {
        let mut state = self.enter("update_assignment")?;
        let content = state
            .contents
            .get_mut(&payload.course_id)
            .ok_or_else(|| PortalError::not_found("course"))?;
        let target = content
            .assignments
            .iter_mut()
            .find(|a| a.id == assignment_id)
            .ok_or_else(|| PortalError::not_found("assignment"))?;
        target.title = payload.title;
        target.description = payload.description;
        target.due_date = payload.due_date;
        target.max_points = payload.max_points;
        Ok(target.clone())
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<()> {
        let mut state = self.enter("delete_assignment")?;
        for content in state.contents.values_mut() {
            content.assignments.retain(|a| a.id != assignment_id);
        }
        Ok(())
    }

    async fn create_lesson(&self, payload: LessonPayload) -> Result<Lesson> {
        let mut state = self.enter("create_lesson")?;
        let created = Lesson {
            id: Self::next_id(&mut state),
            course_id: Some(payload.course_id),
            title: payload.title,
            content: payload.content,
            video_url: payload.video_url,
            order_index: payload.order_index,
        };
        if let Some(content) = state.contents.get_mut(&payload.course_id) {
            content.lessons.push(created.clone());
        }
        Ok(created)
    }

    async fn update_lesson(&self, lesson_id: i64, payload: LessonPayload) -> Result<Lesson> {
        let mut state = self.enter("update_lesson")?;
        let content = state
            .contents
            .get_mut(&payload.course_id)
            .ok_or_else(|| PortalError::not_found("course"))?;
        let target = content
            .lessons
            .iter_mut()
            .find(|l| l.id == lesson_id)
            .ok_or_else(|| PortalError::not_found("lesson"))?;
        target.title = payload.title;
        target.content = payload.content;
        target.video_url = payload.video_url;
        target.order_index = payload.order_index;
        Ok(target.clone())
    }

    async fn delete_lesson(&self, lesson_id: i64) -> Result<()> {
        let mut state = self.enter("delete_lesson")?;
        for content in state.contents.values_mut() {
            content.lessons.retain(|l| l.id != lesson_id);
        }
        Ok(())
    }

    async fn get_assignment_submissions(
        &self,
        assignment_id: i64,
    ) -> Result<AssignmentSubmissions> {
        self.enter("get_assignment_submissions")?
            .assignment_submissions
            .get(&assignment_id)
            .cloned()
            .ok_or_else(|| PortalError::not_found(format!("assignment {assignment_id}")))
    }

    async fn grade_submission(
        &self,
        submission_id: i64,
        request: GradeSubmissionRequest,
    ) -> Result<()> {
        let mut state = self.enter("grade_submission")?;
        for set in state.assignment_submissions.values_mut() {
            for row in set.submissions.iter_mut() {
                if row.submission.id == submission_id {
                    row.submission.score = Some(request.score as f64);
                    row.submission.feedback = Some(request.feedback.clone());
                    row.submission.graded_date = Some(request.graded_date.to_rfc3339());
                }
            }
        }
        state.grades.push((submission_id, request));
        Ok(())
    }

    async fn list_instructor_batches(&self, _instructor_id: i64) -> Result<Vec<Batch>> {
        Ok(self.enter("list_instructor_batches")?.batches.clone())
    }

    async fn get_batch_roster(&self, batch_id: i64) -> Result<Vec<RosterStudent>> {
        Ok(self
            .enter("get_batch_roster")?
            .rosters
            .get(&batch_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_attendance_for_date(
        &self,
        batch_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        Ok(self
            .enter("get_attendance_for_date")?
            .stored
            .get(&(batch_id, date))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_attendance_history(&self, query: HistoryQuery) -> Result<HistoryPage> {
        let mut state = self.enter("get_attendance_history")?;
        let matching: Vec<_> = state
            .history
            .iter()
            .filter(|r| query.start_date.is_none_or(|start| r.date >= start))
            .filter(|r| query.end_date.is_none_or(|end| r.date <= end))
            .filter(|r| query.status.is_none_or(|status| r.status == status))
            .cloned()
            .collect();
        let total = matching.len() as i64;
        let records = matching
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect();
        state.history_queries.push(query);
        Ok(HistoryPage { records, total })
    }

    async fn get_attendance_dates(&self, batch_id: i64) -> Result<Vec<AttendanceDateEntry>> {
        let state = self.enter("get_attendance_dates")?;
        let mut dates: Vec<AttendanceDateEntry> = state
            .stored
            .iter()
            .filter(|((b, _), _)| *b == batch_id)
            .map(|((_, date), records)| recount(records, *date))
            .collect();
        dates.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(dates)
    }

    async fn get_attendance_summary(&self, _batch_id: i64) -> Result<AttendanceSummary> {
        self.enter("get_attendance_summary")?
            .summary
            .clone()
            .ok_or_else(|| PortalError::not_found("summary"))
    }

    async fn get_attendance_stats(&self, _batch_id: i64) -> Result<Vec<StudentAttendanceStats>> {
        Ok(self.enter("get_attendance_stats")?.stats.clone())
    }

    async fn mark_attendance(&self, request: MarkAttendanceRequest) -> Result<()> {
        let mut state = self.enter("mark_attendance")?;
        let roster = state
            .rosters
            .get(&request.batch_id)
            .cloned()
            .unwrap_or_default();
        let mut records = Vec::new();
        for mark in &request.attendance {
            let id = Self::next_id(&mut state);
            let known = roster.iter().find(|s| s.student_id == mark.student_id);
            records.push(AttendanceRecord {
                id: Some(id),
                student_id: mark.student_id,
                student_name: known.map(|s| s.name.clone()).unwrap_or_default(),
                email: known.map(|s| s.email.clone()).unwrap_or_default(),
                status: mark.status,
            });
        }
        state.stored.insert((request.batch_id, request.date), records);
        state.marks.push(request);
        Ok(())
    }

    async fn list_available_batches(&self) -> Result<Vec<Batch>> {
        Ok(self.enter("list_available_batches")?.available.clone())
    }

    async fn list_student_enrollments(&self, student_id: i64) -> Result<Vec<Enrollment>> {
        Ok(self
            .enter("list_student_enrollments")?
            .enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn enroll(&self, request: EnrollRequest) -> Result<()> {
        let mut state = self.enter("enroll")?;
        if state
            .enrollments
            .iter()
            .any(|e| e.student_id == request.student_id && e.batch_id == request.batch_id)
        {
            return Err(PortalError::http_status("enroll: 400 Already enrolled"));
        }
        let id = Self::next_id(&mut state);
        state.enrollments.push(Enrollment {
            id,
            student_id: request.student_id,
            batch_id: request.batch_id,
            status: "enrolled".to_string(),
            payment_status: PaymentStatus::Pending,
            verification_notes: None,
            payment_proof: None,
            course_title: None,
            batch_name: None,
        });
        Ok(())
    }

    async fn submit_payment_proof(
        &self,
        enrollment_id: i64,
        request: PaymentProofRequest,
    ) -> Result<()> {
        let mut state = self.enter("submit_payment_proof")?;
        let enrollment = state
            .enrollments
            .iter_mut()
            .find(|e| e.id == enrollment_id)
            .ok_or_else(|| PortalError::not_found("enrollment"))?;
        enrollment.payment_status = PaymentStatus::Submitted;
        enrollment.payment_proof = Some(request.payment_proof.clone());
        state.proofs.push((enrollment_id, request));
        Ok(())
    }

    async fn submit_assignment(&self, request: SubmitAssignmentRequest) -> Result<Submission> {
        let mut state = self.enter("submit_assignment")?;
        let id = Self::next_id(&mut state);
        let mut created = submission(id, request.student_id, request.assignment_id);
        created.submission_text = request.submission_text.clone();
        if let Some(file) = &request.file {
            created.file_path = Some(format!("uploads/{id}-{}", file.file_name));
            created.file_original_name = Some(file.file_name.clone());
        }
        state
            .statuses
            .insert((request.student_id, request.assignment_id), created.clone());
        state.submitted.push(request);
        Ok(created)
    }

    async fn get_submission_status(
        &self,
        student_id: i64,
        assignment_id: i64,
    ) -> Result<Option<Submission>> {
        let state = self.enter("get_submission_status")?;
        if state.failing_status_for.contains(&assignment_id) {
            return Err(PortalError::network(format!(
                "status for assignment {assignment_id} unreachable"
            )));
        }
        Ok(state.statuses.get(&(student_id, assignment_id)).cloned())
    }

    async fn fetch_file_text(&self, file_name: &str) -> Result<String> {
        self.enter("fetch_file_text")?
            .texts
            .get(file_name)
            .cloned()
            .ok_or_else(|| PortalError::not_found(format!("file {file_name}")))
    }

    fn file_view_url(&self, file_name: &str) -> Result<String> {
        crate::utils::validate::validate_file_name(file_name)?;
        Ok(format!("http://fake/api/files/view/{file_name}"))
    }

    fn file_download_url(&self, file_name: &str) -> Result<String> {
        crate::utils::validate::validate_file_name(file_name)?;
        Ok(format!("http://fake/api/files/download/{file_name}"))
    }

    async fn get_lesson_progress(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Vec<LessonProgress>> {
        Ok(self
            .enter("get_lesson_progress")?
            .progress
            .get(&(student_id, course_id))
            .cloned()
            .unwrap_or_default())
    }

    async fn complete_lesson(&self, request: CompleteLessonRequest) -> Result<()> {
        let mut state = self.enter("complete_lesson")?;
        let course_id = state
            .contents
            .values()
            .find(|c| c.lessons.iter().any(|l| l.id == request.lesson_id))
            .map(|c| c.course.id)
            .ok_or_else(|| PortalError::not_found("lesson"))?;
        let entries = state
            .progress
            .entry((request.student_id, course_id))
            .or_default();
        match entries.iter_mut().find(|p| p.lesson_id == request.lesson_id) {
            Some(entry) => entry.completed = true,
            None => entries.push(LessonProgress {
                lesson_id: request.lesson_id,
                completed: true,
                completed_date: Some("2024-03-05T10:00:00.000Z".to_string()),
            }),
        }
        Ok(())
    }
}
