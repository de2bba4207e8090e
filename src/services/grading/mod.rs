pub mod form;
pub mod list;

use std::sync::Arc;

use super::Notice;
use super::files::FilePreviewService;
use crate::client::LmsBackend;
use crate::errors::Result;
use crate::models::common::modal::ModalState;
use crate::models::submissions::entities::AssignmentSubmissions;
use crate::session::SessionContext;
use crate::utils::{BusyFlag, SelectionScope};

pub use form::GradingForm;
pub use list::{AssignmentLoad, GradingRow, PendingAssignmentLoad};

/// 作业评分视图（嵌入讲师课程页面）
pub struct GradingService {
    pub(crate) backend: Arc<dyn LmsBackend>,
    pub(crate) session: SessionContext,
    pub(crate) assignment_id: Option<i64>,
    pub(crate) data: Option<AssignmentSubmissions>,
    pub(crate) modal: ModalState<GradingForm>,
    pub(crate) preview: FilePreviewService,
    pub(crate) selection: SelectionScope,
    pub(crate) loading: BusyFlag,
    pub(crate) grading: BusyFlag,
    pub(crate) notice: Notice,
}

impl GradingService {
    pub fn new(backend: Arc<dyn LmsBackend>, session: SessionContext) -> Self {
        Self {
            preview: FilePreviewService::new(backend.clone()),
            backend,
            session,
            assignment_id: None,
            data: None,
            modal: ModalState::Closed,
            selection: SelectionScope::new(),
            loading: BusyFlag::new(),
            grading: BusyFlag::new(),
            notice: Notice::default(),
        }
    }

    pub fn assignment_id(&self) -> Option<i64> {
        self.assignment_id
    }

    pub fn data(&self) -> Option<&AssignmentSubmissions> {
        self.data.as_ref()
    }

    pub fn form(&self) -> Option<&GradingForm> {
        self.modal.payload()
    }

    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    pub fn preview(&self) -> &FilePreviewService {
        &self.preview
    }

    pub fn preview_mut(&mut self) -> &mut FilePreviewService {
        &mut self.preview
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_busy()
    }

    pub fn is_grading(&self) -> bool {
        self.grading.is_busy()
    }

    pub fn begin_load(&mut self, assignment_id: i64) -> PendingAssignmentLoad {
        list::begin_load(self, assignment_id)
    }

    pub fn apply_load(&mut self, load: AssignmentLoad) -> Result<()> {
        list::apply_load(self, load)
    }

    pub async fn load_assignment(&mut self, assignment_id: i64) -> Result<()> {
        let pending = self.begin_load(assignment_id);
        let _loading = self.loading.begin();
        let load = pending.fetch().await;
        self.apply_load(load)
    }

    pub fn rows(&self) -> Vec<GradingRow> {
        list::rows(self)
    }

    pub fn graded_count(&self) -> usize {
        self.data.as_ref().map_or(0, AssignmentSubmissions::graded_count)
    }

    pub fn ungraded_count(&self) -> usize {
        self.data
            .as_ref()
            .map_or(0, |d| d.submissions.len() - d.graded_count())
    }

    pub fn open_grading(&mut self, submission_id: i64) -> Result<()> {
        form::open_grading(self, submission_id)
    }

    pub fn set_score(&mut self, score: impl Into<String>) {
        if let Some(form) = self.modal.payload_mut() {
            form.score = score.into();
        }
    }

    pub fn set_feedback(&mut self, feedback: impl Into<String>) {
        if let Some(form) = self.modal.payload_mut() {
            form.feedback = feedback.into();
        }
    }

    pub fn close_grading(&mut self) {
        self.modal.close();
    }

    pub async fn submit_grade(&mut self) -> Result<()> {
        form::submit_grade(self).await
    }

    pub async fn preview_submission_file(&mut self, submission_id: i64) -> Result<()> {
        list::preview_submission_file(self, submission_id).await
    }

    /// 离开作业视图
    pub fn clear(&mut self) {
        self.selection.advance();
        self.assignment_id = None;
        self.data = None;
        self.modal.close();
        self.preview.close();
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::client::fake::{FakeBackend, assignment, submission};
    use crate::models::submissions::entities::SubmissionWithStudent;
    use crate::models::users::entities::UserRole;
    use crate::session::Session;

    pub fn row(id: i64, student_id: i64, score: Option<f64>) -> SubmissionWithStudent {
        let mut s = submission(id, student_id, 3);
        s.score = score;
        if score.is_some() {
            s.feedback = Some("good".to_string());
        }
        SubmissionWithStudent {
            submission: s,
            student_name: Some(format!("Student {student_id}")),
            student_email: None,
        }
    }

    pub fn fake() -> FakeBackend {
        FakeBackend::new().with(|s| {
            s.assignment_submissions.insert(
                3,
                AssignmentSubmissions {
                    assignment: assignment(3, 1, Some(100.0)),
                    submissions: vec![row(30, 1, None), row(31, 2, Some(85.0))],
                },
            );
            s.assignment_submissions.insert(
                4,
                AssignmentSubmissions {
                    assignment: assignment(4, 1, None),
                    submissions: vec![],
                },
            );
        })
    }

    pub fn service(backend: Arc<FakeBackend>) -> GradingService {
        let session = SessionContext::new();
        session.login(Session::new(9, UserRole::Instructor));
        GradingService::new(backend, session)
    }
}
