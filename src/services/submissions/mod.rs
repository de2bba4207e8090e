pub mod drafts;
pub mod status;
pub mod submit;

use std::collections::HashMap;
use std::sync::Arc;

use super::Notice;
use super::files::FilePreviewService;
use crate::client::LmsBackend;
use crate::errors::Result;
use crate::models::courses::entities::Assignment;
use crate::models::submissions::entities::Submission;
use crate::session::SessionContext;
use crate::utils::BusyFlag;

pub use drafts::SubmissionDraft;
pub use status::SubmissionView;

/// 学生作业提交（嵌入课程页面）
///
/// 每个作业有独立的草稿与提交状态，互不影响。
pub struct SubmissionService {
    pub(crate) backend: Arc<dyn LmsBackend>,
    pub(crate) session: SessionContext,
    pub(crate) drafts: HashMap<i64, SubmissionDraft>,
    pub(crate) statuses: HashMap<i64, Option<Submission>>,
    pub(crate) submitting: HashMap<i64, BusyFlag>,
    pub(crate) loading: BusyFlag,
    pub(crate) preview: FilePreviewService,
    pub(crate) notice: Notice,
}

impl SubmissionService {
    pub fn new(backend: Arc<dyn LmsBackend>, session: SessionContext) -> Self {
        Self {
            preview: FilePreviewService::new(backend.clone()),
            backend,
            session,
            drafts: HashMap::new(),
            statuses: HashMap::new(),
            submitting: HashMap::new(),
            loading: BusyFlag::new(),
            notice: Notice::default(),
        }
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

    /// 某作业是否正在提交
    pub fn is_submitting(&self, assignment_id: i64) -> bool {
        self.submitting
            .get(&assignment_id)
            .is_some_and(BusyFlag::is_busy)
    }

    /// 已加载的提交状态；`None` 表示未提交或加载失败
    pub fn submission(&self, assignment_id: i64) -> Option<&Submission> {
        self.statuses.get(&assignment_id).and_then(Option::as_ref)
    }

    pub fn view_for(&self, assignment: &Assignment) -> SubmissionView {
        SubmissionView::derive(self.submission(assignment.id), assignment.max_points)
    }

    pub async fn load_statuses(&mut self, assignment_ids: &[i64]) -> Result<()> {
        status::load_statuses(self, assignment_ids).await
    }

    pub async fn submit(&mut self, assignment_id: i64) -> Result<Submission> {
        submit::submit(self, assignment_id).await
    }

    pub async fn preview_submission(&mut self, assignment_id: i64) -> Result<()> {
        status::preview_submission(self, assignment_id).await
    }

    /// 切换课程时清空全部状态
    pub fn reset(&mut self) {
        self.drafts.clear();
        self.statuses.clear();
        self.preview.close();
    }
}
