pub mod assignments;
pub mod content;
pub mod lessons;

use serde::Serialize;
use std::sync::Arc;
use ts_rs::TS;

use super::Notice;
use super::grading::GradingService;
use crate::client::LmsBackend;
use crate::errors::Result;
use crate::models::common::modal::ModalState;
use crate::models::courses::entities::{Course, CourseContent};
use crate::session::SessionContext;
use crate::utils::{BusyFlag, SelectionScope};

pub use content::{ContentLoad, PendingContentLoad};

/// 待确认删除的对象
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub enum DeleteTarget {
    Assignment { id: i64, title: String },
    Lesson { id: i64, title: String },
}

/// 讲师课程管理页面
pub struct InstructorCoursesService {
    pub(crate) backend: Arc<dyn LmsBackend>,
    pub(crate) session: SessionContext,
    pub(crate) courses: Vec<Course>,
    pub(crate) course_id: Option<i64>,
    pub(crate) content: Option<CourseContent>,
    pub(crate) confirm_delete: ModalState<DeleteTarget>,
    pub(crate) grading: GradingService,
    pub(crate) selection: SelectionScope,
    pub(crate) loading: BusyFlag,
    pub(crate) saving: BusyFlag,
    pub(crate) notice: Notice,
}

impl InstructorCoursesService {
    pub fn new(backend: Arc<dyn LmsBackend>, session: SessionContext) -> Self {
        Self {
            grading: GradingService::new(backend.clone(), session.clone()),
            backend,
            session,
            courses: Vec::new(),
            course_id: None,
            content: None,
            confirm_delete: ModalState::Closed,
            selection: SelectionScope::new(),
            loading: BusyFlag::new(),
            saving: BusyFlag::new(),
            notice: Notice::default(),
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course_id(&self) -> Option<i64> {
        self.course_id
    }

    pub fn content(&self) -> Option<&CourseContent> {
        self.content.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&DeleteTarget> {
        self.confirm_delete.payload()
    }

    pub fn grading(&self) -> &GradingService {
        &self.grading
    }

    pub fn grading_mut(&mut self) -> &mut GradingService {
        &mut self.grading
    }

    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_busy()
    }

    pub fn is_saving(&self) -> bool {
        self.saving.is_busy()
    }

    pub async fn load_courses(&mut self) -> Result<()> {
        content::load_courses(self).await
    }

    pub fn begin_select_course(&mut self, course_id: i64) -> Result<PendingContentLoad> {
        content::begin_select_course(self, course_id)
    }

    pub fn apply_content_load(&mut self, load: ContentLoad) -> Result<()> {
        content::apply_content_load(self, load)
    }

    pub async fn select_course(&mut self, course_id: i64) -> Result<()> {
        let pending = self.begin_select_course(course_id)?;
        let _loading = self.loading.begin();
        let load = pending.fetch().await;
        self.apply_content_load(load)
    }

    /// 打开作业的评分视图
    pub async fn select_assignment(&mut self, assignment_id: i64) -> Result<()> {
        content::select_assignment(self, assignment_id).await
    }

    pub fn request_delete(&mut self, target: DeleteTarget) {
        self.confirm_delete.open(target);
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete.close();
    }

    pub async fn confirm_delete(&mut self) -> Result<()> {
        content::confirm_delete(self).await
    }
}
