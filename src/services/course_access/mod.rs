//! 学生课程页面
//!
//! 课时、作业与成绩三个标签页共享同一次课程选择；作业提交状态由内嵌的
//! `SubmissionService` 维护。

pub mod content;
pub mod grades;
pub mod progress;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use ts_rs::TS;

use super::Notice;
use super::submissions::SubmissionService;
use crate::client::LmsBackend;
use crate::errors::Result;
use crate::models::courses::entities::{Course, CourseContent};
use crate::models::progress::entities::LessonProgress;
use crate::session::SessionContext;
use crate::utils::{BusyFlag, SelectionScope};

pub use content::{CourseLoad, PendingCourseLoad};
pub use grades::GradeRow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub enum CourseTab {
    #[default]
    Lessons,
    Assignments,
    Grades,
}

pub struct CourseAccessService {
    pub(crate) backend: Arc<dyn LmsBackend>,
    pub(crate) session: SessionContext,
    pub(crate) courses: Vec<Course>,
    pub(crate) course_id: Option<i64>,
    pub(crate) content: Option<CourseContent>,
    pub(crate) progress: Vec<LessonProgress>,
    pub(crate) tab: CourseTab,
    pub(crate) submissions: SubmissionService,
    pub(crate) selection: SelectionScope,
    pub(crate) loading: BusyFlag,
    pub(crate) completing: BusyFlag,
    pub(crate) notice: Notice,
}

impl CourseAccessService {
    pub fn new(backend: Arc<dyn LmsBackend>, session: SessionContext) -> Self {
        Self {
            submissions: SubmissionService::new(backend.clone(), session.clone()),
            backend,
            session,
            courses: Vec::new(),
            course_id: None,
            content: None,
            progress: Vec::new(),
            tab: CourseTab::default(),
            selection: SelectionScope::new(),
            loading: BusyFlag::new(),
            completing: BusyFlag::new(),
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

    pub fn progress(&self) -> &[LessonProgress] {
        &self.progress
    }

    pub fn tab(&self) -> CourseTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: CourseTab) {
        self.tab = tab;
    }

    pub fn submissions(&self) -> &SubmissionService {
        &self.submissions
    }

    pub fn submissions_mut(&mut self) -> &mut SubmissionService {
        &mut self.submissions
    }

    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_busy()
    }

    pub async fn load_courses(&mut self) -> Result<()> {
        content::load_courses(self).await
    }

    pub fn begin_select_course(&mut self, course_id: i64) -> Result<PendingCourseLoad> {
        content::begin_select_course(self, course_id)
    }

    pub fn apply_course_load(&mut self, load: CourseLoad) -> Result<()> {
        content::apply_course_load(self, load)
    }

    /// 选择课程：内容与进度并发加载，随后拉取各作业的提交状态
    pub async fn select_course(&mut self, course_id: i64) -> Result<()> {
        let pending = self.begin_select_course(course_id)?;
        let _loading = self.loading.begin();
        let load = pending.fetch().await;
        self.apply_course_load(load)?;

        let assignment_ids: Vec<i64> = self
            .content
            .as_ref()
            .map(|c| c.assignments.iter().map(|a| a.id).collect())
            .unwrap_or_default();
        self.submissions.load_statuses(&assignment_ids).await
    }

    pub fn is_completed(&self, lesson_id: i64) -> bool {
        progress::is_completed(self, lesson_id)
    }

    pub fn progress_percentage(&self) -> f64 {
        progress::progress_percentage(self)
    }

    pub async fn complete_lesson(&mut self, lesson_id: i64) -> Result<()> {
        progress::complete_lesson(self, lesson_id).await
    }

    pub fn grade_rows(&self) -> Vec<GradeRow> {
        grades::grade_rows(self)
    }
}
