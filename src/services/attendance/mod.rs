pub mod history;
pub mod marking;
pub mod roster;
pub mod summary;
pub mod tally;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use ts_rs::TS;

use super::Notice;
use crate::client::LmsBackend;
use crate::config::AttendanceConfig;
use crate::errors::Result;
use crate::models::attendance::entities::{
    AttendanceDateEntry, AttendanceRecord, AttendanceStatus, AttendanceSummary,
    StudentAttendanceStats,
};
use crate::models::courses::entities::Batch;
use crate::models::users::entities::RosterStudent;
use crate::session::SessionContext;
use crate::utils::{BusyFlag, SelectionScope};

pub use history::{HistoryFilters, HistoryState};
pub use roster::{DateLoad, PendingDateLoad, reconcile};
pub use summary::SummaryRow;
pub use tally::DailyTally;

// 考勤页面的标签页
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub enum AttendanceTab {
    #[default]
    Mark, // 点名
    History, // 历史
    Summary, // 汇总
}

/// 讲师考勤页面
pub struct AttendanceService {
    pub(crate) backend: Arc<dyn LmsBackend>,
    pub(crate) session: SessionContext,
    pub(crate) page_size_options: Vec<i64>,

    pub(crate) batches: Vec<Batch>,
    pub(crate) batch_id: Option<i64>,
    pub(crate) selected_date: NaiveDate,
    pub(crate) tab: AttendanceTab,

    pub(crate) roster: Vec<RosterStudent>,
    pub(crate) records: Vec<AttendanceRecord>,
    pub(crate) search: String,

    pub(crate) dates: Vec<AttendanceDateEntry>,
    pub(crate) summary: Option<AttendanceSummary>,
    pub(crate) stats: Vec<StudentAttendanceStats>,
    pub(crate) history: HistoryState,

    pub(crate) selection: SelectionScope,
    pub(crate) loading: BusyFlag,
    pub(crate) saving: BusyFlag,
    pub(crate) notice: Notice,
}

impl AttendanceService {
    pub fn new(
        backend: Arc<dyn LmsBackend>,
        session: SessionContext,
        config: &AttendanceConfig,
    ) -> Self {
        Self {
            backend,
            session,
            page_size_options: config.page_size_options.clone(),
            batches: Vec::new(),
            batch_id: None,
            selected_date: Local::now().date_naive(),
            tab: AttendanceTab::default(),
            roster: Vec::new(),
            records: Vec::new(),
            search: String::new(),
            dates: Vec::new(),
            summary: None,
            stats: Vec::new(),
            history: HistoryState::new(config.default_page_size),
            selection: SelectionScope::new(),
            loading: BusyFlag::new(),
            saving: BusyFlag::new(),
            notice: Notice::default(),
        }
    }

    /// 指定初始日期（默认为今天）
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.selected_date = date;
        self
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn batch_id(&self) -> Option<i64> {
        self.batch_id
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn tab(&self) -> AttendanceTab {
        self.tab
    }

    /// 工作集（未过滤）
    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn dates(&self) -> &[AttendanceDateEntry] {
        &self.dates
    }

    pub fn summary(&self) -> Option<&AttendanceSummary> {
        self.summary.as_ref()
    }

    pub fn history(&self) -> &HistoryState {
        &self.history
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

    pub async fn load_batches(&mut self) -> Result<()> {
        roster::load_batches(self).await
    }

    pub async fn select_batch(&mut self, batch_id: i64) -> Result<()> {
        roster::select_batch(self, batch_id).await
    }

    pub fn begin_date_change(&mut self, date: NaiveDate) -> Result<PendingDateLoad> {
        roster::begin_date_change(self, date)
    }

    pub fn apply_date_load(&mut self, load: DateLoad) -> Result<()> {
        roster::apply_date_load(self, load)
    }

    pub async fn select_date(&mut self, date: NaiveDate) -> Result<()> {
        let pending = self.begin_date_change(date)?;
        let load = pending.fetch().await;
        self.apply_date_load(load)
    }

    pub async fn select_tab(&mut self, tab: AttendanceTab) -> Result<()> {
        marking::select_tab(self, tab).await
    }

    pub fn set_status(&mut self, student_id: i64, status: AttendanceStatus) {
        marking::set_status(self, student_id, status)
    }

    pub fn mark_all(&mut self, status: AttendanceStatus) {
        marking::mark_all(self, status)
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn visible_records(&self) -> Vec<&AttendanceRecord> {
        marking::visible_records(self)
    }

    pub fn tally(&self) -> DailyTally {
        DailyTally::from_records(&self.records)
    }

    pub async fn save(&mut self) -> Result<()> {
        marking::save(self).await
    }

    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        summary::summary_rows(self)
    }

    pub fn set_history_filters(&mut self, filters: HistoryFilters) {
        self.history.draft = filters;
    }

    pub async fn apply_history_filters(&mut self) -> Result<()> {
        history::apply_filters(self).await
    }

    pub async fn set_history_page_size(&mut self, limit: i64) -> Result<()> {
        history::set_page_size(self, limit).await
    }

    pub async fn next_history_page(&mut self) -> Result<()> {
        let page = self.history.paging.page + 1;
        history::go_to_page(self, page).await
    }

    pub async fn prev_history_page(&mut self) -> Result<()> {
        let page = self.history.paging.page - 1;
        history::go_to_page(self, page).await
    }

    pub async fn go_to_history_page(&mut self, page: i64) -> Result<()> {
        history::go_to_page(self, page).await
    }

    pub fn set_history_search(&mut self, query: impl Into<String>) {
        self.history.search = query.into();
    }
}
