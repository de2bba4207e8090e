//! 考勤历史：服务端分页与过滤，页内搜索
//!
//! 搜索只作用于当前已拉取的这一页，不会扩展到全部历史。

use chrono::NaiveDate;
use tracing::debug;

use super::AttendanceService;
use crate::errors::{PortalError, Result};
use crate::models::attendance::entities::{AttendanceStatus, HistoryRecord};
use crate::models::attendance::requests::HistoryQuery;
use crate::models::common::pagination::{HistoryPaging, PaginationInfo};
use crate::utils::validate::validate_date_range;

/// 历史过滤条件（草稿与已应用各一份）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilters {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Clone)]
pub struct HistoryState {
    pub(crate) paging: HistoryPaging,
    pub(crate) draft: HistoryFilters,
    pub(crate) applied: HistoryFilters,
    pub(crate) records: Vec<HistoryRecord>,
    pub(crate) search: String,
}

impl HistoryState {
    pub fn new(limit: i64) -> Self {
        Self {
            paging: HistoryPaging::new(limit),
            draft: HistoryFilters::default(),
            applied: HistoryFilters::default(),
            records: Vec::new(),
            search: String::new(),
        }
    }

    /// 切换批次时回到第一页并清空结果，保留每页条数
    pub(crate) fn reset(&mut self) {
        *self = Self::new(self.paging.limit);
    }

    pub(crate) fn query(&self, batch_id: i64) -> HistoryQuery {
        HistoryQuery {
            batch_id,
            limit: self.paging.limit,
            offset: self.paging.offset(),
            start_date: self.applied.start_date,
            end_date: self.applied.end_date,
            status: self.applied.status,
        }
    }

    pub(crate) fn apply_page(&mut self, page: crate::models::attendance::entities::HistoryPage) {
        self.records = page.records;
        self.paging.total = page.total;
    }

    pub fn draft(&self) -> &HistoryFilters {
        &self.draft
    }

    pub fn applied(&self) -> &HistoryFilters {
        &self.applied
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn pagination(&self) -> PaginationInfo {
        self.paging.info()
    }

    /// 当前页中姓名匹配搜索词的记录（不区分大小写）
    pub fn visible(&self) -> Vec<&HistoryRecord> {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return self.records.iter().collect();
        }
        self.records
            .iter()
            .filter(|r| r.student_name.to_lowercase().contains(&needle))
            .collect()
    }
}

async fn fetch_page(service: &mut AttendanceService) -> Result<()> {
    let batch_id = service
        .batch_id
        .ok_or_else(|| PortalError::validation("请先选择批次"))?;
    let query = service.history.query(batch_id);
    debug!(
        batch_id,
        limit = query.limit,
        offset = query.offset,
        "Fetching attendance history"
    );

    let _loading = service.loading.begin();
    let result = service.backend.get_attendance_history(query).await;
    let page = service.notice.track(result)?;
    service.history.apply_page(page);
    Ok(())
}

/// 应用草稿过滤条件：校验日期范围后回到第一页拉取，失败时恢复原条件
pub async fn apply_filters(service: &mut AttendanceService) -> Result<()> {
    let draft = service.history.draft.clone();
    service
        .notice
        .track(validate_date_range(draft.start_date, draft.end_date))?;

    let previous_filters = std::mem::replace(&mut service.history.applied, draft);
    let previous_page = std::mem::replace(&mut service.history.paging.page, 1);
    if let Err(e) = fetch_page(service).await {
        service.history.applied = previous_filters;
        service.history.paging.page = previous_page;
        return Err(e);
    }
    Ok(())
}

/// 修改每页条数并回到第一页，拉取失败时恢复原页码和条数
pub async fn set_page_size(service: &mut AttendanceService, limit: i64) -> Result<()> {
    let options = service.page_size_options.clone();
    let previous = (service.history.paging.page, service.history.paging.limit);
    service.history.paging.set_limit(limit, &options)?;
    if let Err(e) = fetch_page(service).await {
        (service.history.paging.page, service.history.paging.limit) = previous;
        return Err(e);
    }
    Ok(())
}

/// 翻页；越界时拒绝，拉取失败时恢复原页码
pub async fn go_to_page(service: &mut AttendanceService, page: i64) -> Result<()> {
    let previous = service.history.paging.page;
    service.history.paging.go_to(page)?;
    if let Err(e) = fetch_page(service).await {
        service.history.paging.page = previous;
        return Err(e);
    }
    Ok(())
}
