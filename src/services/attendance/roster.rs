//! 名册与已存记录的合并
//!
//! 工作集对名册中的每个学生恰好一条记录，顺序与名册一致。

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::AttendanceService;
use crate::client::LmsBackend;
use crate::errors::{PortalError, Result};
use crate::models::attendance::entities::{AttendanceRecord, AttendanceStatus};
use crate::models::users::entities::RosterStudent;
use crate::utils::SelectionTicket;

/// 合并名册与某日已存储的记录
///
/// 有已存记录的学生沿用其状态与 id，其余学生默认出勤、id 为空。
/// 不在名册中的已存记录被丢弃。
pub fn reconcile(roster: &[RosterStudent], stored: &[AttendanceRecord]) -> Vec<AttendanceRecord> {
    let by_student: HashMap<i64, &AttendanceRecord> =
        stored.iter().map(|r| (r.student_id, r)).collect();

    roster
        .iter()
        .map(|student| {
            let existing = by_student.get(&student.student_id);
            AttendanceRecord {
                id: existing.and_then(|r| r.id),
                student_id: student.student_id,
                student_name: student.name.clone(),
                email: student.email.clone(),
                status: existing.map(|r| r.status).unwrap_or(AttendanceStatus::Present),
            }
        })
        .collect()
}

/// 已发出、尚未应用的日期加载
pub struct PendingDateLoad {
    ticket: SelectionTicket,
    backend: Arc<dyn LmsBackend>,
    batch_id: i64,
    date: NaiveDate,
}

/// 日期加载的结果，应用前需要核对票据
pub struct DateLoad {
    ticket: SelectionTicket,
    date: NaiveDate,
    stored: Result<Vec<AttendanceRecord>>,
}

impl PendingDateLoad {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub async fn fetch(self) -> DateLoad {
        let stored = self
            .backend
            .get_attendance_for_date(self.batch_id, self.date)
            .await;
        DateLoad {
            ticket: self.ticket,
            date: self.date,
            stored,
        }
    }
}

pub async fn load_batches(service: &mut AttendanceService) -> Result<()> {
    let session = service.session.current()?;
    session.require_staff()?;

    let _loading = service.loading.begin();
    let result = service
        .backend
        .list_instructor_batches(session.user_id)
        .await;
    service.batches = service.notice.track(result)?;
    debug!(count = service.batches.len(), "Instructor batches loaded");
    Ok(())
}

/// 切换批次：并发拉取名册、当日记录、日期、汇总、统计和第一页历史
pub async fn select_batch(service: &mut AttendanceService, batch_id: i64) -> Result<()> {
    service.session.current()?.require_staff()?;

    let ticket = service.selection.advance();
    service.batch_id = Some(batch_id);
    service.roster.clear();
    service.records.clear();
    service.search.clear();
    service.dates.clear();
    service.summary = None;
    service.stats.clear();
    service.history.reset();

    let _loading = service.loading.begin();
    let backend = service.backend.clone();
    let date = service.selected_date;
    let history_query = service.history.query(batch_id);

    let (roster, stored, dates, summary, stats, history) = tokio::join!(
        backend.get_batch_roster(batch_id),
        backend.get_attendance_for_date(batch_id, date),
        backend.get_attendance_dates(batch_id),
        backend.get_attendance_summary(batch_id),
        backend.get_attendance_stats(batch_id),
        backend.get_attendance_history(history_query),
    );
    ticket.ensure_current("batch")?;

    // 名册是工作集的前提，失败则整个动作失败
    let roster = service.notice.track(roster)?;
    let stored = service.notice.track(stored)?;
    service.records = reconcile(&roster, &stored);
    service.roster = roster;

    match dates {
        Ok(dates) => service.dates = dates,
        Err(e) => isolated_failure(service, "dates", &e),
    }
    match summary {
        Ok(summary) => service.summary = Some(summary),
        Err(e) => isolated_failure(service, "summary", &e),
    }
    match stats {
        Ok(stats) => service.stats = stats,
        Err(e) => isolated_failure(service, "stats", &e),
    }
    match history {
        Ok(page) => service.history.apply_page(page),
        Err(e) => isolated_failure(service, "history", &e),
    }

    info!(
        batch_id,
        students = service.roster.len(),
        date = %date,
        "Attendance batch selected"
    );
    Ok(())
}

pub(crate) fn isolated_failure(service: &mut AttendanceService, what: &str, err: &PortalError) {
    warn!(what, error = %err, "Attendance fetch failed, keeping previous view");
    service.notice.record(err);
}

pub fn begin_date_change(
    service: &mut AttendanceService,
    date: NaiveDate,
) -> Result<PendingDateLoad> {
    let batch_id = service
        .batch_id
        .ok_or_else(|| PortalError::validation("请先选择批次"))?;

    service.selected_date = date;
    let ticket = service.selection.advance();
    debug!(batch_id, date = %date, "Attendance date changed");

    Ok(PendingDateLoad {
        ticket,
        backend: service.backend.clone(),
        batch_id,
        date,
    })
}

pub fn apply_date_load(service: &mut AttendanceService, load: DateLoad) -> Result<()> {
    load.ticket.ensure_current("attendance-for-date")?;
    let stored = service.notice.track(load.stored)?;
    service.records = reconcile(&service.roster, &stored);
    debug!(
        date = %load.date,
        stored = stored.len(),
        working = service.records.len(),
        "Working set rebuilt"
    );
    Ok(())
}
