//! 点名：本地编辑工作集，整表保存后以服务端为准重新拉取

use tracing::{debug, info};

use super::roster::{isolated_failure, reconcile};
use super::{AttendanceService, AttendanceTab};
use crate::errors::{PortalError, Result};
use crate::models::attendance::entities::{AttendanceRecord, AttendanceStatus};
use crate::models::attendance::requests::{AttendanceMark, MarkAttendanceRequest};

pub fn set_status(service: &mut AttendanceService, student_id: i64, status: AttendanceStatus) {
    match service
        .records
        .iter_mut()
        .find(|r| r.student_id == student_id)
    {
        Some(record) => record.status = status,
        None => debug!(student_id, "Status change for a student outside the working set"),
    }
}

pub fn mark_all(service: &mut AttendanceService, status: AttendanceStatus) {
    for record in service.records.iter_mut() {
        record.status = status;
    }
    debug!(status = %status, count = service.records.len(), "Marked all students");
}

/// 按姓名或邮箱过滤显示，不会增删工作集中的记录
pub fn visible_records(service: &AttendanceService) -> Vec<&AttendanceRecord> {
    let needle = service.search.trim().to_lowercase();
    service
        .records
        .iter()
        .filter(|r| {
            needle.is_empty()
                || r.student_name.to_lowercase().contains(&needle)
                || r.email.to_lowercase().contains(&needle)
        })
        .collect()
}

pub async fn save(service: &mut AttendanceService) -> Result<()> {
    let session = service.notice.track(service.session.current())?;
    service.notice.track(session.require_staff())?;
    let batch_id = service
        .batch_id
        .ok_or_else(|| PortalError::validation("请先选择批次"))?;
    if service.records.is_empty() {
        return service
            .notice
            .track(Err(PortalError::validation("没有可保存的考勤记录")));
    }

    let Some(_saving) = service.saving.try_begin() else {
        return Err(PortalError::action_in_flight("考勤正在保存"));
    };

    let request = MarkAttendanceRequest {
        batch_id,
        date: service.selected_date,
        marked_by: session.user_id,
        attendance: service
            .records
            .iter()
            .map(|r| AttendanceMark {
                student_id: r.student_id,
                status: r.status,
            })
            .collect(),
    };
    let result = service.backend.mark_attendance(request).await;
    service.notice.track(result)?;

    refresh_after_save(service, batch_id).await;
    Ok(())
}

/// 保存成功后并发刷新当日记录、日期、汇总和统计，各项失败互不影响
async fn refresh_after_save(service: &mut AttendanceService, batch_id: i64) {
    let ticket = service.selection.current();
    let backend = service.backend.clone();
    let date = service.selected_date;

    let (stored, dates, summary, stats) = tokio::join!(
        backend.get_attendance_for_date(batch_id, date),
        backend.get_attendance_dates(batch_id),
        backend.get_attendance_summary(batch_id),
        backend.get_attendance_stats(batch_id),
    );
    if ticket.ensure_current("attendance refresh").is_err() {
        return;
    }

    let mut failures = 0;
    match stored {
        Ok(stored) => service.records = reconcile(&service.roster, &stored),
        Err(e) => {
            failures += 1;
            isolated_failure(service, "attendance-for-date", &e);
        }
    }
    match dates {
        Ok(dates) => service.dates = dates,
        Err(e) => {
            failures += 1;
            isolated_failure(service, "dates", &e);
        }
    }
    match summary {
        Ok(summary) => service.summary = Some(summary),
        Err(e) => {
            failures += 1;
            isolated_failure(service, "summary", &e);
        }
    }
    match stats {
        Ok(stats) => service.stats = stats,
        Err(e) => {
            failures += 1;
            isolated_failure(service, "stats", &e);
        }
    }
    info!(batch_id, date = %date, failures, "Attendance refreshed after save");
}

/// 切换标签页；汇总页每次进入都重新拉取
pub async fn select_tab(service: &mut AttendanceService, tab: AttendanceTab) -> Result<()> {
    service.tab = tab;
    let Some(batch_id) = service.batch_id else {
        return Ok(());
    };

    if tab == AttendanceTab::Summary {
        let backend = service.backend.clone();
        let _loading = service.loading.begin();
        let (summary, stats) = tokio::join!(
            backend.get_attendance_summary(batch_id),
            backend.get_attendance_stats(batch_id),
        );
        service.summary = Some(service.notice.track(summary)?);
        service.stats = service.notice.track(stats)?;
    }
    Ok(())
}
