use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

use super::entities::AttendanceStatus;
use crate::models::common::dates::DATE_FORMAT;

/// 单个学生的点名结果
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceMark {
    pub student_id: i64,
    pub status: AttendanceStatus,
}

/// 批量点名请求（整表 upsert）
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct MarkAttendanceRequest {
    pub batch_id: i64,
    pub date: NaiveDate,
    pub marked_by: i64,
    pub attendance: Vec<AttendanceMark>,
}

/// 考勤历史查询参数
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryQuery {
    pub batch_id: i64,
    pub limit: i64,
    pub offset: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
}

impl HistoryQuery {
    /// 转换为 URL 查询参数，未设置的过滤条件不发送
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ];
        if let Some(start) = self.start_date {
            pairs.push(("start_date", start.format(DATE_FORMAT).to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("end_date", end.format(DATE_FORMAT).to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        pairs
    }
}
