use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::dates::deserialize_lenient_date;
use crate::models::common::numeric::{
    deserialize_optional_i64, deserialize_string_to_f64, deserialize_string_to_i64,
};

// 考勤状态，没有已存记录的学生默认出勤
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub enum AttendanceStatus {
    #[default]
    Present, // 出勤
    Absent,  // 缺勤
    Late,    // 迟到
}

impl AttendanceStatus {
    pub const PRESENT: &'static str = "present";
    pub const ABSENT: &'static str = "absent";
    pub const LATE: &'static str = "late";

    pub fn all() -> &'static [AttendanceStatus] {
        &[Self::Present, Self::Absent, Self::Late]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => Self::PRESENT,
            AttendanceStatus::Absent => Self::ABSENT,
            AttendanceStatus::Late => Self::LATE,
        }
    }
}

impl<'de> Deserialize<'de> for AttendanceStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的考勤状态: '{s}'. 支持的状态: present, absent, late"
            ))
        })
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            AttendanceStatus::PRESENT => Ok(AttendanceStatus::Present),
            AttendanceStatus::ABSENT => Ok(AttendanceStatus::Absent),
            AttendanceStatus::LATE => Ok(AttendanceStatus::Late),
            _ => Err(format!("Invalid attendance status: {s}")),
        }
    }
}

/// 考勤记录
///
/// 既表示某日期已存储的记录（`id` 有值），也表示工作集中尚未保存的记录
/// （`id` 为 `None`）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRecord {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub student_id: i64,
    #[serde(default, alias = "name")]
    pub student_name: String,
    #[serde(default)]
    pub email: String,
    pub status: AttendanceStatus,
}

/// 批次考勤汇总（服务端计算）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSummary {
    #[serde(default, deserialize_with = "deserialize_string_to_i64")]
    pub total_days: i64,
    #[serde(default, deserialize_with = "deserialize_string_to_i64")]
    pub total_present: i64,
    #[serde(default, deserialize_with = "deserialize_string_to_i64")]
    pub total_absent: i64,
    #[serde(default, deserialize_with = "deserialize_string_to_i64")]
    pub total_late: i64,
    #[serde(default, deserialize_with = "deserialize_string_to_f64")]
    pub avg_attendance_rate: f64,
}

/// 单个学生的考勤统计（服务端计算）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct StudentAttendanceStats {
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub student_id: i64,
    #[serde(alias = "name")]
    pub student_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_to_i64")]
    pub total_days: i64,
    #[serde(default, deserialize_with = "deserialize_string_to_i64")]
    pub present_days: i64,
    #[serde(default, deserialize_with = "deserialize_string_to_i64")]
    pub absent_days: i64,
    #[serde(default, deserialize_with = "deserialize_string_to_i64")]
    pub late_days: i64,
    #[serde(default, deserialize_with = "deserialize_string_to_f64")]
    pub attendance_percentage: f64,
}

/// 已点名日期及当日计数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceDateEntry {
    #[serde(deserialize_with = "deserialize_lenient_date")]
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_string_to_i64")]
    pub present_count: i64,
    #[serde(default, deserialize_with = "deserialize_string_to_i64")]
    pub absent_count: i64,
    #[serde(default, deserialize_with = "deserialize_string_to_i64")]
    pub late_count: i64,
}

/// 考勤历史行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct HistoryRecord {
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub id: i64,
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub student_id: i64,
    #[serde(alias = "name")]
    pub student_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_date")]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub marked_by_name: Option<String>,
}

/// 考勤历史分页响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct HistoryPage {
    pub records: Vec<HistoryRecord>,
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub total: i64,
}
