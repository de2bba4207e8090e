use serde::Serialize;
use ts_rs::TS;

use super::AttendanceService;
use crate::models::attendance::entities::StudentAttendanceStats;
use crate::utils::tiers::RateColor;

/// 汇总表中的一行：服务端统计 + 颜色
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub struct SummaryRow {
    #[serde(flatten)]
    #[ts(flatten)]
    pub stats: StudentAttendanceStats,
    pub color: RateColor,
}

impl SummaryRow {
    pub fn new(stats: StudentAttendanceStats) -> Self {
        let color = RateColor::from_percentage(stats.attendance_percentage);
        Self { stats, color }
    }
}

/// 按拉取顺序生成汇总行
pub fn summary_rows(service: &AttendanceService) -> Vec<SummaryRow> {
    service.stats.iter().cloned().map(SummaryRow::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(student_id: i64, pct: f64) -> StudentAttendanceStats {
        StudentAttendanceStats {
            student_id,
            student_name: format!("S{student_id}"),
            email: None,
            total_days: 20,
            present_days: 0,
            absent_days: 0,
            late_days: 0,
            attendance_percentage: pct,
        }
    }

    #[test]
    fn test_row_colors_follow_tier_thresholds() {
        let colors: Vec<_> = [95.0, 90.0, 80.0, 75.0, 74.9, 60.0, 12.5]
            .into_iter()
            .enumerate()
            .map(|(i, pct)| SummaryRow::new(stats(i as i64, pct)).color)
            .collect();
        assert_eq!(
            colors,
            vec![
                RateColor::Green,
                RateColor::Green,
                RateColor::Yellow,
                RateColor::Yellow,
                RateColor::Orange,
                RateColor::Orange,
                RateColor::Red
            ]
        );
    }

    #[test]
    fn test_row_serializes_flat() {
        let value = serde_json::to_value(SummaryRow::new(stats(4, 92.0))).unwrap();
        assert_eq!(value["student_id"], 4);
        assert_eq!(value["color"], "green");
    }
}
