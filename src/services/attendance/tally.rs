use serde::Serialize;
use ts_rs::TS;

use crate::models::attendance::entities::{AttendanceRecord, AttendanceStatus};
use crate::utils::tiers::{AttendanceTier, percentage, round2};

/// 当日点名计数（基于工作集实时计算）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub struct DailyTally {
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub total: i64,
}

impl DailyTally {
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        records.iter().fold(Self::default(), |mut tally, record| {
            match record.status {
                AttendanceStatus::Present => tally.present += 1,
                AttendanceStatus::Absent => tally.absent += 1,
                AttendanceStatus::Late => tally.late += 1,
            }
            tally.total += 1;
            tally
        })
    }

    /// 出勤率（只计 present），保留两位小数
    pub fn present_percentage(&self) -> f64 {
        round2(percentage(self.present, self.total))
    }

    pub fn tier(&self) -> AttendanceTier {
        AttendanceTier::from_percentage(percentage(self.present, self.total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: None,
            student_id: 1,
            student_name: "A".to_string(),
            email: String::new(),
            status,
        }
    }

    #[test]
    fn test_counts_and_tier() {
        use AttendanceStatus::*;
        let records: Vec<_> = [Present, Present, Present, Late, Absent]
            .into_iter()
            .map(record)
            .collect();
        let tally = DailyTally::from_records(&records);
        assert_eq!(
            tally,
            DailyTally {
                present: 3,
                absent: 1,
                late: 1,
                total: 5
            }
        );
        assert_eq!(tally.present_percentage(), 60.0);
        assert_eq!(tally.tier(), AttendanceTier::Average);
    }

    #[test]
    fn test_empty_working_set() {
        let tally = DailyTally::from_records(&[]);
        assert_eq!(tally.total, 0);
        assert_eq!(tally.present_percentage(), 0.0);
        assert_eq!(tally.tier(), AttendanceTier::Poor);
    }
}
