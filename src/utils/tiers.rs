//! 百分比与分级
//!
//! 考勤率使用 90/75/60 三条阈值，成绩百分比使用 90/80/70/60 四条阈值，
//! 阈值均为下界包含。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// part / total * 100，total 为 0 时返回 0
pub fn percentage(part: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

/// 保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 成绩百分比：score / max_points * 100
///
/// 任一侧缺失或满分不为正时返回 `None`，界面显示为无颜色状态。
pub fn grade_percentage(score: Option<f64>, max_points: Option<f64>) -> Option<f64> {
    match (score, max_points) {
        (Some(score), Some(max)) if max > 0.0 => Some(score / max * 100.0),
        _ => None,
    }
}

/// 实时点名视图的出勤评价
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub enum AttendanceTier {
    Excellent, // >= 90
    Good,      // [75, 90)
    Average,   // [60, 75)
    Poor,      // < 60
}

impl AttendanceTier {
    pub fn from_percentage(pct: f64) -> Self {
        if pct >= 90.0 {
            AttendanceTier::Excellent
        } else if pct >= 75.0 {
            AttendanceTier::Good
        } else if pct >= 60.0 {
            AttendanceTier::Average
        } else {
            AttendanceTier::Poor
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AttendanceTier::Excellent => "Excellent attendance today!",
            AttendanceTier::Good => "Good attendance today.",
            AttendanceTier::Average => "Average attendance, some students are missing.",
            AttendanceTier::Poor => "Poor attendance, follow up with absent students.",
        }
    }
}

/// 学生考勤汇总行的颜色，阈值与 `AttendanceTier` 相同
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub enum RateColor {
    Green,
    Yellow,
    Orange,
    Red,
}

impl RateColor {
    pub fn from_percentage(pct: f64) -> Self {
        match AttendanceTier::from_percentage(pct) {
            AttendanceTier::Excellent => RateColor::Green,
            AttendanceTier::Good => RateColor::Yellow,
            AttendanceTier::Average => RateColor::Orange,
            AttendanceTier::Poor => RateColor::Red,
        }
    }
}

/// 成绩颜色（评分和查看提交处一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub enum GradeColor {
    Green,   // >= 90
    Blue,    // [80, 90)
    Yellow,  // [70, 80)
    Orange,  // [60, 70)
    Red,     // < 60
    Neutral, // 无分数或无满分
}

impl GradeColor {
    pub fn from_percentage(pct: Option<f64>) -> Self {
        let Some(pct) = pct else {
            return GradeColor::Neutral;
        };
        if pct >= 90.0 {
            GradeColor::Green
        } else if pct >= 80.0 {
            GradeColor::Blue
        } else if pct >= 70.0 {
            GradeColor::Yellow
        } else if pct >= 60.0 {
            GradeColor::Orange
        } else {
            GradeColor::Red
        }
    }

    pub fn for_score(score: Option<f64>, max_points: Option<f64>) -> Self {
        Self::from_percentage(grade_percentage(score, max_points))
    }
}
