use serde::Serialize;
use ts_rs::TS;

use super::CourseAccessService;
use crate::utils::tiers::{GradeColor, grade_percentage, round2};

/// 成绩标签页的一行
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct GradeRow {
    pub assignment_id: i64,
    pub title: String,
    pub score: Option<f64>,
    pub max_points: Option<f64>,
    pub percentage: Option<f64>,
    pub color: GradeColor,
    pub feedback: Option<String>,
    pub submitted: bool,
}

impl GradeRow {
    pub fn is_graded(&self) -> bool {
        self.score.is_some()
    }
}

pub fn grade_rows(service: &CourseAccessService) -> Vec<GradeRow> {
    let Some(content) = &service.content else {
        return Vec::new();
    };
    content
        .assignments
        .iter()
        .map(|assignment| {
            let submission = service.submissions.submission(assignment.id);
            let score = submission.and_then(|s| s.score);
            GradeRow {
                assignment_id: assignment.id,
                title: assignment.title.clone(),
                score,
                max_points: assignment.max_points,
                percentage: grade_percentage(score, assignment.max_points),
                color: GradeColor::for_score(score, assignment.max_points),
                feedback: submission.and_then(|s| s.feedback.clone()),
                submitted: submission.is_some(),
            }
        })
        .collect()
}

impl CourseAccessService {
    pub fn graded_count(&self) -> usize {
        self.grade_rows().iter().filter(|r| r.is_graded()).count()
    }

    pub fn ungraded_count(&self) -> usize {
        self.grade_rows().iter().filter(|r| !r.is_graded()).count()
    }

    /// 已评分且有满分的作业的平均百分比
    pub fn average_percentage(&self) -> Option<f64> {
        let percentages: Vec<f64> = self
            .grade_rows()
            .iter()
            .filter_map(|r| r.percentage)
            .collect();
        if percentages.is_empty() {
            return None;
        }
        Some(round2(percentages.iter().sum::<f64>() / percentages.len() as f64))
    }
}
