use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::dates::deserialize_optional_date;
use crate::models::common::numeric::{
    deserialize_optional_f64, deserialize_optional_i64, deserialize_string_to_i64,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    // 唯一 ID
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub id: i64,
    // 课程标题
    pub title: String,
    // 课程描述
    #[serde(default)]
    pub description: Option<String>,
    // 讲师 ID
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub instructor_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Lesson {
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub course_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    // 课时顺序
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub order_index: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Assignment {
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub course_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub lesson_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    // 截止时间（ISO 8601 原样保留，仅用于展示）
    #[serde(default)]
    pub due_date: Option<String>,
    // 满分，缺失时不计算百分比
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub max_points: Option<f64>,
}

/// 课程内容聚合：课程字段 + 课时 + 作业
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseContent {
    #[serde(flatten)]
    #[ts(flatten)]
    pub course: Course,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl CourseContent {
    pub fn assignment(&self, assignment_id: i64) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.id == assignment_id)
    }

    /// 按 order_index 排序的课时（未设置顺序的排在最后，保持原有相对顺序）
    pub fn ordered_lessons(&self) -> Vec<&Lesson> {
        let mut lessons: Vec<&Lesson> = self.lessons.iter().collect();
        lessons.sort_by_key(|l| l.order_index.unwrap_or(i64::MAX));
        lessons
    }
}

/// 课程批次（开班）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Batch {
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub course_id: Option<i64>,
    #[serde(alias = "batch_name")]
    pub name: String,
    #[serde(default)]
    pub course_title: Option<String>,
    #[serde(default)]
    pub instructor_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub end_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_content_flattened() {
        let body = r#"{
            "id": 5, "title": "Rust 101", "description": null,
            "lessons": [
                {"id": 2, "title": "Ownership", "order_index": 2},
                {"id": 1, "title": "Intro", "order_index": 1},
                {"id": 3, "title": "Extra"}
            ],
            "assignments": [{"id": 9, "title": "HW1", "max_points": "100"}]
        }"#;
        let content: CourseContent = serde_json::from_str(body).unwrap();
        assert_eq!(content.course.id, 5);
        assert_eq!(content.assignment(9).unwrap().max_points, Some(100.0));
        assert!(content.assignment(10).is_none());
        let titles: Vec<&str> = content
            .ordered_lessons()
            .iter()
            .map(|l| l.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Intro", "Ownership", "Extra"]);
    }

    #[test]
    fn test_course_content_without_children() {
        let content: CourseContent = serde_json::from_str(r#"{"id": 1, "title": "Empty"}"#).unwrap();
        assert!(content.lessons.is_empty());
        assert!(content.assignments.is_empty());
    }

    #[test]
    fn test_batch_aliases_and_dates() {
        let batch: Batch = serde_json::from_str(
            r#"{"id": 1, "batch_name": "Spring", "start_date": "2024-02-01T00:00:00.000Z", "end_date": null}"#,
        )
        .unwrap();
        assert_eq!(batch.name, "Spring");
        assert_eq!(batch.start_date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(batch.end_date, None);
    }
}
