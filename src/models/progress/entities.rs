use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::numeric::deserialize_string_to_i64;

/// 课时学习进度，只能从未完成变为完成
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/progress.ts")]
pub struct LessonProgress {
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub lesson_id: i64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_date: Option<String>,
}

/// 标记课时完成请求
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/progress.ts")]
pub struct CompleteLessonRequest {
    pub student_id: i64,
    pub lesson_id: i64,
}
