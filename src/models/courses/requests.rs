use serde::Serialize;
use ts_rs::TS;

use crate::errors::{PortalError, Result};

/// 创建/更新作业请求
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct AssignmentPayload {
    pub course_id: i64,
    pub lesson_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>, // ISO 8601 格式，如 "2026-01-24T12:00:00Z"
    pub max_points: Option<f64>,
}

/// 创建/更新课时请求
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct LessonPayload {
    pub course_id: i64,
    pub title: String,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub order_index: Option<i64>,
}

impl AssignmentPayload {
    /// 发送前校验：标题必填，满分不能为负
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(PortalError::validation("作业标题不能为空"));
        }
        if let Some(points) = self.max_points
            && points < 0.0
        {
            return Err(PortalError::validation("满分不能为负数"));
        }
        Ok(())
    }
}

impl LessonPayload {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(PortalError::validation("课时标题不能为空"));
        }
        Ok(())
    }
}
