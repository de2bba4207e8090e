use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::numeric::{deserialize_optional_f64, deserialize_string_to_i64};
use crate::models::courses::entities::Assignment;

/// 作业提交
///
/// `score` 在评分前始终为 `None`；评分后由后端保证落在 `[0, max_points]`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub id: i64,
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub student_id: i64,
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub assignment_id: i64,
    #[serde(default)]
    pub submission_text: String,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub file_original_name: Option<String>,
    #[serde(default)]
    pub submitted_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub score: Option<f64>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub graded_date: Option<String>,
}

impl Submission {
    pub fn is_graded(&self) -> bool {
        self.score.is_some()
    }

    /// 已上传的文件名（存储名），没有附件时为 `None`
    pub fn stored_file_name(&self) -> Option<&str> {
        self.file_path
            .as_deref()
            .map(|p| p.rsplit(['/', '\\']).next().unwrap_or(p))
            .filter(|name| !name.is_empty())
    }

    /// 展示用文件名：优先原始文件名
    pub fn display_file_name(&self) -> Option<&str> {
        self.file_original_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| self.stored_file_name())
    }
}

/// 评分列表中的提交行（附带学生信息）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionWithStudent {
    #[serde(flatten)]
    #[ts(flatten)]
    pub submission: Submission,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub student_email: Option<String>,
}

/// 作业及其全部提交
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct AssignmentSubmissions {
    pub assignment: Assignment,
    #[serde(default)]
    pub submissions: Vec<SubmissionWithStudent>,
}

impl AssignmentSubmissions {
    pub fn find(&self, submission_id: i64) -> Option<&SubmissionWithStudent> {
        self.submissions
            .iter()
            .find(|s| s.submission.id == submission_id)
    }

    pub fn graded_count(&self) -> usize {
        self.submissions
            .iter()
            .filter(|s| s.submission.is_graded())
            .count()
    }
}
