use serde::Serialize;
use ts_rs::TS;

/// 提交附带的单个文件
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// 学生提交作业（multipart 编码由客户端实现负责）
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitAssignmentRequest {
    pub student_id: i64,
    pub assignment_id: i64,
    pub submission_text: String,
    pub file: Option<SubmissionFile>,
}

/// 评分请求
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GradeSubmissionRequest {
    pub score: i64,
    pub feedback: String,
    pub graded_by: i64,
    pub graded_date: chrono::DateTime<chrono::Utc>,
}
