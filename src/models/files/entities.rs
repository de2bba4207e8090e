use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 文件的渲染方式，只由小写扩展名决定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub enum FileKind {
    Image,       // 直接通过 URL 显示
    Pdf,         // 内嵌框架显示
    Text,        // 拉取文本后原样显示
    Unsupported, // 仅提供下载
}

/// 扩展名识别范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub enum ViewerProfile {
    /// jpg/jpeg/png/gif, pdf, txt/csv
    Standard,
    /// 额外识别 webp/svg 图片与 json/html/xml 文本
    Extended,
}

/// 预览发起的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub enum ViewerSource {
    Submission,       // 学生查看自己的提交
    GradedSubmission, // 学生查看已评分提交
    GradingModal,     // 讲师评分弹窗
}

impl ViewerSource {
    pub fn profile(&self) -> ViewerProfile {
        match self {
            ViewerSource::GradingModal => ViewerProfile::Extended,
            ViewerSource::Submission | ViewerSource::GradedSubmission => ViewerProfile::Standard,
        }
    }
}

/// 渲染计划：纯函数的输出，不包含任何网络结果
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub enum PreviewPlan {
    Image { url: String, download_url: String },
    Pdf { url: String, download_url: String },
    Text { url: String, download_url: String },
    Unsupported { download_url: String },
}

impl PreviewPlan {
    pub fn kind(&self) -> FileKind {
        match self {
            PreviewPlan::Image { .. } => FileKind::Image,
            PreviewPlan::Pdf { .. } => FileKind::Pdf,
            PreviewPlan::Text { .. } => FileKind::Text,
            PreviewPlan::Unsupported { .. } => FileKind::Unsupported,
        }
    }

    /// 下载地址始终可用，与是否可预览无关
    pub fn download_url(&self) -> &str {
        match self {
            PreviewPlan::Image { download_url, .. }
            | PreviewPlan::Pdf { download_url, .. }
            | PreviewPlan::Text { download_url, .. }
            | PreviewPlan::Unsupported { download_url } => download_url,
        }
    }
}

/// 预览弹窗的显示状态
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(tag = "state", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub enum PreviewDisplay {
    Loading,
    Image { url: String },
    Pdf { url: String },
    Text { content: String },
    Unsupported,
    Error { message: String },
}

impl PreviewDisplay {
    pub fn is_error(&self) -> bool {
        matches!(self, PreviewDisplay::Error { .. })
    }
}

/// 打开中的预览
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct FilePreview {
    pub file_name: String,
    pub source: ViewerSource,
    pub display: PreviewDisplay,
    pub download_url: String,
}
