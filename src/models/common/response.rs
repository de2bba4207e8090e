use serde::Deserialize;

// 后端错误响应体，字段名不统一（message / error）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiMessage {
    /// 从响应体中提取可展示的信息，非 JSON 时回退为原始文本
    pub fn extract(body: &str) -> Option<String> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return None;
        }
        match serde_json::from_str::<ApiMessage>(trimmed) {
            Ok(parsed) => parsed.error.or(parsed.message),
            Err(_) => Some(trimmed.chars().take(200).collect()),
        }
    }
}
