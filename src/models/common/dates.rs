//! 日期字段的宽松反序列化
//!
//! DATE 列经过后端 JSON 序列化后可能带时间部分（`2024-03-05T00:00:00.000Z`），
//! 考勤只关心日期，这里截取前 10 个字符解析。

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 解析 `YYYY-MM-DD`（允许带时间后缀）
pub fn parse_date_prefix(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    let trimmed = value.trim();
    let head = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(head, DATE_FORMAT)
}

pub fn deserialize_lenient_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date_prefix(&raw)
        .map_err(|e| serde::de::Error::custom(format!("无效的日期 '{raw}': {e}")))
}

pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_date_prefix(&raw)
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("无效的日期 '{raw}': {e}"))),
    }
}
