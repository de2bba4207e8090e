use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{PortalError, Result};

static SCORE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+$").expect("Invalid score regex"));

static FILE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^/\\\x00-\x1f]+$").expect("Invalid file name regex"));

/// 必填文本：去掉首尾空白后不能为空
pub fn validate_required_text(label: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PortalError::validation(format!("{label}不能为空")));
    }
    Ok(trimmed.to_string())
}

/// 分数输入：必填且必须是整数
///
/// 不与满分比较范围，后端是唯一的判定方。
pub fn validate_score_input(value: &str) -> Result<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PortalError::validation("分数不能为空"));
    }
    if !SCORE_RE.is_match(trimmed) {
        return Err(PortalError::validation(format!(
            "分数必须是整数，收到 '{trimmed}'"
        )));
    }
    trimmed
        .parse::<i64>()
        .map_err(|e| PortalError::validation(format!("分数超出范围: {e}")))
}

/// 用于拼接查看/下载地址的文件名，不允许路径分隔符和 `..`
pub fn validate_file_name(file_name: &str) -> Result<()> {
    if file_name.is_empty() || file_name == "." || file_name.contains("..") {
        return Err(PortalError::validation(format!(
            "文件名不合法: '{file_name}'"
        )));
    }
    if !FILE_NAME_RE.is_match(file_name) {
        return Err(PortalError::validation(format!(
            "文件名不能包含路径分隔符或控制字符: '{file_name}'"
        )));
    }
    Ok(())
}

/// 日期范围：两端都设置时开始不能晚于结束
pub fn validate_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<()> {
    if let (Some(start), Some(end)) = (start, end)
        && start > end
    {
        return Err(PortalError::validation(format!(
            "开始日期 {start} 晚于结束日期 {end}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert_eq!(validate_required_text("提交内容", "  hi ").unwrap(), "hi");
        let err = validate_required_text("提交内容", " \n\t").unwrap_err();
        assert_eq!(err.message(), "提交内容不能为空");
    }

    #[test]
    fn test_score_input() {
        assert_eq!(validate_score_input("85").unwrap(), 85);
        assert_eq!(validate_score_input(" 0 ").unwrap(), 0);
        assert_eq!(validate_score_input("-5").unwrap(), -5);
        assert_eq!(validate_score_input("150").unwrap(), 150);
        assert!(validate_score_input("").is_err());
        assert!(validate_score_input("8.5").is_err());
        assert!(validate_score_input("85abc").is_err());
        assert!(validate_score_input("99999999999999999999").is_err());
    }

    #[test]
    fn test_file_name() {
        assert!(validate_file_name("1700000000-report.pdf").is_ok());
        assert!(validate_file_name("my report (final).docx").is_ok());
        assert!(validate_file_name("../etc/passwd").is_err());
        assert!(validate_file_name("a/b.txt").is_err());
        assert!(validate_file_name("a\\b.txt").is_err());
        assert!(validate_file_name("").is_err());
    }

    #[test]
    fn test_date_range() {
        let d1 = NaiveDate::from_ymd_opt(2024, 3, 1);
        let d2 = NaiveDate::from_ymd_opt(2024, 3, 31);
        assert!(validate_date_range(d1, d2).is_ok());
        assert!(validate_date_range(d1, d1).is_ok());
        assert!(validate_date_range(d2, d1).is_err());
        assert!(validate_date_range(None, d1).is_ok());
    }
}
