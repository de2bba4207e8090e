use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{PortalError, Result};
use crate::models::common::numeric::deserialize_string_to_i64;

// 缴费状态：pending → submitted → verified | rejected → submitted
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub enum PaymentStatus {
    Pending,   // 待提交凭证
    Submitted, // 已提交，等待审核
    Verified,  // 审核通过
    Rejected,  // 审核拒绝，可重新提交
}

impl PaymentStatus {
    pub const PENDING: &'static str = "pending";
    pub const SUBMITTED: &'static str = "submitted";
    pub const VERIFIED: &'static str = "verified";
    pub const REJECTED: &'static str = "rejected";

    /// 状态机的合法迁移
    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        matches!(
            (self, next),
            (PaymentStatus::Pending, PaymentStatus::Submitted)
                | (PaymentStatus::Rejected, PaymentStatus::Submitted)
                | (PaymentStatus::Submitted, PaymentStatus::Verified)
                | (PaymentStatus::Submitted, PaymentStatus::Rejected)
        )
    }

    /// 学生提交凭证后的状态
    pub fn next_on_submit(&self) -> Result<PaymentStatus> {
        if self.can_transition_to(PaymentStatus::Submitted) {
            Ok(PaymentStatus::Submitted)
        } else {
            Err(PortalError::invalid_transition(format!(
                "缴费状态为 {self} 时不能提交凭证"
            )))
        }
    }

    /// 只有审核通过后才能访问课程内容
    pub fn is_course_accessible(&self) -> bool {
        matches!(self, PaymentStatus::Verified)
    }
}

impl<'de> Deserialize<'de> for PaymentStatus {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的缴费状态: '{s}'. 支持的状态: pending, submitted, verified, rejected"
            ))
        })
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "{}", PaymentStatus::PENDING),
            PaymentStatus::Submitted => write!(f, "{}", PaymentStatus::SUBMITTED),
            PaymentStatus::Verified => write!(f, "{}", PaymentStatus::VERIFIED),
            PaymentStatus::Rejected => write!(f, "{}", PaymentStatus::REJECTED),
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            PaymentStatus::PENDING => Ok(PaymentStatus::Pending),
            PaymentStatus::SUBMITTED => Ok(PaymentStatus::Submitted),
            PaymentStatus::VERIFIED => Ok(PaymentStatus::Verified),
            PaymentStatus::REJECTED => Ok(PaymentStatus::Rejected),
            _ => Err(format!("Invalid payment status: {s}")),
        }
    }
}

/// 报名记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct Enrollment {
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub id: i64,
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub student_id: i64,
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub batch_id: i64,
    // 报名状态（enrolled 等，由后端决定）
    pub status: String,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub verification_notes: Option<String>,
    #[serde(default)]
    pub payment_proof: Option<String>,
    #[serde(default)]
    pub course_title: Option<String>,
    #[serde(default)]
    pub batch_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_state_machine() {
        use PaymentStatus::*;
        assert!(Pending.can_transition_to(Submitted));
        assert!(Rejected.can_transition_to(Submitted));
        assert!(Submitted.can_transition_to(Verified));
        assert!(Submitted.can_transition_to(Rejected));
        assert!(!Pending.can_transition_to(Verified));
        assert!(!Verified.can_transition_to(Submitted));
        assert!(!Submitted.can_transition_to(Submitted));

        assert_eq!(Pending.next_on_submit(), Ok(Submitted));
        assert_eq!(Rejected.next_on_submit(), Ok(Submitted));
        assert_eq!(Verified.next_on_submit().unwrap_err().code(), "E013");
    }

    #[test]
    fn test_course_access_only_when_verified() {
        assert!(PaymentStatus::Verified.is_course_accessible());
        assert!(!PaymentStatus::Submitted.is_course_accessible());
        assert!(!PaymentStatus::Rejected.is_course_accessible());
    }

    #[test]
    fn test_enrollment_from_backend_row() {
        let body = r#"{"id": "3", "student_id": 1, "batch_id": 2, "status": "enrolled",
                       "payment_status": "rejected", "verification_notes": "Amount mismatch"}"#;
        let enrollment: Enrollment = serde_json::from_str(body).unwrap();
        assert_eq!(enrollment.id, 3);
        assert_eq!(enrollment.payment_status, PaymentStatus::Rejected);
        assert!(
            serde_json::from_str::<Enrollment>(&body.replace("rejected", "refunded")).is_err()
        );
    }
}
