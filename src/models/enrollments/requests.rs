use serde::Serialize;
use ts_rs::TS;

/// 报名请求
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollRequest {
    pub student_id: i64,
    pub batch_id: i64,
}

/// 提交缴费凭证请求
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct PaymentProofRequest {
    pub payment_proof: String,
}
