use serde::Serialize;
use tracing::info;
use ts_rs::TS;

use super::EnrollmentService;
use super::enroll::refresh_enrollments;
use crate::errors::{PortalError, Result};
use crate::models::enrollments::requests::PaymentProofRequest;
use crate::utils::validate::validate_required_text;

/// 缴费凭证弹窗
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct PaymentForm {
    pub enrollment_id: i64,
    pub proof: String,
}

/// 只有待缴费或被拒的报名可以提交凭证
pub fn open_payment(service: &mut EnrollmentService, enrollment_id: i64) -> Result<()> {
    let enrollment = service
        .enrollments
        .iter()
        .find(|e| e.id == enrollment_id)
        .ok_or_else(|| PortalError::not_found(format!("报名记录 {enrollment_id} 不存在")))?;
    let checked = enrollment.payment_status.next_on_submit();
    service.notice.track(checked)?;

    service.payment.open(PaymentForm {
        enrollment_id,
        proof: String::new(),
    });
    Ok(())
}

pub async fn submit_payment_proof(service: &mut EnrollmentService) -> Result<()> {
    let session = service.notice.track(service.session.current())?;
    let Some(form) = service.payment.payload().cloned() else {
        return Err(PortalError::validation("缴费弹窗未打开"));
    };
    let checked = validate_required_text("缴费凭证", &form.proof);
    let proof = service.notice.track(checked)?;
    let Some(_paying) = service.paying.try_begin() else {
        return Err(PortalError::action_in_flight("正在提交缴费凭证"));
    };

    let request = PaymentProofRequest {
        payment_proof: proof,
    };
    let result = service
        .backend
        .submit_payment_proof(form.enrollment_id, request)
        .await;
    service.notice.track(result)?;
    info!(enrollment_id = form.enrollment_id, "Payment proof submitted");

    service.payment.close();
    refresh_enrollments(service, session.user_id).await;
    Ok(())
}
