use tracing::info;

use super::HttpBackend;
use crate::errors::Result;
use crate::models::courses::entities::Batch;
use crate::models::enrollments::{
    entities::Enrollment,
    requests::{EnrollRequest, PaymentProofRequest},
};

impl HttpBackend {
    pub async fn list_available_batches_impl(&self) -> Result<Vec<Batch>> {
        let url = self.endpoint(&["enrollments", "available-batches"])?;
        self.get_json(url, "可报名批次").await
    }

    pub async fn list_student_enrollments_impl(&self, student_id: i64) -> Result<Vec<Enrollment>> {
        let url = self.endpoint(&["enrollments", "student", &student_id.to_string()])?;
        self.get_json(url, "报名记录").await
    }

    pub async fn enroll_impl(&self, request: EnrollRequest) -> Result<()> {
        let url = self.endpoint(&["enrollments", "enroll"])?;
        self.send_unit(self.client.post(url).json(&request), "报名")
            .await?;
        info!(
            student_id = request.student_id,
            batch_id = request.batch_id,
            "Enrollment created"
        );
        Ok(())
    }

    pub async fn submit_payment_proof_impl(
        &self,
        enrollment_id: i64,
        request: PaymentProofRequest,
    ) -> Result<()> {
        let url = self.endpoint(&["enrollments", &enrollment_id.to_string(), "payment-proof"])?;
        self.send_unit(self.client.post(url).json(&request), "提交缴费凭证")
            .await?;
        info!(enrollment_id, "Payment proof submitted");
        Ok(())
    }
}
