pub mod enroll;
pub mod payment;

use serde::Serialize;
use std::sync::Arc;
use ts_rs::TS;

use super::Notice;
use crate::client::LmsBackend;
use crate::errors::Result;
use crate::models::common::modal::ModalState;
use crate::models::courses::entities::Batch;
use crate::models::enrollments::entities::{Enrollment, PaymentStatus};
use crate::session::SessionContext;
use crate::utils::BusyFlag;

pub use payment::PaymentForm;

/// 批次列表中每个批次对当前学生的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "state", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub enum BatchState {
    Available,
    Enrolled { payment_status: PaymentStatus },
}

/// 学生报名与缴费
pub struct EnrollmentService {
    pub(crate) backend: Arc<dyn LmsBackend>,
    pub(crate) session: SessionContext,
    pub(crate) available: Vec<Batch>,
    pub(crate) enrollments: Vec<Enrollment>,
    pub(crate) payment: ModalState<PaymentForm>,
    pub(crate) loading: BusyFlag,
    pub(crate) enrolling: BusyFlag,
    pub(crate) paying: BusyFlag,
    pub(crate) notice: Notice,
}

impl EnrollmentService {
    pub fn new(backend: Arc<dyn LmsBackend>, session: SessionContext) -> Self {
        Self {
            backend,
            session,
            available: Vec::new(),
            enrollments: Vec::new(),
            payment: ModalState::Closed,
            loading: BusyFlag::new(),
            enrolling: BusyFlag::new(),
            paying: BusyFlag::new(),
            notice: Notice::default(),
        }
    }

    pub fn available(&self) -> &[Batch] {
        &self.available
    }

    pub fn enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    pub fn payment_form(&self) -> Option<&PaymentForm> {
        self.payment.payload()
    }

    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_busy()
    }

    pub fn is_enrolling(&self) -> bool {
        self.enrolling.is_busy()
    }

    pub fn enrollment_for(&self, batch_id: i64) -> Option<&Enrollment> {
        self.enrollments.iter().find(|e| e.batch_id == batch_id)
    }

    pub fn batch_state(&self, batch_id: i64) -> BatchState {
        match self.enrollment_for(batch_id) {
            Some(e) => BatchState::Enrolled {
                payment_status: e.payment_status,
            },
            None => BatchState::Available,
        }
    }

    /// 缴费审核通过、可以进入课程的报名
    pub fn accessible_enrollments(&self) -> Vec<&Enrollment> {
        self.enrollments
            .iter()
            .filter(|e| e.payment_status.is_course_accessible())
            .collect()
    }

    pub async fn load(&mut self) -> Result<()> {
        enroll::load(self).await
    }

    pub async fn enroll(&mut self, batch_id: i64) -> Result<()> {
        enroll::enroll(self, batch_id).await
    }

    pub fn open_payment(&mut self, enrollment_id: i64) -> Result<()> {
        payment::open_payment(self, enrollment_id)
    }

    pub fn set_payment_proof(&mut self, proof: impl Into<String>) {
        if let Some(form) = self.payment.payload_mut() {
            form.proof = proof.into();
        }
    }

    pub fn close_payment(&mut self) {
        self.payment.close();
    }

    pub async fn submit_payment_proof(&mut self) -> Result<()> {
        payment::submit_payment_proof(self).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::client::fake::{FakeBackend, batch};
    use crate::models::users::entities::UserRole;
    use crate::session::Session;

    pub fn enrollment(id: i64, batch_id: i64, payment_status: PaymentStatus) -> Enrollment {
        Enrollment {
            id,
            student_id: 7,
            batch_id,
            status: "enrolled".to_string(),
            payment_status,
            verification_notes: None,
            payment_proof: None,
            course_title: Some("Rust 101".to_string()),
            batch_name: Some(format!("Batch {batch_id}")),
        }
    }

    /// 学生 7：批次 1 待缴费，批次 2 被拒，批次 3 已审核，批次 4 未报名
    pub fn fake() -> FakeBackend {
        FakeBackend::new().with(|s| {
            s.available = vec![
                batch(1, "Spring"),
                batch(2, "Summer"),
                batch(3, "Autumn"),
                batch(4, "Winter"),
            ];
            s.enrollments = vec![
                enrollment(21, 1, PaymentStatus::Pending),
                enrollment(22, 2, PaymentStatus::Rejected),
                enrollment(23, 3, PaymentStatus::Verified),
            ];
        })
    }

    pub fn service(backend: Arc<FakeBackend>) -> EnrollmentService {
        let session = SessionContext::new();
        session.login(Session::new(7, UserRole::Student));
        EnrollmentService::new(backend, session)
    }
}
