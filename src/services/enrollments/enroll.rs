use tracing::{debug, info, warn};

use super::EnrollmentService;
use crate::errors::{PortalError, Result};
use crate::models::enrollments::requests::EnrollRequest;

/// 并发加载可报名批次和已有报名
pub async fn load(service: &mut EnrollmentService) -> Result<()> {
    let session = service.notice.track(service.session.current())?;
    let _loading = service.loading.begin();

    let (available, enrollments) = tokio::join!(
        service.backend.list_available_batches(),
        service.backend.list_student_enrollments(session.user_id),
    );
    service.available = service.notice.track(available)?;
    service.enrollments = service.notice.track(enrollments)?;
    debug!(
        available = service.available.len(),
        enrolled = service.enrollments.len(),
        "Enrollment data loaded"
    );
    Ok(())
}

/// 报名或缴费成功后刷新报名列表，失败只记录到横幅
pub(crate) async fn refresh_enrollments(service: &mut EnrollmentService, student_id: i64) {
    let result = service.backend.list_student_enrollments(student_id).await;
    match service.notice.track(result) {
        Ok(enrollments) => service.enrollments = enrollments,
        Err(e) => warn!(student_id, error = %e, "Enrollment refresh after change failed"),
    }
}

pub async fn enroll(service: &mut EnrollmentService, batch_id: i64) -> Result<()> {
    let session = service.notice.track(service.session.current())?;
    if service.enrollment_for(batch_id).is_some() {
        let err = PortalError::validation(format!("已报名批次 {batch_id}"));
        service.notice.record(&err);
        return Err(err);
    }
    let Some(_enrolling) = service.enrolling.try_begin() else {
        return Err(PortalError::action_in_flight("正在提交报名"));
    };

    let request = EnrollRequest {
        student_id: session.user_id,
        batch_id,
    };
    let result = service.backend.enroll(request).await;
    service.notice.track(result)?;
    info!(batch_id, student_id = session.user_id, "Enrolled in batch");

    refresh_enrollments(service, session.user_id).await;
    Ok(())
}
