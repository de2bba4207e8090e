//! 视图状态服务
//!
//! 每个服务持有一个页面的全部状态，通过 `LmsBackend` 与后端交互，
//! 对外只暴露可直接渲染的派生值。

pub mod attendance;
pub mod course_access;
pub mod courses;
pub mod enrollments;
pub mod files;
pub mod grading;
pub mod submissions;

pub use attendance::AttendanceService;
pub use course_access::CourseAccessService;
pub use courses::InstructorCoursesService;
pub use enrollments::EnrollmentService;
pub use files::FilePreviewService;
pub use grading::GradingService;
pub use submissions::SubmissionService;

use crate::errors::{PortalError, Result};

/// 页面横幅：保存最近一次失败，下一次成功的动作会清除它
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notice {
    last: Option<PortalError>,
}

impl Notice {
    pub fn current(&self) -> Option<&PortalError> {
        self.last.as_ref()
    }

    pub fn record(&mut self, err: &PortalError) {
        // 过期响应不打扰用户
        if !err.is_stale() {
            self.last = Some(err.clone());
        }
    }

    pub fn clear(&mut self) {
        self.last = None;
    }

    /// 按结果更新横幅并原样返回结果
    pub fn track<T>(&mut self, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.clear(),
            Err(e) => self.record(e),
        }
        result
    }
}
