use std::sync::Arc;
use tracing::{debug, warn};

use super::CourseAccessService;
use crate::client::LmsBackend;
use crate::errors::Result;
use crate::models::courses::entities::CourseContent;
use crate::models::progress::entities::LessonProgress;
use crate::utils::SelectionTicket;

pub struct PendingCourseLoad {
    ticket: SelectionTicket,
    backend: Arc<dyn LmsBackend>,
    student_id: i64,
    course_id: i64,
}

pub struct CourseLoad {
    ticket: SelectionTicket,
    course_id: i64,
    content: Result<CourseContent>,
    progress: Result<Vec<LessonProgress>>,
}

impl PendingCourseLoad {
    pub async fn fetch(self) -> CourseLoad {
        let (content, progress) = tokio::join!(
            self.backend.get_course_content(self.course_id),
            self.backend
                .get_lesson_progress(self.student_id, self.course_id),
        );
        CourseLoad {
            ticket: self.ticket,
            course_id: self.course_id,
            content,
            progress,
        }
    }
}

pub async fn load_courses(service: &mut CourseAccessService) -> Result<()> {
    let session = service.notice.track(service.session.current())?;
    let _loading = service.loading.begin();
    let result = service.backend.list_student_courses(session.user_id).await;
    service.courses = service.notice.track(result)?;
    debug!(count = service.courses.len(), "Student courses loaded");
    Ok(())
}

pub fn begin_select_course(
    service: &mut CourseAccessService,
    course_id: i64,
) -> Result<PendingCourseLoad> {
    let session = service.session.current()?;

    service.course_id = Some(course_id);
    service.content = None;
    service.progress.clear();
    service.submissions.reset();

    Ok(PendingCourseLoad {
        ticket: service.selection.advance(),
        backend: service.backend.clone(),
        student_id: session.user_id,
        course_id,
    })
}

/// 课程内容是必需的；进度加载失败只提示，课时按未完成显示
pub fn apply_course_load(service: &mut CourseAccessService, load: CourseLoad) -> Result<()> {
    load.ticket.ensure_current("course")?;
    let content = service.notice.track(load.content)?;

    service.progress = match load.progress {
        Ok(progress) => progress,
        Err(e) => {
            warn!(course_id = load.course_id, error = %e, "Lesson progress fetch failed");
            service.notice.record(&e);
            Vec::new()
        }
    };
    debug!(
        course_id = load.course_id,
        lessons = content.lessons.len(),
        completed = service.progress.iter().filter(|p| p.completed).count(),
        "Course opened"
    );
    service.content = Some(content);
    Ok(())
}
