use dotenv::dotenv;
use human_panic::setup_panic;
use serde_json::json;
use tracing::{debug, error, warn};

// 从 lib.rs 导入模块
use rust_lms_portal::config::AppConfig;
use rust_lms_portal::errors::Result;
use rust_lms_portal::runtime::lifetime::{self, startup::StartupContext};
use rust_lms_portal::runtime::logging::init_tracing;
use rust_lms_portal::services::{
    AttendanceService, CourseAccessService, EnrollmentService, InstructorCoursesService,
};

/// 按角色加载首页数据并输出 JSON 快照
async fn dashboard_snapshot(
    startup: &StartupContext,
    config: &AppConfig,
) -> Result<serde_json::Value> {
    let session = startup.session.current()?;

    if session.role.is_staff() {
        let mut courses =
            InstructorCoursesService::new(startup.backend.clone(), startup.session.clone());
        let mut attendance = AttendanceService::new(
            startup.backend.clone(),
            startup.session.clone(),
            &config.attendance,
        );
        let (courses_result, batches_result) =
            tokio::join!(courses.load_courses(), attendance.load_batches());
        courses_result?;
        batches_result?;

        Ok(json!({
            "session": session,
            "courses": courses.courses(),
            "batches": attendance.batches(),
        }))
    } else {
        let mut enrollments =
            EnrollmentService::new(startup.backend.clone(), startup.session.clone());
        let mut access = CourseAccessService::new(startup.backend.clone(), startup.session.clone());
        let (enrollments_result, courses_result) =
            tokio::join!(enrollments.load(), access.load_courses());
        enrollments_result?;
        courses_result?;

        let batch_states: Vec<_> = enrollments
            .available()
            .iter()
            .map(|b| json!({ "batch": b, "state": enrollments.batch_state(b.id) }))
            .collect();
        Ok(json!({
            "session": session,
            "courses": access.courses(),
            "enrollments": enrollments.enrollments(),
            "batches": batch_states,
        }))
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    let started_at = chrono::Utc::now();

    // 初始化配置
    setup_panic!();
    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to initialize configuration: {e}");
        std::process::exit(1);
    }
    let config = AppConfig::get();

    // 初始化日志
    let _guard = init_tracing(config);

    warn!(
        "Starting {}...
        Project: {}
        Version: {}
        Authors: {}",
        config.app.system_name,
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS")
    );

    let startup = match lifetime::startup::prepare_portal_startup(config).await {
        Ok(startup) => startup,
        Err(e) => {
            error!("Startup failed: {}", e);
            return Err(std::io::Error::other(e));
        }
    };

    debug!(
        "Startup completed in {} ms",
        chrono::Utc::now()
            .signed_duration_since(started_at)
            .num_milliseconds()
    );

    if !startup.session.is_authenticated() {
        warn!("Nothing to load without a session");
        return Ok(());
    }

    tokio::select! {
        res = dashboard_snapshot(&startup, config) => match res {
            Ok(snapshot) => {
                let rendered = serde_json::to_string_pretty(&snapshot)
                    .map_err(std::io::Error::other)?;
                println!("{rendered}");
            }
            Err(e) => {
                error!(code = e.code(), "Dashboard load failed: {}", e);
                return Err(std::io::Error::other(e));
            }
        },
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Interrupted before the dashboard finished loading");
        }
    }

    Ok(())
}
