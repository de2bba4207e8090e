use chrono::NaiveDate;
use tracing::info;

use super::HttpBackend;
use crate::errors::Result;
use crate::models::attendance::{
    entities::{
        AttendanceDateEntry, AttendanceRecord, AttendanceSummary, HistoryPage,
        StudentAttendanceStats,
    },
    requests::{HistoryQuery, MarkAttendanceRequest},
};
use crate::models::common::dates::DATE_FORMAT;
use crate::models::courses::entities::Batch;
use crate::models::users::entities::{RosterEntryWire, RosterStudent, normalize_roster};

impl HttpBackend {
    fn batch_endpoint(&self, batch_id: i64, tail: &[&str]) -> Result<reqwest::Url> {
        let id = batch_id.to_string();
        let mut segments = vec!["attendance", "batch", id.as_str()];
        segments.extend_from_slice(tail);
        self.endpoint(&segments)
    }

    pub async fn list_instructor_batches_impl(&self, instructor_id: i64) -> Result<Vec<Batch>> {
        let url = self.endpoint(&["instructor", &instructor_id.to_string(), "batches"])?;
        self.get_json(url, "讲师批次").await
    }

    pub async fn get_batch_roster_impl(&self, batch_id: i64) -> Result<Vec<RosterStudent>> {
        let url = self.batch_endpoint(batch_id, &["students"])?;
        let rows: Vec<RosterEntryWire> = self.get_json(url, "批次名册").await?;
        normalize_roster(rows)
    }

    pub async fn get_attendance_for_date_impl(
        &self,
        batch_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        let day = date.format(DATE_FORMAT).to_string();
        let url = self.batch_endpoint(batch_id, &["date", &day])?;
        self.get_json(url, "当日考勤").await
    }

    pub async fn get_attendance_history_impl(&self, query: HistoryQuery) -> Result<HistoryPage> {
        let url = self.batch_endpoint(query.batch_id, &["history"])?;
        let builder = self.client.get(url).query(&query.to_query_pairs());
        let response = self.send(builder, "考勤历史").await?;
        Self::decode(response, "考勤历史").await
    }

    pub async fn get_attendance_dates_impl(
        &self,
        batch_id: i64,
    ) -> Result<Vec<AttendanceDateEntry>> {
        let url = self.batch_endpoint(batch_id, &["dates"])?;
        self.get_json(url, "考勤日期").await
    }

    pub async fn get_attendance_summary_impl(&self, batch_id: i64) -> Result<AttendanceSummary> {
        let url = self.batch_endpoint(batch_id, &["summary"])?;
        self.get_json(url, "考勤汇总").await
    }

    pub async fn get_attendance_stats_impl(
        &self,
        batch_id: i64,
    ) -> Result<Vec<StudentAttendanceStats>> {
        let url = self.batch_endpoint(batch_id, &["stats"])?;
        self.get_json(url, "学生考勤统计").await
    }

    pub async fn mark_attendance_impl(&self, request: MarkAttendanceRequest) -> Result<()> {
        let url = self.endpoint(&["attendance", "mark"])?;
        let count = request.attendance.len();
        self.send_unit(self.client.post(url).json(&request), "保存考勤")
            .await?;
        info!(
            batch_id = request.batch_id,
            date = %request.date,
            records = count,
            "Attendance saved"
        );
        Ok(())
    }
}
