use db::models::result::{Model as StudentResult, PassStatus};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_results: u64,
    pub pending_submissions: u64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AnalyticsResponse {
    pub total_students: usize,
    pub passed: usize,
    pub failed: usize,
    /// Mean percentage across results, rounded to two decimals. `0.0` with no results.
    pub average_percentage: f64,
}

impl AnalyticsResponse {
    pub fn from_results(results: &[StudentResult]) -> Self {
        let total_students = results.len();
        let passed = results
            .iter()
            .filter(|r| r.pass_status == PassStatus::Pass)
            .count();

        let average_percentage = if total_students == 0 {
            0.0
        } else {
            let sum: f64 = results.iter().map(|r| r.percentage).sum();
            (sum / total_students as f64 * 100.0).round() / 100.0
        };

        Self {
            total_students,
            passed,
            failed: total_students - passed,
            average_percentage,
        }
    }
}
