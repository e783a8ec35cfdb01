/*
[INPUT]:  JWT authentication
[OUTPUT]: Dashboard statistics and stuck-task listings
[POS]:    HTTP layer - monitoring endpoints (require JWT auth)
[UPDATE]: When adding new monitoring endpoints or changing response format
*/

use crate::http::{DispoClient, Result};
use crate::types::{DashboardStatistics, StuckTask};

impl DispoClient {
    /// Aggregate statistics for the dashboard
    ///
    /// GET /monitoring/dashboard
    pub async fn dashboard_statistics(&self) -> Result<DashboardStatistics> {
        self.authed_get("/monitoring/dashboard").await
    }

    /// Tasks currently stuck on a blocked stage
    ///
    /// GET /monitoring/stuck-tasks
    pub async fn stuck_tasks(&self) -> Result<Vec<StuckTask>> {
        self.authed_get("/monitoring/stuck-tasks").await
    }
}
