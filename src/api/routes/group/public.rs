//! Public types for the group dashboard
use serde::Serialize;

/// Values rendered into the dashboard template
#[derive(Serialize)]
pub struct DashboardContext {
    pub title: String,
    pub data_url: String,
}
