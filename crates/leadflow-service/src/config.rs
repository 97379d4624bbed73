//! Service configuration.

/// Configuration shared by the read-side components.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Window used by `ReportingAggregator::closed_last_week` (default: 7).
    pub report_window_days: u32,
    /// Display name substituted for agent or author references that no
    /// longer resolve (default: "Unknown").
    pub unknown_label: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            report_window_days: 7,
            unknown_label: "Unknown".into(),
        }
    }
}
