/// Interval between scheduled refresh cycles, in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Trailing window for the daily lead trend, in calendar days
pub const DEFAULT_TREND_WINDOW_DAYS: u32 = 7;

/// Lead window fetched alongside the stats feed for the dashboard view
pub const DEFAULT_DASHBOARD_LEAD_LIMIT: usize = 100;
