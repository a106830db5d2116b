use chrono::Utc;

/// Wall-clock seconds since the Unix epoch, the time base handed to the
/// engine.
pub fn now_secs() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}
