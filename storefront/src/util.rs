//! Small shared helpers

/// Current time as Unix milliseconds.
///
/// The repository layer traffics exclusively in `i64` millis; date
/// formatting happens at the presentation boundary.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
