use chrono::SecondsFormat;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Render a timestamp as ISO 8601 with millisecond precision and a `Z`
/// suffix, e.g. `2024-05-01T12:30:00.123Z`.
pub fn iso_timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time in the wire format used by payloads and activity records.
pub fn now_iso() -> String {
    iso_timestamp(chrono::Utc::now())
}
