use chrono::Utc;

// Filename-safe ISO-8601 variant (no colons), always UTC.
const TS_FORMAT: &str = "%Y-%m-%dT%H-%M-%SZ";

pub fn current_timestamp() -> String {
    Utc::now().format(TS_FORMAT).to_string()
}
