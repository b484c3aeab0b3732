//! Timestamp helpers shared by the domain modules.

use chrono::{Local, SecondsFormat, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Millisecond-timestamp record id. Two calls landing on the same millisecond
/// get consecutive values so ids stay unique within a process.
pub fn new_id() -> String {
    let now = Utc::now().timestamp_millis();
    let mut next = now;
    let _ = LAST_ID.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
        next = if last >= now { last + 1 } else { now };
        Some(next)
    });
    next.to_string()
}

pub fn today_string() -> String {
    Local::now().date_naive().to_string()
}

/// RFC 3339 with millisecond precision, the format the seed data carries.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let a: i64 = new_id().parse().unwrap();
        let b: i64 = new_id().parse().unwrap();
        let c: i64 = new_id().parse().unwrap();
        assert!(a < b && b < c);
    }
}
