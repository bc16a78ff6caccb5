//! Timestamp utilities

use chrono::{DateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Milliseconds since the Unix epoch, used for timestamp-derived ids
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // After 2000-01-01 and before 2100-01-01
        assert!(timestamp.timestamp() > 946_684_800);
        assert!(timestamp.timestamp() < 4_102_444_800);
    }

    #[tokio::test]
    async fn test_now_millis_advances() {
        let first = now_millis();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = now_millis();
        assert!(second > first);
    }
}
