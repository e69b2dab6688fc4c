//! Subscriber entity representing a single email signup.

use chrono::{DateTime, Utc};

/// An email signup stored in `email_subscribers`.
///
/// Records are written by the external signup flow and are never modified by
/// this service; the admin panel only reads them.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Subscriber {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Subscriber {
    /// Creates a new Subscriber instance.
    pub fn new(id: i64, email: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email: email.into(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_subscriber_creation() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let subscriber = Subscriber::new(7, "ann@example.com", at);

        assert_eq!(subscriber.id, 7);
        assert_eq!(subscriber.email, "ann@example.com");
        assert_eq!(subscriber.created_at, at);
    }
}
