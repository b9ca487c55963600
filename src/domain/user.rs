use chrono::{DateTime, SecondsFormat, Utc};
use teloxide::types::UserId;
use crate::sheets::Row;

/// A user record as stored in the `Users` sheet:
/// `[id, subscribed channels (JSON list), created at, last active at]`.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub subscribed_channels: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            subscribed_channels: Vec::new(),
            created_at: now,
            last_active_at: now,
        }
    }

    pub fn from_row(row: &Row) -> Option<Self> {
        let id = row.first()
            .filter(|cell| !cell.is_empty())?
            .to_owned();
        let subscribed_channels = row.get(1)
            .and_then(|cell| serde_json::from_str(cell).ok())
            .unwrap_or_default();
        let created_at = parse_timestamp(row.get(2), &id)?;
        let last_active_at = parse_timestamp(row.get(3), &id)?;
        Some(Self { id, subscribed_channels, created_at, last_active_at })
    }

    pub fn to_row(&self) -> Row {
        let channels = serde_json::to_string(&self.subscribed_channels)
            .unwrap_or_else(|_| "[]".to_owned());
        vec![
            self.id.clone(),
            channels,
            format_timestamp(self.created_at),
            format_timestamp(self.last_active_at),
        ]
    }
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(cell: Option<&String>, id: &str) -> Option<DateTime<Utc>> {
    cell.and_then(|cell| DateTime::parse_from_rfc3339(cell)
            .inspect_err(|e| log::warn!("broken timestamp '{cell}' in the row of user {id}: {e}"))
            .ok())
        .map(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(channels: &str) -> Row {
        vec![
            "12345".to_owned(),
            channels.to_owned(),
            "2024-05-01T10:00:00.000Z".to_owned(),
            "2024-05-02T11:30:00.000Z".to_owned(),
        ]
    }

    #[test]
    fn row_round_trip() {
        let user = User::from_row(&row(r#"["ch_one","ch_two"]"#)).expect("valid row");
        assert_eq!(user.id, "12345");
        assert_eq!(user.subscribed_channels, vec!["ch_one", "ch_two"]);
        assert_eq!(user.to_row(), row(r#"["ch_one","ch_two"]"#));
    }

    #[test]
    fn new_user_has_equal_timestamps_and_no_subscriptions() {
        let user = User::new(UserId(42), Utc::now());
        assert_eq!(user.created_at, user.last_active_at);
        assert!(user.subscribed_channels.is_empty());

        let row = user.to_row();
        assert_eq!(row[0], "42");
        assert_eq!(row[1], "[]");
        assert_eq!(row[2], row[3]);
    }

    #[test]
    fn garbage_subscription_cell_is_treated_as_empty() {
        let user = User::from_row(&row("not json")).expect("valid row");
        assert!(user.subscribed_channels.is_empty());
    }

    #[test]
    fn short_or_broken_rows_are_rejected() {
        assert!(User::from_row(&vec!["12345".to_owned(), "[]".to_owned()]).is_none());
        assert!(User::from_row(&vec![]).is_none());

        let mut broken = row("[]");
        broken[3] = "yesterday".to_owned();
        assert!(User::from_row(&broken).is_none());
    }
}
