use crate::sheets::Row;

/// The latest aggregate row of the `Stats` sheet:
/// `[date, total users, added today, added this week, added this month,
/// active, inactive]`. Populated by an external job, read-only for the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub date: String,
    pub total_users: u64,
    pub added_today: u64,
    pub added_week: u64,
    pub added_month: u64,
    pub active: u64,
    pub inactive: u64,
}

impl StatsSnapshot {
    /// What gets reported when the sheet holds no snapshot yet.
    pub fn placeholder() -> Self {
        Self {
            date: "N/A".to_owned(),
            total_users: 0,
            added_today: 0,
            added_week: 0,
            added_month: 0,
            active: 0,
            inactive: 0,
        }
    }

    pub fn from_row(row: &Row) -> Self {
        let count = |index: usize| row.get(index)
            .and_then(|cell| cell.parse().ok())
            .unwrap_or_default();
        Self {
            date: row.first()
                .filter(|cell| !cell.is_empty())
                .cloned()
                .unwrap_or_else(|| "N/A".to_owned()),
            total_users: count(1),
            added_today: count(2),
            added_week: count(3),
            added_month: count(4),
            active: count(5),
            inactive: count(6),
        }
    }
}
