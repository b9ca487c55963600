use rust_i18n::t;
use teloxide::Bot;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, UserId};
use crate::config::AppConfig;
use crate::domain::StatsSnapshot;
use crate::handlers::{ensure_lang_code, HandlerResult};
use crate::metrics;
use crate::repo::Repositories;

pub const ADMIN_STATS_CALLBACK_DATA: &str = "admin_stats";

pub fn callback_filter(query: CallbackQuery) -> bool {
    query.data.as_deref() == Some(ADMIN_STATS_CALLBACK_DATA)
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub enum StatsOutcome {
    Report(String),
    Unauthorized,
}

/// The admin check comes before any store access: a non-admin tap must not
/// cost a read, let alone produce a reply.
pub(crate) async fn stats_impl(repos: &Repositories, config: &AppConfig,
                               user_id: UserId, lang_code: &str) -> anyhow::Result<StatsOutcome> {
    if user_id != config.admin_id {
        return Ok(StatsOutcome::Unauthorized)
    }
    let snapshot = repos.stats.latest().await?
        .unwrap_or_else(StatsSnapshot::placeholder);
    let report = t!("stats.report", locale = lang_code,
        date = snapshot.date, total = snapshot.total_users,
        today = snapshot.added_today, week = snapshot.added_week,
        month = snapshot.added_month, active = snapshot.active,
        inactive = snapshot.inactive);
    Ok(StatsOutcome::Report(report.to_string()))
}

pub async fn callback_handler(bot: Bot, query: CallbackQuery,
                              repos: Repositories, config: AppConfig) -> HandlerResult {
    metrics::CALLBACK_STATS_COUNTER.inc();
    bot.answer_callback_query(query.id.clone()).await?;

    let lang_code = ensure_lang_code(Some(&query.from));
    match stats_impl(&repos, &config, query.from.id, &lang_code).await? {
        StatsOutcome::Report(text) => {
            bot.send_message(ChatId(query.from.id.0 as i64), text).await?;
        }
        StatsOutcome::Unauthorized => {
            log::info!("ignoring the stats callback from a non-admin user {}", query.from.id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::repo::test::{repos_over, InMemoryStore, UID};
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            admin_id: UserId(UID),
            base_channel_id: "-1001234567890".to_owned(),
            inline_results_limit: 50,
        }
    }

    #[tokio::test]
    async fn non_admin_gets_no_report_and_costs_no_read() {
        let store = InMemoryStore::empty();
        let repos = repos_over(&store);

        let outcome = stats_impl(&repos, &config(), UserId(UID + 1), "en").await
            .expect("stats failed");
        assert_eq!(outcome, StatsOutcome::Unauthorized);
        assert_eq!(store.reads(), 0);
    }

    #[tokio::test]
    async fn empty_stats_sheet_reports_the_placeholder() {
        let store = InMemoryStore::empty();
        let repos = repos_over(&store);

        let outcome = stats_impl(&repos, &config(), UserId(UID), "en").await
            .expect("stats failed");
        let StatsOutcome::Report(text) = outcome else {
            panic!("expected a report")
        };
        assert!(text.contains("N/A"));
        assert!(text.contains('0'));
        assert_eq!(store.reads(), 1);
    }

    #[tokio::test]
    async fn latest_snapshot_values_appear_in_the_report() {
        let store = InMemoryStore::with_sheet("Stats", vec![
            ["2024-05-01", "100", "2", "10", "37", "60", "40"].map(str::to_owned).to_vec(),
        ]);
        let repos = repos_over(&store);

        let outcome = stats_impl(&repos, &config(), UserId(UID), "en").await
            .expect("stats failed");
        let StatsOutcome::Report(text) = outcome else {
            panic!("expected a report")
        };
        assert!(text.contains("100"));
        assert!(text.contains("40"));
    }
}
