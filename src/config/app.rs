use teloxide::types::UserId;
use crate::config::env::*;

#[derive(Clone)]
pub struct AppConfig {
    pub admin_id: UserId,
    pub base_channel_id: String,
    pub inline_results_limit: usize,
}

/// Coordinates of the spreadsheet used as the backing store.
#[derive(Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub api_token: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let admin_id: u64 = get_mandatory_env_value("ADMIN_ID");
        let base_channel_id = get_mandatory_env_value("BASE_CHANNEL_ID");
        let inline_results_limit = get_env_value_or_default("INLINE_RESULTS_LIMIT", 50);
        Self {
            admin_id: UserId(admin_id),
            base_channel_id,
            inline_results_limit,
        }
    }
}

impl SheetsConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            spreadsheet_id: get_env_mandatory_value("SPREADSHEET_ID")?,
            api_token: get_env_mandatory_value("GOOGLE_API_TOKEN")?,
        })
    }
}
