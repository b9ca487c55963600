use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use crate::config::SheetsConfig;

/// A single row of the spreadsheet; cells are always strings.
pub type Row = Vec<String>;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum StoreError {
    #[display("Unavailable({source})")]
    Unavailable { source: reqwest::Error },
    #[display("Denied(status={status})")]
    Denied { #[error(not(source))] status: StatusCode },
}

impl From<reqwest::Error> for StoreError {
    fn from(source: reqwest::Error) -> Self {
        Self::Unavailable { source }
    }
}

/// Named-range access to the tabular store. The repositories are written
/// against this trait so the backing technology is swappable; the production
/// implementation is [`SheetsClient`], the tests use an in-memory one.
#[async_trait]
pub trait ValueStore: Send + Sync {
    /// Returns all rows of the range; an empty range yields an empty vector.
    async fn read_range(&self, range: &str) -> Result<Vec<Row>, StoreError>;
    /// Appends rows after the last data row of the range.
    async fn append_rows(&self, range: &str, rows: Vec<Row>) -> Result<(), StoreError>;
    /// Overwrites exactly the cells of the given row/column window.
    async fn update_range(&self, range: &str, rows: Vec<Row>) -> Result<(), StoreError>;
}

/// Thin client for the Google Sheets v4 `values` endpoints. No caching and
/// no retries: every call is a fresh request, so every read reflects the
/// sheet at call time.
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Row>,
}

#[derive(Serialize)]
struct ValuePayload {
    values: Vec<Row>,
}

impl SheetsClient {
    pub fn new(config: &SheetsConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("https://sheets.googleapis.com/v4/spreadsheets/{}/values", config.spreadsheet_id),
            api_token: config.api_token.clone(),
        }
    }

    fn range_url(&self, range: &str) -> String {
        format!("{}/{}", self.base_url, range)
    }

    fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            Err(StoreError::Denied { status })
        }
    }
}

#[async_trait]
impl ValueStore for SheetsClient {
    async fn read_range(&self, range: &str) -> Result<Vec<Row>, StoreError> {
        let resp = self.http.get(self.range_url(range))
            .bearer_auth(&self.api_token)
            .send()
            .await?;
        let body: ValueRange = Self::check_status(resp)?
            .json()
            .await?;
        Ok(body.values)
    }

    async fn append_rows(&self, range: &str, rows: Vec<Row>) -> Result<(), StoreError> {
        let url = format!("{}:append", self.range_url(range));
        let resp = self.http.post(url)
            .bearer_auth(&self.api_token)
            .query(&[("valueInputOption", "RAW")])
            .json(&ValuePayload { values: rows })
            .send()
            .await?;
        Self::check_status(resp)?;
        Ok(())
    }

    async fn update_range(&self, range: &str, rows: Vec<Row>) -> Result<(), StoreError> {
        let resp = self.http.put(self.range_url(range))
            .bearer_auth(&self.api_token)
            .query(&[("valueInputOption", "RAW")])
            .json(&ValuePayload { values: rows })
            .send()
            .await?;
        Self::check_status(resp)?;
        Ok(())
    }
}
