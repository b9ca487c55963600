use crate::domain::StatsSnapshot;
use crate::repository;

const RANGE: &str = "Stats!A2:G";

repository!(Stats,
    /// The last row of the sheet; the external aggregation job appends one
    /// snapshot per day.
    pub async fn latest(&self) -> anyhow::Result<Option<StatsSnapshot>> {
        let rows = self.store.read_range(RANGE).await?;
        Ok(rows.last().map(StatsSnapshot::from_row))
    }
);
