use crate::repository;

const RANGE: &str = "MandatoryChannels!A2:A";

repository!(Channels,
    /// All mandatory channels, in sheet order.
    pub async fn list(&self) -> anyhow::Result<Vec<String>> {
        let rows = self.store.read_range(RANGE).await?;
        Ok(rows.into_iter()
            .filter_map(|row| row.into_iter().next())
            .filter(|name| !name.is_empty())
            .collect())
    }
,
    pub async fn append(&self, name: &str) -> anyhow::Result<()> {
        self.store.append_rows(RANGE, vec![vec![name.to_owned()]]).await
            .map_err(Into::into)
    }
);
