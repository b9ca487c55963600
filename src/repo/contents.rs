use crate::domain::Content;
use crate::repository;

const RANGE: &str = "Content!A2:E";

repository!(Contents,
    pub async fn all(&self) -> anyhow::Result<Vec<Content>> {
        let rows = self.store.read_range(RANGE).await?;
        Ok(rows.iter()
            .filter_map(Content::from_row)
            .collect())
    }
,
    /// Linear scan, first exact match on the post id column.
    pub async fn find_by_id(&self, post_id: &str) -> anyhow::Result<Option<Content>> {
        let rows = self.store.read_range(RANGE).await?;
        Ok(rows.iter()
            .find(|row| row.first().is_some_and(|cell| cell == post_id))
            .and_then(Content::from_row))
    }
,
    /// Case-insensitive substring match against the titles.
    pub async fn search(&self, query: &str) -> anyhow::Result<Vec<Content>> {
        let needle = query.to_lowercase();
        Ok(self.all().await?
            .into_iter()
            .filter(|content| content.title.to_lowercase().contains(&needle))
            .collect())
    }
,
    pub async fn append(&self, content: &Content) -> anyhow::Result<()> {
        self.store.append_rows(RANGE, vec![content.to_row()]).await
            .map_err(Into::into)
    }
);
