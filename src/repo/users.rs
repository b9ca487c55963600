use chrono::{DateTime, Utc};
use teloxide::types::UserId;
use crate::domain::User;
use crate::repo::data_row_number;
use crate::repository;

const RANGE: &str = "Users!A2:D";

repository!(Users,
    pub async fn get(&self, user_id: UserId) -> anyhow::Result<Option<User>> {
        Ok(self.find(user_id).await?.map(|(_, user)| user))
    }
,
    /// Creates a user row with an empty subscription list and equal
    /// created/last-active timestamps. Returns false if the row already exists.
    pub async fn create_if_absent(&self, user_id: UserId) -> anyhow::Result<bool> {
        if self.find(user_id).await?.is_some() {
            return Ok(false)
        }
        let user = User::new(user_id, Utc::now());
        self.store.append_rows(RANGE, vec![user.to_row()]).await?;
        Ok(true)
    }
,
    /// Overwrites the last-active timestamp of the user's row. The row-index
    /// arithmetic stays here: read, locate, patch the exact window. Two close
    /// events for the same user race on this with last-write-wins.
    pub async fn update_activity(&self, user_id: UserId, ts: DateTime<Utc>) -> anyhow::Result<bool> {
        let Some((index, mut user)) = self.find(user_id).await? else {
            return Ok(false)
        };
        user.last_active_at = ts;
        self.patch(index, &user).await?;
        Ok(true)
    }
,
    pub async fn update_subscriptions(&self, user_id: UserId, channels: Vec<String>) -> anyhow::Result<bool> {
        let Some((index, mut user)) = self.find(user_id).await? else {
            return Ok(false)
        };
        user.subscribed_channels = channels;
        self.patch(index, &user).await?;
        Ok(true)
    }
,
    async fn find(&self, user_id: UserId) -> anyhow::Result<Option<(usize, User)>> {
        let uid = user_id.to_string();
        let rows = self.store.read_range(RANGE).await?;
        Ok(rows.iter()
            .enumerate()
            .find(|(_, row)| row.first().is_some_and(|cell| *cell == uid))
            .and_then(|(index, row)| User::from_row(row).map(|user| (index, user))))
    }
,
    async fn patch(&self, index: usize, user: &User) -> anyhow::Result<()> {
        let row = data_row_number(index);
        let window = format!("Users!A{row}:D{row}");
        self.store.update_range(&window, vec![user.to_row()]).await
            .map_err(Into::into)
    }
);
