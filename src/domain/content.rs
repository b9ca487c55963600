use teloxide::types::MessageId;
use crate::sheets::Row;

/// A catalog entry as stored in the `Content` sheet:
/// `[post id, title, kind, episode, channel id]`. The post id doubles as the
/// message id of the forwardable post within the source channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub post_id: String,
    pub title: String,
    pub kind: ContentKind,
    pub episode: Option<String>,
    pub channel_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ContentKind {
    Series,
    #[strum(default)]
    Other(String),
}

impl Content {
    pub fn from_row(row: &Row) -> Option<Self> {
        let post_id = row.first()
            .filter(|cell| !cell.is_empty())?
            .to_owned();
        let title = row.get(1)
            .filter(|cell| !cell.is_empty())?
            .to_owned();
        let kind = row.get(2)
            .map(|cell| cell.parse()
                .unwrap_or_else(|_| ContentKind::Other(cell.to_owned())))?;
        let episode = row.get(3)
            .filter(|cell| !cell.is_empty())
            .cloned();
        let channel_id = row.get(4)
            .filter(|cell| !cell.is_empty())?
            .to_owned();
        Some(Self { post_id, title, kind, episode, channel_id })
    }

    pub fn to_row(&self) -> Row {
        vec![
            self.post_id.clone(),
            self.title.clone(),
            self.kind.to_string(),
            self.episode.clone().unwrap_or_default(),
            self.channel_id.clone(),
        ]
    }

    pub fn message_id(&self) -> Option<MessageId> {
        self.post_id.parse()
            .map(MessageId)
            .ok()
    }
}
