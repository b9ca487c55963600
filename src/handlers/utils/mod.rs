pub mod callbacks;

use teloxide::types::{ChatId, Recipient};

/// Channel cells hold either a numeric chat id (the base channel) or a public
/// channel name with or without the leading '@'.
pub fn channel_recipient(channel: &str) -> Recipient {
    match channel.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(format!("@{}", channel.trim_start_matches('@'))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::{ChatId, Recipient};

    #[test]
    fn channel_recipient_variants() {
        assert_eq!(channel_recipient("-1001234567890"), Recipient::Id(ChatId(-1001234567890)));
        assert_eq!(channel_recipient("cartoons_main"), Recipient::ChannelUsername("@cartoons_main".to_owned()));
        assert_eq!(channel_recipient("@cartoons_main"), Recipient::ChannelUsername("@cartoons_main".to_owned()));
    }
}
