mod admin;
mod inline;
mod start;
pub mod stats;
pub mod view;
pub mod utils;

use teloxide::Bot;
use teloxide::payloads::SendMessage;
use teloxide::prelude::*;
use teloxide::requests::JsonRequest;
use teloxide::types::{Message, ReplyParameters, User};
use teloxide::types::ParseMode::Html;

pub use admin::*;
pub use inline::*;
pub use start::*;

pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

pub fn ensure_lang_code(user: Option<&User>) -> String {
    user.and_then(|u| u.language_code.clone())
        .unwrap_or_else(|| {
            log::debug!("no language_code, using the default");
            "en".to_owned()
        })
}

pub fn reply_html<T: Into<String>>(bot: Bot, msg: &Message, answer: T) -> JsonRequest<SendMessage> {
    let mut answer = bot.send_message(msg.chat.id, answer);
    answer.parse_mode = Some(Html);
    if msg.chat.is_group() || msg.chat.is_supergroup() {
        answer.reply_parameters.replace(ReplyParameters::new(msg.id));
    }
    answer
}

/// Fallback for callback data no branch recognizes. Acknowledged anyway so
/// the client-side spinner never hangs.
pub async fn unknown_callback_handler(bot: Bot, query: CallbackQuery) -> HandlerResult {
    log::warn!("unknown callback query data: {:?}", query.data);
    bot.answer_callback_query(query.id).await?;
    Ok(())
}
