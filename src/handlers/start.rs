use rust_i18n::t;
use teloxide::Bot;
use teloxide::macros::BotCommands;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, Message, ReplyMarkup};
use crate::handlers::{ensure_lang_code, reply_html, stats, HandlerResult};
use crate::metrics;
use crate::repo::Repositories;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum StartCommands {
    #[command(description = "start")]
    Start,
}

pub async fn start_cmd_handler(bot: Bot, msg: Message, repos: Repositories) -> HandlerResult {
    metrics::CMD_START_COUNTER.inc();

    let Some(from) = &msg.from else {
        log::warn!("the /start command was invoked without a FROM field for message: {msg:?}");
        return Ok(())
    };
    if repos.users.create_if_absent(from.id).await? {
        log::info!("registered a new user {}", from.id);
    }

    let lang_code = ensure_lang_code(Some(from));
    let mut answer = reply_html(bot, &msg, t!("titles.welcome", locale = &lang_code));
    answer.reply_markup.replace(ReplyMarkup::InlineKeyboard(main_menu(&lang_code)));
    answer.await?;
    Ok(())
}

fn main_menu(lang_code: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::switch_inline_query_current_chat(
            t!("buttons.search", locale = lang_code), "")],
        vec![InlineKeyboardButton::callback(
            t!("buttons.admin_stats", locale = lang_code), stats::ADMIN_STATS_CALLBACK_DATA)],
    ])
}
