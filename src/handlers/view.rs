use std::fmt::{Display, Formatter};
use async_trait::async_trait;
use chrono::Utc;
use rust_i18n::t;
use teloxide::Bot;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, InlineKeyboardButton, InlineKeyboardMarkup, ReplyMarkup, UserId};
use crate::domain::Content;
use crate::handlers::{ensure_lang_code, HandlerResult};
use crate::handlers::utils::callbacks::{CallbackDataWithPrefix, InvalidCallbackData};
use crate::handlers::utils::channel_recipient;
use crate::metrics;
use crate::repo::Repositories;

pub struct ViewCallbackData {
    post_id: String,
}

impl TryFrom<String> for ViewCallbackData {
    type Error = InvalidCallbackData;

    fn try_from(post_id: String) -> Result<Self, Self::Error> {
        Ok(Self { post_id })
    }
}

impl Display for ViewCallbackData {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.post_id)
    }
}

impl CallbackDataWithPrefix for ViewCallbackData {
    fn prefix() -> &'static str {
        "view"
    }
}

impl ViewCallbackData {
    pub fn for_content(content: &Content) -> Self {
        Self { post_id: content.post_id.clone() }
    }
}

pub fn callback_filter(query: CallbackQuery) -> bool {
    ViewCallbackData::check_prefix(query)
}

/// Live membership lookups against the messaging gateway. A trait at the
/// seam so the gate logic is testable without a running bot.
#[async_trait]
pub trait MembershipChecker {
    async fn is_member(&self, channel: &str, user_id: UserId) -> bool;
}

#[async_trait]
impl MembershipChecker for Bot {
    async fn is_member(&self, channel: &str, user_id: UserId) -> bool {
        match self.get_chat_member(channel_recipient(channel), user_id).await {
            Ok(member) => member.is_present(),
            Err(err) => {
                log::warn!("couldn't check whether {user_id} is a member of {channel}: {err}");
                false
            }
        }
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub enum ViewOutcome {
    Forward(Content),
    JoinPrompt(Vec<String>),
    ContentMissing,
    UserMissing,
}

/// Mandatory channels the stored subscription list doesn't cover, in
/// mandatory-list order.
pub fn compute_unsubscribed(subscribed: &[String], mandatory: &[String]) -> Vec<String> {
    mandatory.iter()
        .filter(|channel| !subscribed.contains(channel))
        .cloned()
        .collect()
}

pub(crate) async fn view_impl(repos: &Repositories, checker: &impl MembershipChecker,
                              user_id: UserId, post_id: &str) -> anyhow::Result<ViewOutcome> {
    let Some(content) = repos.contents.find_by_id(post_id).await? else {
        return Ok(ViewOutcome::ContentMissing)
    };
    let Some(user) = repos.users.get(user_id).await? else {
        return Ok(ViewOutcome::UserMissing)
    };
    let mandatory = repos.channels.list().await?;

    let missing = compute_unsubscribed(&user.subscribed_channels, &mandatory);
    if missing.is_empty() {
        return Ok(ViewOutcome::Forward(content))
    }

    let mut confirmed = Vec::new();
    let mut still_missing = Vec::new();
    for channel in missing {
        if checker.is_member(&channel, user_id).await {
            confirmed.push(channel)
        } else {
            still_missing.push(channel)
        }
    }
    if !confirmed.is_empty() {
        let merged = user.subscribed_channels.iter()
            .cloned()
            .chain(confirmed)
            .collect();
        repos.users.update_subscriptions(user_id, merged).await?;
    }

    if still_missing.is_empty() {
        Ok(ViewOutcome::Forward(content))
    } else {
        Ok(ViewOutcome::JoinPrompt(still_missing))
    }
}

pub async fn callback_handler(bot: Bot, query: CallbackQuery, repos: Repositories) -> HandlerResult {
    metrics::CALLBACK_VIEW.invoked();

    // acked up front: no branch below may leave the client spinner hanging
    bot.answer_callback_query(query.id.clone()).await?;

    let data = ViewCallbackData::parse(&query)?;
    let lang_code = ensure_lang_code(Some(&query.from));
    let user_chat = ChatId(query.from.id.0 as i64);

    match view_impl(&repos, &bot, query.from.id, &data.post_id).await? {
        ViewOutcome::Forward(content) => {
            let Some(message_id) = content.message_id() else {
                log::error!("content {} has a non-numeric post id, nothing to forward", content.post_id);
                return Ok(())
            };
            bot.forward_message(user_chat, channel_recipient(&content.channel_id), message_id).await?;
            // the timestamp is only touched once the forward went through;
            // a failed delivery is not activity
            repos.users.update_activity(query.from.id, Utc::now()).await?;
            metrics::CALLBACK_VIEW.finished();
        }
        ViewOutcome::JoinPrompt(channels) => {
            let mut prompt = bot.send_message(user_chat, t!("view.join_prompt", locale = &lang_code));
            prompt.reply_markup.replace(ReplyMarkup::InlineKeyboard(join_keyboard(&channels, &lang_code)));
            prompt.await?;
        }
        ViewOutcome::ContentMissing => log::warn!("view callback for unknown content {}", data.post_id),
        ViewOutcome::UserMissing => log::warn!("view callback from unknown user {}", query.from.id),
    }
    Ok(())
}

fn join_keyboard(channels: &[String], lang_code: &str) -> InlineKeyboardMarkup {
    let buttons = channels.iter()
        .filter_map(|channel| {
            let url = format!("https://t.me/{}", channel.trim_start_matches('@'))
                .parse()
                .inspect_err(|e| log::error!("channel {channel} doesn't map to a join link: {e}"))
                .ok()?;
            let label = t!("view.join_button", locale = lang_code, channel = channel);
            Some(vec![InlineKeyboardButton::url(label, url)])
        })
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(buttons)
}
