use rust_i18n::t;
use teloxide::Bot;
use teloxide::macros::BotCommands;
use teloxide::types::Message;
use crate::config::AppConfig;
use crate::domain::{Content, ContentKind};
use crate::handlers::{ensure_lang_code, reply_html, HandlerResult};
use crate::metrics;
use crate::repo::Repositories;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum AdminCommands {
    #[command(description = "addchannel")]
    AddChannel(String),
    #[command(description = "addcontent")]
    AddContent(String),
}

#[cfg_attr(test, derive(Debug, PartialEq))]
enum AdminOutcome {
    Done(String),
    Usage(String),
    Unauthorized,
}

/// `/addcontent <title> <kind> <episode> <post id>`
pub(crate) fn parse_new_content(args: &str, base_channel_id: &str) -> Option<Content> {
    let mut parts = args.split_whitespace();
    let title = parts.next()?.to_owned();
    let kind: ContentKind = parts.next()
        .map(|cell| cell.parse()
            .unwrap_or_else(|_| ContentKind::Other(cell.to_owned())))?;
    let episode = parts.next()?.to_owned();
    let post_id = parts.next()?.to_owned();
    Some(Content {
        post_id,
        title,
        kind,
        episode: Some(episode).filter(|ep| !ep.is_empty()),
        channel_id: base_channel_id.to_owned(),
    })
}

pub async fn admin_cmd_handler(bot: Bot, msg: Message, cmd: AdminCommands,
                               repos: Repositories, config: AppConfig) -> HandlerResult {
    let Some(from) = &msg.from else {
        log::warn!("an admin command was invoked without a FROM field for message: {msg:?}");
        return Ok(())
    };
    let lang_code = ensure_lang_code(Some(from));
    let is_admin = from.id == config.admin_id;

    let outcome = match cmd {
        _ if !is_admin => AdminOutcome::Unauthorized,
        AdminCommands::AddChannel(name) => {
            metrics::CMD_ADD_CHANNEL_COUNTER.inc();
            let name = name.trim();
            if name.is_empty() {
                AdminOutcome::Usage(t!("admin.addchannel.usage", locale = &lang_code).to_string())
            } else {
                repos.channels.append(name).await?;
                AdminOutcome::Done(t!("admin.addchannel.done", locale = &lang_code, channel = name).to_string())
            }
        }
        AdminCommands::AddContent(args) => {
            metrics::CMD_ADD_CONTENT_COUNTER.inc();
            match parse_new_content(&args, &config.base_channel_id) {
                Some(content) => {
                    repos.contents.append(&content).await?;
                    AdminOutcome::Done(t!("admin.addcontent.done", locale = &lang_code, title = content.title).to_string())
                }
                None => AdminOutcome::Usage(t!("admin.addcontent.usage", locale = &lang_code).to_string()),
            }
        }
    };

    match outcome {
        AdminOutcome::Done(text) | AdminOutcome::Usage(text) => {
            reply_html(bot, &msg, text).await?;
        }
        // no reply at all: the command set stays invisible to non-admins
        AdminOutcome::Unauthorized => {
            log::info!("ignoring an admin command from a non-admin user {}", from.id);
        }
    }
    Ok(())
}
