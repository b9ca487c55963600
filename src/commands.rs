use futures::future::join_all;
use rust_i18n::t;
use teloxide::{Bot, RequestError};
use teloxide::requests::Requester;
use teloxide::types::{BotCommand, BotCommandScope, ChatId, Recipient, UserId};
use teloxide::utils::command::BotCommands;
use crate::handlers::{AdminCommands, StartCommands};

pub async fn set_my_commands(bot: &Bot, lang_code: &str, admin_id: UserId) -> Result<(), RequestError> {
    let personal_commands = vec![
        StartCommands::bot_commands(),
    ];
    let admin_commands = vec![
        StartCommands::bot_commands(),
        AdminCommands::bot_commands(),
    ];
    let admin_chat = Recipient::Id(ChatId(admin_id.0 as i64));

    let requests = vec![
        set_commands(bot, personal_commands, BotCommandScope::AllPrivateChats, lang_code),
        set_commands(bot, admin_commands, BotCommandScope::Chat { chat_id: admin_chat }, lang_code),
    ];
    join_all(requests)
        .await
        .into_iter()
        .filter(|resp| resp.is_err())
        .map(|resp| Err(resp.unwrap_err()))
        .take(1)
        .last()
        .unwrap_or(Ok(()))
}

async fn set_commands(bot: &Bot, commands: Vec<Vec<BotCommand>>, scope: BotCommandScope, lang_code: &str) -> Result<(), RequestError> {
    let commands: Vec<BotCommand> = commands
        .concat()
        .into_iter()
        .filter(|cmd| !cmd.description.is_empty())
        .map(|mut cmd| {
            cmd.description = t!(&format!("commands.{}.description", cmd.description), locale = lang_code).to_string();
            cmd
        })
        .collect();
    let mut request = bot.set_my_commands(commands);
    request.language_code.replace(lang_code.to_owned());
    request.scope.replace(scope);
    request.await?;
    Ok(())
}
