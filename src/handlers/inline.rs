use anyhow::Context;
use rust_i18n::t;
use teloxide::Bot;
use teloxide::payloads::AnswerInlineQuerySetters;
use teloxide::requests::Requester;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, InlineQuery, InlineQueryResult,
                      InlineQueryResultArticle, InputMessageContent, InputMessageContentText};
use crate::config::AppConfig;
use crate::domain::{Content, ContentKind};
use crate::handlers::{ensure_lang_code, HandlerResult};
use crate::handlers::utils::callbacks::CallbackDataWithPrefix;
use crate::handlers::view::ViewCallbackData;
use crate::metrics;
use crate::repo::Repositories;

pub async fn inline_handler(bot: Bot, query: InlineQuery,
                            repos: Repositories, app_config: AppConfig) -> HandlerResult {
    metrics::INLINE_COUNTER.inc();

    let lang_code = ensure_lang_code(Some(&query.from));
    let results: Vec<InlineQueryResult> = repos.contents.search(&query.query).await?
        .into_iter()
        .take(app_config.inline_results_limit)
        .enumerate()
        .map(|(index, content)| build_article(index, &content, &lang_code))
        .collect();

    let mut answer = bot.answer_inline_query(&query.id, results)
        .is_personal(true);
    if cfg!(debug_assertions) {
        answer.cache_time.replace(1);
    }
    answer.await.context(format!("couldn't answer inline query {query:?}"))?;
    Ok(())
}

fn build_article(index: usize, content: &Content, lang_code: &str) -> InlineQueryResult {
    let message = InputMessageContent::Text(InputMessageContentText::new(
        t!("inline.results.selected", locale = lang_code, title = content.title)));
    let mut article = InlineQueryResultArticle::new(index.to_string(), &content.title, message);
    article.description.replace(describe(content, lang_code));

    let button = InlineKeyboardButton::callback(
        t!("inline.results.view_button", locale = lang_code),
        ViewCallbackData::for_content(content).to_data_string(),
    );
    article.reply_markup.replace(InlineKeyboardMarkup::new(vec![vec![button]]));
    InlineQueryResult::Article(article)
}

fn describe(content: &Content, lang_code: &str) -> String {
    match content.kind {
        ContentKind::Series => t!("inline.results.series", locale = lang_code,
            episode = content.episode.as_deref().unwrap_or("N/A")),
        ContentKind::Other(_) => t!("inline.results.movie", locale = lang_code),
    }.to_string()
}
