use derive_more::{Display, Error};
use teloxide::types::CallbackQuery;

#[derive(Debug, Display, Error)]
pub enum InvalidCallbackData {
    NoData,
    #[display("WrongPrefix(data={data}, prefix={prefix})")]
    WrongPrefix { data: String, prefix: String },
    #[display("InvalidFormat(data={data}, error={error})")]
    InvalidFormat { data: String, error: Box<dyn std::error::Error + Send + Sync> },
}

/// Callback payloads on the wire look like `<prefix>_<value>`.
pub trait CallbackDataWithPrefix: TryFrom<String, Error = InvalidCallbackData> + std::fmt::Display {
    fn prefix() -> &'static str;

    fn check_prefix(query: CallbackQuery) -> bool {
        query.data
            .filter(|data| data.starts_with(&format!("{}_", Self::prefix())))
            .is_some()
    }

    fn parse(query: &CallbackQuery) -> Result<Self, InvalidCallbackData> {
        let data = query.data.as_ref().ok_or(InvalidCallbackData::NoData)?;
        match data.split_once('_') {
            Some((prefix, value)) if prefix == Self::prefix() => Self::try_from(value.to_owned()),
            Some((prefix, _)) => Err(InvalidCallbackData::WrongPrefix {
                data: data.clone(),
                prefix: prefix.to_owned(),
            }),
            None => Err(InvalidCallbackData::NoData),
        }
    }

    fn to_data_string(&self) -> String {
        format!("{}_{}", Self::prefix(), self)
    }
}
