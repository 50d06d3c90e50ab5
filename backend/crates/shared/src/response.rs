//! Mutation response envelope
//!
//! 作成・更新・削除はすべて `{ "message": ..., "data": ... }` を返す。
//! 削除のように返すデータが無い場合は `data` を省略する。

use serde::Serialize;

/// `{message, data}` body returned by create/update/delete endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Message<T> {
    /// Message with a payload
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }
}

impl Message<()> {
    /// Message without a payload
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}
