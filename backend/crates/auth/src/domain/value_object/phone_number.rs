//! Phone Number Value Object
//!
//! 電話番号はログイン用の一意なハンドル。ベトナムの携帯番号のみ受け付ける。
//!
//! ## 形式
//! - 先頭: `0` または `+84`
//! - キャリアプレフィックス: 32–39, 56/58/59, 70/76–79, 81–89, 90–99
//! - 残り 7 桁
//!
//! 入力の前後の空白は取り除く。それ以外の正規化（`+84` → `0` 変換など）は
//! 行わない: 保存される値は入力どおり。

use std::sync::LazyLock;

use derive_more::Display;
use regex::Regex;
use thiserror::Error;

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0|\+84)(3[2-9]|5[689]|7[06-9]|8[1-9]|9[0-9])[0-9]{7}$")
        .expect("phone pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneNumberError {
    #[error("Phone number cannot be empty")]
    Empty,

    #[error("Phone number is not a valid mobile number")]
    InvalidFormat,
}

/// Validated mobile phone number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PhoneNumberError> {
        let trimmed = raw.as_ref().trim();

        if trimmed.is_empty() {
            return Err(PhoneNumberError::Empty);
        }

        if !PHONE_PATTERN.is_match(trimmed) {
            return Err(PhoneNumberError::InvalidFormat);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Restore from the database without re-validating
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
