//! Request Body Extractor
//!
//! `axum::Json` with its rejection folded into [`AuthError`], so a body with
//! a missing or mistyped field answers with the same 400 problem document as
//! any other validation failure instead of axum's plain-text 422.

use axum::extract::FromRequest;

use crate::error::AuthError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AuthError))]
pub struct JsonBody<T>(pub T);
