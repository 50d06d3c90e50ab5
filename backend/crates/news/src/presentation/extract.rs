//! Request Body Extractor
//!
//! `axum::Json` whose rejection renders as a [`NewsError::Validation`].

use axum::extract::FromRequest;

use crate::error::NewsError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(NewsError))]
pub struct JsonBody<T>(pub T);
