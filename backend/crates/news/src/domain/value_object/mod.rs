//! Value Object Module

pub mod article_title;
pub mod category_name;
