//! User ID
//!
//! `users.id`; shared through the kernel so other crates can reference owners.

pub use kernel::id::UserId;
