//! Reference SDK for the UserHub API, built on `restkit`.
//!
//! Shows the intended layering for SDKs generated with the toolkit: a typed
//! client owning a [`restkit::RestAdapter`], camelCase `serde` models, a
//! query builder, and an SDK error enum wrapping the toolkit error.

mod client;
mod error;
pub mod query;
pub mod types;

pub use self::client::UserHubClient;
pub use self::error::UserHubError;
pub use self::query::{SortDirection, UserQuery};
