//! Toolkit for building typed REST API client SDKs.
//!
//! Provides an async [`RestAdapter`] that normalizes HTTP outcomes into
//! [`RestResponse`] values or typed [`Error`]s, plus naming and URL helpers
//! in [`toolkit`] and base model support in [`model`]. SDK crates own an
//! adapter, define `serde` models, and expose typed operations on top.

mod adapter;
mod errors;
pub mod model;
pub mod toolkit;

pub use self::adapter::{
    AdapterBuilder, Payload, RequestBuilder, RestAdapter, RestResponse, RestResult, Scheme,
};
pub use self::errors::Error;
pub use self::model::Model;
pub use reqwest::Method;
