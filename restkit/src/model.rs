//! Base model support for request and response schemas.
//!
//! Schemas are plain `serde` types; [`Model`] is blanket-implemented for
//! anything that is `Serialize + DeserializeOwned` and adds JSON conversion
//! helpers with errors normalized to this crate's [`Error`].
//!
//! APIs that speak camelCase keep snake_case field names in Rust and declare
//! the wire naming on the type, with per-field aliases when a model must also
//! accept snake_case input:
//!
//! ```
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! struct Account {
//!     #[serde(alias = "account_id")]
//!     account_id: i64,
//!     #[serde(alias = "display_name")]
//!     display_name: String,
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::Error;

/// JSON conversion helpers for schema types.
pub trait Model: Serialize + DeserializeOwned {
    /// Parses a model from a JSON string.
    fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(Error::Response)
    }

    /// Parses a model from an already-parsed JSON value.
    fn from_value(value: serde_json::Value) -> Result<Self, Error> {
        serde_json::from_value(value).map_err(Error::Response)
    }

    /// Serializes the model to a JSON value.
    fn to_value(&self) -> Result<serde_json::Value, Error> {
        serde_json::to_value(self)
            .map_err(|e| Error::InvalidRequest(format!("failed to serialize model: {e}")))
    }

    /// Serializes the model to a JSON string.
    fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self)
            .map_err(|e| Error::InvalidRequest(format!("failed to serialize model: {e}")))
    }
}

impl<T: Serialize + DeserializeOwned> Model for T {}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::Model;
    use crate::Error;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Account {
        #[serde(alias = "account_id")]
        account_id: i64,
        #[serde(alias = "display_name")]
        display_name: String,
        #[serde(alias = "is_active")]
        is_active: bool,
    }

    #[test]
    fn serializes_with_camelcase_keys() {
        let account = Account {
            account_id: 7,
            display_name: "Ada".to_string(),
            is_active: true,
        };
        assert_eq!(
            account.to_value().unwrap(),
            json!({"accountId": 7, "displayName": "Ada", "isActive": true})
        );
    }

    #[test]
    fn accepts_camelcase_and_snake_case_input() {
        let from_camel =
            Account::from_value(json!({"accountId": 7, "displayName": "Ada", "isActive": true}))
                .unwrap();
        let from_snake = Account::from_value(
            json!({"account_id": 7, "display_name": "Ada", "is_active": true}),
        )
        .unwrap();
        assert_eq!(from_camel, from_snake);
    }

    #[test]
    fn accepts_mixed_naming() {
        let account =
            Account::from_value(json!({"accountId": 7, "display_name": "Ada", "isActive": false}))
                .unwrap();
        assert_eq!(account.display_name, "Ada");
        assert!(!account.is_active);
    }

    #[test]
    fn json_string_round_trip() {
        let account = Account {
            account_id: 1,
            display_name: "Grace".to_string(),
            is_active: false,
        };
        let restored = Account::from_json(&account.to_json().unwrap()).unwrap();
        assert_eq!(restored, account);
    }

    #[test]
    fn type_mismatch_is_a_response_error() {
        let err = Account::from_value(json!({"accountId": "not an int", "displayName": "x"}))
            .unwrap_err();
        assert!(matches!(err, Error::Response(_)));
    }

    #[test]
    fn missing_field_is_a_response_error() {
        let err = Account::from_json(r#"{"displayName": "x"}"#).unwrap_err();
        assert!(matches!(err, Error::Response(_)));
    }
}
