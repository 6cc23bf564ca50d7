//! Typed client for the UserHub API.

use restkit::{RestAdapter, Scheme};
use url::Url;

use crate::error::UserHubError;
use crate::query::UserQuery;
use crate::types::{NewUser, User, UserId, UserPage};

/// Production hostname for the UserHub API.
const DEFAULT_HOSTNAME: &str = "api.userhub.dev";

/// Typed client for the UserHub API.
///
/// Owns a [`RestAdapter`] configured with the API key; every operation
/// returns fully typed models or a [`UserHubError`].
#[derive(Debug)]
pub struct UserHubClient {
    adapter: RestAdapter,
}

impl UserHubClient {
    /// Client for the production API.
    pub fn new(api_key: &str) -> Result<Self, UserHubError> {
        let adapter = RestAdapter::builder(DEFAULT_HOSTNAME)
            .with_api_key(api_key)
            .build()?;
        Ok(Self { adapter })
    }

    /// Client against a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Result<Self, UserHubError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| UserHubError::InvalidInput(format!("invalid base URL {base_url:?}: {e}")))?;
        let scheme = match parsed.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            other => {
                return Err(UserHubError::InvalidInput(format!(
                    "unsupported URL scheme {other:?}"
                )))
            }
        };
        let host = parsed.host_str().ok_or_else(|| {
            UserHubError::InvalidInput(format!("base URL {base_url:?} has no host"))
        })?;
        let hostname = match parsed.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        let adapter = RestAdapter::builder(&hostname)
            .with_scheme(scheme)
            .with_api_key(api_key)
            .build()?;
        Ok(Self { adapter })
    }

    /// Fetches one page of users matching the query.
    pub async fn list_users(&self, query: &UserQuery) -> Result<UserPage, UserHubError> {
        let mut request = self.adapter.get("users");
        for (key, value) in query.to_pairs() {
            request = request.query(&key, value);
        }
        let response = request.send().await?;
        Ok(response.deserialize()?)
    }

    /// Fetches a single user by ID.
    pub async fn get_user(&self, id: UserId) -> Result<User, UserHubError> {
        let response = self.adapter.get(&format!("users/{id}")).send().await?;
        Ok(response.deserialize()?)
    }

    /// Creates a user and returns the stored record.
    pub async fn create_user(&self, user: &NewUser) -> Result<User, UserHubError> {
        validate_new_user(user)?;
        tracing::debug!("creating user {}", user.email_address);
        let response = self
            .adapter
            .post("users")
            .json(user)
            .expect_json()
            .send()
            .await?;
        Ok(response.deserialize()?)
    }

    /// Replaces a user's mutable fields and returns the updated record.
    pub async fn update_user(&self, id: UserId, user: &NewUser) -> Result<User, UserHubError> {
        validate_new_user(user)?;
        let response = self
            .adapter
            .patch(&format!("users/{id}"))
            .json(user)
            .expect_json()
            .send()
            .await?;
        Ok(response.deserialize()?)
    }

    /// Deletes a user.
    pub async fn delete_user(&self, id: UserId) -> Result<(), UserHubError> {
        self.adapter.delete(&format!("users/{id}")).send().await?;
        Ok(())
    }
}

fn validate_new_user(user: &NewUser) -> Result<(), UserHubError> {
    if user.full_name.trim().is_empty() {
        return Err(UserHubError::InvalidInput(
            "full_name cannot be empty".to_string(),
        ));
    }
    if !user.email_address.contains('@') {
        return Err(UserHubError::InvalidInput(
            "email_address must contain '@'".to_string(),
        ));
    }
    Ok(())
}
