use std::fmt;

use crate::errors::InspectError;

pub const ENV_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const ENV_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const ENV_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

/// Short-lived signing credentials of the execution role.
#[derive(Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl Credentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Read the standard AWS credential variables through `lookup`.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, InspectError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v: &String| !v.trim().is_empty());

        let access_key_id =
            get(ENV_ACCESS_KEY_ID).ok_or(InspectError::MissingCredentials(ENV_ACCESS_KEY_ID))?;
        let secret_access_key = get(ENV_SECRET_ACCESS_KEY)
            .ok_or(InspectError::MissingCredentials(ENV_SECRET_ACCESS_KEY))?;

        Ok(Self {
            access_key_id,
            secret_access_key,
            session_token: get(ENV_SESSION_TOKEN),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
