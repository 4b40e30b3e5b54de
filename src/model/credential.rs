use std::fmt;

const TRIAL_KEY_PREFIX: &str = "RGAPI-";

/// Key forwarded to the Riot API in the `X-Riot-Token` header.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTier {
    Trial,
    Production,
}

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Credential(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn tier(&self) -> KeyTier {
        if self.0.starts_with(TRIAL_KEY_PREFIX) {
            KeyTier::Trial
        } else {
            KeyTier::Production
        }
    }
}

// Keys end up in log fields, only the tier is printed
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({:?}, ***)", self.tier())
    }
}

impl From<String> for Credential {
    fn from(value: String) -> Self {
        Credential(value)
    }
}

impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Credential(value.to_string())
    }
}

/// Authenticated portfolio user on whose behalf a request is made. Issued upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity(pub String);
