use std::fmt;

/// Key sent in the `x-api-key` header.
///
/// The store locator has no key discovery endpoint, so the key always comes
/// from the caller (CLI flag or environment).
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    key: String,
}

impl ApiKey {
    /// From a raw API key string.
    pub fn from_raw(key: &str) -> Self {
        Self {
            key: key.trim().to_owned(),
        }
    }

    pub fn get(&self) -> &str {
        &self.key
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey").field("key", &"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAKE_API_KEY: &str = "fake-api-key";

    #[test]
    fn from_raw_trims_whitespace() {
        let api_key = ApiKey::from_raw("  fake-api-key\n");

        assert_eq!(api_key.get(), FAKE_API_KEY);
        assert!(!api_key.is_empty());
    }

    #[test]
    fn debug_redacts_key() {
        let api_key = ApiKey::from_raw(FAKE_API_KEY);

        let debug = format!("{:?}", api_key);

        assert!(!debug.contains(FAKE_API_KEY));
        assert!(debug.contains("redacted"));
    }
}
