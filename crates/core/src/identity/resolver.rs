//! Token resolver - normalizes device identifiers and resolves them against
//! the external identity map.
//!
//! Badges are physical objects and get reassigned; re-registering a token for
//! a different employee replaces the old mapping on purpose.

use std::sync::Arc;

use rollcall_domain::constants::DEFAULT_TOKEN_PAD_WIDTH;
use rollcall_domain::{Result, RollcallError};
use tracing::debug;

use super::ports::IdentityMapStore;

/// Normalize a raw biometric device token.
///
/// Purely numeric tokens are zero-padded to `pad_width`; anything else is
/// uppercased unchanged. Blank input normalizes to the empty string, which
/// marks the token unresolvable.
///
/// # Examples
///
/// ```
/// use rollcall_core::normalize_token;
///
/// assert_eq!(normalize_token("123", 6), "000123");
/// assert_eq!(normalize_token("abc", 6), "ABC");
/// assert_eq!(normalize_token("  ", 6), "");
/// ```
#[must_use]
pub fn normalize_token(raw: &str, pad_width: usize) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        format!("{trimmed:0>pad_width$}")
    } else {
        trimmed.to_uppercase()
    }
}

/// Resolves normalized tokens against the identity-mapping store.
pub struct TokenResolver {
    store: Arc<dyn IdentityMapStore>,
    pad_width: usize,
}

impl TokenResolver {
    /// Create a resolver with the default pad width.
    pub fn new(store: Arc<dyn IdentityMapStore>) -> Self {
        Self { store, pad_width: DEFAULT_TOKEN_PAD_WIDTH }
    }

    /// Override the zero-pad width for numeric tokens.
    #[must_use]
    pub fn with_pad_width(mut self, pad_width: usize) -> Self {
        self.pad_width = pad_width;
        self
    }

    /// Normalize a raw token with this resolver's pad width.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        normalize_token(raw, self.pad_width)
    }

    /// Resolve a raw token to the employee it is assigned to.
    ///
    /// Blank tokens are unresolvable and return `Ok(None)` without touching
    /// the store.
    pub async fn resolve(&self, raw: &str) -> Result<Option<String>> {
        let token = self.normalize(raw);
        if token.is_empty() {
            return Ok(None);
        }
        self.store.lookup(&token).await
    }

    /// Register a raw token for an employee: idempotent upsert, replacing any
    /// previous assignment of the same token. Returns the normalized token.
    pub async fn register(&self, raw: &str, employee_id: &str) -> Result<String> {
        let token = self.normalize(raw);
        if token.is_empty() {
            return Err(RollcallError::Validation("blank biometric token".into()));
        }
        self.store.upsert(&token, employee_id).await?;
        debug!(token = %token, employee_id = %employee_id, "identity mapping upserted");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::*;

    #[derive(Default)]
    struct MapStore {
        entries: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl IdentityMapStore for MapStore {
        async fn upsert(&self, token: &str, employee_id: &str) -> Result<()> {
            self.entries.lock().insert(token.to_string(), employee_id.to_string());
            Ok(())
        }

        async fn lookup(&self, token: &str) -> Result<Option<String>> {
            Ok(self.entries.lock().get(token).cloned())
        }
    }

    #[test]
    fn normalization_matches_device_conventions() {
        assert_eq!(normalize_token("123", 6), "000123");
        assert_eq!(normalize_token("1234567", 6), "1234567");
        assert_eq!(normalize_token("abc", 6), "ABC");
        assert_eq!(normalize_token("ab-12", 6), "AB-12");
        assert_eq!(normalize_token("", 6), "");
        assert_eq!(normalize_token("  42 ", 4), "0042");
    }

    #[tokio::test]
    async fn register_then_resolve_round_trips() {
        let resolver = TokenResolver::new(Arc::new(MapStore::default()));
        let token = resolver.register("123", "E-1").await.expect("registered");
        assert_eq!(token, "000123");
        assert_eq!(resolver.resolve("123").await.expect("resolved"), Some("E-1".into()));
        // The raw and normalized spellings resolve identically
        assert_eq!(resolver.resolve("000123").await.expect("resolved"), Some("E-1".into()));
    }

    #[tokio::test]
    async fn reregistering_reassigns_the_badge() {
        let resolver = TokenResolver::new(Arc::new(MapStore::default()));
        resolver.register("777", "E-1").await.expect("registered");
        resolver.register("777", "E-2").await.expect("reassigned");
        assert_eq!(resolver.resolve("777").await.expect("resolved"), Some("E-2".into()));
    }

    #[tokio::test]
    async fn blank_token_is_unresolvable() {
        let resolver = TokenResolver::new(Arc::new(MapStore::default()));
        assert_eq!(resolver.resolve("   ").await.expect("resolved"), None);
        let err = resolver.register("", "E-1").await.expect_err("rejected");
        assert!(matches!(err, RollcallError::Validation(_)));
    }
}
