//! In-memory identity map
//!
//! Maps normalized biometric tokens to employee ids. The dashmap entry API
//! serializes the upsert per token, which is exactly the atomicity the
//! engine requires of its identity-map collaborator.

use async_trait::async_trait;
use dashmap::DashMap;
use rollcall_core::IdentityMapStore;
use rollcall_domain::Result;

/// Dashmap-backed identity map.
#[derive(Default)]
pub struct InMemoryIdentityMap {
    entries: DashMap<String, String>,
}

impl InMemoryIdentityMap {
    /// Create an empty identity map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of token assignments held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no assignments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl IdentityMapStore for InMemoryIdentityMap {
    async fn upsert(&self, token: &str, employee_id: &str) -> Result<()> {
        self.entries.insert(token.to_string(), employee_id.to_string());
        Ok(())
    }

    async fn lookup(&self, token: &str) -> Result<Option<String>> {
        Ok(self.entries.get(token).map(|entry| entry.value().clone()))
    }
}
