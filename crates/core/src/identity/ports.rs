//! Port interfaces for identity-map persistence

use async_trait::async_trait;
use rollcall_domain::Result;

/// External identity-mapping store: normalized biometric token to employee id.
///
/// One token maps to at most one employee. The upsert must be atomic per
/// token in the backing store; the engine adds no locking of its own.
#[async_trait]
pub trait IdentityMapStore: Send + Sync {
    /// Insert or replace the mapping for a normalized token.
    async fn upsert(&self, token: &str, employee_id: &str) -> Result<()>;

    /// Look up the employee a normalized token is assigned to.
    async fn lookup(&self, token: &str) -> Result<Option<String>>;
}
