pub mod error;
pub mod supabase;
pub mod types;

pub use error::{Result, StoreError};
pub use supabase::SupabaseStore;
pub use types::{Competitor, PendingCompetitor};

use async_trait::async_trait;

/// Access to the hosted competitors table.
///
/// The authoritative copy of every row lives in the remote store; callers
/// hold only transient copies for the duration of one request.
#[async_trait]
pub trait CompetitorStore: Send + Sync {
    /// Fetch one competitor by primary key. `None` if the id is absent.
    async fn get_by_id(&self, id: i64) -> Result<Option<Competitor>>;

    /// List competitors whose positioning column is still null, in the
    /// store's natural row order.
    async fn list_missing_positioning(&self) -> Result<Vec<PendingCompetitor>>;

    /// Overwrite the positioning column for one competitor and return the
    /// affected rows as reported by the store.
    async fn update_positioning(&self, id: i64, positioning: &str) -> Result<Vec<Competitor>>;
}
