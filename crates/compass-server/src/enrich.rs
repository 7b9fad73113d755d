use crate::state::AppState;
use anyhow::{Context, Result};
use compass_store::{Competitor, StoreError};

/// Update one competitor's row with a freshly generated positioning
/// analysis and return the updated row.
///
/// This is the sole writer of `competitor_positioning`. Re-running it
/// overwrites any prior analysis unconditionally.
pub async fn update_competitor_positioning(
    state: &AppState,
    competitor_id: i64,
    competitor_name: &str,
) -> Result<Competitor> {
    tracing::info!(
        id = competitor_id,
        competitor = %competitor_name,
        "Updating positioning analysis"
    );

    let positioning = state
        .analyzer
        .analyze(competitor_name)
        .await
        .context("Positioning analysis failed")?;

    let rows = state
        .store
        .update_positioning(competitor_id, &positioning)
        .await?;

    let updated = rows
        .into_iter()
        .next()
        .ok_or(StoreError::UpdateReadback { id: competitor_id })?;

    tracing::info!(
        id = competitor_id,
        competitor = %competitor_name,
        "Successfully updated positioning analysis"
    );

    Ok(updated)
}
