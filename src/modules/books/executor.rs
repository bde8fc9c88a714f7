use bookshelf_db::{RawRow, Store};

use super::error::ListBooksError;
use super::query::QueryPlan;

/// Run `plan` once against `store`, bounded by the plan's timeout.
///
/// The store call is the only await point. If the budget runs out, or the
/// caller drops this future, the store future is dropped with it.
pub async fn execute(store: &dyn Store, plan: &QueryPlan) -> Result<Vec<RawRow>, ListBooksError> {
    assert_eq!(
        plan.placeholder_count(),
        plan.params().len(),
        "query plan binds {} parameters for {} placeholders",
        plan.params().len(),
        plan.placeholder_count(),
    );

    tracing::debug!(sql = %plan.sql(), params = ?plan.params(), "executing book listing query");

    let outcome = tokio::time::timeout(
        plan.timeout(),
        store.execute(plan.sql(), plan.params(), plan.timeout()),
    )
    .await;

    match outcome {
        Ok(Ok(rows)) => Ok(rows),
        Ok(Err(err)) if err.is_timeout() => {
            tracing::warn!(error = %err, "store cancelled book listing query");
            Err(ListBooksError::Timeout(plan.timeout()))
        }
        Ok(Err(err)) => {
            tracing::error!(error = %err, "book listing query failed");
            Err(ListBooksError::ExecutionFailure(err))
        }
        Err(_elapsed) => {
            tracing::warn!(
                timeout_ms = plan.timeout().as_millis() as u64,
                "book listing query timed out"
            );
            Err(ListBooksError::Timeout(plan.timeout()))
        }
    }
}
