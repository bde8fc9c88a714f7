use std::time::Duration;

use async_trait::async_trait;

use crate::{RawRow, SqlParam, StoreError};

/// Query execution handle shared by every request.
///
/// Implementations bind `params` to the `$n` placeholders of `sql` in order
/// and should stop work once `timeout` has elapsed. Pooling and concurrency
/// limits are the implementation's business. Callers may drop the returned
/// future at any time; implementations must not leave the statement running
/// unobserved when that happens.
#[async_trait]
pub trait Store: Send + Sync {
    async fn execute(
        &self,
        sql: &str,
        params: &[SqlParam],
        timeout: Duration,
    ) -> Result<Vec<RawRow>, StoreError>;
}
