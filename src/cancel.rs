//! Caller-driven cancellation of in-flight operations.

use std::future::Future;

use crate::error::{Result, TransportError};

/// Run `operation` until it finishes or `signal` fires.
///
/// When the signal wins, the operation is dropped (aborting its HTTP
/// exchange) and [`TransportError::Cancelled`] is returned, so a cancelled
/// call is never mistaken for a server response.
///
/// # Example
///
/// ```ignore
/// let (tx, rx) = tokio::sync::oneshot::channel::<()>();
/// let result = dtrack::cancellable(
///     async { let _ = rx.await; },
///     Component::get(&client, id),
/// )
/// .await;
/// ```
pub async fn cancellable<T, S, F>(signal: S, operation: F) -> Result<T>
where
    S: Future<Output = ()>,
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        result = operation => result,
        () = signal => {
            tracing::debug!("operation cancelled by caller");
            Err(TransportError::Cancelled.into())
        }
    }
}
