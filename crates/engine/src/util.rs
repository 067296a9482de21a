//! Internal helpers shared by the timed flows.
//!
//! Only [`Completion`] is re-exported; the rest is **not** part of the public API.

use std::{future::Future, time::Duration};

/// How a simulated, cancellable operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Done,
    Cancelled,
}

/// Suspend for `delay`, unless `cancelled` resolves first.
///
/// A cancellation future that never resolves (`std::future::pending()`) makes
/// the wait non-cancellable.
pub(crate) async fn simulated_delay(
    delay: Duration,
    cancelled: impl Future<Output = ()>,
) -> Completion {
    tokio::select! {
        biased;
        () = cancelled => Completion::Cancelled,
        () = tokio::time::sleep(delay) => Completion::Done,
    }
}
