//! The action capability
//!
//! Every task carries an [`Action`]: the side-effecting operation it performs
//! (compile, minify, write, run a command). The executor only ever awaits
//! `execute`, so synchronous and asynchronous implementations share one contract.

use std::future::Future;

use async_trait::async_trait;

use crate::types::ActionResult;

#[async_trait]
pub trait Action: Send + Sync {
    /// Perform the action. Resolves once its externally visible effect is complete.
    async fn execute(&self) -> ActionResult;
}

/// Adapter that turns a closure returning a future into an [`Action`]
pub struct FnAction<F> {
    f: F,
}

/// Wrap a closure as an [`Action`]
///
/// ```rust
/// use brisk_core::action::{from_fn, Action};
///
/// # async fn example() {
/// let action = from_fn(|| async { Ok(()) });
/// action.execute().await.unwrap();
/// # }
/// ```
pub fn from_fn<F, Fut>(f: F) -> FnAction<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = ActionResult> + Send,
{
    FnAction { f }
}

#[async_trait]
impl<F, Fut> Action for FnAction<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = ActionResult> + Send,
{
    async fn execute(&self) -> ActionResult {
        (self.f)().await
    }
}

/// An action with no effect, for tasks that only group dependencies
pub struct NoopAction;

#[async_trait]
impl Action for NoopAction {
    async fn execute(&self) -> ActionResult {
        Ok(())
    }
}
