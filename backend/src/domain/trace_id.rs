//! Per-request correlation identifier.
//!
//! The [`Trace`](crate::Trace) middleware assigns one `TraceId` to every
//! request and keeps it in tokio task-local storage. Error envelopes and log
//! lines pick it up from there, so nothing has to pass it around explicitly.
//!
//! Task-locals do not cross `tokio::spawn` or `spawn_blocking`. Adapters that
//! move work onto the blocking pool go through [`TraceId::spawn_blocking`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task::JoinHandle;
use tokio::task_local;
use uuid::Uuid;

task_local! {
    static CURRENT: TraceId;
}

/// UUID naming one request for log and error correlation.
///
/// # Examples
/// ```
/// use tryon_backend::TraceId;
///
/// async fn handler() {
///     if let Some(id) = TraceId::current() {
///         tracing::info!(trace_id = %id, "handling request");
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    #[must_use]
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Drive `fut` with `trace_id` as the current identifier.
    ///
    /// # Examples
    /// ```
    /// use tryon_backend::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let id: TraceId = "6f1c2a8e-5b0d-4f5e-9a43-2d7c1e0b9f10".parse().unwrap();
    /// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
    /// # });
    /// ```
    pub async fn scope<Fut: Future>(trace_id: Self, fut: Fut) -> Fut::Output {
        CURRENT.scope(trace_id, fut).await
    }

    /// Run `f` synchronously with `trace_id` as the current identifier.
    pub fn scope_blocking<R>(trace_id: Option<Self>, f: impl FnOnce() -> R) -> R {
        match trace_id {
            Some(id) => CURRENT.sync_scope(id, f),
            None => f(),
        }
    }

    /// `tokio::task::spawn_blocking` that carries the caller's identifier
    /// onto the blocking thread.
    pub fn spawn_blocking<R, F>(f: F) -> JoinHandle<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let trace_id = Self::current();
        tokio::task::spawn_blocking(move || Self::scope_blocking(trace_id, f))
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
