//! Drive one debate submission into a [`SessionState`].
//!
//! [`run_debate`] owns the whole lifecycle: `begin`, one `apply` per event,
//! `fail` on the first error, and `end` on every exit path. Every await is
//! raced against the cancel token and the overall deadline; waits for the
//! next event are also bounded by the idle timeout.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::client::DebateClient;
use crate::config::DebateConfig;
use crate::error::{DebateError, DebateResult};
use crate::feed::Reconciled;
use crate::models::DebateRequest;
use crate::state::SessionState;

/// Cooperative cancellation for a running debate.
///
/// Clones share one flag; cancelling any clone cancels them all.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once cancellation has been requested.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            // The sender lives in `self`, so this only fails if it is dropped
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Limits applied while consuming a debate.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Longest wait for the response or the next event
    pub idle_timeout: Option<Duration>,
    /// Longest the whole submission may take
    pub deadline: Option<Duration>,
    pub cancel: CancelToken,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &DebateConfig) -> Self {
        Self {
            idle_timeout: config.idle_timeout,
            deadline: config.deadline,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Submit `request` and fold its events into `session` until the stream
/// closes.
///
/// Returns the number of events applied. On failure the error is also
/// recorded as the session's last error; either way the session is no
/// longer loading when this returns. A stream that closes without a
/// `final` event is not an error.
pub async fn run_debate(
    client: &DebateClient,
    request: &DebateRequest,
    session: &mut SessionState,
    options: &RunOptions,
) -> DebateResult<usize> {
    run_debate_with(client, request, session, options, |_, _| {}).await
}

/// Like [`run_debate`], calling `on_update` after every applied event so a
/// renderer can follow the feed live.
pub async fn run_debate_with<F>(
    client: &DebateClient,
    request: &DebateRequest,
    session: &mut SessionState,
    options: &RunOptions,
    on_update: F,
) -> DebateResult<usize>
where
    F: FnMut(&SessionState, &Reconciled),
{
    session.begin();

    let result = consume(client, request, session, options, on_update).await;
    if let Err(err) = &result {
        session.fail(err);
    }

    session.end();
    result
}

async fn consume<F>(
    client: &DebateClient,
    request: &DebateRequest,
    session: &mut SessionState,
    options: &RunOptions,
    mut on_update: F,
) -> DebateResult<usize>
where
    F: FnMut(&SessionState, &Reconciled),
{
    let deadline = options.deadline.map(|limit| (Instant::now() + limit, limit));

    let mut events = guarded(
        within_idle(client.start_debate(request), options.idle_timeout),
        options,
        deadline,
    )
    .await???;

    let mut applied = 0;
    loop {
        let next = guarded(
            within_idle(events.next(), options.idle_timeout),
            options,
            deadline,
        )
        .await??;

        match next {
            Some(Ok(event)) => {
                let outcome = session.apply(&event);
                on_update(session, &outcome);
                applied += 1;
            }
            Some(Err(err)) => return Err(err),
            None => break,
        }
    }

    debug!(events = applied, "debate stream closed");
    Ok(applied)
}

async fn within_idle<F: Future>(fut: F, idle: Option<Duration>) -> DebateResult<F::Output> {
    match idle {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| DebateError::IdleTimeout {
                after_secs: whole_secs(limit),
            }),
        None => Ok(fut.await),
    }
}

/// Seconds for error messages, rounded up so sub-second limits never read
/// as zero.
fn whole_secs(limit: Duration) -> u64 {
    limit.as_secs() + u64::from(limit.subsec_nanos() > 0)
}

async fn guarded<F: Future>(
    fut: F,
    options: &RunOptions,
    deadline: Option<(Instant, Duration)>,
) -> DebateResult<F::Output> {
    let expiry = async {
        match deadline {
            Some((at, _)) => tokio::time::sleep_until(at).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        biased;
        _ = options.cancel.cancelled() => {
            info!("debate cancelled");
            Err(DebateError::Cancelled)
        }
        _ = expiry => Err(DebateError::DeadlineExceeded {
            after_secs: deadline.map(|(_, limit)| whole_secs(limit)).unwrap_or_default(),
        }),
        output = fut => Ok(output),
    }
}
