//! # Checklist Runtime
//!
//! Runtime implementation for the Checklist architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that manages state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to reducers
//! - **Event Loop**: Manages the action → reducer → effects → action feedback loop
//!
//! The Store serializes all mutations: the reducer runs under a write lock,
//! so two user interactions can never interleave their list mutations.
//! Effects (persistence writes, delayed actions) run on spawned tasks and
//! are fire-and-forget from the caller's perspective; an [`EffectHandle`]
//! lets tests and shutdown wait for them.
//!
//! ## Example
//!
//! ```ignore
//! use checklist_runtime::Store;
//! use checklist_core::reducer::Reducer;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use checklist_core::effect::Effect;
use checklist_core::reducer::Reducer;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Notify, RwLock};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        ///
        /// Some effects were still running when the timeout elapsed.
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),
    }
}

pub use error::StoreError;

/// Completion tracking shared between an [`EffectHandle`] and the tasks it observes
#[derive(Debug)]
struct EffectTracking {
    running: AtomicUsize,
    notify: Notify,
}

impl EffectTracking {
    fn new() -> Self {
        Self {
            running: AtomicUsize::new(0),
            notify: Notify::new(),
        }
    }

    fn increment(&self) {
        self.running.fetch_add(1, Ordering::SeqCst);
    }

    fn decrement(&self) {
        if self.running.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.notify.notify_waiters();
        }
    }
}

/// Drop guard that decrements an effect counter even if the effect panics
struct DecrementGuard(Arc<EffectTracking>);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Drop guard for the store-wide pending effect counter
struct PendingGuard(Arc<AtomicUsize>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Handle for waiting on the effects spawned by a single `send()`
///
/// `send()` returns after starting effect execution, not after completion.
/// The handle observes the effects that the processed action produced; it
/// completes once all of them (including the feedback actions they send)
/// have finished.
///
/// # Example
///
/// ```ignore
/// let handle = store.send(ListAction::Add { text }).await?;
/// handle.wait().await; // persistence write-through has completed
/// ```
#[derive(Debug)]
pub struct EffectHandle {
    tracking: Arc<EffectTracking>,
}

impl EffectHandle {
    /// Wait until every tracked effect has completed
    pub async fn wait(&self) {
        loop {
            let notified = self.tracking.notify.notified();
            if self.tracking.running.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }

    /// Wait with a timeout
    ///
    /// # Errors
    ///
    /// Returns `Err(())` if the timeout elapsed with effects still running.
    pub async fn wait_with_timeout(&self, timeout: Duration) -> Result<(), ()> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| ())
    }
}

/// The Store runtime
///
/// The Store manages:
/// 1. State (behind `RwLock` for concurrent access)
/// 2. Reducer (business logic)
/// 3. Environment (injected dependencies)
/// 4. Effect execution (with feedback loop)
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `E`: Environment type
/// - `R`: Reducer implementation
///
/// # Example
///
/// ```ignore
/// let store = Store::new(ListState::default(), ListReducer::new(), environment);
///
/// store.send(ListAction::Add { text: "buy milk".to_string() }).await?;
/// ```
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    environment: E,
    shutdown: Arc<AtomicBool>,
    pending_effects: Arc<AtomicUsize>,
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone,
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: self.reducer.clone(),
            environment: self.environment.clone(),
            shutdown: Arc::clone(&self.shutdown),
            pending_effects: Arc::clone(&self.pending_effects),
        }
    }
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
    A: Send + 'static,
    S: Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
            shutdown: Arc::new(AtomicBool::new(false)),
            pending_effects: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Send an action to the store
    ///
    /// This is the primary way to interact with the store:
    /// 1. Acquires write lock on state
    /// 2. Calls reducer with (state, action, environment)
    /// 3. Executes returned effects asynchronously
    /// 4. Effects may produce more actions (feedback loop)
    ///
    /// # Concurrency and Effect Execution
    ///
    /// - The reducer executes synchronously while holding a write lock
    /// - Effects execute asynchronously in spawned tasks
    /// - `send()` returns after starting effect execution, not completion
    /// - Multiple concurrent `send()` calls serialize at the reducer level
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
        if self.shutdown.load(Ordering::Acquire) {
            tracing::warn!("Rejected action: store is shutting down");
            metrics::counter!("store.shutdown.rejected_actions").increment(1);
            return Err(StoreError::ShutdownInProgress);
        }

        tracing::debug!("Processing action");
        metrics::counter!("store.actions.total").increment(1);

        let tracking = Arc::new(EffectTracking::new());

        let effects = {
            let mut state = self.state.write().await;
            tracing::trace!("Acquired write lock on state");

            let start = std::time::Instant::now();
            let effects = self.reducer.reduce(&mut state, action, &self.environment);
            metrics::histogram!("store.reducer.duration_seconds")
                .record(start.elapsed().as_secs_f64());

            tracing::trace!("Reducer completed, returned {} effects", effects.len());
            effects
        };

        for effect in effects {
            self.execute_effect(effect, Arc::clone(&tracking));
        }

        Ok(EffectHandle { tracking })
    }

    /// Read current state via a closure
    ///
    /// Access state through a closure to ensure the lock is released promptly:
    ///
    /// ```ignore
    /// let count = store.state(|s| s.items.len()).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Wait until no effects are pending store-wide
    ///
    /// Useful when an observer needs the write-through to have landed
    /// (tests, final flush before exit) without shutting the store down.
    pub async fn settled(&self) {
        let poll_interval = Duration::from_millis(10);
        while self.pending_effects.load(Ordering::Acquire) > 0 {
            tokio::time::sleep(poll_interval).await;
        }
    }

    /// Initiate graceful shutdown of the store
    ///
    /// Sets the shutdown flag (rejecting new actions), then waits for
    /// pending effects to complete.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires before
    /// all pending effects complete.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        tracing::info!("Initiating graceful shutdown");
        metrics::counter!("store.shutdown.initiated").increment(1);

        self.shutdown.store(true, Ordering::Release);

        let start = std::time::Instant::now();
        let poll_interval = Duration::from_millis(100);

        loop {
            let pending = self.pending_effects.load(Ordering::Acquire);

            if pending == 0 {
                tracing::info!("All effects completed, shutdown successful");
                return Ok(());
            }

            if start.elapsed() >= timeout {
                tracing::error!(
                    pending_effects = pending,
                    "Shutdown timed out with effects still running"
                );
                return Err(StoreError::ShutdownTimeout(pending));
            }

            tokio::time::sleep(poll_interval).await;
        }
    }

    /// Execute an effect with tracking
    ///
    /// Spawned tasks use [`DecrementGuard`] so the counters are updated
    /// even if an effect panics. Reducer panics propagate and halt the
    /// store; effect failures are the effect's own concern (the future
    /// decides whether to feed an action back).
    fn execute_effect(&self, effect: Effect<A>, tracking: Arc<EffectTracking>) {
        match effect {
            Effect::None => {
                tracing::trace!("Executing Effect::None (no-op)");
            },
            Effect::Parallel(effects) => {
                tracing::trace!("Executing Effect::Parallel with {} effects", effects.len());
                for effect in effects {
                    self.execute_effect(effect, Arc::clone(&tracking));
                }
            },
            effect => {
                tracking.increment();
                self.pending_effects.fetch_add(1, Ordering::SeqCst);

                let guard = DecrementGuard(Arc::clone(&tracking));
                let pending_guard = PendingGuard(Arc::clone(&self.pending_effects));
                let store = self.clone();

                tokio::spawn(async move {
                    let _guard = guard;
                    let _pending_guard = pending_guard;
                    store.run_effect(effect).await;
                });
            },
        }
    }

    /// Run a single effect to completion, including feedback sends
    fn run_effect<'a>(&'a self, effect: Effect<A>) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            match effect {
                Effect::None => {},
                Effect::Future(fut) => {
                    tracing::trace!("Executing Effect::Future");
                    if let Some(action) = fut.await {
                        tracing::trace!("Effect::Future produced an action, sending to store");
                        if let Ok(handle) = self.send(action).await {
                            handle.wait().await;
                        }
                    } else {
                        tracing::trace!("Effect::Future completed with no action");
                    }
                },
                Effect::Delay { duration, action } => {
                    tracing::trace!("Executing Effect::Delay (duration: {duration:?})");
                    tokio::time::sleep(duration).await;
                    if let Ok(handle) = self.send(*action).await {
                        handle.wait().await;
                    }
                },
                Effect::Parallel(effects) => {
                    let mut handles = Vec::with_capacity(effects.len());
                    for effect in effects {
                        let store = self.clone();
                        handles.push(tokio::spawn(async move {
                            store.run_effect(effect).await;
                        }));
                    }
                    for handle in handles {
                        if let Err(error) = handle.await {
                            tracing::error!(%error, "Parallel effect task failed");
                        }
                    }
                },
                Effect::Sequential(effects) => {
                    tracing::trace!("Executing Effect::Sequential with {} effects", effects.len());
                    for effect in effects {
                        self.run_effect(effect).await;
                    }
                },
            }
        })
    }
}
