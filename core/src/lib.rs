//! # Checklist Core
//!
//! Core traits and types for the Checklist architecture.
//!
//! This crate provides the fundamental abstractions for building the list
//! application core using the Reducer pattern with unidirectional data flow.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature
//! - **Action**: All possible inputs to a reducer (UI triggers, feedback from effects)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```ignore
//! use checklist_core::*;
//!
//! // Define your state
//! #[derive(Clone, Debug)]
//! struct ListState {
//!     items: Vec<ListItem>,
//! }
//!
//! // Define your actions
//! #[derive(Clone, Debug)]
//! enum ListAction {
//!     Add { text: String },
//!     Loaded { items: Vec<ListItem> },
//! }
//!
//! // Implement the reducer
//! impl Reducer for ListReducer {
//!     type State = ListState;
//!     type Action = ListAction;
//!     type Environment = ListEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut ListState,
//!         action: ListAction,
//!         env: &ListEnvironment,
//!     ) -> SmallVec<[Effect<ListAction>; 4]> {
//!         // Business logic goes here
//!         smallvec![]
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Key-value persistence abstraction
pub mod kv;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for ListReducer {
    ///     type State = ListState;
    ///     type Action = ListAction;
    ///     type Environment = ListEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut ListState,
    ///         action: ListAction,
    ///         env: &ListEnvironment,
    ///     ) -> SmallVec<[Effect<ListAction>; 4]> {
    ///         match action {
    ///             ListAction::Add { text } => {
    ///                 // Business logic here
    ///                 smallvec![Effect::None]
    ///             }
    ///             _ => smallvec![Effect::None],
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effects to be executed by the runtime
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// The canonical effect in this system is a `Future` that writes the
    /// current item list through the key-value store and feeds a refresh
    /// action back into the reducer.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (e.g. deferring focus to a freshly rendered input)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter: the clock, the item key generator, and
/// the key-value store (see [`kv`]).
pub mod environment {
    use chrono::{DateTime, Utc};
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use checklist_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let now = clock.now();
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Key generator trait - produces unique identifiers for list items
    ///
    /// Keys are assigned once at item creation and never re-derived.
    /// Implementations must guarantee uniqueness within a process.
    pub trait KeyGenerator: Send + Sync {
        /// Produce a fresh key, distinct from every key produced before it
        fn next_key(&self) -> String;
    }

    /// Production key generator: millisecond timestamps, forced monotonic
    ///
    /// Two items created within the same millisecond would collide on a raw
    /// timestamp, so the generator never hands out a value less than or
    /// equal to the previous one.
    pub struct TimestampKeys<C: Clock> {
        clock: C,
        last: AtomicI64,
    }

    impl<C: Clock> TimestampKeys<C> {
        /// Create a generator reading time from the given clock
        #[must_use]
        pub const fn new(clock: C) -> Self {
            Self {
                clock,
                last: AtomicI64::new(0),
            }
        }
    }

    impl<C: Clock> KeyGenerator for TimestampKeys<C> {
        fn next_key(&self) -> String {
            let now = self.clock.now().timestamp_millis();
            let mut last = self.last.load(Ordering::Relaxed);
            loop {
                let candidate = now.max(last + 1);
                match self.last.compare_exchange(
                    last,
                    candidate,
                    Ordering::AcqRel,
                    Ordering::Relaxed,
                ) {
                    Ok(_) => return candidate.to_string(),
                    Err(actual) => last = actual,
                }
            }
        }
    }
}
