//! To-do list application core.
//!
//! An ordered list of text items with add/edit/delete/reorder/complete
//! operations, write-through persistence to an opaque key-value store,
//! and a pure sort/display policy. Rendering and the storage engine are
//! external collaborators: the UI layer submits trigger calls to
//! [`ListStore`] and renders the [`RenderPlan`] it asks for; storage is
//! anything implementing the key-value trait.
//!
//! This crate demonstrates:
//!
//! - Copy-on-write list state (a fresh sequence per mutation)
//! - Command validation with a typed error taxonomy
//! - Write-through persistence with a refresh feedback loop
//! - A mode-driven render plan kept independent of mutation logic
//!
//! # Quick Start
//!
//! ```no_run
//! use checklist::{JsonFileStore, ListStore, Mode};
//! use checklist_core::environment::{SystemClock, TimestampKeys};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Wire the store to its collaborators
//! let storage = Arc::new(JsonFileStore::new("./data"));
//! let keys = Arc::new(TimestampKeys::new(SystemClock));
//! let store = ListStore::new(storage, keys);
//!
//! // Load once at startup, then mutate freely
//! store.load().await?;
//! store.add("buy milk").await?;
//!
//! // Hand the render plan to the UI layer
//! let plan = store.render_plan(Mode::View).await;
//! let items = store.items().await;
//! println!("{} items", items.len());
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod error;
pub mod item;
pub mod policy;
pub mod reducer;
pub mod state;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use action::ListAction;
pub use error::ListError;
pub use item::{ItemKey, ListItem};
pub use policy::{Mode, RenderPlan, render_plan, sorted};
pub use reducer::{LIST_ITEMS_KEY, ListEnvironment, ListReducer};
pub use state::ListState;
pub use storage::JsonFileStore;
pub use store::ListStore;
