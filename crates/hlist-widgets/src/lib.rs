#![forbid(unsafe_code)]

//! Horizontally scrolling, virtualized list box.
//!
//! # Role in hlist
//! `hlist-widgets` is the engine: a small pool of recycled cells mapped onto
//! an arbitrarily large run of equal-width columns, a range-based selection
//! model, and the controller that keeps scroll position, cell bindings, and
//! selection consistent under pointer, keyboard, and programmatic input.
//!
//! # Primary responsibilities
//! - **RecyclingViewport**: scroll clamping, visible-range math, pool remap.
//! - **SelectionModel**: select, deselect, toggle, range, and click policy.
//! - **HorizontalListBox**: input handling, reveal-on-select, drag start,
//!   geometry queries, and deferred redraw bookkeeping.
//! - **DataSource / DragHost**: the collaborator traits the host implements.

pub mod cell;
pub mod config;
pub mod data_source;
pub mod list_box;
pub mod mouse;
pub mod selection;
pub mod theme;
pub mod viewport;

pub use cell::{Cell, CellContent, CellId};
pub use config::ListBoxConfig;
pub use data_source::{DataSource, DragHost, DragPayload};
pub use list_box::{HorizontalListBox, ScrollbarState, Snapshot};
pub use mouse::{CellEvent, MouseResult};
pub use selection::{SelectionModel, SelectionOutcome, SelectionSet};
pub use theme::ListTheme;
pub use viewport::{PoolBinding, RecyclingViewport, ViewportLayout};
