#![forbid(unsafe_code)]

//! Core: input events, modifier keys, cursors, and pixel geometry.
//!
//! # Role in hlist
//! `hlist-core` is the input layer. It owns the normalized event types the
//! host toolkit translates its native input into, plus the pixel-space
//! geometry shared by the render kernel and the widgets.
//!
//! # Primary responsibilities
//! - **Event**: canonical input events (keys, mouse, resize, focus).
//! - **Modifiers**: bitflag modifier keys, including the context-menu flag.
//! - **CursorKind**: the mouse cursor a cell asks the host to show.
//! - **Rect**: pixel rectangles for bounds, clipping, and hit testing.
//!
//! # How it fits in the system
//! `hlist-widgets` consumes `hlist-core::Event` values and drives the list
//! box. The render kernel (`hlist-render`) is independent of input, so
//! `hlist-core` is the bridge between host event delivery and the list box.

pub mod cursor;
pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, warn};
