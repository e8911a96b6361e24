#![forbid(unsafe_code)]

//! Structured logging facade.
//!
//! With the `tracing` feature enabled this module re-exports the `tracing`
//! macros so downstream crates can log through `hlist_core` without naming
//! `tracing` directly. Without the feature the module is empty and every
//! call site is compiled out behind `#[cfg(feature = "tracing")]`.
//!
//! # Event names
//!
//! | name              | level | emitted by                               |
//! |-------------------|-------|------------------------------------------|
//! | `hlist.selection` | debug | every selection mutation                 |
//! | `hlist.scroll`    | debug | scroll offset changes                    |
//! | `hlist.remap`     | debug | span around a pool remap                 |
//! | `hlist.snapshot`  | debug | span around drag-image rendering         |
//! | `hlist.drag`      | warn  | drag requested without a drag host       |

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, trace, warn};
