#![forbid(unsafe_code)]

//! Render kernel: colours, paint surfaces, and off-screen pixel buffers.
//!
//! # Role in hlist
//! `hlist-render` defines what "drawing" means to the list box without
//! depending on any host graphics API. The host hands the list a
//! [`Surface`](surface::Surface) to paint into; the list itself only needs
//! an off-screen [`PixelBuffer`](buffer::PixelBuffer) to build drag images.
//!
//! # Primary responsibilities
//! - **PackedRgba**: compact non-premultiplied RGBA colour with source-over
//!   compositing.
//! - **Surface**: the paint-context trait data sources draw cells into.
//! - **PixelBuffer**: a 2D ARGB grid that implements `Surface` and can be
//!   composited onto another buffer at reduced opacity.

pub mod buffer;
pub mod color;
pub mod surface;

pub use buffer::PixelBuffer;
pub use color::PackedRgba;
pub use surface::Surface;
