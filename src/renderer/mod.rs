//! Canvas rendering module
//!
//! Drawing goes through the [`Surface`] trait so frames can be recorded in
//! tests; the browser build backs it with a 2D canvas context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod draw;

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasSurface, HtmlImage, load_assets};
pub use draw::{Assets, Surface, draw};
