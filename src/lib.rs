#![warn(missing_docs)]
//! Renderer for Android vector drawables, producing PNG images

pub mod canvas;
pub mod cli;
pub mod color;
pub mod config;
pub mod dimension;
pub mod document;
pub mod draw;
mod error;
pub mod resources;

#[cfg(feature = "render-png")]
pub mod convert;
#[cfg(feature = "render-png")]
pub mod output;
#[cfg(feature = "render-png")]
mod render;

pub use canvas::{Canvas, Drawing};
pub use color::{parse_color, ColorTable, Rgba};
pub use config::Config;
pub use dimension::parse_dimension;
pub use document::VectorDocument;
pub use draw::render;
pub use error::Error;

#[cfg(feature = "render-png")]
pub use convert::convert;

/// Version reported by `-version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
