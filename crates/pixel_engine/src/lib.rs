#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_lossless,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]
mod grid;
pub use grid::*;

mod palette_handling;
pub use palette_handling::*;

mod error;
pub use error::*;

pub mod paint;

pub mod editor;

mod png_export;
pub use png_export::*;

pub type EngineResult<T> = std::result::Result<T, EngineError>;
