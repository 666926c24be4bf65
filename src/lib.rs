#![forbid(unsafe_code)]

pub mod canvas;
pub mod color;
pub mod error;
pub mod font;
pub mod png;

pub use canvas::Canvas;
pub use color::Rgb;
pub use error::{RasterfigError, RasterfigResult};
pub use png::{encode, write_png};
