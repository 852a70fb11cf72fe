//! Swagger 1.2 to source-code generator.
//!
//! A run loads one API declaration, converts it into language-neutral
//! descriptors through a [`LanguageConverter`], and renders those through
//! user-supplied templates into the output folder. See [`generate`].

#![forbid(unsafe_code)]
#![deny(unused_must_use, missing_debug_implementations)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

pub mod convert;
pub mod emit;
pub mod error;
pub mod loader;
pub mod options;
pub mod pipeline;
pub mod render;
pub mod swagger;

pub use convert::{ConverterFactory, ConverterRegistry, LanguageConverter};
pub use error::{GenError, Result};
pub use options::{Credentials, Options};
pub use pipeline::{RunReport, Stage, generate, generate_from_text};
