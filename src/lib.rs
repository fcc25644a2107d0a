#![deny(rust_2018_idioms)]
#![deny(clippy::all)]

pub mod build;
pub mod cmark;
pub mod config;
pub mod error;
pub mod init;
pub mod journal;
pub mod model;

pub use error::{Error, Result};
