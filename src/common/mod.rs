//! Common utilities shared between the library core and the CLI

pub mod caps;
pub mod error;
pub mod logging;

pub use caps::Capabilities;
pub use error::{Error, Result};
