pub mod error;
pub mod io_utils;
pub mod serde;
pub mod text;

pub use error::{Error, ErrorKind, Result};
