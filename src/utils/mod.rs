pub mod error;
pub mod file;
pub mod net;
pub mod path;

pub use error::{BoxError, Result, XftpError};
