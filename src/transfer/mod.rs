// 传输模块入口
use crate::utils::error::{BoxError, Result};
use std::io::{Read, Write};
use std::path::Path;

pub mod dirs;
pub mod download;
pub mod progress;
pub mod upload;

pub use dirs::ensure_dirs;
pub use download::download;
pub use upload::upload;

/// Outcome of a single remote directory creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirStatus {
    Created,
    AlreadyExisted,
}

/// The remote side of a live session, as seen by the upload and download
/// routines. Each transport adapter decides once how "already exists" is
/// detected.
pub trait RemoteFs {
    /// Creates a single directory. A directory that is already present,
    /// including one created concurrently by someone else, is reported as
    /// [`DirStatus::AlreadyExisted`] rather than as an error.
    fn create_directory(&mut self, path: &str) -> std::result::Result<DirStatus, BoxError>;

    /// Creates or truncates `path` and hands a writer for it to `fill`.
    ///
    /// Open failures are `RemoteFile` errors. Errors returned by `fill` are
    /// passed through unchanged; the remote handle is released either way.
    fn write_file(
        &mut self,
        path: &str,
        fill: &mut dyn FnMut(&mut dyn Write) -> Result<()>,
    ) -> Result<()>;

    /// Opens `path` for reading and hands the reader to `drain`.
    fn read_file(
        &mut self,
        path: &str,
        drain: &mut dyn FnMut(&mut dyn Read) -> Result<()>,
    ) -> Result<()>;
}

/// Operations shared by the FTP and SFTP clients.
pub trait TransferClient {
    fn upload(&mut self, local_path: &Path, remote_path: &str) -> Result<()>;

    fn download(&mut self, remote_path: &str, local_path: &Path) -> Result<()>;
}
