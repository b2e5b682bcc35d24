// 确保远程父目录存在
use crate::transfer::{DirStatus, RemoteFs};
use crate::utils::error::{Result, XftpError};
use crate::utils::path::{decompose, is_absolute};
use log::debug;

/// Creates every parent directory of `destination` on the remote side,
/// root-most first. Directories that already exist are skipped, so calling
/// this repeatedly for the same destination is harmless.
pub fn ensure_dirs<F>(remote: &mut F, destination: &str) -> Result<()>
where
    F: RemoteFs + ?Sized,
{
    let dirs = decompose(destination)?;
    if dirs.is_empty() {
        return Ok(());
    }

    let anchor = if is_absolute(destination) { "/" } else { "" };

    for i in 0..dirs.len() {
        let base_dir = format!("{}{}", anchor, dirs[..=i].join("/"));
        match remote.create_directory(&base_dir) {
            Ok(DirStatus::Created) => debug!("Created remote directory: {}", base_dir),
            Ok(DirStatus::AlreadyExisted) => {}
            Err(cause) => {
                return Err(XftpError::DirectoryCreation {
                    segment: base_dir,
                    cause,
                })
            }
        }
    }

    Ok(())
}
