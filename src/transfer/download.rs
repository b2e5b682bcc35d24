// 下载功能
use crate::transfer::RemoteFs;
use crate::utils::error::{Result, XftpError};
use log::{debug, info};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Copies `remote_path` into `local_path` in one bulk copy.
///
/// The local parent directory is not created; if it is missing the error
/// from `File::create` is returned as a `LocalFile` error.
pub fn download<F>(remote: &mut F, remote_path: &str, local_path: &Path) -> Result<()>
where
    F: RemoteFs + ?Sized,
{
    let local_display = local_path.display().to_string();
    debug!("Downloading file: {} -> {}", remote_path, local_display);

    let mut transferred: u64 = 0;
    remote.read_file(remote_path, &mut |reader: &mut dyn Read| -> Result<()> {
        let mut local_file =
            File::create(local_path).map_err(|e| XftpError::local_file(&local_display, e))?;
        transferred =
            io::copy(reader, &mut local_file).map_err(|e| XftpError::transfer(remote_path, e))?;
        Ok(())
    })?;

    info!(
        "Download completed: {} -> {} ({} bytes)",
        remote_path, local_display, transferred
    );
    Ok(())
}
