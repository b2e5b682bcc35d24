// 上传功能
use crate::config::ClientOptions;
use crate::transfer::progress::ProgressTracker;
use crate::transfer::{ensure_dirs, RemoteFs};
use crate::utils::error::{Result, XftpError};
use crate::utils::file::copy_in_chunks;
use crate::utils::path::normalize;
use log::{debug, info};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Uploads `local_path` to `remote_path`, creating missing remote parent
/// directories first.
///
/// The remote file is written in place. If the stream breaks half way the
/// remote file is left truncated; there is no temporary name and no resume.
pub fn upload<F>(
    remote: &mut F,
    local_path: &Path,
    remote_path: &str,
    options: &ClientOptions,
) -> Result<()>
where
    F: RemoteFs + ?Sized,
{
    ensure_dirs(remote, remote_path)?;

    let local_display = local_path.display().to_string();
    let mut local_file =
        File::open(local_path).map_err(|e| XftpError::local_file(&local_display, e))?;

    let target = normalize(remote_path);
    debug!("Uploading file: {} -> {}", local_display, target);

    let progress = if options.show_progress {
        let size = local_file.metadata().map(|m| m.len()).unwrap_or(0);
        Some(ProgressTracker::new(
            size,
            &format!("Uploading {}", local_display),
        ))
    } else {
        None
    };

    let mut transferred: u64 = 0;
    let result = remote.write_file(&target, &mut |writer: &mut dyn Write| -> Result<()> {
        transferred = copy_in_chunks(
            &mut local_file,
            writer,
            options.chunk_size,
            progress.as_ref(),
        )
        .map_err(|e| XftpError::transfer(&target, e))?;
        Ok(())
    });

    match &result {
        Ok(()) => {
            if let Some(progress) = &progress {
                progress.finish();
            }
            info!("Upload completed: {} ({} bytes)", target, transferred);
        }
        Err(e) => {
            if let Some(progress) = &progress {
                progress.finish_with_error(&e.to_string());
            }
        }
    }

    result
}
