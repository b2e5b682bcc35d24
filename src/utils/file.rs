use crate::transfer::progress::ProgressTracker;
use std::io::{self, Read, Write};

/// Copies `reader` into `writer` one `chunk_size` buffer at a time until the
/// reader reports end of stream. Returns the number of bytes written.
pub fn copy_in_chunks<R, W>(
    reader: &mut R,
    writer: &mut W,
    chunk_size: usize,
    progress: Option<&ProgressTracker>,
) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break, // EOF
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buffer[..bytes_read])?;
        total += bytes_read as u64;
        if let Some(progress) = progress {
            progress.update(total);
        }
    }

    writer.flush()?;
    Ok(total)
}
