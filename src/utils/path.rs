// 远程路径拆分
use crate::utils::error::{Result, XftpError};

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Whether the raw remote path starts at the root (either separator style).
pub fn is_absolute(path: &str) -> bool {
    path.starts_with(is_separator)
}

/// Rewrites every backslash (doubled or single) as a forward slash.
pub fn normalize(path: &str) -> String {
    path.replace("\\\\", "/").replace('\\', "/")
}

/// Splits a remote destination path into the directory segments that must
/// exist before the destination can be written, root-most first.
///
/// One leading and one trailing separator are trimmed, both separator styles
/// are accepted, and empty segments produced by repeated separators are
/// dropped. A bare file name yields no segments.
pub fn decompose(path: &str) -> Result<Vec<String>> {
    if path.is_empty() {
        return Err(XftpError::EmptyPath);
    }

    let mut trimmed = path;
    if let Some(rest) = trimmed.strip_prefix(is_separator) {
        trimmed = rest;
    }
    if let Some(rest) = trimmed.strip_suffix(is_separator) {
        trimmed = rest;
    }

    let normalized = normalize(trimmed);

    // 最后一个分隔符之前的部分才是目录
    let dir = match normalized.rfind('/') {
        Some(idx) => &normalized[..idx],
        None => return Ok(Vec::new()),
    };

    Ok(dir
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect())
}
