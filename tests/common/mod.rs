#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap, HashSet};
use std::io::{self, Cursor, Read, Write};
use std::path::Path;
use tempfile::TempDir;
use xftp::transfer::{DirStatus, RemoteFs};
use xftp::utils::error::{BoxError, Result, XftpError};

pub fn setup_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

pub fn write_local(dir: &Path, name: &str, data: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).expect("Failed to write local file");
    path
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Mkdir(String),
    Write(String),
    Read(String),
}

/// In-memory remote side. Writing a file whose parent directory is missing
/// fails, like a real server would.
#[derive(Default)]
pub struct MemoryFs {
    pub dirs: BTreeSet<String>,
    pub files: HashMap<String, Vec<u8>>,
    pub events: Vec<Event>,
    pub created: Vec<String>,
    /// mkdir on these paths fails with the given message
    pub mkdir_errors: HashMap<String, String>,
    /// these directories appear (created by someone else) right as we try
    pub racing: HashSet<String>,
    /// writes fail once this many bytes have been accepted
    pub write_budget: Option<usize>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dirs(dirs: &[&str]) -> Self {
        let mut fs = Self::default();
        fs.dirs.extend(dirs.iter().map(|d| d.to_string()));
        fs
    }

    pub fn mkdir_calls(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Mkdir(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    fn parent_exists(&self, path: &str) -> bool {
        match path.rfind('/') {
            None | Some(0) => true,
            Some(idx) => self.dirs.contains(&path[..idx]),
        }
    }
}

impl RemoteFs for MemoryFs {
    fn create_directory(&mut self, path: &str) -> std::result::Result<DirStatus, BoxError> {
        self.events.push(Event::Mkdir(path.to_string()));

        if let Some(message) = self.mkdir_errors.get(path) {
            return Err(message.clone().into());
        }
        if self.racing.remove(path) {
            self.dirs.insert(path.to_string());
            return Ok(DirStatus::AlreadyExisted);
        }
        if self.dirs.insert(path.to_string()) {
            self.created.push(path.to_string());
            Ok(DirStatus::Created)
        } else {
            Ok(DirStatus::AlreadyExisted)
        }
    }

    fn write_file(
        &mut self,
        path: &str,
        fill: &mut dyn FnMut(&mut dyn Write) -> Result<()>,
    ) -> Result<()> {
        if !self.parent_exists(path) {
            return Err(XftpError::remote_file(
                path,
                io::Error::new(io::ErrorKind::NotFound, "No such file"),
            ));
        }
        self.events.push(Event::Write(path.to_string()));

        let mut writer = BudgetWriter {
            data: Vec::new(),
            budget: self.write_budget,
        };
        let result = fill(&mut writer);
        self.files.insert(path.to_string(), writer.data);
        result
    }

    fn read_file(
        &mut self,
        path: &str,
        drain: &mut dyn FnMut(&mut dyn Read) -> Result<()>,
    ) -> Result<()> {
        self.events.push(Event::Read(path.to_string()));
        let data = self.files.get(path).cloned().ok_or_else(|| {
            XftpError::remote_file(path, io::Error::new(io::ErrorKind::NotFound, "No such file"))
        })?;
        drain(&mut Cursor::new(data))
    }
}

struct BudgetWriter {
    data: Vec<u8>,
    budget: Option<usize>,
}

impl Write for BudgetWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(budget) = self.budget {
            if self.data.len() + buf.len() > budget {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection reset"));
            }
        }
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
