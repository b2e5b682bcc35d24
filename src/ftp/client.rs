// FTP 客户端封装
use crate::config::{ClientOptions, ConnectionConfig, Protocol};
use crate::transfer::{self, DirStatus, RemoteFs, TransferClient};
use crate::utils::error::{BoxError, Result, XftpError};
use crate::utils::net::resolve;
use log::{debug, info, warn};
use std::io::{Read, Write};
use std::path::Path;
use suppaftp::types::FileType;
use suppaftp::FtpStream;

/// A logged-in FTP session.
///
/// Each upload or download ends the session with QUIT, so a client serves
/// exactly one transfer. Later calls fail with `NotConnected`.
pub struct FtpClient {
    stream: Option<FtpStream>,
    options: ClientOptions,
}

impl FtpClient {
    pub fn connect(config: &ConnectionConfig) -> Result<Self> {
        let dial_error = |source: BoxError| XftpError::Dial {
            protocol: Protocol::Ftp,
            address: config.address.clone(),
            source,
        };

        let (host, port) = config.host_and_port(Protocol::Ftp.default_port());
        let addr = resolve(&host, port).map_err(dial_error)?;

        debug!("Connecting to {} ({})", config.address, addr);
        let mut stream = FtpStream::connect_timeout(addr, config.options.connect_timeout)
            .map_err(|e| dial_error(e.into()))?;

        stream
            .login(config.username.as_str(), config.password.as_str())
            .map_err(|e| XftpError::Auth {
                protocol: Protocol::Ftp,
                username: config.username.clone(),
                source: e.into(),
            })?;
        stream
            .transfer_type(FileType::Binary)
            .map_err(|e| XftpError::Setup {
                protocol: Protocol::Ftp,
                step: "switch to binary mode",
                source: e.into(),
            })?;

        info!("Connected to {} as {}", config.address, config.username);
        Ok(FtpClient {
            stream: Some(stream),
            options: config.options.clone(),
        })
    }

    /// Ends a session that was never used for a transfer.
    pub fn quit(mut self) {
        if let Some(stream) = self.stream.take() {
            close(stream);
        }
    }

    fn take_stream(&mut self) -> Result<FtpStream> {
        self.stream
            .take()
            .ok_or(XftpError::NotConnected(Protocol::Ftp))
    }
}

impl TransferClient for FtpClient {
    fn upload(&mut self, local_path: &Path, remote_path: &str) -> Result<()> {
        let mut stream = self.take_stream()?;
        let result = transfer::upload(&mut stream, local_path, remote_path, &self.options);
        close(stream);
        result
    }

    fn download(&mut self, remote_path: &str, local_path: &Path) -> Result<()> {
        let mut stream = self.take_stream()?;
        let result = transfer::download(&mut stream, remote_path, local_path);
        close(stream);
        result
    }
}

impl RemoteFs for FtpStream {
    fn create_directory(&mut self, path: &str) -> std::result::Result<DirStatus, BoxError> {
        match self.mkdir(path) {
            Ok(()) => Ok(DirStatus::Created),
            Err(e) => {
                if mkdir_error_means_existing(&e.to_string(), || is_remote_dir(self, path)) {
                    Ok(DirStatus::AlreadyExisted)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    fn write_file(
        &mut self,
        path: &str,
        fill: &mut dyn FnMut(&mut dyn Write) -> Result<()>,
    ) -> Result<()> {
        let mut data_stream = self
            .put_with_stream(path)
            .map_err(|e| XftpError::remote_file(path, e))?;
        let filled = fill(&mut data_stream);
        // 结束数据连接，服务器在这里确认是否收完
        let finalized = self.finalize_put_stream(data_stream);
        filled?;
        finalized.map_err(|e| XftpError::transfer(path, e))
    }

    fn read_file(
        &mut self,
        path: &str,
        drain: &mut dyn FnMut(&mut dyn Read) -> Result<()>,
    ) -> Result<()> {
        let mut data_stream = self
            .retr_as_stream(path)
            .map_err(|e| XftpError::remote_file(path, e))?;
        let drained = drain(&mut data_stream);
        let finalized = self.finalize_retr_stream(data_stream);
        drained?;
        finalized.map_err(|e| XftpError::transfer(path, e))
    }
}

/// Decides whether a failed MKD means the directory is already there.
///
/// "already exists" is taken at its word. "File exists" is what ProFTPD and
/// Pure-FTPd answer for a directory and for a regular file alike, so that
/// wording only counts once `is_dir` confirms a directory sits at the path.
/// Otherwise a file in the way would surface one segment deeper.
pub fn mkdir_error_means_existing<D>(message: &str, is_dir: D) -> bool
where
    D: FnOnce() -> bool,
{
    let message = message.to_ascii_lowercase();
    if message.contains("already exists") {
        return true;
    }
    message.contains("file exists") && is_dir()
}

/// Probes `path` with CWD and returns to the previous working directory.
fn is_remote_dir(stream: &mut FtpStream, path: &str) -> bool {
    let Ok(previous) = stream.pwd() else {
        return false;
    };
    if stream.cwd(path).is_err() {
        return false;
    }
    if let Err(e) = stream.cwd(&previous) {
        warn!("ftp cwd back to {} error: {}", previous, e);
    }
    true
}

fn close(mut stream: FtpStream) {
    if let Err(e) = stream.quit() {
        debug!("ftp quit error: {}", e);
    }
}
