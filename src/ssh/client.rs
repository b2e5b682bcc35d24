// SSH/SFTP 客户端封装
use crate::config::{ClientOptions, ConnectionConfig, HostKeyPolicy, Protocol};
use crate::ssh::host_key::verify_host_key;
use crate::transfer::{self, DirStatus, RemoteFs, TransferClient};
use crate::utils::error::{BoxError, Result, XftpError};
use crate::utils::net::resolve;
use log::{debug, info};
use ssh2::{ExtendedData, Session, Sftp};
use std::io::{Read, Write};
use std::net::TcpStream;
use std::path::Path;

const DIR_MODE: i32 = 0o755;

/// An authenticated SSH session with an open SFTP subsystem.
///
/// The session stays open across operations until [`SftpClient::disconnect`]
/// is called or the client is dropped.
pub struct SftpClient {
    session: Session,
    sftp: Sftp,
    options: ClientOptions,
}

impl SftpClient {
    pub fn connect(config: &ConnectionConfig, host_key_policy: &HostKeyPolicy) -> Result<Self> {
        let dial_error = |source: BoxError| XftpError::Dial {
            protocol: Protocol::Sftp,
            address: config.address.clone(),
            source,
        };

        let (host, port) = config.host_and_port(Protocol::Sftp.default_port());
        let addr = resolve(&host, port).map_err(dial_error)?;
        let timeout = config.options.connect_timeout;

        debug!("Connecting to {} ({})", config.address, addr);
        let tcp = TcpStream::connect_timeout(&addr, timeout)
            .map_err(|e| dial_error(e.into()))?;

        let mut session = Session::new().map_err(|e| dial_error(e.into()))?;
        session.set_tcp_stream(tcp);
        // 超时只覆盖握手和认证
        session.set_timeout(timeout.as_millis().try_into().unwrap_or(u32::MAX));
        session.handshake().map_err(|e| dial_error(e.into()))?;

        verify_host_key(&session, &host, port, host_key_policy)?;

        let auth_error = |source: BoxError| XftpError::Auth {
            protocol: Protocol::Sftp,
            username: config.username.clone(),
            source,
        };
        session
            .userauth_password(&config.username, &config.password)
            .map_err(|e| auth_error(e.into()))?;
        if !session.authenticated() {
            return Err(auth_error("server did not accept the credentials".into()));
        }
        session.set_timeout(0);

        let sftp = session.sftp().map_err(XftpError::SftpInit)?;

        info!("Connected to {} as {}", config.address, config.username);
        Ok(SftpClient {
            session,
            sftp,
            options: config.options.clone(),
        })
    }

    /// Runs `command` in a fresh channel and returns stdout and stderr
    /// interleaved as the server sent them. A non-zero exit status is an
    /// error that carries the output.
    pub fn run_shell(&mut self, command: &str) -> Result<String> {
        let shell_error = |source: BoxError| XftpError::Shell {
            command: command.to_string(),
            source,
        };

        let mut channel = self
            .session
            .channel_session()
            .map_err(|e| shell_error(e.into()))?;
        channel
            .handle_extended_data(ExtendedData::Merge)
            .map_err(|e| shell_error(e.into()))?;
        channel.exec(command).map_err(|e| shell_error(e.into()))?;

        let mut output = Vec::new();
        channel
            .read_to_end(&mut output)
            .map_err(|e| shell_error(e.into()))?;
        channel.wait_close().map_err(|e| shell_error(e.into()))?;

        let output = String::from_utf8_lossy(&output).into_owned();
        let status = channel.exit_status().map_err(|e| shell_error(e.into()))?;
        if status != 0 {
            return Err(shell_error(
                format!("exit status {}: {}", status, output.trim_end()).into(),
            ));
        }

        Ok(output)
    }

    /// Closes the SSH connection. Errors while saying goodbye are ignored.
    pub fn disconnect(self) {
        let _ = self.session.disconnect(None, "closed by client", None);
    }
}

impl TransferClient for SftpClient {
    fn upload(&mut self, local_path: &Path, remote_path: &str) -> Result<()> {
        transfer::upload(&mut self.sftp, local_path, remote_path, &self.options)
    }

    fn download(&mut self, remote_path: &str, local_path: &Path) -> Result<()> {
        transfer::download(&mut self.sftp, remote_path, local_path)
    }
}

impl RemoteFs for Sftp {
    fn create_directory(&mut self, path: &str) -> std::result::Result<DirStatus, BoxError> {
        let dir = Path::new(path);
        stat_then_mkdir(
            dir,
            |p| self.stat(p).ok().map(|stat| stat.is_dir()),
            |p| self.mkdir(p, DIR_MODE).map_err(Into::into),
        )
    }

    fn write_file(
        &mut self,
        path: &str,
        fill: &mut dyn FnMut(&mut dyn Write) -> Result<()>,
    ) -> Result<()> {
        let mut remote_file = self
            .create(Path::new(path))
            .map_err(|e| XftpError::remote_file(path, e))?;
        fill(&mut remote_file)
    }

    fn read_file(
        &mut self,
        path: &str,
        drain: &mut dyn FnMut(&mut dyn Read) -> Result<()>,
    ) -> Result<()> {
        let mut remote_file = self
            .open(Path::new(path))
            .map_err(|e| XftpError::remote_file(path, e))?;
        drain(&mut remote_file)
    }
}

/// Creates `dir` unless it is already a directory.
///
/// `kind` reports `None` when nothing is at the path, `Some(true)` for a
/// directory and `Some(false)` for anything else. After a failed mkdir the
/// path is checked once more so a directory created concurrently counts as
/// already existing.
pub fn stat_then_mkdir<K, M>(
    dir: &Path,
    kind: K,
    mut mkdir: M,
) -> std::result::Result<DirStatus, BoxError>
where
    K: Fn(&Path) -> Option<bool>,
    M: FnMut(&Path) -> std::result::Result<(), BoxError>,
{
    match kind(dir) {
        Some(true) => return Ok(DirStatus::AlreadyExisted),
        Some(false) => {
            return Err(format!("path exists but is not a directory: {}", dir.display()).into())
        }
        None => {}
    }

    match mkdir(dir) {
        Ok(()) => Ok(DirStatus::Created),
        // 可能是并发创建导致失败，再检查一次
        Err(e) => match kind(dir) {
            Some(true) => Ok(DirStatus::AlreadyExisted),
            _ => Err(e),
        },
    }
}
