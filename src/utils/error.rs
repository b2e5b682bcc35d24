use crate::config::Protocol;
use std::io;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, XftpError>;

#[derive(Error, Debug)]
pub enum XftpError {
    #[error("remote path is empty")]
    EmptyPath,

    #[error("{protocol} dial error [{address}]: {source}")]
    Dial {
        protocol: Protocol,
        address: String,
        #[source]
        source: BoxError,
    },

    #[error("{protocol} login error [{username}]: {source}")]
    Auth {
        protocol: Protocol,
        username: String,
        #[source]
        source: BoxError,
    },

    #[error("{protocol} session setup error ({step}): {source}")]
    Setup {
        protocol: Protocol,
        step: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("host key rejected for {host}: {reason}")]
    HostKey { host: String, reason: String },

    #[error("sftp new client error: {0}")]
    SftpInit(#[source] ssh2::Error),

    #[error("{0} session is not connected")]
    NotConnected(Protocol),

    #[error("make dir [{segment}] error: {cause}")]
    DirectoryCreation {
        segment: String,
        #[source]
        cause: BoxError,
    },

    #[error("local file [{path}] error: {source}")]
    LocalFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("remote file [{path}] error: {source}")]
    RemoteFile {
        path: String,
        #[source]
        source: BoxError,
    },

    #[error("transfer [{path}] error: {source}")]
    Transfer {
        path: String,
        #[source]
        source: BoxError,
    },

    #[error("remote command `{command}` failed: {source}")]
    Shell {
        command: String,
        #[source]
        source: BoxError,
    },
}

impl XftpError {
    pub fn local_file(path: impl Into<String>, source: io::Error) -> Self {
        XftpError::LocalFile {
            path: path.into(),
            source,
        }
    }

    pub fn remote_file(path: impl Into<String>, source: impl Into<BoxError>) -> Self {
        XftpError::RemoteFile {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn transfer(path: impl Into<String>, source: impl Into<BoxError>) -> Self {
        XftpError::Transfer {
            path: path.into(),
            source: source.into(),
        }
    }
}
