// 配置管理
use crate::cli::{Cli, Commands};
use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use dialoguer::Password;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CHUNK_SIZE: usize = 32 * 1024;
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Protocol {
    Ftp,
    Sftp,
}

impl Protocol {
    pub fn default_port(self) -> u16 {
        match self {
            Protocol::Ftp => 21,
            Protocol::Sftp => 22,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Ftp => f.write_str("ftp"),
            Protocol::Sftp => f.write_str("sftp"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Upload chunk size in bytes. Zero is treated as one.
    pub chunk_size: usize,
    /// Bounds the TCP connect (and the SSH handshake and login).
    pub connect_timeout: Duration,
    pub show_progress: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            show_progress: false,
        }
    }
}

/// Where to connect and as whom. Set once, used once by `connect`.
#[derive(Clone)]
pub struct ConnectionConfig {
    pub address: String,
    pub username: String,
    pub password: String,
    pub options: ClientOptions,
}

impl ConnectionConfig {
    pub fn new(
        address: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            username: username.into(),
            password: password.into(),
            options: ClientOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Splits the address into host and port, falling back to `default_port`
    /// when the address carries none. Bracketed IPv6 literals are unwrapped.
    pub fn host_and_port(&self, default_port: u16) -> (String, u16) {
        let address = self.address.trim();

        if let Some(rest) = address.strip_prefix('[') {
            if let Some((host, tail)) = rest.split_once(']') {
                let port = tail
                    .strip_prefix(':')
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(default_port);
                return (host.to_string(), port);
            }
        }

        match address.rsplit_once(':') {
            // 不带方括号的 IPv6 地址里有多个冒号，整体视为主机
            Some((host, port)) if !host.contains(':') => match port.parse() {
                Ok(port) => (host.to_string(), port),
                Err(_) => (address.to_string(), default_port),
            },
            _ => (address.to_string(), default_port),
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("options", &self.options)
            .finish()
    }
}

/// How the SSH server's host key is checked during `connect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostKeyPolicy {
    /// Accept whatever key the server presents. Insecure; logged on use.
    AcceptAny,
    /// The key must match an entry in this OpenSSH known_hosts file.
    KnownHosts(PathBuf),
}

impl HostKeyPolicy {
    /// `~/.ssh/known_hosts` of the current user.
    pub fn default_known_hosts() -> Result<Self> {
        let home = home::home_dir().context("Cannot determine home directory")?;
        Ok(HostKeyPolicy::KnownHosts(home.join(".ssh").join("known_hosts")))
    }
}

#[derive(Debug, Clone)]
pub enum Operation {
    Upload {
        local_path: PathBuf,
        remote_path: String,
    },
    Download {
        remote_path: String,
        local_path: PathBuf,
    },
    Exec {
        command: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub protocol: Protocol,
    pub connection: ConnectionConfig,
    pub host_key_policy: HostKeyPolicy,
    pub verbose: bool,
    pub operation: Operation,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let operation = match &cli.command {
            Commands::Upload {
                local_path,
                remote_path,
            } => Operation::Upload {
                local_path: local_path.clone(),
                remote_path: remote_path.clone(),
            },
            Commands::Download {
                remote_path,
                local_path,
            } => Operation::Download {
                remote_path: remote_path.clone(),
                local_path: local_path.clone(),
            },
            Commands::Exec { command } => {
                if cli.protocol != Protocol::Sftp {
                    bail!("exec is only available over sftp");
                }
                Operation::Exec {
                    command: command.join(" "),
                }
            }
        };

        if cli.timeout == 0 {
            bail!("--timeout must be at least one second");
        }

        let host_key_policy = if cli.insecure {
            HostKeyPolicy::AcceptAny
        } else if let Some(path) = &cli.known_hosts {
            HostKeyPolicy::KnownHosts(path.clone())
        } else {
            HostKeyPolicy::default_known_hosts()?
        };

        let port = cli.port.unwrap_or_else(|| cli.protocol.default_port());
        let address = if cli.host.contains(':') && !cli.host.starts_with('[') {
            format!("[{}]:{}", cli.host, port)
        } else {
            format!("{}:{}", cli.host, port)
        };

        let password = Self::determine_password(cli)?;

        let options = ClientOptions {
            chunk_size: cli.chunk_size,
            connect_timeout: Duration::from_secs(cli.timeout),
            show_progress: cli.progress,
        };

        Ok(Config {
            protocol: cli.protocol,
            connection: ConnectionConfig::new(address, cli.username.clone(), password)
                .with_options(options),
            host_key_policy,
            verbose: cli.verbose,
            operation,
        })
    }

    fn determine_password(cli: &Cli) -> Result<String> {
        // 命令行提供了密码就直接使用
        if let Some(password) = &cli.password {
            return Ok(password.clone());
        }

        let password = Password::new()
            .with_prompt(format!("Enter password for {}@{}", cli.username, cli.host))
            .allow_empty_password(true)
            .interact()?;
        Ok(password)
    }
}
