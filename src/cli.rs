// 命令行参数解析
use crate::config::{Protocol, DEFAULT_CHUNK_SIZE};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "xftp")]
#[command(about = "Upload, download and run commands over FTP or SFTP")]
#[command(version)]
pub struct Cli {
    /// Transport protocol
    #[arg(long, value_enum, default_value = "sftp")]
    pub protocol: Protocol,

    /// Server hostname or IP address
    #[arg(short = 'H', long)]
    pub host: String,

    /// Server port (defaults to 22 for sftp, 21 for ftp)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Login username
    #[arg(short, long)]
    pub username: String,

    /// Login password (if not provided, will prompt for input)
    #[arg(short = 'P', long)]
    pub password: Option<String>,

    /// OpenSSH known_hosts file used to verify the server (sftp only)
    #[arg(long, conflicts_with = "insecure")]
    pub known_hosts: Option<PathBuf>,

    /// Accept any SSH host key without verification
    #[arg(long)]
    pub insecure: bool,

    /// Upload chunk size in bytes
    #[arg(short, long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Connect timeout in seconds
    #[arg(short, long, default_value = "10")]
    pub timeout: u64,

    /// Show a progress bar while uploading
    #[arg(long)]
    pub progress: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a file, creating missing remote directories
    Upload {
        /// Local file path
        local_path: PathBuf,
        /// Remote destination path
        remote_path: String,
    },
    /// Download a file from the remote server
    Download {
        /// Remote file path
        remote_path: String,
        /// Local destination path
        local_path: PathBuf,
    },
    /// Run a shell command on the remote host (sftp only)
    Exec {
        /// Command line to run
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}
