// 库文件，导出模块
pub mod cli;
pub mod config;
pub mod ftp;
pub mod ssh;
pub mod transfer;
pub mod utils;

use anyhow::{bail, Result};
use config::{Config, Operation, Protocol};
use ftp::FtpClient;
use ssh::SftpClient;
use transfer::TransferClient;

pub use utils::error::XftpError;

pub fn run(config: Config) -> Result<()> {
    match config.protocol {
        Protocol::Sftp => {
            let mut client = SftpClient::connect(&config.connection, &config.host_key_policy)?;
            let result = match &config.operation {
                Operation::Exec { command } => client
                    .run_shell(command)
                    .map(|output| print!("{}", output))
                    .map_err(anyhow::Error::from),
                operation => run_transfer(&mut client, operation),
            };
            client.disconnect();
            result
        }
        Protocol::Ftp => {
            if let Operation::Exec { .. } = config.operation {
                bail!("exec is only available over sftp");
            }
            let mut client = FtpClient::connect(&config.connection)?;
            run_transfer(&mut client, &config.operation)
        }
    }
}

fn run_transfer<C: TransferClient>(client: &mut C, operation: &Operation) -> Result<()> {
    match operation {
        Operation::Upload {
            local_path,
            remote_path,
        } => client.upload(local_path, remote_path)?,
        Operation::Download {
            remote_path,
            local_path,
        } => client.download(remote_path, local_path)?,
        Operation::Exec { .. } => bail!("exec is only available over sftp"),
    }
    Ok(())
}
