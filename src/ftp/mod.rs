// FTP模块入口
pub mod client;

pub use client::FtpClient;
