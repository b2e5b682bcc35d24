// SSH模块入口
pub mod client;
pub mod host_key;

pub use client::SftpClient;
pub use host_key::verify_host_key;
