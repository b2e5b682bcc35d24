use crate::utils::error::BoxError;
use std::net::{SocketAddr, ToSocketAddrs};

/// Resolves `host:port` to the first address the resolver returns.
pub fn resolve(host: &str, port: u16) -> Result<SocketAddr, BoxError> {
    (host, port)
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| format!("no address found for {}", host).into())
}
