// 主机密钥校验
use crate::config::HostKeyPolicy;
use crate::utils::error::{Result, XftpError};
use log::{debug, warn};
use ssh2::{CheckResult, KnownHostFileKind, Session};

/// Checks the key presented during the handshake against `policy`.
pub fn verify_host_key(
    session: &Session,
    host: &str,
    port: u16,
    policy: &HostKeyPolicy,
) -> Result<()> {
    let known_hosts_path = match policy {
        HostKeyPolicy::AcceptAny => {
            warn!(
                "Host key checking is disabled, accepting any key from {}:{}",
                host, port
            );
            return Ok(());
        }
        HostKeyPolicy::KnownHosts(path) => path,
    };

    let rejected = |reason: String| XftpError::HostKey {
        host: format!("{}:{}", host, port),
        reason,
    };

    let (key, _) = session
        .host_key()
        .ok_or_else(|| rejected("server did not present a host key".to_string()))?;

    let mut known_hosts = session
        .known_hosts()
        .map_err(|e| rejected(format!("cannot initialise known hosts: {}", e)))?;
    known_hosts
        .read_file(known_hosts_path, KnownHostFileKind::OpenSSH)
        .map_err(|e| {
            rejected(format!(
                "cannot read {}: {}",
                known_hosts_path.display(),
                e
            ))
        })?;

    match known_hosts.check_port(host, port, key) {
        CheckResult::Match => {
            debug!("Host key for {}:{} matches known_hosts", host, port);
            Ok(())
        }
        CheckResult::NotFound => Err(rejected(format!(
            "no entry in {}",
            known_hosts_path.display()
        ))),
        CheckResult::Mismatch => Err(rejected(format!(
            "key does not match the entry in {}",
            known_hosts_path.display()
        ))),
        CheckResult::Failure => Err(rejected("known hosts check failed".to_string())),
    }
}
