//! TCP port liveness probes.

use std::io::ErrorKind;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpStream};
use std::time::Duration;

use crate::error::Result;
use crate::shell::{exec, platform, CommandInvocation};

/// Answers "is something listening on this local port right now?".
pub trait PortProbe {
    /// Check the port once.
    ///
    /// An `Err` means the check itself could not be carried out, which is
    /// different from "nobody is listening".
    fn is_listening(&self, port: u16) -> Result<bool>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Whether `table` (netstat output) has a listener on `port`.
///
/// A row matches when its local-address column ends in `:<port>` or
/// `.<port>` and one of its columns equals `listen_state` exactly.
pub fn table_has_listener(table: &str, port: u16, listen_state: &str) -> bool {
    table
        .lines()
        .any(|row| row_is_listener(row, port, listen_state))
}

fn row_is_listener(row: &str, port: u16, listen_state: &str) -> bool {
    let columns: Vec<&str> = row.split_whitespace().collect();

    // Numeric columns (queues, PIDs) never contain these; the first address
    // column is the local one.
    let local = columns
        .iter()
        .find(|c| c.contains(':') || c.contains('.') || c.contains('*'));

    let Some(local) = local else {
        return false;
    };

    let colon_suffix = format!(":{}", port);
    let dot_suffix = format!(".{}", port);
    if !local.ends_with(&colon_suffix) && !local.ends_with(&dot_suffix) {
        return false;
    }

    columns.iter().any(|c| *c == listen_state)
}

/// Probe that reads the system port table through `netstat`.
#[derive(Debug, Clone)]
pub struct NetstatProbe {
    invocation: CommandInvocation,
    listen_state: String,
}

impl Default for NetstatProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl NetstatProbe {
    /// Use the platform's `netstat` and listen vocabulary.
    pub fn new() -> Self {
        Self::with_invocation(
            CommandInvocation::new("netstat", platform::netstat_args().iter().copied()),
            platform::listen_state(),
        )
    }

    /// Use a custom table command and state text.
    pub fn with_invocation(invocation: CommandInvocation, listen_state: &str) -> Self {
        Self {
            invocation,
            listen_state: listen_state.to_string(),
        }
    }
}

impl PortProbe for NetstatProbe {
    fn is_listening(&self, port: u16) -> Result<bool> {
        let output = exec(&self.invocation)?;
        Ok(table_has_listener(&output.stdout, port, &self.listen_state))
    }

    fn name(&self) -> &'static str {
        "netstat"
    }
}

/// Probe that tries to open a TCP connection to the loopback interface.
#[derive(Debug, Clone)]
pub struct SocketProbe {
    hosts: Vec<IpAddr>,
    timeout: Duration,
}

impl Default for SocketProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SocketProbe {
    /// Probe IPv4 and IPv6 loopback with a 500ms connect timeout.
    pub fn new() -> Self {
        Self {
            hosts: vec![
                IpAddr::V4(Ipv4Addr::LOCALHOST),
                IpAddr::V6(Ipv6Addr::LOCALHOST),
            ],
            timeout: Duration::from_millis(500),
        }
    }

    /// Set the per-host connect timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl PortProbe for SocketProbe {
    fn is_listening(&self, port: u16) -> Result<bool> {
        let mut last_error = None;

        for host in &self.hosts {
            let addr = SocketAddr::new(*host, port);
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(_) => return Ok(true),
                Err(e)
                    if matches!(
                        e.kind(),
                        ErrorKind::ConnectionRefused | ErrorKind::TimedOut
                    ) => {}
                // Hosts without IPv6 report "address not available" and similar.
                Err(e) => last_error = Some(e),
            }
        }

        match last_error {
            Some(e) if self.hosts.len() == 1 => Err(e.into()),
            _ => Ok(false),
        }
    }

    fn name(&self) -> &'static str {
        "socket"
    }
}
