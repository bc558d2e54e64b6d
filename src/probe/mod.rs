//! Local server readiness detection.
//!
//! - [`port`] - probes that check whether a TCP port has a listener
//! - [`poll`] - the wait loop that races a probe against process exit

pub mod poll;
pub mod port;

pub use poll::{wait_until_ready, ExitWatch, PollPolicy, Readiness};
pub use port::{table_has_listener, NetstatProbe, PortProbe, SocketProbe};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which probe to use for preview readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    /// Connect to the port on loopback.
    #[default]
    Socket,
    /// Parse `netstat` output.
    Netstat,
}

impl ProbeKind {
    /// Build the probe.
    pub fn build(self) -> Box<dyn PortProbe> {
        match self {
            Self::Socket => Box::new(SocketProbe::new()),
            Self::Netstat => Box::new(NetstatProbe::new()),
        }
    }
}

impl FromStr for ProbeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "socket" => Ok(Self::Socket),
            "netstat" => Ok(Self::Netstat),
            _ => Err(format!("unknown probe: {} (expected socket or netstat)", s)),
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Socket => write!(f, "socket"),
            Self::Netstat => write!(f, "netstat"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_kind_parses_case_insensitively() {
        assert_eq!("Socket".parse::<ProbeKind>(), Ok(ProbeKind::Socket));
        assert_eq!("NETSTAT".parse::<ProbeKind>(), Ok(ProbeKind::Netstat));
        assert!("ping".parse::<ProbeKind>().is_err());
    }

    #[test]
    fn probe_kind_builds_matching_probe() {
        assert_eq!(ProbeKind::Socket.build().name(), "socket");
        assert_eq!(ProbeKind::Netstat.build().name(), "netstat");
    }

    #[test]
    fn default_probe_is_socket() {
        assert_eq!(ProbeKind::default(), ProbeKind::Socket);
        assert_eq!(ProbeKind::default().to_string(), "socket");
    }
}
