//! Connection targets
//!
//! An [`Endpoint`] is the (host, port) pair handed to the sender and the
//! listener. Nothing in the crate reads ports from globals, so tests can run
//! both roles against ephemeral ports.

use std::fmt;
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs};

/// Port the listener binds by default
pub const DEFAULT_LISTEN_PORT: u16 = 9999;

/// Port the sender forwards to by default (typically a tunnel to a listener)
pub const DEFAULT_FORWARD_PORT: u16 = 9997;

/// Host the listener binds by default (all interfaces)
pub const DEFAULT_LISTEN_HOST: &str = "0.0.0.0";

/// Host the sender connects to by default
pub const DEFAULT_FORWARD_HOST: &str = "localhost";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Default address for `clip-server`
    pub fn listen_default() -> Self {
        Self::new(DEFAULT_LISTEN_HOST, DEFAULT_LISTEN_PORT)
    }

    /// Default target for `clip-copy`
    pub fn forward_default() -> Self {
        Self::new(DEFAULT_FORWARD_HOST, DEFAULT_FORWARD_PORT)
    }

    /// Resolve to every socket address the host maps to
    pub fn socket_addrs(&self) -> io::Result<Vec<SocketAddr>> {
        let addrs: Vec<SocketAddr> = (self.host.as_str(), self.port).to_socket_addrs()?.collect();
        if addrs.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} did not resolve to any address", self),
            ));
        }
        Ok(addrs)
    }

    /// Addresses to dial when checking whether something already listens here
    ///
    /// Unspecified bind addresses are not dialable everywhere, so they are
    /// probed through the matching loopback address.
    pub fn probe_addrs(&self) -> io::Result<Vec<SocketAddr>> {
        Ok(self
            .socket_addrs()?
            .into_iter()
            .map(|addr| match addr.ip() {
                IpAddr::V4(ip) if ip.is_unspecified() => {
                    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), addr.port())
                }
                IpAddr::V6(ip) if ip.is_unspecified() => {
                    SocketAddr::new(IpAddr::V6(Ipv6Addr::LOCALHOST), addr.port())
                }
                _ => addr,
            })
            .collect())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
