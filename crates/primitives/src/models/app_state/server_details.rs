use eyre::{eyre, Report};
use std::env;
use std::net::{IpAddr, SocketAddr};

/// Address the HTTP listener binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerInfo {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerInfo {
    pub fn new() -> Result<Self, Report> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = env::var("PORT").unwrap_or_else(|_| "8080".into());

        Ok(Self {
            host: host
                .trim()
                .parse()
                .map_err(|e| eyre!("HOST must be an IP address, got {:?}: {}", host, e))?,
            port: port
                .trim()
                .parse()
                .map_err(|e| eyre!("PORT must be a number between 0 and 65535, got {:?}: {}", port, e))?,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
