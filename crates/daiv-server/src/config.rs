//! Server configuration.
//!
//! Process settings are loaded once at startup. The webhook URL and
//! credentials are not part of [`ServerConfig`]: the relay reads
//! them through a [`ConfigSource`] on every request.

use std::net::SocketAddr;

use daiv_core::relay::{ConfigSource, EnvSource, Validation};

/// Default listener when neither `DAIV_BIND_ADDR` nor `PORT` is set.
pub const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
    3000,
);

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log filter used when `RUST_LOG` is unset (e.g. `info`, `debug`).
    pub log_level: String,
    /// Whether submissions are validated before forwarding.
    pub validation: Validation,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// - `DAIV_BIND_ADDR`: full bind address (overrides `PORT`, default: `127.0.0.1:3000`)
    /// - `PORT`: port to bind on, binds to `0.0.0.0` (hosting platform convention)
    /// - `DAIV_LOG_LEVEL`: log filter (default: `info`)
    /// - `DAIV_STRICT_LEADS`: `true`/`1` to validate submissions (default: off)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_source(&EnvSource)
    }

    /// Load configuration from an arbitrary source.
    pub fn from_source(source: &dyn ConfigSource) -> Self {
        // Priority: DAIV_BIND_ADDR > PORT > default
        let bind_addr = if let Some(addr) = source.get("DAIV_BIND_ADDR") {
            addr.parse().unwrap_or(DEFAULT_BIND_ADDR)
        } else if let Some(port) = source.get("PORT") {
            let port: u16 = port.parse().unwrap_or(DEFAULT_BIND_ADDR.port());
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            DEFAULT_BIND_ADDR
        };

        let log_level = source
            .get("DAIV_LOG_LEVEL")
            .unwrap_or_else(|| "info".to_owned());

        let strict = source
            .get("DAIV_STRICT_LEADS")
            .is_some_and(|v| v == "true" || v == "1");

        Self {
            bind_addr,
            log_level,
            validation: if strict {
                Validation::Strict
            } else {
                Validation::Permissive
            },
        }
    }
}
