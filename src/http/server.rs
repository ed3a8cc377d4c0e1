//! HTTP server startup logic.

use std::io;
use std::net::{Ipv4Addr, SocketAddr, TcpListener};
use std::time::Duration;

use axum::Router;
use axum_server::Handle;

use crate::config::{AppConfig, ConfigError};

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid bind address: {0}")]
    Address(#[from] ConfigError),

    #[error("Server error: {0}")]
    Server(#[from] io::Error),
}

/// Bind the listening socket.
///
/// The IPv6 wildcard accepts IPv4 clients as well on dual-stack hosts. When the
/// host has no IPv6 support the IPv4 wildcard on the same port is used instead.
pub fn bind_listener(addr: SocketAddr) -> io::Result<TcpListener> {
    let listener = match TcpListener::bind(addr) {
        Ok(listener) => listener,
        Err(e) if addr.is_ipv6() && addr.ip().is_unspecified() => {
            let fallback = SocketAddr::from((Ipv4Addr::UNSPECIFIED, addr.port()));
            tracing::warn!(error = %e, %fallback, "IPv6 unavailable, binding IPv4 only");
            TcpListener::bind(fallback)?
        }
        Err(e) => return Err(e),
    };
    listener.set_nonblocking(true)?;
    Ok(listener)
}

/// Start the HTTP server based on configuration.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let listener = bind_listener(config.resolve_bind_addr()?)?;
    let grace = Duration::from_secs(config.http.shutdown_grace_seconds);

    tracing::info!(
        addr = %listener.local_addr()?,
        result_file = %config.result.path,
        on_read_error = ?config.result.on_read_error,
        "Listening on {:?}",
        config.http.bind_addr
    );

    let handle = Handle::new();
    shutdown::setup_shutdown_handler(handle.clone(), grace);

    axum_server::from_tcp(listener)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_wildcard_any_port() {
        let addr: SocketAddr = "[::]:0".parse().unwrap();
        let listener = bind_listener(addr).unwrap();
        let local = listener.local_addr().unwrap();
        assert!(local.ip().is_unspecified());
        assert_ne!(local.port(), 0);
    }

    #[test]
    fn test_bind_loopback_keeps_family() {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let listener = bind_listener(addr).unwrap();
        assert!(listener.local_addr().unwrap().is_ipv4());
    }

    #[test]
    fn test_bind_conflict_is_error() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = taken.local_addr().unwrap();
        assert!(bind_listener(addr).is_err());
    }
}
