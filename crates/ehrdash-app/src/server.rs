// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dashboard HTTP/1.1 server.
//
// Listens on raw TCP and parses just enough HTTP to route a request: the
// request line, headers and a `Content-Length` body. Every response closes
// the connection. Each connection runs in its own task; `stop` signals the
// accept loop and awaits it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use ehrdash_core::config::AppConfig;
use ehrdash_core::error::{EhrDashError, Result};

use crate::http::{
    HttpRequest, HttpResponse, MAX_BODY_BYTES, MAX_HEAD_BYTES, find_subsequence, parse_request_head,
};
use crate::router;
use crate::services::app_services::AppServices;

/// Lifecycle of the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerStatus {
    Stopped,
    Starting,
    Running,
}

pub struct DashboardServer {
    /// `host:port` to bind.
    bind: String,
    status: ServerStatus,
    shutdown_signal: Arc<Notify>,
    task_handle: Option<JoinHandle<()>>,
    active_connections: Arc<AtomicU32>,
    /// Address actually bound, once running.
    local_addr: Option<SocketAddr>,
}

/// What came off the wire.
enum ReadOutcome {
    Request(HttpRequest),
    /// Reply with this status and close.
    Reject(u16),
    /// Peer closed before sending anything.
    Closed,
}

impl DashboardServer {
    /// A stopped server for `config.bind_address:config.port`.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            bind: format!("{}:{}", config.bind_address, config.port),
            status: ServerStatus::Stopped,
            shutdown_signal: Arc::new(Notify::new()),
            task_handle: None,
            active_connections: Arc::new(AtomicU32::new(0)),
            local_addr: None,
        }
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    pub fn status(&self) -> ServerStatus {
        self.status
    }

    pub fn active_connections(&self) -> u32 {
        self.active_connections.load(Ordering::Relaxed)
    }

    /// Bind and spawn the accept loop.
    ///
    /// # Errors
    ///
    /// Returns [`EhrDashError::Server`] when the address cannot be bound.
    pub async fn start(&mut self, services: AppServices) -> Result<()> {
        if self.status == ServerStatus::Running {
            debug!(bind = %self.bind, "dashboard server already running");
            return Ok(());
        }
        self.status = ServerStatus::Starting;

        let listener = match TcpListener::bind(&self.bind).await {
            Ok(l) => l,
            Err(e) => {
                self.status = ServerStatus::Stopped;
                return Err(EhrDashError::Server(format!("bind {}: {e}", self.bind)));
            }
        };
        let addr = listener
            .local_addr()
            .map_err(|e| EhrDashError::Server(format!("local address: {e}")))?;
        info!(addr = %addr, "dashboard listening");

        let shutdown = Arc::clone(&self.shutdown_signal);
        let connections = Arc::clone(&self.active_connections);
        let services = Arc::new(services);
        let handle = tokio::spawn(async move {
            Self::accept_loop(listener, shutdown, connections, services).await;
        });

        self.local_addr = Some(addr);
        self.task_handle = Some(handle);
        self.status = ServerStatus::Running;
        Ok(())
    }

    /// Stop accepting connections. In-flight connections finish on their own.
    pub async fn stop(&mut self) -> Result<()> {
        if self.status != ServerStatus::Running {
            return Ok(());
        }
        info!(bind = %self.bind, "stopping dashboard server");
        self.shutdown_signal.notify_one();

        if let Some(handle) = self.task_handle.take() {
            handle
                .await
                .map_err(|e| EhrDashError::Server(format!("task join: {e}")))?;
        }

        self.status = ServerStatus::Stopped;
        self.local_addr = None;
        info!(bind = %self.bind, "dashboard server stopped");
        Ok(())
    }

    async fn accept_loop(
        listener: TcpListener,
        shutdown: Arc<Notify>,
        connections: Arc<AtomicU32>,
        services: Arc<AppServices>,
    ) {
        loop {
            tokio::select! {
                _ = shutdown.notified() => {
                    debug!("accept loop received shutdown signal");
                    break;
                }

                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            debug!(peer = %peer, "incoming connection");
                            let services = Arc::clone(&services);
                            let connections = Arc::clone(&connections);
                            tokio::spawn(async move {
                                connections.fetch_add(1, Ordering::Relaxed);
                                if let Err(e) = Self::handle_connection(stream, peer, &services).await {
                                    warn!(peer = %peer, error = %e, "connection handler error");
                                }
                                connections.fetch_sub(1, Ordering::Relaxed);
                            });
                        }
                        Err(e) => {
                            error!(error = %e, "failed to accept connection");
                        }
                    }
                }
            }
        }
    }

    async fn handle_connection(mut stream: TcpStream, peer: SocketAddr, services: &AppServices) -> Result<()> {
        let request = match read_request(&mut stream, peer).await? {
            ReadOutcome::Request(r) => r,
            ReadOutcome::Reject(status) => {
                return send_response(&mut stream, &HttpResponse::error(status)).await;
            }
            ReadOutcome::Closed => {
                debug!(peer = %peer, "empty request, closing connection");
                return Ok(());
            }
        };

        let response = router::dispatch(&request, services, peer).await;
        send_response(&mut stream, &response).await?;
        info!(
            peer = %peer,
            method = request.method(),
            path = request.path(),
            status = response.status,
            "request served"
        );
        Ok(())
    }
}

/// Read one request: the head up to the blank line, then `Content-Length`
/// bytes of body.
async fn read_request(stream: &mut TcpStream, peer: SocketAddr) -> Result<ReadOutcome> {
    let mut buf = Vec::with_capacity(4096);
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        if let Some(pos) = find_subsequence(&buf, b"\r\n\r\n") {
            break pos;
        }
        if buf.len() > MAX_HEAD_BYTES {
            warn!(peer = %peer, bytes = buf.len(), "request head too large");
            return Ok(ReadOutcome::Reject(431));
        }
        let n = stream
            .read(&mut chunk)
            .await
            .map_err(|e| EhrDashError::Server(format!("read from {peer}: {e}")))?;
        if n == 0 {
            return Ok(if buf.is_empty() {
                ReadOutcome::Closed
            } else {
                ReadOutcome::Reject(400)
            });
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = match parse_request_head(&buf[..head_end]) {
        Ok(h) => h,
        Err(e) => {
            warn!(peer = %peer, error = %e, "malformed request");
            return Ok(ReadOutcome::Reject(400));
        }
    };
    let length = match head.content_length() {
        Ok(n) => n,
        Err(e) => {
            warn!(peer = %peer, error = %e, "malformed request");
            return Ok(ReadOutcome::Reject(400));
        }
    };
    if length > MAX_BODY_BYTES {
        warn!(peer = %peer, length, "request body too large");
        return Ok(ReadOutcome::Reject(413));
    }

    let mut body = buf.split_off(head_end + 4);
    while body.len() < length {
        let n = stream
            .read(&mut chunk)
            .await
            .map_err(|e| EhrDashError::Server(format!("read from {peer}: {e}")))?;
        if n == 0 {
            debug!(peer = %peer, expected = length, got = body.len(), "body truncated");
            return Ok(ReadOutcome::Reject(400));
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(length);

    Ok(ReadOutcome::Request(HttpRequest { head, body }))
}

async fn send_response(stream: &mut TcpStream, response: &HttpResponse) -> Result<()> {
    stream
        .write_all(&response.to_bytes())
        .await
        .map_err(|e| EhrDashError::Server(format!("write response: {e}")))?;
    stream
        .flush()
        .await
        .map_err(|e| EhrDashError::Server(format!("flush: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUIDES_CSV: &str = "account_name,account_sf_id,ehr_type\nMemorial Health,SF-1,Epic\n";

    struct Running {
        server: DashboardServer,
        addr: SocketAddr,
        _assets: tempfile::TempDir,
    }

    async fn start(enable_auth: bool) -> Running {
        let assets = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(assets.path().join("data")).unwrap();
        std::fs::write(assets.path().join("data").join("ehr_process_guides_data.csv"), GUIDES_CSV).unwrap();
        let config = AppConfig {
            port: 0,
            enable_auth,
            asset_dir: assets.path().to_path_buf(),
            ..AppConfig::default()
        };
        let mut server = DashboardServer::new(&config);
        server.start(AppServices::without_audit(config)).await.unwrap();
        let addr = server.local_addr().unwrap();
        Running {
            server,
            addr,
            _assets: assets,
        }
    }

    async fn exchange(addr: SocketAddr, raw: &[u8]) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(raw).await.unwrap();
        let mut out = Vec::new();
        stream.read_to_end(&mut out).await.unwrap();
        String::from_utf8_lossy(&out).into_owned()
    }

    fn post_password(password: &str) -> Vec<u8> {
        let body = format!("{{\"password\":\"{password}\"}}");
        format!(
            "POST /api/password HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        )
        .into_bytes()
    }

    #[test]
    fn initial_status_is_stopped() {
        let server = DashboardServer::new(&AppConfig::default());
        assert_eq!(server.status(), ServerStatus::Stopped);
        assert_eq!(server.active_connections(), 0);
        assert!(server.local_addr().is_none());
    }

    #[tokio::test]
    async fn correct_password_sets_cookie() {
        let mut running = start(false).await;
        let resp = exchange(running.addr, &post_password("ehrdashboard25")).await;
        assert!(resp.starts_with("HTTP/1.1 200 OK"));
        assert!(resp.contains("Set-Cookie: site_auth=true"));
        assert!(resp.ends_with("{\"ok\":true}"));
        running.server.stop().await.unwrap();
        assert_eq!(running.server.status(), ServerStatus::Stopped);
    }

    #[tokio::test]
    async fn wrong_password_gets_no_cookie() {
        let mut running = start(false).await;
        let resp = exchange(running.addr, &post_password("guess")).await;
        assert!(resp.starts_with("HTTP/1.1 401 Unauthorized"));
        assert!(!resp.contains("Set-Cookie"));
        assert!(resp.contains("Incorrect password."));
        running.server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn no_cookie_redirects_to_password() {
        let mut running = start(false).await;
        let resp = exchange(running.addr, b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
        assert!(resp.starts_with("HTTP/1.1 307 Temporary Redirect"));
        assert!(resp.contains("Location: /password\r\n"));
        running.server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn cookie_reaches_dashboard() {
        let mut running = start(false).await;
        let resp = exchange(running.addr, b"GET / HTTP/1.1\r\nCookie: theme=dark; site_auth=true\r\n\r\n").await;
        assert!(resp.starts_with("HTTP/1.1 200 OK"));
        assert!(resp.contains("Content-Type: text/html"));
        assert!(resp.contains("EHR Dashboard"));
        running.server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn serves_guides_asset_and_page() {
        let mut running = start(false).await;
        let csv = exchange(
            running.addr,
            b"GET /data/ehr_process_guides_data.csv HTTP/1.1\r\nCookie: site_auth=true\r\n\r\n",
        )
        .await;
        assert!(csv.starts_with("HTTP/1.1 200 OK"));
        assert!(csv.ends_with(GUIDES_CSV));

        let page = exchange(running.addr, b"GET /process-docs HTTP/1.1\r\nCookie: site_auth=true\r\n\r\n").await;
        assert!(page.contains("Memorial Health"));
        running.server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn pending_identity_redirects() {
        let mut running = start(true).await;
        let resp = exchange(
            running.addr,
            b"GET /credentials HTTP/1.1\r\nCookie: site_auth=true\r\nX-Auth-User: new@example.com\r\nX-Auth-Status: PENDING\r\n\r\n",
        )
        .await;
        assert!(resp.starts_with("HTTP/1.1 307"));
        assert!(resp.contains("Location: /auth/pending\r\n"));
        running.server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let mut running = start(false).await;
        let raw = format!(
            "POST /api/password HTTP/1.1\r\nContent-Length: {}\r\n\r\n",
            MAX_BODY_BYTES + 1
        );
        let resp = exchange(running.addr, raw.as_bytes()).await;
        assert!(resp.starts_with("HTTP/1.1 413"));
        running.server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn garbage_is_bad_request() {
        let mut running = start(false).await;
        let resp = exchange(running.addr, b"NOT HTTP\r\n\r\n").await;
        assert!(resp.starts_with("HTTP/1.1 400 Bad Request"));
        running.server.stop().await.unwrap();
    }
}
