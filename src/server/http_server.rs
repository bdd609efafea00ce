//! HTTP server implementation.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::signal;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

use crate::parser::{parse_request, HttpRequest, Method};
use crate::router::Match;
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::handler::Routes;
use crate::server::response::{HttpResponse, StatusCode};

/// An HTTP server dispatching requests through a [`Routes`] table.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    router: Arc<Routes>,
}

/// The redirect status for a request method.
///
/// GET and HEAD get a permanent redirect; every other method gets a temporary
/// one so clients repeat the same method and body at the new location.
pub fn redirect_status(method: Method) -> StatusCode {
    if method.is_retrievable() {
        StatusCode::MovedPermanently
    } else {
        StatusCode::TemporaryRedirect
    }
}

impl HttpServer {
    /// Create a new HTTP server serving `router`.
    pub fn new(config: ServerConfig, router: Routes) -> Self {
        Self {
            config,
            router: Arc::new(router),
        }
    }

    /// The routes being served.
    ///
    /// Routes can still be added through [`Routes::add_route`] while serving if
    /// the router was built with `concurrent_add` enabled.
    pub fn router(&self) -> &Arc<Routes> {
        &self.router
    }

    /// Produce the response for one request.
    ///
    /// Exactly one of three things happens: the matched handler runs, a
    /// redirect is returned, or a 404 is returned. A handler error becomes a
    /// 500 response.
    pub async fn dispatch(router: &Routes, request: HttpRequest) -> HttpResponse {
        match router.lookup(request.method, &request.path) {
            Match::Found { handler, params } => match handler(request, params).await {
                Ok(response) => response,
                Err(e) => {
                    error!("Handler failed: {e}");
                    HttpResponse::new(StatusCode::InternalServerError)
                        .with_content_type("text/plain")
                        .with_body_string(format!("Internal server error: {e}"))
                }
            },
            Match::Redirect(path) => {
                let location = match &request.query {
                    Some(query) => format!("{path}?{query}"),
                    None => path,
                };
                debug!("Redirecting {method} {from} to {location}", method = request.method, from = request.path);
                HttpResponse::redirect(redirect_status(request.method), location)
            }
            Match::NotFound => HttpResponse::not_found(&request.path),
        }
    }

    /// Log the registered routes.
    fn display_server_info(&self) {
        info!("Registered routes:\n{}", self.router.dump_routes());
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Server listening on http://{addr}", addr = self.config.addr);
        Ok(listener)
    }

    /// Set up a Ctrl+C handler for graceful shutdown.
    fn setup_ctrl_c_handler(shutdown_tx: mpsc::Sender<()>, tasks: &mut JoinSet<()>) {
        tasks.spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, initiating graceful shutdown");
                    let _ = shutdown_tx.send(()).await;
                }
                Err(e) => {
                    error!("Error setting up Ctrl+C handler: {e}");
                }
            }
        });
    }

    /// Handle a new connection, or turn it away when at capacity.
    async fn handle_new_connection(
        &self,
        mut socket: TcpStream,
        addr: SocketAddr,
        semaphore: &Arc<Semaphore>,
        tasks: &mut JoinSet<()>,
    ) {
        let permit = match Arc::clone(semaphore).try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Connection limit reached, rejecting connection from {addr}");
                let response = HttpResponse::new(StatusCode::ServiceUnavailable)
                    .with_content_type("text/plain")
                    .with_body_string("Server is at capacity, please try again later");
                let _ = socket.write_all(&response.to_bytes()).await;
                return;
            }
        };

        let router = Arc::clone(&self.router);
        let read_buffer_size = self.config.read_buffer_size;
        tasks.spawn(async move {
            // Released when the connection is done.
            let _permit = permit;

            if let Err(e) = Self::handle_connection(&mut socket, &router, read_buffer_size).await {
                error!("Error handling connection from {addr}: {e}");
            }
        });
    }

    /// Handle errors from `accept`. Returns true if the loop should stop.
    async fn handle_accept_error(e: std::io::Error) -> bool {
        error!("Error accepting connection: {e}");

        if e.kind() == std::io::ErrorKind::BrokenPipe {
            error!("Critical error accepting connection, shutting down");
            return true;
        }

        tokio::time::sleep(Duration::from_millis(100)).await;
        false
    }

    /// Wait for open connections to finish, up to the configured timeout.
    async fn perform_shutdown(tasks: &mut JoinSet<()>, timeout: Duration) {
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let drained = tokio::time::timeout(timeout, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("Task failed during shutdown: {e}");
                }
            }
        })
        .await;

        if drained.is_err() {
            warn!("Shutdown timed out, aborting {len} connections", len = tasks.len());
            tasks.abort_all();
        }
        info!("Server shutdown complete");
    }

    /// Start the server and serve until Ctrl+C.
    pub async fn start(&self) -> Result<(), Error> {
        self.display_server_info();

        let listener = self.setup_listener().await?;
        let semaphore = Arc::new(Semaphore::new(self.config.max_connections));
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let mut tasks = JoinSet::new();

        Self::setup_ctrl_c_handler(shutdown_tx, &mut tasks);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Shutting down server...");
                    break;
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            self.handle_new_connection(socket, addr, &semaphore, &mut tasks).await;
                        }
                        Err(e) => {
                            if Self::handle_accept_error(e).await {
                                break;
                            }
                        }
                    }
                }
            }
        }

        Self::perform_shutdown(&mut tasks, self.config.shutdown_timeout).await;

        Ok(())
    }

    /// Serve a single request read from `socket`.
    ///
    /// Every response closes the connection. Unparseable requests get a 400 and
    /// are reported as [`Error::ParseError`].
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        router: &Routes,
        read_buffer_size: usize,
    ) -> Result<(), Error> {
        let mut buf = vec![0; read_buffer_size];

        let n = socket.read(&mut buf).await?;
        if n == 0 {
            return Ok(()); // Connection closed
        }

        let request = match parse_request(&buf[..n]) {
            Ok(req) => req,
            Err(e) => {
                let response = HttpResponse::new(StatusCode::BadRequest)
                    .with_content_type("text/plain")
                    .with_header("Connection", "close")
                    .with_body_string(format!("Error parsing request: {e}"));
                socket.write_all(&response.to_bytes()).await?;
                return Err(Error::ParseError(e));
            }
        };

        let method = request.method;
        let target = request.target();
        let response = Self::dispatch(router, request)
            .await
            .with_header("Connection", "close");
        debug!("{method} {target} -> {status}", status = response.status.as_u16());

        socket.write_all(&response.to_bytes()).await?;
        socket.flush().await?;
        Ok(())
    }
}
