//! Serves a handful of routes to show parameters, redirects and the route dump.
//!
//! Run with `RUST_LOG=debug cargo run --example router_server`, then try:
//!
//! ```text
//! curl -i http://127.0.0.1:8080/users/42
//! curl -i http://127.0.0.1:8080/users/42/      # 301 to /users/42
//! curl -i http://127.0.0.1:8080/docs           # 301 to /docs/
//! curl -i -X POST http://127.0.0.1:8080/users/ # 307 to /users
//! curl -i http://127.0.0.1:8080/routes
//! ```

use std::net::SocketAddr;

use microroute::{handler, HttpResponse, HttpServer, Routes, ServerConfig, StatusCode};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig {
        addr: "127.0.0.1:8080".parse::<SocketAddr>()?,
        ..ServerConfig::default()
    };

    let mut routes = Routes::new();

    routes.get("/", handler(|_req, _params| async {
        Ok(HttpResponse::new(StatusCode::Ok)
            .with_content_type("text/html")
            .with_body_string("<html><body><h1>Welcome to microroute!</h1></body></html>"))
    }))?;

    routes.get("/users/:id", handler(|_req, params| async move {
        let id = params.get("id").unwrap_or_default().to_string();
        Ok(HttpResponse::new(StatusCode::Ok)
            .with_content_type("text/plain")
            .with_body_string(format!("User {id}")))
    }))?;

    routes.get("/users/:id/posts/:post", handler(|_req, params| async move {
        let mut pairs: Vec<(String, String)> = params
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        pairs.sort();
        HttpResponse::new(StatusCode::Ok).with_json(&pairs)
    }))?;

    routes.post("/users", handler(|req, _params| async move {
        Ok(HttpResponse::new(StatusCode::Created)
            .with_content_type("text/plain")
            .with_body_string(format!("Created from {} bytes", req.body.len())))
    }))?;

    routes.get("/docs/", handler(|_req, _params| async {
        Ok(HttpResponse::new(StatusCode::Ok)
            .with_content_type("text/plain")
            .with_body_string("Documentation index"))
    }))?;

    // Shapes the tree without answering.
    routes.register(microroute::Method::GET, "/reserved", None)?;

    let listing = routes.routes();
    routes.get("/routes", handler(move |_req, _params| {
        let listing = listing.clone();
        async move { HttpResponse::new(StatusCode::Ok).with_json(&listing) }
    }))?;

    let server = HttpServer::new(config, routes);

    // Routes can still be added once the server owns the router.
    server.router().add_route(
        microroute::Method::DELETE,
        "/users/:id",
        Some(handler(|_req, _params| async { Ok(HttpResponse::new(StatusCode::NoContent)) })),
    )?;

    server.start().await?;

    Ok(())
}
