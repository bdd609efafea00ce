//! Request handlers.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::parser::HttpRequest;
use crate::router::{PathParams, Router};
use crate::server::{Error, HttpResponse};

/// Type alias for a boxed future that returns a Result<HttpResponse, Error>.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>;

/// A shareable handler: called with the request and the path parameters
/// captured while matching it.
pub type HandlerFn = Arc<dyn Fn(HttpRequest, PathParams) -> HandlerFuture + Send + Sync>;

/// A router whose routes resolve to [`HandlerFn`]s.
pub type Routes = Router<HandlerFn>;

/// Box an async function into a [`HandlerFn`].
///
/// ```
/// use microroute::{handler, HttpResponse, Routes, StatusCode};
///
/// let mut routes = Routes::new();
/// routes
///     .get("/users/:id", handler(|_req, params| async move {
///         let id = params.get("id").unwrap_or_default().to_string();
///         Ok(HttpResponse::new(StatusCode::Ok).with_body_string(id))
///     }))
///     .unwrap();
/// ```
pub fn handler<F, Fut>(f: F) -> HandlerFn
where
    F: Fn(HttpRequest, PathParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
{
    Arc::new(move |req: HttpRequest, params: PathParams| -> HandlerFuture { Box::pin(f(req, params)) })
}
