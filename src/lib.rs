//! A small first-match HTTP router built on hyper.
//!
//! ```no_run
//! use signpost::{hyper::Server, param, Body, HttpRouter, Request, Response, ResponseBuilder, Router};
//!
//! async fn hello(req: Request) -> Response {
//! 	let body = format!("hello, {}", param(&req, "name"));
//! 	Ok(ResponseBuilder::default().body(Body::from(body))?)
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! 	let addr = ([127, 0, 0, 1], 3000).into();
//! 	let mut router = Router::default();
//! 	router
//! 		.get("/", hello)
//! 		.get("/hello/:name", hello)
//! 		.handle("*", "/static/", hello);
//!
//! 	let server = Server::bind(&addr).serve(HttpRouter::from(router));
//! 	println!("Listening on http://{}", addr);
//!
//! 	server.await?;
//! 	Ok(())
//! }
//! ```
//!
//! Routes are tried in the order they were registered and the first match wins; there is no
//! specificity ranking. Pattern segments starting with `:` capture the request segment, which
//! handlers read back with [`param`]. A pattern ending in `/` or `...` also matches longer paths,
//! and a segment ending in `...` matches any request segment that starts with it.
//!
//! Middleware wraps handlers in the order it is listed. Router-wide middleware always runs
//! outside route-specific middleware. Unmatched requests go to [`Router::not_found`].

mod http;
pub use http::*;

mod params;
pub use params::*;

/// Handler and middleware types, and route matching.
pub mod route;

/// Contains the core structs of the router.
///
/// Register routes on a Router, then wrap it in an HttpRouter and pass that to hyper as the service.
pub mod router;

pub use route::*;
pub use router::*;
