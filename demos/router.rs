use signpost::{
	hyper::{Body, Server},
	param, BoxedHandler, BoxedMiddleware, Handler, HttpRouter, Request, Response, ResponseBuilder, Router,
};
use std::{sync::Arc, time::Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

async fn handler(req: Request) -> Response {
	let res = ResponseBuilder::default();
	let body = format!("item {} of {}", param(&req, "id"), param(&req, "list"));
	Ok(res.body(Body::from(body))?)
}

async fn other_handler(_req: Request) -> Response {
	let res = ResponseBuilder::default();
	Ok(res.body(Body::empty())?)
}

fn timing() -> BoxedMiddleware {
	Arc::new(|next: BoxedHandler| -> BoxedHandler {
		Arc::new(move |req: Request| {
			let next = Arc::clone(&next);
			async move {
				let method = req.method().clone();
				let path = req.uri().path().to_owned();
				let start = Instant::now();
				let res = next.call(req).await;
				info!(%method, %path, elapsed = ?start.elapsed(), "served");
				res
			}
		})
	})
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
		.init();

	let addr = ([127, 0, 0, 1], 3000).into();

	let mut router = Router::new(vec![timing()]);
	router
		.get("/", other_handler)
		.get("/lists/:list/items/:id", handler)
		.handle("*", "/assets...", other_handler);

	let server = Server::bind(&addr).serve(HttpRouter::from(router));
	info!("Listening on http://{}", addr);

	server.await?;
	Ok(())
}
