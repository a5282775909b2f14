use crate::{Request, Router};
use anyhow::Error;
use hyper::{body::Body, service::Service, StatusCode};
use std::{
	convert::Infallible,
	future::{ready, Future, Ready},
	pin::Pin,
	sync::Arc,
	task::{Context, Poll},
};
use tracing::error;

pub use hyper;

pub use hyper::http::response::Builder as ResponseBuilder;

fn default_error_handler(e: Error) -> hyper::Response<Body> {
	let mut res = hyper::Response::new(Body::from(e.to_string()));
	*res.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
	res
}

/// A function that can convert an error into a response.
pub type ErrorHandler = fn(e: Error) -> hyper::Response<Body>;

/// Serves a finished [`Router`] through hyper.
///
/// Pass it to `hyper::Server::serve`; every connection shares the same router.
pub struct HttpRouter {
	router: Arc<Router>,
	internal_error: ErrorHandler,
}

impl HttpRouter {
	/// Replaces the handler that turns handler errors into responses.
	pub fn error_handler(mut self, handler: ErrorHandler) -> Self {
		self.internal_error = handler;
		self
	}

	pub fn router(&self) -> &Router {
		&self.router
	}
}

impl From<Router> for HttpRouter {
	fn from(inner: Router) -> Self {
		Self {
			router: Arc::new(inner),
			internal_error: default_error_handler,
		}
	}
}

impl<T> Service<T> for HttpRouter {
	type Response = RouteHandler;
	type Error = Infallible;
	type Future = Ready<Result<Self::Response, Self::Error>>;

	fn poll_ready(&mut self, _: &mut Context) -> Poll<Result<(), Self::Error>> {
		Poll::Ready(Ok(()))
	}

	fn call(&mut self, _: T) -> Self::Future {
		ready(Ok(RouteHandler {
			router: Arc::clone(&self.router),
			internal_error: self.internal_error,
		}))
	}
}

/// Responsible for handling the actual HTTP requests from hyper.
pub struct RouteHandler {
	router: Arc<Router>,
	internal_error: ErrorHandler,
}

impl Service<Request> for RouteHandler {
	type Response = hyper::Response<Body>;
	type Error = Infallible;
	type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

	fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		Poll::Ready(Ok(()))
	}

	fn call(&mut self, req: Request) -> Self::Future {
		let method = req.method().clone();
		let path = req.uri().path().to_owned();
		let fut = self.router.dispatch(req);
		let err = self.internal_error;

		Box::pin(async move {
			Ok(fut.await.unwrap_or_else(|e| {
				error!(%method, %path, error = %e, "handler failed");
				err(e)
			}))
		})
	}
}
