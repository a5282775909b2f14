use crate::{
	params::Params,
	route::{
		BoxedHandler, BoxedMiddleware, Handler, Middleware, Request, Response, ResponseFuture, Route, ANY_METHOD,
	},
};
use hyper::{
	header::CONTENT_TYPE,
	http::{response::Builder, Method, StatusCode},
	Body,
};
use std::{
	fmt::{self, Debug, Formatter},
	iter,
	sync::Arc,
};
use tracing::{debug, trace};

async fn default_not_found_handler(_req: Request) -> Response {
	Ok(Builder::default()
		.status(StatusCode::NOT_FOUND)
		.header(CONTENT_TYPE, "text/plain; charset=utf-8")
		.body(Body::from("404 page not found\n"))?)
}

/// Wraps `handler` in `middleware` so that the first middleware listed runs outermost.
pub fn compose(handler: BoxedHandler, middleware: &[BoxedMiddleware]) -> BoxedHandler {
	middleware.iter().rev().fold(handler, |next, mw| mw.wrap(next))
}

/// An ordered table of routes. The first registered route that matches a request handles it.
///
/// Registration takes `&mut self`; once the router is shared for serving it is read-only, so
/// replacing `not_found` after that point needs the owner's own synchronization.
pub struct Router {
	routes: Vec<Route>,
	middleware: Vec<BoxedMiddleware>,
	/// Invoked when no route matches. Defaults to a plain-text 404.
	pub not_found: BoxedHandler,
}

impl Default for Router {
	fn default() -> Self {
		Self::new(iter::empty())
	}
}

impl Router {
	/// Creates a router whose middleware wraps every route registered through it.
	pub fn new<I>(middleware: I) -> Self
	where
		I: IntoIterator<Item = BoxedMiddleware>,
	{
		Self {
			routes: Vec::new(),
			middleware: middleware.into_iter().collect(),
			not_found: Arc::new(default_not_found_handler),
		}
	}

	/// Appends router-wide middleware. Only routes registered afterwards are wrapped by it.
	pub fn with(&mut self, middleware: BoxedMiddleware) -> &mut Self {
		self.middleware.push(middleware);
		self
	}

	pub fn set_not_found<H: Handler>(&mut self, handler: H) -> &mut Self {
		self.not_found = Arc::new(handler);
		self
	}

	pub fn handle<H: Handler>(&mut self, method: &str, pattern: &str, handler: H) -> &mut Self {
		self.handle_with(method, pattern, handler, iter::empty())
	}

	/// Registers `handler` for `method` and `pattern`, wrapped first in its own `middleware`
	/// and then in the router's.
	///
	/// `method` is case-insensitive and `"*"` matches any method. In `pattern`, `:name` captures a
	/// segment, a trailing `/` or `...` makes the route match any longer path, and a segment
	/// ending in `...` matches request segments by prefix.
	pub fn handle_with<H, I>(&mut self, method: &str, pattern: &str, handler: H, middleware: I) -> &mut Self
	where
		H: Handler,
		I: IntoIterator<Item = BoxedMiddleware>,
	{
		let own: Vec<BoxedMiddleware> = middleware.into_iter().collect();
		let handler = compose(compose(Arc::new(handler), &own), &self.middleware);

		let route = Route::new(method, pattern, handler);
		debug!(
			method = route.method(),
			pattern = route.pattern(),
			prefix = route.is_prefix(),
			middleware = own.len() + self.middleware.len(),
			"registered route"
		);

		self.routes.push(route);
		self
	}

	pub fn get<H: Handler>(&mut self, pattern: &str, handler: H) -> &mut Self {
		self.handle(Method::GET.as_str(), pattern, handler)
	}

	pub fn post<H: Handler>(&mut self, pattern: &str, handler: H) -> &mut Self {
		self.handle(Method::POST.as_str(), pattern, handler)
	}

	pub fn put<H: Handler>(&mut self, pattern: &str, handler: H) -> &mut Self {
		self.handle(Method::PUT.as_str(), pattern, handler)
	}

	pub fn delete<H: Handler>(&mut self, pattern: &str, handler: H) -> &mut Self {
		self.handle(Method::DELETE.as_str(), pattern, handler)
	}

	pub fn any<H: Handler>(&mut self, pattern: &str, handler: H) -> &mut Self {
		self.handle(ANY_METHOD, pattern, handler)
	}

	pub fn routes(&self) -> &[Route] {
		&self.routes
	}

	/// Finds the first route accepting `method` whose pattern matches `path`.
	pub fn find(&self, method: &str, path: &str) -> Option<(&Route, Params)> {
		self.routes
			.iter()
			.filter(|route| route.accepts(method))
			.find_map(|route| route.matches(path).map(|params| (route, params)))
	}

	/// Routes `req` to exactly one handler: the first matching route, or `not_found`.
	pub fn dispatch(&self, mut req: Request) -> ResponseFuture {
		let found = self.find(req.method().as_str(), req.uri().path());
		match found {
			Some((route, params)) => {
				trace!(
					method = %req.method(),
					path = req.uri().path(),
					pattern = route.pattern(),
					params = params.len(),
					"matched route"
				);
				req.extensions_mut().insert(params);
				route.call(req)
			}
			None => {
				trace!(method = %req.method(), path = req.uri().path(), "no route matched");
				self.not_found.call(req)
			}
		}
	}
}

impl Debug for Router {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.routes)
			.field("middleware", &self.middleware.len())
			.finish()
	}
}
