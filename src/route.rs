use crate::params::Params;
use anyhow::Result;
pub use hyper::{Body, Method, StatusCode};
use std::{
	fmt::{self, Debug, Formatter},
	future::Future,
	pin::Pin,
	sync::Arc,
};

pub type Request = hyper::Request<Body>;
pub type Response = Result<hyper::Response<Body>>;
pub type ResponseFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// Method string that matches every request method.
pub const ANY_METHOD: &str = "*";

/// Marks a pattern segment as a prefix-terminal literal.
pub const PREFIX_MARKER: &str = "...";

/// Something that can turn a request into a response.
///
/// Implemented for every `Fn(Request) -> impl Future<Output = Response>`, so plain `async fn`s
/// can be registered directly.
pub trait Handler: Send + Sync + 'static {
	fn call(&self, req: Request) -> ResponseFuture;
}

impl<F, Fut> Handler for F
where
	F: Fn(Request) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Response> + Send + 'static,
{
	fn call(&self, req: Request) -> ResponseFuture {
		Box::pin(self(req))
	}
}

pub type BoxedHandler = Arc<dyn Handler>;

/// Wraps a handler with behavior that runs before and/or after it.
pub trait Middleware: Send + Sync + 'static {
	fn wrap(&self, next: BoxedHandler) -> BoxedHandler;
}

impl<F> Middleware for F
where
	F: Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static,
{
	fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
		self(next)
	}
}

pub type BoxedMiddleware = Arc<dyn Middleware>;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum PathSegment {
	/// Must equal the request segment exactly.
	Static(String),
	/// Captures the request segment under the given name.
	Dynamic(String),
	/// Matches any request segment starting with the stem and accepts the rest of the path.
	Prefix(String),
}

impl PathSegment {
	fn parse(raw: &str) -> Self {
		if let Some(name) = raw.strip_prefix(':') {
			PathSegment::Dynamic(name.to_owned())
		} else if let Some(stem) = raw.strip_suffix(PREFIX_MARKER) {
			PathSegment::Prefix(stem.to_owned())
		} else {
			PathSegment::Static(raw.to_owned())
		}
	}
}

/// Splits a pattern or request path into segments. `""` and `"/"` both yield one empty segment.
pub(crate) fn split(path: &str) -> Vec<&str> {
	path.trim_matches('/').split('/').collect()
}

/// A compiled registration: method, pattern segments and the fully wrapped handler.
pub struct Route {
	method: String,
	pattern: String,
	segments: Vec<PathSegment>,
	prefix: bool,
	handler: BoxedHandler,
}

impl Route {
	pub fn new(method: &str, pattern: &str, handler: BoxedHandler) -> Self {
		Self {
			method: method.to_ascii_uppercase(),
			pattern: pattern.to_owned(),
			segments: split(pattern).into_iter().map(PathSegment::parse).collect(),
			prefix: pattern.ends_with('/') || pattern.ends_with(PREFIX_MARKER),
			handler,
		}
	}

	pub fn method(&self) -> &str {
		&self.method
	}

	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	pub fn segments(&self) -> &[PathSegment] {
		&self.segments
	}

	pub fn is_prefix(&self) -> bool {
		self.prefix
	}

	pub fn accepts(&self, method: &str) -> bool {
		self.method == ANY_METHOD || self.method.eq_ignore_ascii_case(method)
	}

	/// Matches `path` against this route's segments, returning the captured parameters.
	///
	/// A prefix-terminal segment that fails its prefix test fails the whole match: any request
	/// segment equal to the full literal would already have passed the prefix test.
	pub fn matches(&self, path: &str) -> Option<Params> {
		let segments = split(path);
		if segments.len() > self.segments.len() && !self.prefix {
			return None;
		}

		let mut params = Params::default();
		for (i, pattern) in self.segments.iter().enumerate() {
			let segment = *segments.get(i)?;
			match pattern {
				PathSegment::Dynamic(name) => params.insert(name, segment),
				PathSegment::Prefix(stem) => return segment.starts_with(stem.as_str()).then(|| params),
				PathSegment::Static(literal) => {
					if literal != segment {
						return None;
					}
				}
			}
		}

		Some(params)
	}

	pub fn call(&self, req: Request) -> ResponseFuture {
		self.handler.call(req)
	}
}

impl Debug for Route {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Route")
			.field("method", &self.method)
			.field("pattern", &self.pattern)
			.field("segments", &self.segments)
			.field("prefix", &self.prefix)
			.finish()
	}
}

#[cfg(test)]
mod test {
	use super::{split, BoxedHandler, PathSegment, Request, Response, Route};
	use hyper::Body;
	use std::sync::Arc;

	async fn ok(_req: Request) -> Response {
		Ok(hyper::Response::new(Body::empty()))
	}

	fn route(method: &str, pattern: &str) -> Route {
		let handler: BoxedHandler = Arc::new(ok);
		Route::new(method, pattern, handler)
	}

	#[test]
	fn splits_like_patterns() {
		assert_eq!(split(""), vec![""]);
		assert_eq!(split("/"), vec![""]);
		assert_eq!(split("/a/b/"), vec!["a", "b"]);
		assert_eq!(split("a//b"), vec!["a", "", "b"]);
	}

	#[test]
	fn compiles_segments() {
		let files = route("get", "/files/:id/thumb...");
		assert_eq!(files.method(), "GET");
		assert!(files.is_prefix());
		assert_eq!(
			files.segments(),
			&[
				PathSegment::Static("files".to_owned()),
				PathSegment::Dynamic("id".to_owned()),
				PathSegment::Prefix("thumb".to_owned()),
			]
		);

		assert!(route("GET", "/dir/").is_prefix());
		assert!(!route("GET", "/dir").is_prefix());
	}

	#[test]
	fn accepts_methods() {
		assert!(route("Get", "/").accepts("get"));
		assert!(route("GET", "/").accepts("GET"));
		assert!(!route("GET", "/").accepts("POST"));
		assert!(route("*", "/").accepts("PATCH"));
		assert!(route("*", "/").accepts("anything"));
	}

	#[test]
	fn captures_params() {
		let params = route("GET", "/users/:user/posts/:post")
			.matches("/users/ada/posts/42")
			.unwrap();
		assert_eq!(params.get("user"), Some("ada"));
		assert_eq!(params.get("post"), Some("42"));
		assert_eq!(params.get("missing"), None);
	}

	#[test]
	fn params_are_not_decoded() {
		let params = route("GET", "/q/:term").matches("/q/a%20b").unwrap();
		assert_eq!(params.get("term"), Some("a%20b"));
	}

	#[test]
	fn duplicate_names_keep_last() {
		let params = route("GET", "/:x/:x").matches("/one/two").unwrap();
		assert_eq!(params.get("x"), Some("two"));
		assert_eq!(params.len(), 1);
	}

	#[test]
	fn length_rules() {
		assert!(route("GET", "/a/b").matches("/a/b/c").is_none());
		assert!(route("GET", "/a/b/c").matches("/a/b").is_none());
		assert!(route("GET", "/a/b/").matches("/a/b/c/d").is_some());
		assert!(route("GET", "/a/b/").matches("/a/b").is_some());
		assert!(route("GET", "/a/b/").matches("/a").is_none());
	}

	#[test]
	fn prefix_segments() {
		let images = route("GET", "/images...");
		assert!(images.matches("/images").is_some());
		assert!(images.matches("/images/").is_some());
		assert!(images.matches("/images/one/two").is_some());
		assert!(images.matches("/imagesets").is_some());
		assert!(images.matches("/imag").is_none());

		let foo = route("GET", "/foo...");
		assert!(foo.matches("/fo").is_none());
	}

	#[test]
	fn prefix_segment_skips_remaining_pattern() {
		let assets = route("GET", "/static.../:ignored");
		assert!(!assets.is_prefix());
		let params = assets.matches("/static-v2/x").unwrap();
		assert!(params.is_empty());
		assert!(assets.matches("/static/x/y").is_none());
	}

	#[test]
	fn params_before_prefix_segment_are_kept() {
		let params = route("GET", "/:bucket/obj...").matches("/photos/object/a/b").unwrap();
		assert_eq!(params.get("bucket"), Some("photos"));
	}

	#[test]
	fn root_matches_root() {
		assert!(route("GET", "/").matches("/").is_some());
		assert!(route("GET", "").matches("/").is_some());
		assert!(route("GET", "/").matches("/a").is_none());
	}
}
