use crate::route::Request;

/// Path parameters captured by a single route match, in pattern order.
///
/// The router attaches these to the request's extensions before invoking the matched handler
/// chain, so they live exactly as long as the request does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
	/// Records `value` under `name`, replacing any earlier capture with the same name.
	pub fn insert(&mut self, name: &str, value: &str) {
		match self.0.iter_mut().find(|(key, _)| key == name) {
			Some((_, existing)) => *existing = value.to_owned(),
			None => self.0.push((name.to_owned(), value.to_owned())),
		}
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.0
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
	}
}

/// Looks up a path parameter captured for `req`. Returns `""` if there is none by that name.
pub fn param<'a>(req: &'a Request, name: &str) -> &'a str {
	req.extensions()
		.get::<Params>()
		.and_then(|params| params.get(name))
		.unwrap_or_default()
}
