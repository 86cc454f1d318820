//! Bearer token wrapper that redacts sensitive material.

// self
use crate::_prelude::*;

/// Redacted bearer token presented to the authorization endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);
impl BearerToken {
	/// Wraps a new token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Renders the `Authorization` header value for this token.
	pub fn authorization_header(&self) -> String {
		format!("Bearer {}", self.0)
	}
}
impl AsRef<str> for BearerToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for BearerToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("BearerToken").field(&"<redacted>").finish()
	}
}
impl Display for BearerToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn token_formatters_redact() {
		let token = BearerToken::new("super-secret");

		assert_eq!(format!("{token:?}"), "BearerToken(\"<redacted>\")");
		assert_eq!(format!("{token}"), "<redacted>");
	}

	#[test]
	fn authorization_header_uses_bearer_scheme() {
		assert_eq!(BearerToken::new("abc").authorization_header(), "Bearer abc");
	}
}
