//! Credentials returned by the authorization endpoint.

// crates.io
use serde_json::{Map, Value};
// self
use crate::_prelude::*;

/// Signed access credentials for one channel join.
///
/// `accessToken` and `tokenType` are required; any other fields the endpoint returns
/// (for example `auth` or `channel_data` on Pusher-style backends) are kept in
/// [`extra`](Credentials::extra) so the transport receives the full body.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
	/// Access token issued for the channel.
	pub access_token: String,
	/// Token type label (typically `Bearer`).
	pub token_type: String,
	/// Additional fields returned by the endpoint.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl Credentials {
	/// Creates credentials without extra fields.
	pub fn new(access_token: impl Into<String>, token_type: impl Into<String>) -> Self {
		Self { access_token: access_token.into(), token_type: token_type.into(), extra: Map::new() }
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("access_token", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("extra", &self.extra.keys().collect::<Vec<_>>())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn keeps_unknown_fields() {
		let credentials: Credentials = serde_json::from_str(
			r#"{"accessToken":"abc","tokenType":"Bearer","channel_data":"{\"user_id\":1}"}"#,
		)
		.expect("Credentials fixture should decode.");

		assert_eq!(credentials.access_token, "abc");
		assert_eq!(credentials.token_type, "Bearer");
		assert_eq!(
			credentials.extra.get("channel_data").and_then(Value::as_str),
			Some("{\"user_id\":1}")
		);
	}

	#[test]
	fn debug_redacts_access_token() {
		let rendered = format!("{:?}", Credentials::new("abc", "Bearer"));

		assert!(!rendered.contains("abc"));
		assert!(rendered.contains("<redacted>"));
	}
}
