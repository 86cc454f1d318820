//! Plugin configuration supplied once at startup.
//!
//! A [`PluginConfiguration`] is assembled through [`PluginConfigurationBuilder`] or
//! decoded from the JSON options object hosts already pass to Echo-style plugins
//! (`authEndpoint`, `forceTLS`, ...). Once built it is shared behind an `Arc` and
//! never mutated.

/// Builder API for assembling plugin configurations.
pub mod builder;
/// Redacted bearer token wrapper.
pub mod secret;

pub use builder::*;
pub use secret::*;

// self
use crate::{_prelude::*, error::ConfigError};

/// Broadcasting backend the transport connects to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BroadcasterKind {
	#[default]
	/// Pusher Channels.
	Pusher,
	/// Laravel Reverb.
	Reverb,
	/// Ably (Pusher protocol adapter).
	Ably,
	/// Socket.IO server.
	SocketIo,
	/// No-op broadcaster used by tests and SSR hosts.
	Null,
	/// Any other connector label understood by the transport.
	Custom(String),
}
impl BroadcasterKind {
	/// Returns the connector label understood by the transport.
	pub fn as_str(&self) -> &str {
		match self {
			BroadcasterKind::Pusher => "pusher",
			BroadcasterKind::Reverb => "reverb",
			BroadcasterKind::Ably => "ably",
			BroadcasterKind::SocketIo => "socket.io",
			BroadcasterKind::Null => "null",
			BroadcasterKind::Custom(label) => label,
		}
	}
}
impl Display for BroadcasterKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for BroadcasterKind {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let label = s.trim();

		if label.is_empty() {
			return Err(ConfigError::MissingField { field: "broadcaster" });
		}

		Ok(match label {
			"pusher" => BroadcasterKind::Pusher,
			"reverb" => BroadcasterKind::Reverb,
			"ably" => BroadcasterKind::Ably,
			"socket.io" => BroadcasterKind::SocketIo,
			"null" => BroadcasterKind::Null,
			other => BroadcasterKind::Custom(other.to_owned()),
		})
	}
}
impl TryFrom<String> for BroadcasterKind {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}
impl From<BroadcasterKind> for String {
	fn from(value: BroadcasterKind) -> Self {
		value.as_str().to_owned()
	}
}

/// Immutable plugin configuration consumed by the authorizer and the Echo handle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PluginConfiguration {
	/// Broadcasting backend kind.
	pub broadcaster: BroadcasterKind,
	/// Application key presented by the transport when connecting.
	pub key: String,
	/// Optional cluster label (Pusher hosted clusters).
	pub cluster: Option<String>,
	/// Optional websocket host override for self-hosted endpoints.
	pub ws_host: Option<String>,
	/// Forces TLS on the websocket connection.
	pub force_tls: bool,
	/// Disables transport statistics reporting.
	pub disable_stats: bool,
	/// Marks the connection as encrypted (legacy Pusher flag).
	pub encrypted: bool,
	/// Endpoint receiving channel authorization requests.
	pub auth_endpoint: Url,
	/// Bearer token attached to every authorization request.
	#[serde(skip)]
	pub token: BearerToken,
	/// Value sent in the `Referrer` header.
	pub referrer: String,
}
impl PluginConfiguration {
	/// Creates a new builder.
	pub fn builder() -> PluginConfigurationBuilder {
		PluginConfigurationBuilder::default()
	}

	/// Decodes the camelCase JSON options object used by Echo-style plugins.
	pub fn from_json_str(raw: &str) -> Result<Self> {
		let de = &mut serde_json::Deserializer::from_str(raw);
		let options: PluginOptions = serde_path_to_error::deserialize(de)
			.map_err(|source| ConfigError::MalformedOptions { source })?;

		options.into_builder().build().map_err(Into::into)
	}
}

/// Raw options object as hosts supply it; validated through the builder.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PluginOptions {
	#[serde(default)]
	broadcaster: Option<BroadcasterKind>,
	key: Option<String>,
	cluster: Option<String>,
	ws_host: Option<String>,
	#[serde(default, rename = "forceTLS")]
	force_tls: bool,
	#[serde(default)]
	disable_stats: bool,
	#[serde(default)]
	encrypted: bool,
	auth_endpoint: Option<String>,
	token: Option<String>,
	referrer: Option<String>,
}
impl PluginOptions {
	fn into_builder(self) -> PluginConfigurationBuilder {
		let mut builder = PluginConfiguration::builder()
			.force_tls(self.force_tls)
			.disable_stats(self.disable_stats)
			.encrypted(self.encrypted);

		builder.broadcaster = self.broadcaster;
		builder.key = self.key;
		builder.cluster = self.cluster;
		builder.ws_host = self.ws_host;
		builder.auth_endpoint = self.auth_endpoint;
		builder.token = self.token.map(BearerToken::new);
		builder.referrer = self.referrer;

		builder
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const OPTIONS: &str = r#"{
		"broadcaster": "pusher",
		"key": "app-key",
		"cluster": "eu",
		"forceTLS": true,
		"disableStats": true,
		"encrypted": true,
		"authEndpoint": "https://api.example.com/broadcasting/auth",
		"token": "secret-token",
		"referrer": "https://app.example.com"
	}"#;

	#[test]
	fn decodes_plugin_options() {
		let config = PluginConfiguration::from_json_str(OPTIONS)
			.expect("Plugin options fixture should decode.");

		assert_eq!(config.broadcaster, BroadcasterKind::Pusher);
		assert_eq!(config.key, "app-key");
		assert_eq!(config.cluster.as_deref(), Some("eu"));
		assert!(config.force_tls && config.disable_stats && config.encrypted);
		assert_eq!(config.auth_endpoint.as_str(), "https://api.example.com/broadcasting/auth");
		assert_eq!(config.token.expose(), "secret-token");
		assert_eq!(config.referrer, "https://app.example.com");
	}

	#[test]
	fn malformed_options_report_the_path() {
		let err = PluginConfiguration::from_json_str(r#"{"forceTLS":"yes"}"#)
			.expect_err("String flags should be rejected.");

		match err {
			Error::Config(ConfigError::MalformedOptions { source }) =>
				assert_eq!(source.path().to_string(), "forceTLS"),
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn missing_token_is_rejected() {
		let err = PluginConfiguration::from_json_str(
			r#"{"key":"k","authEndpoint":"https://a.example.com/auth","referrer":"r"}"#,
		)
		.expect_err("Token is required.");

		assert!(matches!(err, Error::Config(ConfigError::MissingField { field: "token" })));
	}

	#[test]
	fn broadcaster_labels_round_trip_through_strings() {
		assert_eq!("socket.io".parse::<BroadcasterKind>().ok(), Some(BroadcasterKind::SocketIo));
		assert_eq!(
			"soketi".parse::<BroadcasterKind>().ok(),
			Some(BroadcasterKind::Custom("soketi".into()))
		);
		assert!("  ".parse::<BroadcasterKind>().is_err());
		assert_eq!(BroadcasterKind::Reverb.to_string(), "reverb");
	}

	#[test]
	fn serialized_configuration_omits_token() {
		let config = PluginConfiguration::from_json_str(OPTIONS)
			.expect("Plugin options fixture should decode.");
		let payload =
			serde_json::to_string(&config).expect("Configuration should serialize to JSON.");

		assert!(!payload.contains("secret-token"));
	}
}
