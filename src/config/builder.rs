// self
use crate::{
	_prelude::*,
	config::{BearerToken, BroadcasterKind, PluginConfiguration},
	error::ConfigError,
};

/// Builder for [`PluginConfiguration`] values.
#[derive(Debug, Default)]
pub struct PluginConfigurationBuilder {
	/// Broadcasting backend kind; defaults to Pusher.
	pub broadcaster: Option<BroadcasterKind>,
	/// Application key.
	pub key: Option<String>,
	/// Optional cluster label.
	pub cluster: Option<String>,
	/// Optional websocket host override.
	pub ws_host: Option<String>,
	/// Forces TLS on the websocket connection.
	pub force_tls: bool,
	/// Disables transport statistics reporting.
	pub disable_stats: bool,
	/// Legacy encrypted flag.
	pub encrypted: bool,
	/// Raw authorization endpoint, parsed on build.
	pub auth_endpoint: Option<String>,
	/// Bearer token for authorization requests.
	pub token: Option<BearerToken>,
	/// `Referrer` header value.
	pub referrer: Option<String>,
}
impl PluginConfigurationBuilder {
	/// Sets the broadcaster kind.
	pub fn broadcaster(mut self, kind: BroadcasterKind) -> Self {
		self.broadcaster = Some(kind);

		self
	}

	/// Sets the application key.
	pub fn key(mut self, key: impl Into<String>) -> Self {
		self.key = Some(key.into());

		self
	}

	/// Sets the cluster label.
	pub fn cluster(mut self, cluster: impl Into<String>) -> Self {
		self.cluster = Some(cluster.into());

		self
	}

	/// Sets the websocket host override.
	pub fn ws_host(mut self, host: impl Into<String>) -> Self {
		self.ws_host = Some(host.into());

		self
	}

	/// Toggles forced TLS.
	pub fn force_tls(mut self, enabled: bool) -> Self {
		self.force_tls = enabled;

		self
	}

	/// Toggles transport statistics.
	pub fn disable_stats(mut self, disabled: bool) -> Self {
		self.disable_stats = disabled;

		self
	}

	/// Toggles the legacy encrypted flag.
	pub fn encrypted(mut self, enabled: bool) -> Self {
		self.encrypted = enabled;

		self
	}

	/// Sets the authorization endpoint.
	pub fn auth_endpoint(mut self, url: impl Into<String>) -> Self {
		self.auth_endpoint = Some(url.into());

		self
	}

	/// Sets the bearer token.
	pub fn token(mut self, token: impl Into<String>) -> Self {
		self.token = Some(BearerToken::new(token));

		self
	}

	/// Sets the `Referrer` header value.
	pub fn referrer(mut self, referrer: impl Into<String>) -> Self {
		self.referrer = Some(referrer.into());

		self
	}

	/// Validates the collected options and produces an immutable configuration.
	pub fn build(self) -> Result<PluginConfiguration, ConfigError> {
		let key = required(self.key, "key")?;
		let raw_endpoint = required(self.auth_endpoint, "authEndpoint")?;
		let token = self.token.ok_or(ConfigError::MissingField { field: "token" })?;
		let referrer = required(self.referrer, "referrer")?;
		let auth_endpoint = Url::parse(raw_endpoint.trim())
			.map_err(|source| ConfigError::InvalidAuthEndpoint { source })?;

		if !matches!(auth_endpoint.scheme(), "http" | "https") {
			return Err(ConfigError::UnsupportedScheme { url: auth_endpoint.to_string() });
		}
		if token.expose().trim().is_empty() {
			return Err(ConfigError::MissingField { field: "token" });
		}

		Ok(PluginConfiguration {
			broadcaster: self.broadcaster.unwrap_or_default(),
			key,
			cluster: self.cluster.filter(|value| !value.trim().is_empty()),
			ws_host: self.ws_host.filter(|value| !value.trim().is_empty()),
			force_tls: self.force_tls,
			disable_stats: self.disable_stats,
			encrypted: self.encrypted,
			auth_endpoint,
			token,
			referrer,
		})
	}
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
	value.filter(|value| !value.trim().is_empty()).ok_or(ConfigError::MissingField { field })
}
