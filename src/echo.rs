//! Configured handle the host hands to its broadcasting transport.

// self
use crate::{
	_prelude::*,
	authorizer::{Authorizer, ChannelAuthorization},
	channel::ChannelDescriptor,
	config::{BroadcasterKind, PluginConfiguration},
	http::SharedHttpClient,
};

const PRIVATE_PREFIX: &str = "private-";
const ENCRYPTED_PRIVATE_PREFIX: &str = "private-encrypted-";
const PRESENCE_PREFIX: &str = "presence-";

/// Transport-facing connection options derived from the plugin configuration.
///
/// Field names follow the option names Echo-style transports expect. The bearer token
/// is deliberately absent; it only travels in authorization requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorOptions {
	/// Broadcasting backend kind.
	pub broadcaster: BroadcasterKind,
	/// Application key.
	pub key: String,
	/// Optional cluster label.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cluster: Option<String>,
	/// Optional websocket host override.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ws_host: Option<String>,
	/// Forces TLS on the websocket connection.
	#[serde(rename = "forceTLS")]
	pub force_tls: bool,
	/// Disables transport statistics reporting.
	pub disable_stats: bool,
	/// Legacy encrypted flag.
	pub encrypted: bool,
	/// Authorization endpoint, informational for transports that display it.
	pub auth_endpoint: Url,
}

/// The `$echo` handle: configuration plus the channel authorizer.
#[derive(Clone, Debug)]
pub struct Echo {
	authorizer: Authorizer,
}
impl Echo {
	/// Freezes `config` and wires the authorizer to the shared client.
	pub fn new(config: PluginConfiguration, http: SharedHttpClient) -> Self {
		Self { authorizer: Authorizer::new(Arc::new(config), http) }
	}

	/// Immutable configuration the handle was built from.
	pub fn config(&self) -> &PluginConfiguration {
		self.authorizer.config()
	}

	/// Shared client used for authorization requests.
	pub fn http(&self) -> &SharedHttpClient {
		self.authorizer.http()
	}

	/// Options the transport needs to open its connection.
	pub fn connector_options(&self) -> ConnectorOptions {
		let config = self.config();

		ConnectorOptions {
			broadcaster: config.broadcaster.clone(),
			key: config.key.clone(),
			cluster: config.cluster.clone(),
			ws_host: config.ws_host.clone(),
			force_tls: config.force_tls,
			disable_stats: config.disable_stats,
			encrypted: config.encrypted,
			auth_endpoint: config.auth_endpoint.clone(),
		}
	}

	/// Returns the authorization capability the transport invokes for `channel`.
	pub fn authorizer(&self, channel: ChannelDescriptor) -> ChannelAuthorization {
		self.authorizer.channel(channel)
	}

	/// Authorization capability for the private channel `name`.
	///
	/// `name` is given without its prefix, so `orders.42` maps to `private-orders.42`.
	pub fn private(&self, name: &str) -> Result<ChannelAuthorization> {
		self.prefixed(PRIVATE_PREFIX, name)
	}

	/// Authorization capability for the end-to-end encrypted private channel `name`.
	pub fn encrypted_private(&self, name: &str) -> Result<ChannelAuthorization> {
		self.prefixed(ENCRYPTED_PRIVATE_PREFIX, name)
	}

	/// Authorization capability for the presence channel `name`.
	pub fn join(&self, name: &str) -> Result<ChannelAuthorization> {
		self.prefixed(PRESENCE_PREFIX, name)
	}

	fn prefixed(&self, prefix: &str, name: &str) -> Result<ChannelAuthorization> {
		let channel = ChannelDescriptor::parse(format!("{prefix}{name}"))?;

		Ok(self.authorizer(channel))
	}
}
