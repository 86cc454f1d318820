//! Host registration and the process-wide shared client slot.
//!
//! Hosts call [`install`] once at startup to place the [`Echo`] handle into their global
//! property registry under [`ECHO_PROPERTY`]. Components that need HTTP receive the
//! [`SharedHttpClient`] explicitly; [`install_shared_client`] exists for hosts that also
//! want a process-wide lookup and may be called exactly once per process.

// std
use std::sync::OnceLock;
// self
use crate::{
	_prelude::*, config::PluginConfiguration, echo::Echo, error::ConfigError,
	http::SharedHttpClient,
};

/// Global property name the handle is registered under.
pub const ECHO_PROPERTY: &str = "$echo";

static SHARED_CLIENT: OnceLock<SharedHttpClient> = OnceLock::new();

/// Registry of global properties exposed by the host application.
pub trait PluginHost {
	/// Makes `echo` reachable under `name` for the rest of the host.
	fn register_global_property(&mut self, name: &'static str, echo: Echo);
}

/// Map-backed [`PluginHost`] for tests and hosts without their own registry.
#[derive(Clone, Debug, Default)]
pub struct GlobalProperties(HashMap<&'static str, Echo>);
impl GlobalProperties {
	/// Returns the handle registered under `name`.
	pub fn get(&self, name: &str) -> Option<&Echo> {
		self.0.get(name)
	}

	/// Returns the handle registered under [`ECHO_PROPERTY`].
	pub fn echo(&self) -> Option<&Echo> {
		self.get(ECHO_PROPERTY)
	}
}
impl PluginHost for GlobalProperties {
	fn register_global_property(&mut self, name: &'static str, echo: Echo) {
		self.0.insert(name, echo);
	}
}

/// Builds the [`Echo`] handle and registers it under [`ECHO_PROPERTY`].
pub fn install(
	host: &mut dyn PluginHost,
	config: PluginConfiguration,
	http: SharedHttpClient,
) -> Echo {
	let echo = Echo::new(config, http);

	#[cfg(feature = "tracing")]
	tracing::info!(
		broadcaster = echo.config().broadcaster.as_str(),
		interceptors = echo.http().interceptor_count(),
		"Installed the broadcasting plugin."
	);

	host.register_global_property(ECHO_PROPERTY, echo.clone());

	echo
}

/// Stores `client` as the process-wide shared client.
///
/// Fails with [`ConfigError::AlreadyInstalled`] on every call after the first.
pub fn install_shared_client(client: SharedHttpClient) -> Result<&'static SharedHttpClient> {
	let mut installed = false;
	let shared = SHARED_CLIENT.get_or_init(|| {
		installed = true;

		client
	});

	if installed { Ok(shared) } else { Err(ConfigError::AlreadyInstalled.into()) }
}

/// Returns the process-wide shared client, if one was installed.
pub fn shared_client() -> Option<&'static SharedHttpClient> {
	SHARED_CLIENT.get()
}
