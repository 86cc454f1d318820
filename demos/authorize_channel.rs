//! Wires the plugin into a map-backed host and runs one channel authorization.
//!
//! 1. Build a [`PluginConfiguration`] from the JSON options object.
//! 2. Build the reqwest transport and create the shared client with session invalidation
//!    installed once.
//! 3. Register `$echo` and print the options the transport would connect with.
//! 4. Authorize a private channel; without a live endpoint the call fails, the failure is
//!    normalized, and the session is signed out.

// std
use std::{sync::Arc, time::Duration};
// crates.io
use color_eyre::Result;
// self
use echo_bridge::{
	channel::{ChannelDescriptor, SocketId},
	config::PluginConfiguration,
	http::{ReqwestTransport, SharedHttpClient},
	plugin::{self, GlobalProperties},
	reqwest::Client,
	session::MemorySessionStore,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = PluginConfiguration::from_json_str(
		r#"{
			"broadcaster": "pusher",
			"key": "demo-key",
			"cluster": "mt1",
			"forceTLS": true,
			"disableStats": true,
			"encrypted": true,
			"authEndpoint": "http://127.0.0.1:9/broadcasting/auth",
			"token": "demo-token",
			"referrer": "https://demo.example.com"
		}"#,
	)?;
	let session = MemorySessionStore::default();

	session.sign_in("demo-user");

	let transport =
		ReqwestTransport::from_builder(Client::builder().timeout(Duration::from_secs(5)))?;
	let client = SharedHttpClient::with_session_invalidation(
		Arc::new(transport),
		Arc::new(session.clone()),
	);
	let shared = plugin::install_shared_client(client)?;
	let mut host = GlobalProperties::default();
	let echo = plugin::install(&mut host, config, shared.clone());

	println!("Connector options: {}.", serde_json::to_string(&echo.connector_options())?);

	let channel = ChannelDescriptor::parse("private-orders.42")?;
	let socket = SocketId::new("1234.5678")?;

	echo.authorizer(channel)
		.authorize_with(&socket, |result| match result {
			Ok(credentials) => println!("Authorized with a {} token.", credentials.token_type),
			Err(err) => println!("Authorization failed: {}.", serde_json::json!(err)),
		})
		.await;

	println!("Signed in after the call: {}.", session.is_signed_in());

	Ok(())
}
