//! Channel authorization handshake.
//!
//! The broadcasting transport asks [`Authorizer::channel`] for a
//! [`ChannelAuthorization`] whenever it wants to join a private, encrypted, or presence
//! channel, then calls [`ChannelAuthorization::authorize`] (or the callback form
//! [`ChannelAuthorization::authorize_with`]) with its socket id. Each call issues exactly
//! one `POST` to the configured authorization endpoint through the shared client:
//!
//! ```text
//! POST <authEndpoint>
//! Content-Type: application/json
//! Authorization: Bearer <token>
//! Accept: application/json
//! Referrer: <referrer>
//!
//! {"socket_id":"<socket id>","channel_name":"<channel>"}
//! ```
//!
//! A 2xx body decoding into [`Credentials`] completes successfully; every other outcome
//! completes with a [`NormalizedError`]. Calls never retry and share no mutable state.

mod credentials;
mod normalize;

pub use credentials::*;
pub use normalize::*;

// self
use crate::{
	_prelude::*,
	channel::{AuthorizationRequest, ChannelDescriptor, SocketId},
	config::PluginConfiguration,
	http::{HttpFailure, HttpRequest, SharedHttpClient},
	obs::{self, AuthorizeOutcome, OpSpan},
};

/// Outcome delivered to the transport for one join attempt.
pub type AuthorizationResult = Result<Credentials, NormalizedError>;

/// Header carrying the configured referrer; the name matches what existing auth
/// endpoints read.
pub const REFERRER_HEADER: &str = "Referrer";

/// Produces per-channel authorization capabilities from one immutable configuration.
#[derive(Clone, Debug)]
pub struct Authorizer {
	config: Arc<PluginConfiguration>,
	http: SharedHttpClient,
}
impl Authorizer {
	/// Binds the configuration to the shared HTTP client.
	pub fn new(config: Arc<PluginConfiguration>, http: SharedHttpClient) -> Self {
		Self { config, http }
	}

	/// Configuration this authorizer was built from.
	pub fn config(&self) -> &PluginConfiguration {
		&self.config
	}

	/// Shared client the handshake goes through.
	pub fn http(&self) -> &SharedHttpClient {
		&self.http
	}

	/// Returns the authorization capability for `channel`.
	pub fn channel(&self, channel: ChannelDescriptor) -> ChannelAuthorization {
		ChannelAuthorization {
			channel,
			config: Arc::clone(&self.config),
			http: self.http.clone(),
		}
	}
}

/// Authorization capability bound to a single channel.
#[derive(Clone, Debug)]
pub struct ChannelAuthorization {
	channel: ChannelDescriptor,
	config: Arc<PluginConfiguration>,
	http: SharedHttpClient,
}
impl ChannelAuthorization {
	/// Channel this capability authorizes.
	pub fn channel(&self) -> &ChannelDescriptor {
		&self.channel
	}

	/// Performs the handshake for `socket_id`.
	pub async fn authorize(&self, socket_id: &SocketId) -> AuthorizationResult {
		let kind = self.channel.kind();
		let span = OpSpan::authorize(&self.channel);

		obs::record_authorize(kind, AuthorizeOutcome::Attempt);

		let result = span.instrument(self.exchange(socket_id)).await;

		match &result {
			Ok(_) => obs::record_authorize(kind, AuthorizeOutcome::Success),
			Err(err) => {
				span.record_status(err.status_code());

				#[cfg(feature = "tracing")]
				tracing::debug!(
					channel = %self.channel.name,
					error = err.message(),
					"Channel authorization failed."
				);

				obs::record_authorize(kind, AuthorizeOutcome::Failure);
			},
		}

		result
	}

	/// Performs the handshake and reports the outcome through `callback`.
	///
	/// The callback runs exactly once, after the HTTP exchange completes, even if the
	/// transport no longer needs the result.
	pub async fn authorize_with<F>(&self, socket_id: &SocketId, callback: F)
	where
		F: FnOnce(AuthorizationResult),
	{
		callback(self.authorize(socket_id).await);
	}

	/// Builds the outbound request for `socket_id` without sending it.
	pub fn request(&self, socket_id: &SocketId) -> Result<HttpRequest, HttpFailure> {
		HttpRequest::post(self.config.auth_endpoint.clone())
			.header("Content-Type", "application/json")
			.header("Authorization", self.config.token.authorization_header())
			.header("Accept", "application/json")
			.header(REFERRER_HEADER, self.config.referrer.as_str())
			.json(&AuthorizationRequest::new(socket_id, &self.channel))
	}

	async fn exchange(&self, socket_id: &SocketId) -> AuthorizationResult {
		let request = self.request(socket_id).map_err(NormalizedError::from)?;
		let response = self.http.send(request).await.map_err(NormalizedError::from)?;

		response
			.json::<Credentials>()
			.map_err(|err| NormalizedError::malformed_credentials(response.status, &err))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::http::{HttpFuture, HttpResponse, HttpTransport};

	struct EchoBodyTransport;
	impl HttpTransport for EchoBodyTransport {
		fn execute(&self, request: HttpRequest) -> HttpFuture<'_> {
			Box::pin(async move {
				Ok(HttpResponse::new(200, request.body.unwrap_or_default()))
			})
		}
	}

	fn authorization(channel: &str) -> ChannelAuthorization {
		let config = PluginConfiguration::builder()
			.key("app-key")
			.auth_endpoint("https://api.example.com/broadcasting/auth")
			.token("token-123")
			.referrer("https://app.example.com")
			.build()
			.expect("Configuration fixture should build.");
		let http = SharedHttpClient::builder(Arc::new(EchoBodyTransport)).build();

		Authorizer::new(Arc::new(config), http)
			.channel(ChannelDescriptor::parse(channel).expect("Channel fixture should be valid."))
	}

	#[test]
	fn request_carries_wire_headers_and_body() {
		let socket = SocketId::new("1234.5678").expect("Socket fixture should be valid.");
		let request = authorization("private-orders")
			.request(&socket)
			.expect("Request should build for valid inputs.");

		assert_eq!(request.url.as_str(), "https://api.example.com/broadcasting/auth");
		assert_eq!(request.header_value("content-type"), Some("application/json"));
		assert_eq!(request.header_value("authorization"), Some("Bearer token-123"));
		assert_eq!(request.header_value("accept"), Some("application/json"));
		assert_eq!(request.header_value("referrer"), Some("https://app.example.com"));

		let body: serde_json::Value = serde_json::from_slice(
			request.body.as_deref().expect("Request should carry a JSON body."),
		)
		.expect("Request body should be JSON.");

		assert_eq!(
			body,
			serde_json::json!({ "socket_id": "1234.5678", "channel_name": "private-orders" })
		);
	}

	#[tokio::test]
	async fn body_without_credentials_shape_is_normalized() {
		let socket = SocketId::new("1.2").expect("Socket fixture should be valid.");
		// The fake transport answers with the request body, which lacks `accessToken`.
		let err = authorization("presence-lobby")
			.authorize(&socket)
			.await
			.expect_err("A body without credentials should be rejected.");

		assert_eq!(err.name(), HTTP_ERROR_NAME);
		assert_eq!(err.status_code(), Some(200));
		assert!(err.message().contains("accessToken"), "Message was: {}", err.message());
	}

	#[tokio::test]
	async fn callback_runs_once_with_the_result() {
		let socket = SocketId::new("1.2").expect("Socket fixture should be valid.");
		let mut calls = Vec::new();

		authorization("private-a").authorize_with(&socket, |result| calls.push(result)).await;

		assert_eq!(calls.len(), 1);
		assert!(calls[0].is_err());
	}
}
