#![cfg(feature = "reqwest")]

// std
use std::time::Duration as StdDuration;
// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use echo_bridge::{
	_preludet::*,
	authorizer::{AuthorizationResult, Credentials, FALLBACK_MESSAGE, HTTP_ERROR_NAME},
	channel::{ChannelDescriptor, SocketId},
	echo::Echo,
};

const AUTH_PATH: &str = "/broadcasting/auth";
const SOCKET: &str = "123.456";

fn socket() -> SocketId {
	SocketId::new(SOCKET).expect("Socket fixture should be valid.")
}

fn channel(name: &str) -> ChannelDescriptor {
	ChannelDescriptor::parse(name).expect("Channel fixture should be valid.")
}

fn echo_for(server: &MockServer) -> (Echo, Arc<RecordingSessionStore>) {
	build_test_echo(&server.url(AUTH_PATH))
}

#[tokio::test]
async fn authorize_returns_credentials_on_success() {
	let server = MockServer::start_async().await;
	let (echo, session) = echo_for(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(AUTH_PATH)
				.header("content-type", "application/json")
				.header("authorization", "Bearer test-token")
				.header("accept", "application/json")
				.header("referrer", "https://app.test")
				.json_body(json!({ "socket_id": SOCKET, "channel_name": "private-orders" }));
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "accessToken": "abc", "tokenType": "Bearer" }));
		})
		.await;
	let credentials = echo
		.authorizer(channel("private-orders"))
		.authorize(&socket())
		.await
		.expect("Authorization should succeed for a 200 response.");

	assert_eq!(credentials, Credentials::new("abc", "Bearer"));
	assert_eq!(session.invalidations(), 0);

	mock.assert_async().await;
}

#[tokio::test]
async fn authorize_normalizes_forbidden_response() {
	let server = MockServer::start_async().await;
	let (echo, session) = echo_for(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(AUTH_PATH);
			then.status(403)
				.header("content-type", "application/json")
				.json_body(json!({ "message": "Forbidden" }));
		})
		.await;
	let err = echo
		.authorizer(channel("private-orders"))
		.authorize(&socket())
		.await
		.expect_err("A 403 response should fail authorization.");

	assert_eq!(err.name(), HTTP_ERROR_NAME);
	assert_eq!(err.message(), "Forbidden");
	assert_eq!(err.status_code(), Some(403));
	assert_eq!(
		serde_json::to_value(&err).expect("Normalized error should serialize."),
		json!({ "name": "AxiosError", "message": "Forbidden", "statusCode": 403 })
	);
	// The authorization call goes through the shared client, so its interceptor fires too.
	assert_eq!(session.invalidations(), 1);

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn authorize_falls_back_to_status_message_without_body_message() {
	let server = MockServer::start_async().await;
	let (echo, _session) = echo_for(&server);
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path(AUTH_PATH);
			then.status(500).body("");
		})
		.await;
	let err = echo
		.authorizer(channel("presence-lobby"))
		.authorize(&socket())
		.await
		.expect_err("A 500 response should fail authorization.");

	assert_eq!(err.message(), "Request failed with status code 500");
	assert_ne!(err.message(), FALLBACK_MESSAGE);
	assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn authorize_timeout_has_no_status_code() {
	let server = MockServer::start_async().await;
	let transport = test_reqwest_transport_with(
		ReqwestClient::builder().timeout(StdDuration::from_millis(200)),
	);
	let (client, session) = build_test_client(transport);
	let echo = Echo::new(test_configuration(&server.url(AUTH_PATH)), client);
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path(AUTH_PATH);
			then.status(200)
				.delay(StdDuration::from_secs(2))
				.json_body(json!({ "accessToken": "late", "tokenType": "Bearer" }));
		})
		.await;
	let err = echo
		.authorizer(channel("private-orders"))
		.authorize(&socket())
		.await
		.expect_err("A timed out request should fail authorization.");

	assert_eq!(err.name(), HTTP_ERROR_NAME);
	assert!(!err.message().is_empty());
	assert_eq!(err.status_code(), None);
	assert_eq!(session.invalidations(), 1);
}

#[tokio::test]
async fn authorize_rejects_body_without_credentials_shape() {
	let server = MockServer::start_async().await;
	let (echo, session) = echo_for(&server);
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path(AUTH_PATH);
			then.status(200).json_body(json!({ "auth": "key:signature" }));
		})
		.await;
	let err = echo
		.authorizer(channel("private-orders"))
		.authorize(&socket())
		.await
		.expect_err("A body without accessToken should be rejected.");

	assert_eq!(err.status_code(), Some(200));
	assert!(err.message().contains("accessToken"), "Message was: {}", err.message());
	assert_eq!(session.invalidations(), 0);
}

#[tokio::test]
async fn authorize_with_invokes_callback_exactly_once() {
	let server = MockServer::start_async().await;
	let (echo, _session) = echo_for(&server);
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path(AUTH_PATH);
			then.status(200).json_body(json!({ "accessToken": "abc", "tokenType": "Bearer" }));
		})
		.await;
	let mut outcomes: Vec<AuthorizationResult> = Vec::new();

	echo.authorizer(channel("private-orders"))
		.authorize_with(&socket(), |result| outcomes.push(result))
		.await;

	assert_eq!(outcomes.len(), 1);
	assert_eq!(
		outcomes.pop().and_then(|result| result.ok()),
		Some(Credentials::new("abc", "Bearer"))
	);
}

#[tokio::test]
async fn concurrent_authorizations_complete_independently() {
	let server = MockServer::start_async().await;
	let (echo, session) = echo_for(&server);
	let allowed = server
		.mock_async(|when, then| {
			when.method(POST).path(AUTH_PATH).body_includes(r#""channel_name":"private-a""#);
			then.status(200).json_body(json!({ "accessToken": "token-a", "tokenType": "Bearer" }));
		})
		.await;
	let denied = server
		.mock_async(|when, then| {
			when.method(POST).path(AUTH_PATH).body_includes(r#""channel_name":"private-b""#);
			then.status(403).json_body(json!({ "message": "Forbidden" }));
		})
		.await;
	let socket = socket();
	let channel_a = echo.authorizer(channel("private-a"));
	let channel_b = echo.authorizer(channel("private-b"));
	let (a, b) = tokio::join!(channel_a.authorize(&socket), channel_b.authorize(&socket));

	assert_eq!(
		a.expect("Channel A should be authorized.").access_token,
		"token-a",
		"A failure on channel B must not affect channel A."
	);
	assert_eq!(b.expect_err("Channel B should be denied.").status_code(), Some(403));
	assert_eq!(session.invalidations(), 1);

	allowed.assert_calls_async(1).await;
	denied.assert_calls_async(1).await;
}

#[tokio::test]
async fn repeated_joins_are_not_deduplicated() {
	let server = MockServer::start_async().await;
	let (echo, _session) = echo_for(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(AUTH_PATH);
			then.status(200).json_body(json!({ "accessToken": "abc", "tokenType": "Bearer" }));
		})
		.await;
	let authorization = echo.authorizer(channel("private-orders"));
	let socket = socket();
	let (first, second) =
		tokio::join!(authorization.authorize(&socket), authorization.authorize(&socket));

	first.expect("First join should succeed.");
	second.expect("Second join should succeed.");

	mock.assert_calls_async(2).await;
}
