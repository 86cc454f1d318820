//! Failure value produced by the shared HTTP client.

// self
use crate::{_prelude::*, error::BoxError};

/// Coarse classification of an [`HttpFailure`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
	/// The request could not be constructed (bad header, body serialization).
	Request,
	/// DNS, TCP, TLS, or body-read failure before a complete response arrived.
	///
	/// A body-read failure still carries the received status in
	/// [`HttpFailure::response`].
	Network,
	/// The transport gave up waiting for the response.
	Timeout,
	/// A response arrived with a non-2xx status.
	Status,
}
impl FailureKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FailureKind::Request => "request",
			FailureKind::Network => "network",
			FailureKind::Timeout => "timeout",
			FailureKind::Status => "status",
		}
	}
}
impl Display for FailureKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Response, or the part of it that arrived, attached to a failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailureResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}

/// Failure surfaced by [`SharedHttpClient::send`](crate::http::SharedHttpClient::send).
///
/// The fields mirror what callers can rely on: an optional human-readable message,
/// the response when one was received, and the transport's own error when there is one.
#[derive(Debug, ThisError)]
#[error("{}", .message.as_deref().unwrap_or("HTTP request failed."))]
pub struct HttpFailure {
	/// Failure classification.
	pub kind: FailureKind,
	/// Message extracted from the response or the transport error.
	pub message: Option<String>,
	/// Response received before the failure, if any.
	pub response: Option<FailureResponse>,
	/// Transport-specific error.
	#[source]
	pub source: Option<BoxError>,
}
impl HttpFailure {
	/// Builds a failure for a response carrying a non-2xx status.
	///
	/// The message is the body's JSON `message` string when present, otherwise
	/// `Request failed with status code <status>`.
	pub fn status(status: u16, body: Vec<u8>) -> Self {
		let message = body_message(&body)
			.unwrap_or_else(|| format!("Request failed with status code {status}"));

		Self {
			kind: FailureKind::Status,
			message: Some(message),
			response: Some(FailureResponse { status, body }),
			source: None,
		}
	}

	/// Builds a network failure from a transport error.
	pub fn network(
		message: impl Into<String>,
		source: impl 'static + Send + Sync + StdError,
	) -> Self {
		Self::without_response(FailureKind::Network, message, source)
	}

	/// Builds a timeout failure from a transport error.
	pub fn timeout(
		message: impl Into<String>,
		source: impl 'static + Send + Sync + StdError,
	) -> Self {
		Self::without_response(FailureKind::Timeout, message, source)
	}

	/// Builds a request-construction failure.
	pub fn request(
		message: impl Into<String>,
		source: impl 'static + Send + Sync + StdError,
	) -> Self {
		Self::without_response(FailureKind::Request, message, source)
	}

	/// Records that the response status arrived before the failure.
	pub(crate) fn with_status(mut self, status: u16) -> Self {
		self.response = Some(FailureResponse { status, body: Vec::new() });

		self
	}

	/// Status code of the received response, if any.
	pub fn status_code(&self) -> Option<u16> {
		self.response.as_ref().map(|response| response.status)
	}

	fn without_response(
		kind: FailureKind,
		message: impl Into<String>,
		source: impl 'static + Send + Sync + StdError,
	) -> Self {
		Self { kind, message: Some(message.into()), response: None, source: Some(Box::new(source)) }
	}
}

fn body_message(body: &[u8]) -> Option<String> {
	let value: serde_json::Value = serde_json::from_slice(body).ok()?;
	let message = value.get("message")?.as_str()?.trim();

	(!message.is_empty()).then(|| message.to_owned())
}
