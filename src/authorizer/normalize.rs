//! Canonical error shape handed to the broadcasting transport.

// self
use crate::{_prelude::*, http::HttpFailure};

/// Name carried by every [`NormalizedError`]; Echo consumers match on this label to
/// recognize HTTP-origin failures.
pub const HTTP_ERROR_NAME: &str = "AxiosError";
/// Message used when the underlying failure carries none.
pub const FALLBACK_MESSAGE: &str = "Unknown error";

/// Failure reported to the transport when authorization does not yield credentials.
///
/// `message` is never empty and `status_code` is present only when an HTTP response
/// was received.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
#[serde(rename_all = "camelCase")]
#[error("{name}: {message}")]
pub struct NormalizedError {
	name: &'static str,
	message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	status_code: Option<u16>,
}
impl NormalizedError {
	/// Creates an error, substituting [`FALLBACK_MESSAGE`] for a missing or blank message.
	pub fn new(message: Option<&str>, status_code: Option<u16>) -> Self {
		let message = message
			.map(str::trim)
			.filter(|message| !message.is_empty())
			.unwrap_or(FALLBACK_MESSAGE)
			.to_owned();

		Self { name: HTTP_ERROR_NAME, message, status_code }
	}

	/// Normalizes a shared-client failure.
	pub fn from_failure(failure: &HttpFailure) -> Self {
		Self::new(failure.message.as_deref(), failure.status_code())
	}

	/// Reports a 2xx response whose body is not a credentials object.
	pub(crate) fn malformed_credentials(
		status: u16,
		err: &serde_path_to_error::Error<serde_json::Error>,
	) -> Self {
		let message = format!(
			"Authorization response is not a valid credentials object at `{}`: {}",
			err.path(),
			err.inner()
		);

		Self::new(Some(&message), Some(status))
	}

	/// Constant failure label.
	pub fn name(&self) -> &str {
		self.name
	}

	/// Human-readable failure message.
	pub fn message(&self) -> &str {
		&self.message
	}

	/// HTTP status of the received response, if any.
	pub fn status_code(&self) -> Option<u16> {
		self.status_code
	}
}
impl From<&HttpFailure> for NormalizedError {
	fn from(failure: &HttpFailure) -> Self {
		Self::from_failure(failure)
	}
}
impl From<HttpFailure> for NormalizedError {
	fn from(failure: HttpFailure) -> Self {
		Self::from_failure(&failure)
	}
}
