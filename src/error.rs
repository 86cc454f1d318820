//! Crate-level error types shared across the configuration and channel layers.
//!
//! Authorization failures never surface through [`Error`]; they are normalized into
//! [`NormalizedError`](crate::authorizer::NormalizedError) at the authorizer boundary, and
//! host calls on the shared client return [`HttpFailure`](crate::http::HttpFailure) as is.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs that can fail outside the authorization path.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Channel or connection identifier failed validation.
	#[error(transparent)]
	Channel(#[from] crate::channel::ChannelError),
}

/// Configuration and installation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A required plugin option was never set.
	#[error("Plugin configuration is missing the `{field}` option.")]
	MissingField {
		/// Name of the missing option.
		field: &'static str,
	},
	/// The authorization endpoint cannot be parsed.
	#[error("Authorization endpoint is invalid.")]
	InvalidAuthEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// The authorization endpoint uses a scheme other than HTTP(S).
	#[error("Authorization endpoint must use http or https: {url}.")]
	UnsupportedScheme {
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// JSON plugin options could not be decoded.
	#[error("Plugin options are malformed at `{}`.", .source.path())]
	MalformedOptions {
		/// Structured decoding failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// The process-wide shared client was already installed.
	#[error("The shared HTTP client has already been installed.")]
	AlreadyInstalled,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
