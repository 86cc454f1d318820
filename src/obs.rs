//! Optional observability for channel authorization and shared-client failures.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit an `echo_bridge.authorize` span per handshake (fields
//!   `channel`, `channel_kind`, and `status` once a failure is known) and an
//!   `echo_bridge.intercept` span around each interceptor run (fields `failure`, `status`).
//! - Enable `metrics` to count handshakes in `echo_bridge_authorize_total`, labeled by
//!   `channel_kind` + `outcome`, and failed shared-client calls in
//!   `echo_bridge_http_failure_total`, labeled by `failure`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Handshake outcome labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthorizeOutcome {
	/// The request is about to be sent.
	Attempt,
	/// Credentials were decoded.
	Success,
	/// A normalized error was handed back.
	Failure,
}
impl AuthorizeOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AuthorizeOutcome::Attempt => "attempt",
			AuthorizeOutcome::Success => "success",
			AuthorizeOutcome::Failure => "failure",
		}
	}
}
impl Display for AuthorizeOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
