// self
use crate::{channel::ChannelKind, http::FailureKind, obs::AuthorizeOutcome};

/// Counts one handshake outcome for a channel kind.
pub fn record_authorize(channel: ChannelKind, outcome: AuthorizeOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"echo_bridge_authorize_total",
			"channel_kind" => channel.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (channel, outcome);
	}
}

/// Counts one failed call on the shared client.
pub fn record_http_failure(kind: FailureKind) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("echo_bridge_http_failure_total", "failure" => kind.as_str())
			.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = kind;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recording_without_a_recorder_is_silent() {
		record_authorize(ChannelKind::Presence, AuthorizeOutcome::Failure);
		record_http_failure(FailureKind::Timeout);
	}
}
