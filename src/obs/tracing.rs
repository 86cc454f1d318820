// self
use crate::{_prelude::*, channel::ChannelDescriptor, http::HttpFailure};

/// Resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOp<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOp<F> = F;

/// Span wrapper; compiles to nothing without the `tracing` feature.
#[derive(Clone, Debug)]
pub struct OpSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OpSpan {
	/// Span for one handshake on `channel`.
	pub fn authorize(channel: &ChannelDescriptor) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"echo_bridge.authorize",
				channel = %channel.name,
				channel_kind = channel.kind().as_str(),
				status = tracing::field::Empty,
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = channel;

			Self {}
		}
	}

	/// Span for one interceptor run on `failure`.
	pub fn intercept(failure: &HttpFailure) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"echo_bridge.intercept",
				failure = failure.kind.as_str(),
				status = failure.status_code(),
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = failure;

			Self {}
		}
	}

	/// Fills the `status` field of an authorization span.
	pub fn record_status(&self, status: Option<u16>) {
		#[cfg(feature = "tracing")]
		{
			if let Some(status) = status {
				self.span.record("status", status);
			}
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = status;
		}
	}

	/// Enters the span for synchronous sections.
	pub fn entered(self) -> OpSpanGuard {
		#[cfg(feature = "tracing")]
		{
			OpSpanGuard { _guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			OpSpanGuard {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOp<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Guard returned by [`OpSpan::entered`].
pub struct OpSpanGuard {
	#[cfg(feature = "tracing")]
	_guard: tracing::span::EnteredSpan,
}
impl Debug for OpSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("OpSpanGuard(..)")
	}
}
