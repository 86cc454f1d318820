//! Failure interceptors layered onto [`SharedHttpClient`](crate::http::SharedHttpClient).

// self
use crate::{
	_prelude::*,
	http::HttpFailure,
	obs::OpSpan,
	session::SessionStore,
};

/// Observer invoked for every failed exchange on the shared client.
///
/// Interceptors see the failure by reference, so they can neither swallow nor
/// rewrite it. They run synchronously before the failure is returned to the caller
/// and must not panic.
pub trait FailureInterceptor
where
	Self: Send + Sync,
{
	/// Reacts to `failure`.
	fn on_failure(&self, failure: &HttpFailure);
}

/// Ends the current session whenever any HTTP call fails.
#[derive(Clone)]
pub struct SessionInvalidationInterceptor {
	session: Arc<dyn SessionStore>,
}
impl SessionInvalidationInterceptor {
	/// Binds the interceptor to the process-wide session store.
	pub fn new(session: Arc<dyn SessionStore>) -> Self {
		Self { session }
	}
}
impl FailureInterceptor for SessionInvalidationInterceptor {
	fn on_failure(&self, failure: &HttpFailure) {
		let _span = OpSpan::intercept(failure).entered();

		#[cfg(feature = "tracing")]
		tracing::warn!("HTTP call failed; invalidating the current session.");

		self.session.invalidate_session();
	}
}
impl Debug for SessionInvalidationInterceptor {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("SessionInvalidationInterceptor(..)")
	}
}
