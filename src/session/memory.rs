//! Thread-safe in-memory [`SessionStore`] implementation for local development and tests.

// self
use crate::{_prelude::*, session::SessionStore};

/// Signed-in session tracked by [`MemorySessionStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
	/// Identifier of the signed-in user.
	pub user_id: String,
	/// Instant the session started.
	pub signed_in_at: OffsetDateTime,
}

#[derive(Debug, Default)]
struct SessionState {
	current: Option<Session>,
	invalidated_at: Option<OffsetDateTime>,
}

/// In-process session holder that can be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore(Arc<RwLock<SessionState>>);
impl MemorySessionStore {
	/// Starts a session for `user_id`, replacing any previous one.
	pub fn sign_in(&self, user_id: impl Into<String>) -> Session {
		let session = Session { user_id: user_id.into(), signed_in_at: OffsetDateTime::now_utc() };
		let mut state = self.0.write();

		state.current = Some(session.clone());
		state.invalidated_at = None;

		session
	}

	/// Returns the active session, if any.
	pub fn current(&self) -> Option<Session> {
		self.0.read().current.clone()
	}

	/// Whether a session is active.
	pub fn is_signed_in(&self) -> bool {
		self.0.read().current.is_some()
	}

	/// Instant the last active session was invalidated.
	pub fn invalidated_at(&self) -> Option<OffsetDateTime> {
		self.0.read().invalidated_at
	}
}
impl SessionStore for MemorySessionStore {
	fn invalidate_session(&self) {
		let mut state = self.0.write();

		if state.current.take().is_some() {
			state.invalidated_at = Some(OffsetDateTime::now_utc());
		}
	}
}
