//! Session store contract consumed by the failure interceptor.
//!
//! The crate never reads session state; it only asks the store to end the current
//! session. [`MemorySessionStore`] is a small in-process store for tests and demos.

pub mod memory;

pub use memory::MemorySessionStore;

/// Process-wide session owner.
///
/// Implementations must make [`invalidate_session`](SessionStore::invalidate_session) a
/// single atomic step and treat repeated calls on an already-ended session as a no-op.
/// The call must not block on I/O; schedule any remote sign-out in the background.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Ends the current session.
	fn invalidate_session(&self);
}
