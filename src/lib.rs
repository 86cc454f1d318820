//! Private-channel authorization and session-aware HTTP plumbing for Pusher/Echo style
//! broadcasting clients.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod authorizer;
pub mod channel;
pub mod config;
pub mod echo;
pub mod error;
pub mod http;
pub mod interceptor;
pub mod obs;
pub mod plugin;
pub mod session;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// self
	use crate::{
		config::PluginConfiguration,
		echo::Echo,
		http::{ReqwestTransport, SharedHttpClient},
		session::SessionStore,
	};

	/// Session store that counts invalidation calls.
	#[derive(Debug, Default)]
	pub struct RecordingSessionStore(AtomicUsize);
	impl RecordingSessionStore {
		/// Number of times the session was invalidated.
		pub fn invalidations(&self) -> usize {
			self.0.load(Ordering::SeqCst)
		}
	}
	impl SessionStore for RecordingSessionStore {
		fn invalidate_session(&self) {
			self.0.fetch_add(1, Ordering::SeqCst);
		}
	}

	/// Builds a reqwest transport that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_transport() -> ReqwestTransport {
		test_reqwest_transport_with(ReqwestClient::builder())
	}

	/// Same as [`test_reqwest_transport`] but starting from a caller-tuned builder.
	pub fn test_reqwest_transport_with(builder: reqwest::ClientBuilder) -> ReqwestTransport {
		ReqwestTransport::from_builder(
			builder.danger_accept_invalid_certs(true).danger_accept_invalid_hostnames(true),
		)
		.expect("Failed to build insecure Reqwest client for tests.")
	}

	/// Plugin configuration pointing at `auth_endpoint`.
	pub fn test_configuration(auth_endpoint: &str) -> PluginConfiguration {
		PluginConfiguration::builder()
			.key("test-key")
			.cluster("mt1")
			.auth_endpoint(auth_endpoint)
			.token("test-token")
			.referrer("https://app.test")
			.build()
			.expect("Failed to build test plugin configuration.")
	}

	/// Shared client over `transport` with session invalidation installed.
	pub fn build_test_client(
		transport: ReqwestTransport,
	) -> (SharedHttpClient, Arc<RecordingSessionStore>) {
		let session = Arc::new(RecordingSessionStore::default());
		let client = SharedHttpClient::with_session_invalidation(
			Arc::new(transport),
			session.clone() as Arc<dyn SessionStore>,
		);

		(client, session)
	}

	/// Constructs an [`Echo`] handle for `auth_endpoint` backed by the insecure reqwest
	/// transport and a recording session store.
	pub fn build_test_echo(auth_endpoint: &str) -> (Echo, Arc<RecordingSessionStore>) {
		let (client, session) = build_test_client(test_reqwest_transport());

		(Echo::new(test_configuration(auth_endpoint), client), session)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
