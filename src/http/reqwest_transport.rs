// crates.io
use reqwest::ClientBuilder;
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	http::{HttpFailure, HttpFuture, HttpRequest, HttpResponse, HttpTransport, Method},
};

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Timeouts, proxies, and connection pooling come from the wrapped client; configure
/// them on the [`ReqwestClient`] before wrapping it.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds the wrapped client from `builder`.
	///
	/// Invalid builder settings (a malformed user agent, an unusable TLS backend) surface
	/// as [`ConfigError::HttpClientBuild`].
	pub fn from_builder(builder: ClientBuilder) -> Result<Self, ConfigError> {
		Ok(Self(builder.build()?))
	}
}
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl HttpTransport for ReqwestTransport {
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let mut builder = client.request(reqwest_method(request.method), request.url);

			for (name, value) in &request.headers {
				builder = builder.header(name.as_str(), value.as_str());
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await.map_err(map_reqwest_error)?;
			let status = response.status().as_u16();
			let headers = response
				.headers()
				.iter()
				.filter_map(|(name, value)| {
					value.to_str().ok().map(|value| (name.as_str().to_owned(), value.to_owned()))
				})
				.collect();
			// The status line already arrived, so a body-read failure keeps it.
			let body = response
				.bytes()
				.await
				.map_err(|e| map_reqwest_error(e).with_status(status))?
				.to_vec();

			Ok(HttpResponse { status, headers, body })
		})
	}
}

fn reqwest_method(method: Method) -> reqwest::Method {
	match method {
		Method::Get => reqwest::Method::GET,
		Method::Post => reqwest::Method::POST,
		Method::Put => reqwest::Method::PUT,
		Method::Patch => reqwest::Method::PATCH,
		Method::Delete => reqwest::Method::DELETE,
	}
}

fn map_reqwest_error(err: ReqwestError) -> HttpFailure {
	let message = err.to_string();

	if err.is_timeout() {
		HttpFailure::timeout(message, err)
	} else if err.is_builder() {
		HttpFailure::request(message, err)
	} else {
		HttpFailure::network(message, err)
	}
}
