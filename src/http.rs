//! Shared HTTP client with process-wide failure interception.
//!
//! [`HttpTransport`] is the crate's only dependency on an HTTP stack; the reqwest-backed
//! [`ReqwestTransport`] is the default. Every call goes through [`SharedHttpClient`],
//! which turns non-2xx responses into [`HttpFailure`] values and hands each failure to
//! the [`FailureInterceptor`]s installed when the client was built. Interceptors observe
//! failures by reference and the original value is returned to the caller unchanged.

mod failure;
#[cfg(feature = "reqwest")] mod reqwest_transport;

pub use failure::*;
#[cfg(feature = "reqwest")] pub use reqwest_transport::*;

// self
use crate::{
	_prelude::*,
	interceptor::{FailureInterceptor, SessionInvalidationInterceptor},
	obs,
	session::SessionStore,
};

/// Boxed future returned by [`HttpTransport::execute`].
pub type HttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, HttpFailure>> + 'a + Send>>;

/// Abstraction over HTTP stacks able to execute a single request.
///
/// Implementations return `Ok` for every response that arrived, whatever its status;
/// [`SharedHttpClient`] decides which statuses are failures. `Err` is reserved for
/// exchanges that produced no response (request construction, network, timeout).
/// Implementations must not retry.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes `request` once.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_>;
}

/// HTTP methods used by the crate and its hosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
	/// `PUT`.
	Put,
	/// `PATCH`.
	Patch,
	/// `DELETE`.
	Delete,
}
impl Method {
	/// Returns the method token.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Patch => "PATCH",
			Method::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Transport-agnostic outbound request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
	/// Request method.
	pub method: Method,
	/// Target URL.
	pub url: Url,
	/// Header name/value pairs in insertion order.
	pub headers: Vec<(String, String)>,
	/// Optional request body.
	pub body: Option<Vec<u8>>,
}
impl HttpRequest {
	/// Creates a request without headers or body.
	pub fn new(method: Method, url: Url) -> Self {
		Self { method, url, headers: Vec::new(), body: None }
	}

	/// Creates a `GET` request.
	pub fn get(url: Url) -> Self {
		Self::new(Method::Get, url)
	}

	/// Creates a `POST` request.
	pub fn post(url: Url) -> Self {
		Self::new(Method::Post, url)
	}

	/// Appends a header.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Serializes `body` as the JSON request payload.
	pub fn json<T>(mut self, body: &T) -> Result<Self, HttpFailure>
	where
		T: ?Sized + Serialize,
	{
		let payload = serde_json::to_vec(body).map_err(|e| {
			HttpFailure::request("Request body could not be serialized as JSON.", e)
		})?;

		self.body = Some(payload);

		Ok(self)
	}

	/// Returns the first header value matching `name` case-insensitively.
	pub fn header_value(&self, name: &str) -> Option<&str> {
		find_header(&self.headers, name)
	}
}

/// Response returned by an [`HttpTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Header name/value pairs.
	pub headers: Vec<(String, String)>,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Creates a response without headers.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, headers: Vec::new(), body: body.into() }
	}

	/// Whether the status is in the 2xx range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Returns the first header value matching `name` case-insensitively.
	pub fn header_value(&self, name: &str) -> Option<&str> {
		find_header(&self.headers, name)
	}

	/// Decodes the body as JSON, reporting the failing path on mismatch.
	pub fn json<T>(&self) -> Result<T, serde_path_to_error::Error<serde_json::Error>>
	where
		T: for<'de> Deserialize<'de>,
	{
		let de = &mut serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(de)
	}
}

/// HTTP client shared by the authorizer and the rest of the host application.
///
/// Cloning is cheap; all clones share the same transport and interceptor list. The
/// interceptor list is fixed at [`SharedHttpClientBuilder::build`] time.
#[derive(Clone)]
pub struct SharedHttpClient {
	transport: Arc<dyn HttpTransport>,
	interceptors: Arc<[Arc<dyn FailureInterceptor>]>,
}
impl SharedHttpClient {
	/// Starts building a client around `transport`.
	pub fn builder(transport: Arc<dyn HttpTransport>) -> SharedHttpClientBuilder {
		SharedHttpClientBuilder { transport, interceptors: Vec::new() }
	}

	/// Builds a client whose only interceptor invalidates `session` on every failure.
	pub fn with_session_invalidation(
		transport: Arc<dyn HttpTransport>,
		session: Arc<dyn SessionStore>,
	) -> Self {
		Self::builder(transport)
			.intercept(Arc::new(SessionInvalidationInterceptor::new(session)))
			.build()
	}

	/// Number of installed interceptors.
	pub fn interceptor_count(&self) -> usize {
		self.interceptors.len()
	}

	/// Sends `request` once.
	///
	/// Responses outside the 2xx range become [`FailureKind::Status`] failures. Every
	/// failure is passed to each interceptor, in installation order, before it is
	/// returned unchanged.
	pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpFailure> {
		let failure = match self.transport.execute(request).await {
			Ok(response) if response.is_success() => return Ok(response),
			Ok(response) => HttpFailure::status(response.status, response.body),
			Err(failure) => failure,
		};

		obs::record_http_failure(failure.kind);

		for interceptor in self.interceptors.iter() {
			interceptor.on_failure(&failure);
		}

		Err(failure)
	}
}
impl Debug for SharedHttpClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SharedHttpClient")
			.field("interceptors", &self.interceptors.len())
			.finish_non_exhaustive()
	}
}

/// Builder for [`SharedHttpClient`].
pub struct SharedHttpClientBuilder {
	transport: Arc<dyn HttpTransport>,
	interceptors: Vec<Arc<dyn FailureInterceptor>>,
}
impl SharedHttpClientBuilder {
	/// Appends an interceptor; interceptors run in the order they were added.
	pub fn intercept(mut self, interceptor: Arc<dyn FailureInterceptor>) -> Self {
		self.interceptors.push(interceptor);

		self
	}

	/// Freezes the interceptor list and produces the client.
	pub fn build(self) -> SharedHttpClient {
		SharedHttpClient { transport: self.transport, interceptors: self.interceptors.into() }
	}
}
impl Debug for SharedHttpClientBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SharedHttpClientBuilder")
			.field("interceptors", &self.interceptors.len())
			.finish_non_exhaustive()
	}
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
	headers
		.iter()
		.find(|(key, _)| key.eq_ignore_ascii_case(name))
		.map(|(_, value)| value.as_str())
}
