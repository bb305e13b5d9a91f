//! [`Client`] for the [Open Exchange Rates](https://openexchangerates.org/) API.

use std::time::Duration;

use chrono::Datelike;
use serde::{de::DeserializeOwned, Deserialize};

use crate::{
	error::Error,
	response::{Currencies, RatesEnvelope, Reply},
	url::{self, Endpoint, HistoricalDate, Query, DEFAULT_ENDPOINT},
};

/// [`Client`] configuration.
///
/// Deserializes from camelCase keys, e.g. `{"appId": "…"}`. Unknown keys are ignored.
///
/// # Examples
/// ```
/// # use openexrt::Options;
/// let options: Options = serde_json::from_str(r#"{"appId": "abc", "color": "red"}"#).unwrap();
/// assert_eq!(options.app_id.as_deref(), Some("abc"));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
	/// The [App ID](https://docs.openexchangerates.org/reference/authentication) sent on every request.
	pub app_id: Option<String>,
	/// API root, defaults to [`DEFAULT_ENDPOINT`].
	pub endpoint: Option<String>,
	/// Deadline of each request. There is none by default.
	#[serde(skip)]
	pub timeout: Option<Duration>,
}

impl Options {
	/// Sets the [`app_id`](Options::app_id).
	pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
		self.app_id = Some(app_id.into());
		self
	}

	/// Sets the [`endpoint`](Options::endpoint).
	pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
		self.endpoint = Some(endpoint.into());
		self
	}

	/// Sets the [`timeout`](Options::timeout).
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}
}

/// Blocking client.
///
/// Every call sends exactly one GET request and decodes the whole body, without retries.
/// Errors reported by the service are returned as [`Reply::Failure`], only transport and
/// decoding failures are [`Error`]s.
///
/// Calls only borrow the client immutably, so it can be shared across threads. Changing the
/// app id requires exclusive access.
///
/// # Examples
/// ```no_run
/// # use openexrt::{Client, CurrencyCode, Options};
/// let client = Client::new(Options::default().app_id("…"))?;
/// if let Some(rates) = client.latest()?.success() {
///     println!("1 USD = {:?} EUR", rates.get(CurrencyCode::EUR));
/// }
/// # Ok::<(), openexrt::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Client {
	app_id: String,
	endpoint: String,
	http: reqwest::blocking::Client,
}

impl Client {
	/// Creates a new [`Client`] with its own HTTP transport.
	pub fn new(options: Options) -> Result<Self, Error> {
		// reqwest defaults to a 30s deadline, requests here have none unless asked for.
		let http = reqwest::blocking::Client::builder()
			.timeout(options.timeout)
			.build()?;
		Ok(Self::with_http(options, http))
	}

	/// Creates a new [`Client`] over the given HTTP transport.
	///
	/// The transport's own timeout applies, [`Options::timeout`] is ignored.
	pub fn with_http(options: Options, http: reqwest::blocking::Client) -> Self {
		Self {
			app_id: options.app_id.unwrap_or_default(),
			endpoint: options.endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned()),
			http,
		}
	}

	/// Gets the configured app id, empty if unset.
	pub fn app_id(&self) -> &str {
		&self.app_id
	}

	/// Sets the app id used by subsequent requests.
	pub fn set_app_id(&mut self, app_id: impl Into<String>) -> &mut Self {
		self.app_id = app_id.into();
		self
	}

	/// Gets the API root.
	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	/// Fetches the [latest rates](https://docs.openexchangerates.org/reference/latest-json).
	pub fn latest(&self) -> Result<Reply<RatesEnvelope>, Error> {
		self.latest_with(&Query::new())
	}

	/// Fetches the latest rates with a custom base currency or symbols.
	pub fn latest_with<R: DeserializeOwned>(&self, query: &Query) -> Result<Reply<RatesEnvelope<R>>, Error> {
		self.fetch(&Endpoint::Latest, query, Reply::from_slice)
	}

	/// Fetches the [supported currencies](https://docs.openexchangerates.org/reference/currencies-json).
	///
	/// The service does not require a valid app id here, the configured one is sent anyway.
	pub fn currencies(&self) -> Result<Reply<Currencies>, Error> {
		self.fetch(&Endpoint::Currencies, &Query::new(), Reply::from_slice)
	}

	/// Fetches the [rates at the end of the given day](https://docs.openexchangerates.org/reference/historical-json).
	///
	/// The date is not checked, the service reports unavailable dates.
	pub fn historical(&self, date: impl Datelike) -> Result<Reply<RatesEnvelope>, Error> {
		self.historical_with(date, &Query::new())
	}

	/// Fetches historical rates with a custom base currency or symbols.
	pub fn historical_with<R: DeserializeOwned>(
		&self,
		date: impl Datelike,
		query: &Query,
	) -> Result<Reply<RatesEnvelope<R>>, Error> {
		self.fetch(&Endpoint::Historical(HistoricalDate::from_date(&date)), query, Reply::from_slice)
	}

	/// Fetches an endpoint as a dynamic JSON value.
	pub fn fetch_value(&self, endpoint: Endpoint) -> Result<serde_json::Value, Error> {
		self.fetch(&endpoint, &Query::new(), |body| serde_json::from_slice(body))
	}

	/// Gets the full request URL for an endpoint.
	pub fn url(&self, endpoint: &Endpoint, query: &Query) -> String {
		url::build(&self.endpoint, endpoint, &self.app_id, query)
	}

	/// Sends the request and decodes the body, regardless of the HTTP status.
	fn fetch<T>(
		&self,
		endpoint: &Endpoint,
		query: &Query,
		decode: impl FnOnce(&[u8]) -> serde_json::Result<T>,
	) -> Result<T, Error> {
		log::debug!(target: "openexrt::client", "GET {endpoint}");
		let response = self.http.get(self.url(endpoint, query)).send()?;
		let status = response.status();
		let body = response.bytes()?;
		log::trace!(target: "openexrt::client", "{endpoint} responded {status} with {} bytes", body.len());
		Ok(decode(&body[..])?)
	}
}
