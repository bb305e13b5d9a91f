//! URL building

use std::fmt::{self, Display, Formatter};

use chrono::Datelike;

use crate::currency::CurrencyCode;

/// The provider's API root.
pub const DEFAULT_ENDPOINT: &str = "http://openexchangerates.org/api/";

macro_rules! deffile {
	($($id:ident <- $file:literal),* $(,)?) => {
		$(
			#[doc = concat!("Path of the `", $file, "` endpoint.")]
			pub const $id: &str = $file;
		)*
	};
}

deffile!(
	LATEST <- "latest.json",
	CURRENCIES <- "currencies.json",
	HISTORICAL <- "historical",
);

/// Calendar date of a [`historical`](Endpoint::Historical) request.
///
/// The date is not validated, out-of-range dates are reported by the service.
#[derive(Debug, Hash, Clone, Copy, PartialEq, PartialOrd, Eq, Ord)]
pub struct HistoricalDate {
	/// Year.
	pub year: i32,
	/// Month, 1-based.
	pub month: u32,
	/// Day of the month, 1-based.
	pub day: u32,
}

impl HistoricalDate {
	/// Creates a new [`HistoricalDate`].
	pub const fn new(year: i32, month: u32, day: u32) -> Self {
		Self { year, month, day }
	}

	/// Takes the calendar components of any [`chrono`] date.
	pub fn from_date(date: &impl Datelike) -> Self {
		Self::new(date.year(), date.month(), date.day())
	}
}

/// Formats as `YYYY-MM-DD`.
impl Display for HistoricalDate {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
	}
}

/// An API endpoint.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
	/// `latest.json`
	Latest,
	/// `currencies.json`
	Currencies,
	/// `historical/YYYY-MM-DD.json`
	Historical(HistoricalDate),
}

impl Display for Endpoint {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Self::Latest => f.write_str(LATEST),
			Self::Currencies => f.write_str(CURRENCIES),
			Self::Historical(date) => write!(f, "{HISTORICAL}/{date}.json"),
		}
	}
}

/// Optional query parameters of the rates endpoints.
///
/// # Examples
/// ```
/// # use openexrt::{CurrencyCode, Query};
/// let query = Query::new().base(CurrencyCode::EUR).symbols([CurrencyCode::USD, CurrencyCode::GBP]);
/// assert_eq!(query.base, Some(CurrencyCode::EUR));
/// ```
#[derive(Debug, Hash, Default, Clone, PartialEq, Eq)]
pub struct Query {
	/// The `base` currency, the provider defaults to [`USD`](CurrencyCode::USD).
	pub base: Option<CurrencyCode>,
	/// The `symbols` to limit the rates to, empty for all.
	pub symbols: Vec<CurrencyCode>,
}

impl Query {
	/// Creates an empty [`Query`].
	pub const fn new() -> Self {
		Self { base: None, symbols: Vec::new() }
	}

	/// Sets the [`base`](Query::base).
	pub fn base(mut self, base: impl Into<Option<CurrencyCode>>) -> Self {
		self.base = base.into();
		self
	}

	/// Sets the [`symbols`](Query::symbols).
	pub fn symbols(mut self, symbols: impl IntoIterator<Item = CurrencyCode>) -> Self {
		self.symbols = symbols.into_iter().collect();
		self
	}
}

pub(crate) trait UrlPart {
	/// Appends the part to `url` behind `prefix`.
	///
	/// Returns whether there was anything to write.
	fn write_url_part(&self, url: &mut String, prefix: &str) -> bool;
}

impl<Inner: UrlPart> UrlPart for Option<Inner> {
	#[inline] fn write_url_part(&self, url: &mut String, prefix: &str) -> bool {
		match self {
			Some(inner) => inner.write_url_part(url, prefix),
			None => false,
		}
	}
}

struct Base(CurrencyCode);

impl UrlPart for Base {
	fn write_url_part(&self, url: &mut String, prefix: &str) -> bool {
		url.push_str(prefix);
		url.push_str("base=");
		url.push_str(self.0.as_str());
		true
	}
}

struct Symbols<'a>(&'a [CurrencyCode]);

impl UrlPart for Symbols<'_> {
	fn write_url_part(&self, url: &mut String, prefix: &str) -> bool {
		let mut symbols = self.0.iter();
		if let Some(head) = symbols.next() {
			url.push_str(prefix);
			url.push_str("symbols=");
			url.push_str(head.as_str());
			for symbol in symbols {
				url.push(',');
				url.push_str(symbol.as_str());
			}
			true
		} else { false }
	}
}

impl UrlPart for Query {
	fn write_url_part(&self, url: &mut String, prefix: &str) -> bool {
		let base = self.base.map(Base).write_url_part(url, prefix);
		let symbols = Symbols(&self.symbols).write_url_part(url, prefix);
		base || symbols
	}
}

/// Builds the full request URL.
///
/// The app id is appended verbatim, without percent-encoding.
pub(crate) fn build(root: &str, endpoint: &Endpoint, app_id: &str, query: &Query) -> String {
	let mut url = String::with_capacity(root.len() + 64 + app_id.len());
	url.push_str(root);
	if !root.is_empty() && !root.ends_with('/') {
		url.push('/');
	}
	url.push_str(&endpoint.to_string());
	url.push_str("?app_id=");
	url.push_str(app_id);
	query.write_url_part(&mut url, "&");
	url
}
