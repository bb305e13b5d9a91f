//! Decoded response bodies.
//!
//! Every endpoint answers with JSON, including failures. A body decodes into a [`Reply`],
//! either the service's [`ErrorEnvelope`] or the endpoint's success shape.

use std::{
	collections::BTreeMap,
	ops::{Div, Mul},
};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

use crate::currency::CurrencyCode;

/// A decoded response body.
///
/// A JSON object with `"error": true` is a [`Failure`](Reply::Failure), anything else is
/// decoded as the payload, so a `Reply<serde_json::Value>` still separates error envelopes
/// from other bodies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply<T> {
	/// The service reported an error.
	Failure(ErrorEnvelope),
	/// The endpoint's payload.
	Success(T),
}

fn is_error_envelope(value: &serde_json::Value) -> bool {
	value.get("error").and_then(serde_json::Value::as_bool).unwrap_or(false)
}

impl<T: DeserializeOwned> Reply<T> {
	/// Decodes a response body.
	///
	/// Payload errors keep serde_json's message and position in `body`.
	pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
		let value: serde_json::Value = serde_json::from_slice(body)?;
		if is_error_envelope(&value) {
			serde_json::from_value(value).map(Self::Failure)
		} else {
			serde_json::from_slice(body).map(Self::Success)
		}
	}
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Reply<T> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let value = serde_json::Value::deserialize(deserializer)?;
		let reply = if is_error_envelope(&value) {
			serde_json::from_value(value).map(Self::Failure)
		} else {
			serde_json::from_value(value).map(Self::Success)
		};
		reply.map_err(serde::de::Error::custom)
	}
}

impl<T> Reply<T> {
	/// Whether the service reported an error.
	pub fn is_failure(&self) -> bool {
		matches!(self, Self::Failure(_))
	}

	/// Gets the payload, if any.
	pub fn success(&self) -> Option<&T> {
		match self {
			Self::Success(payload) => Some(payload),
			Self::Failure(_) => None,
		}
	}

	/// Gets the error envelope, if any.
	pub fn failure(&self) -> Option<&ErrorEnvelope> {
		match self {
			Self::Failure(envelope) => Some(envelope),
			Self::Success(_) => None,
		}
	}

	/// Converts into a [`Result`] so the error envelope can be propagated with `?`.
	pub fn into_result(self) -> Result<T, ErrorEnvelope> {
		match self {
			Self::Success(payload) => Ok(payload),
			Self::Failure(envelope) => Err(envelope),
		}
	}
}

/// An [error](https://docs.openexchangerates.org/reference/errors) reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{status} {message}: {description}")]
pub struct ErrorEnvelope {
	/// Always `true`.
	pub error: bool,
	/// The HTTP status code.
	pub status: u16,
	/// Short machine-readable message, e.g. `invalid_app_id`.
	pub message: String,
	/// Human-readable description.
	#[serde(default)]
	pub description: String,
}

impl ErrorEnvelope {
	/// Classifies the [`message`](ErrorEnvelope::message).
	pub fn kind(&self) -> RemoteErrorKind {
		RemoteErrorKind::from(self.message.as_str())
	}
}

/// Known [`ErrorEnvelope::message`] values.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RemoteErrorKind {
	/// `not_found`: the requested resource does not exist (404).
	NotFound,
	/// `missing_app_id`: no app id was sent (401).
	MissingAppId,
	/// `invalid_app_id`: the app id was rejected (401).
	InvalidAppId,
	/// `not_allowed`: the account is over its request quota (429).
	NotAllowed,
	/// `access_restricted`: the plan does not cover the request (403).
	AccessRestricted,
	/// `invalid_base`: the requested base currency is not supported (400).
	InvalidBase,
	/// `not_available`: no rates for the requested date (400).
	NotAvailable,
	/// Anything else.
	Other,
}

impl From<&str> for RemoteErrorKind {
	fn from(message: &str) -> Self {
		match message {
			"not_found" => Self::NotFound,
			"missing_app_id" => Self::MissingAppId,
			"invalid_app_id" => Self::InvalidAppId,
			"not_allowed" => Self::NotAllowed,
			"access_restricted" => Self::AccessRestricted,
			"invalid_base" => Self::InvalidBase,
			"not_available" => Self::NotAvailable,
			_ => Self::Other,
		}
	}
}

/// Payload of the `latest` and `historical` endpoints.
///
/// Fields the service adds beyond these are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatesEnvelope<R = f64> {
	/// Usage disclaimer.
	pub disclaimer: String,
	/// License link.
	pub license: String,
	/// UNIX time of the rates.
	pub timestamp: i64,
	/// The base currency the rates are relative to.
	pub base: String,
	/// Units of each currency per one unit of [`base`](RatesEnvelope::base).
	pub rates: BTreeMap<String, R>,
}

/// Rates decoded as decimals.
///
/// Numbers go through their shortest `f64` representation, so rates with more significant
/// digits than an `f64` holds are rounded.
#[cfg(feature = "rust_decimal")]
pub type DecimalRates = RatesEnvelope<rust_decimal::Decimal>;

impl<R> RatesEnvelope<R> {
	/// The [`timestamp`](RatesEnvelope::timestamp) as a date-time.
	pub fn datetime(&self) -> Option<DateTime<Utc>> {
		DateTime::<Utc>::from_timestamp(self.timestamp, 0)
	}

	/// Gets the rate for the given currency, if present.
	pub fn get(&self, currency: CurrencyCode) -> Option<&R> {
		self.rates.get(currency.as_str())
	}

	/// Iterates over currency codes and their rates.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &R)> + '_ {
		self.rates.iter().map(|(code, rate)| (code.as_str(), rate))
	}

	/// Converts an amount between currencies through the base currency.
	///
	/// Returns [`None`] if either the `from` or `to` currencies are missing.
	pub fn convert(&self, amount: &R, from: CurrencyCode, to: CurrencyCode) -> Option<R>
	where for<'x> &'x R: Div<&'x R, Output = R>, for<'x> &'x R: Mul<R, Output = R> {
		let from_value = self.get(from)?;
		let to_value = self.get(to)?;
		Some(amount * (to_value / from_value))
	}
}

/// Payload of the `currencies` endpoint: currency codes and their display names.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currencies(pub BTreeMap<String, String>);

impl Currencies {
	/// Gets the display name of the given currency.
	pub fn name(&self, currency: CurrencyCode) -> Option<&str> {
		self.0.get(currency.as_str()).map(String::as_str)
	}

	/// Iterates over currency codes and their names.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
		self.0.iter().map(|(code, name)| (code.as_str(), name.as_str()))
	}

	/// Gets the count of currencies.
	pub fn len(&self) -> usize { self.0.len() }

	/// Gets whether there are no currencies.
	pub fn is_empty(&self) -> bool { self.0.is_empty() }
}
