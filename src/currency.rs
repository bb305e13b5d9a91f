//! [Currency codes](CurrencyCode).

use std::{
	fmt::{self, Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// [Currency code](https://en.wikipedia.org/wiki/ISO_4217).
///
/// Used to pick rates out of a [`RatesEnvelope`](crate::RatesEnvelope) and for the
/// `base` and `symbols` parameters of a [`Query`](crate::Query).
#[derive(Debug, Hash, Clone, Copy, PartialEq, PartialOrd, Eq, Ord)]
pub struct CurrencyCode {
	/// The code in uppercase alpha ASCII bytes.
	code: [u8; 3],
}

/// The default currency code is [`USD`](CurrencyCode::USD).
///
/// It is the provider's default base currency.
impl Default for CurrencyCode {
	#[inline] fn default() -> Self { Self::USD }
}

macro_rules! defcodes {
	($($id:ident),* $(,)?) => {
		$(
			#[doc = concat!("`", stringify!($id), "`")]
			pub const $id: CurrencyCode = code(stringify!($id));
		)*
	};
}

const fn code(s: &str) -> CurrencyCode {
	let bytes = s.as_bytes();
	match CurrencyCode::new([bytes[0], bytes[1], bytes[2]]) {
		Ok(code) => code,
		Err(_) => panic!("currency code must be 3 uppercase letters"),
	}
}

impl CurrencyCode {
	defcodes!(AUD, BTC, CAD, CHF, CNY, EUR, GBP, HKD, ILS, JPY, NZD, SEK, USD);

	/// Creates a new [`CurrencyCode`] from uppercase alpha ASCII bytes.
	pub const fn new(code: [u8; 3]) -> Result<Self, InvalidCurrencyCodeError> {
		if code[0].is_ascii_uppercase() && code[1].is_ascii_uppercase() && code[2].is_ascii_uppercase() {
			Ok(Self { code })
		} else {
			Err(InvalidCurrencyCodeError)
		}
	}

	/// Gets the code as a string slice.
	pub fn as_str(&self) -> &str {
		// The code is ASCII per the invariant documented in CurrencyCode::code.
		std::str::from_utf8(&self.code).unwrap_or_default()
	}
}

impl TryFrom<[u8; 3]> for CurrencyCode {
	type Error = InvalidCurrencyCodeError;

	fn try_from(value: [u8; 3]) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

impl<'a> TryFrom<&'a [u8]> for CurrencyCode {
	type Error = InvalidCurrencyCodeError;

	fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
		let values: [u8; 3] = value.try_into().map_err(|_| InvalidCurrencyCodeError)?;
		Self::try_from(values)
	}
}

impl<'a> TryFrom<&'a str> for CurrencyCode {
	type Error = InvalidCurrencyCodeError;

	fn try_from(value: &'a str) -> Result<Self, Self::Error> {
		Self::try_from(value.as_bytes())
	}
}

impl FromStr for CurrencyCode {
	type Err = InvalidCurrencyCodeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		s.try_into()
	}
}

impl AsRef<[u8]> for CurrencyCode {
	fn as_ref(&self) -> &[u8] {
		&self.code
	}
}

impl AsRef<str> for CurrencyCode {
	fn as_ref(&self) -> &str {
		self.as_str()
	}
}

impl Display for CurrencyCode {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		self.as_str().fmt(f)
	}
}

impl Serialize for CurrencyCode {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for CurrencyCode {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let code = String::deserialize(deserializer)?;
		code.parse().map_err(serde::de::Error::custom)
	}
}

/// Invalid currency code error.
///
/// Valid currency codes are three uppercase alpha ASCII characters.
#[derive(Debug, Hash, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, thiserror::Error)]
#[error("invalid currency code")]
pub struct InvalidCurrencyCodeError;
