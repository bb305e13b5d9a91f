//! [Open Exchange Rates](https://openexchangerates.org/) API library.
//!
//! [`Client`] fetches the latest rates, the supported currencies and historical rates.
//! Bodies decode into a [`Reply`]: either the endpoint's payload or the service's
//! [`ErrorEnvelope`], which is data rather than an [`Error`].

#![deny(missing_docs)]

mod client;
pub use client::{Client, Options};

pub mod currency;
pub use currency::{CurrencyCode, InvalidCurrencyCodeError};

mod error;
pub use error::Error;

pub mod response;
pub use response::{Currencies, ErrorEnvelope, RatesEnvelope, RemoteErrorKind, Reply};
#[cfg(feature = "rust_decimal")]
pub use response::DecimalRates;

pub mod url;
pub use url::{Endpoint, HistoricalDate, Query};
