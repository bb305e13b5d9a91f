use std::time::Duration;

use chrono::NaiveDate;
use httpmock::prelude::*;
use openexrt::{Client, CurrencyCode, Endpoint, Error, Options, Query, RatesEnvelope, RemoteErrorKind};
use serde_json::json;

const INVALID_APP_ID: &str =
	"Invalid App ID provided - please sign up at https://openexchangerates.org/signup, or contact support@openexchangerates.org. Thanks!";
const NOT_AVAILABLE: &str =
	"Historical rates for the requested date are not available - please try a different date, or contact support@openexchangerates.org.";

fn client(server: &MockServer, app_id: &str) -> Client {
	Client::new(Options::default().app_id(app_id).endpoint(server.url("/api/"))).unwrap()
}

fn rates_body(base: &str) -> serde_json::Value {
	json!({
		"disclaimer": "Usage subject to terms: https://openexchangerates.org/terms",
		"license": "https://openexchangerates.org/license",
		"timestamp": 1_709_596_800,
		"base": base,
		"rates": { "EUR": 0.92, "GBP": 0.79, "ILS": 3.6, "USD": 1 },
	})
}

fn assert_rates_shape(rates: &RatesEnvelope) {
	assert!(!rates.disclaimer.is_empty());
	assert!(!rates.license.is_empty());
	assert!(!rates.base.is_empty());
	assert!(rates.rates.keys().all(|code| !code.is_empty()));
}

#[test]
fn latest_decodes_rates() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET).path("/api/latest.json").query_param("app_id", "valid");
		then.status(200).json_body(rates_body("USD"));
	});

	let reply = client(&server, "valid").latest().unwrap();
	mock.assert();
	let rates = reply.into_result().unwrap();
	assert_rates_shape(&rates);
	assert_eq!(rates.base, "USD");
	assert_eq!(rates.get(CurrencyCode::EUR), Some(&0.92));
	assert_eq!(rates.get(CurrencyCode::USD), Some(&1.0));
}

#[test]
fn invalid_app_id_is_returned_as_data() {
	let server = MockServer::start();
	let envelope = json!({
		"error": true,
		"status": 401,
		"message": "invalid_app_id",
		"description": INVALID_APP_ID,
	});
	let latest = server.mock(|when, then| {
		when.method(GET).path("/api/latest.json").query_param("app_id", "danbelden.com");
		then.status(401).json_body(envelope.clone());
	});
	let historical = server.mock(|when, then| {
		when.method(GET).path("/api/historical/2024-03-05.json").query_param("app_id", "danbelden.com");
		then.status(401).json_body(envelope.clone());
	});

	let client = client(&server, "danbelden.com");
	let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
	for reply in [client.latest().unwrap(), client.historical(date).unwrap()] {
		let failure = reply.failure().unwrap();
		assert!(failure.error);
		assert_eq!(failure.status, 401);
		assert_eq!(failure.message, "invalid_app_id");
		assert_eq!(failure.description, INVALID_APP_ID);
		assert_eq!(failure.kind(), RemoteErrorKind::InvalidAppId);
	}
	latest.assert();
	historical.assert();
}

#[test]
fn historical_requests_zero_padded_date() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET).path("/api/historical/2024-03-05.json").query_param("app_id", "X");
		then.status(200).json_body(rates_body("USD"));
	});

	let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
	let rates = client(&server, "X").historical(date).unwrap().into_result().unwrap();
	mock.assert();
	assert_rates_shape(&rates);
}

#[test]
fn unavailable_date_is_returned_as_data() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET).path("/api/historical/2031-01-08.json");
		then.status(400).json_body(json!({
			"error": true,
			"status": 400,
			"message": "not_available",
			"description": NOT_AVAILABLE,
		}));
	});

	let date = NaiveDate::from_ymd_opt(2031, 1, 8).unwrap();
	let reply = client(&server, "valid").historical(date).unwrap();
	mock.assert();
	let failure = reply.into_result().unwrap_err();
	assert_eq!(failure.status, 400);
	assert_eq!(failure.kind(), RemoteErrorKind::NotAvailable);
	assert_eq!(failure.description, NOT_AVAILABLE);
}

#[test]
fn currencies_sends_app_id_anyway() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET).path("/api/currencies.json").query_param("app_id", "anything");
		then.status(200).json_body(json!({
			"EUR": "Euro",
			"GBP": "British Pound Sterling",
			"USD": "United States Dollar",
		}));
	});

	let currencies = client(&server, "anything").currencies().unwrap().into_result().unwrap();
	mock.assert();
	assert_eq!(currencies.len(), 3);
	assert!(currencies.iter().all(|(code, name)| !code.is_empty() && !name.is_empty()));
	assert_eq!(currencies.name(CurrencyCode::GBP), Some("British Pound Sterling"));
}

#[test]
fn query_sets_base_and_symbols() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET)
			.path("/api/latest.json")
			.query_param("app_id", "X")
			.query_param("base", "EUR")
			.query_param("symbols", "USD,GBP");
		then.status(200).json_body(rates_body("EUR"));
	});

	let query = Query::new().base(CurrencyCode::EUR).symbols([CurrencyCode::USD, CurrencyCode::GBP]);
	let reply = client(&server, "X").latest_with::<f64>(&query).unwrap();
	mock.assert();
	assert_eq!(reply.success().unwrap().base, "EUR");
}

#[test]
fn fetch_value_is_dynamic() {
	let server = MockServer::start();
	server.mock(|when, then| {
		when.method(GET).path("/api/latest.json");
		then.status(200).json_body(rates_body("USD"));
	});

	let value = client(&server, "X").fetch_value(Endpoint::Latest).unwrap();
	assert_eq!(value["base"], "USD");
	assert!(value["timestamp"].is_i64());
	assert!(value["rates"].as_object().unwrap().values().all(|rate| rate.is_number()));
}

#[test]
fn non_json_body_is_decode_error() {
	let server = MockServer::start();
	server.mock(|when, then| {
		when.method(GET).path("/api/latest.json");
		then.status(200).body("<html>maintenance</html>");
	});

	let error = client(&server, "X").latest().unwrap_err();
	assert!(error.is_decode(), "{error}");
}

#[test]
fn decode_error_names_the_cause() {
	let server = MockServer::start();
	server.mock(|when, then| {
		when.method(GET).path("/api/latest.json");
		then.status(200).json_body(json!({
			"disclaimer": "d",
			"license": "l",
			"timestamp": "x",
			"base": "USD",
			"rates": {},
		}));
	});
	server.mock(|when, then| {
		when.method(GET).path("/api/historical/2024-03-05.json");
		then.status(200).json_body(json!({
			"disclaimer": "d",
			"license": "l",
			"timestamp": 0,
			"base": "USD",
			"rates": { "VEF": null },
		}));
	});

	let client = client(&server, "X");
	match client.latest().unwrap_err() {
		Error::Decode(error) => {
			assert!(error.to_string().contains(r#"invalid type: string "x", expected i64"#), "{error}");
			assert!(error.column() > 0, "{error}");
		}
		error => panic!("unexpected {error}"),
	}
	let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
	let error = client.historical(date).unwrap_err();
	assert!(error.to_string().contains("invalid type: null, expected f64"), "{error}");
	assert!(!error.to_string().contains("untagged"), "{error}");
}

/// The app id is appended raw; reqwest's URL parser then sends a space as `%20`, while `&`
/// stays a separator and splits the credential into a second parameter.
#[test]
fn app_id_on_the_wire() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET)
			.path("/api/latest.json")
			.query_param("app_id", "a b")
			.query_param("extra", "1");
		then.status(200).json_body(rates_body("USD"));
	});

	let client = client(&server, "a b&extra=1");
	assert!(client.url(&Endpoint::Latest, &Query::new()).ends_with("latest.json?app_id=a b&extra=1"));
	assert!(!client.latest().unwrap().is_failure());
	mock.assert();
}

#[test]
fn refused_connection_is_transport_error() {
	let client = Client::new(Options::default().app_id("X").endpoint("http://127.0.0.1:1/api/")).unwrap();
	let error = client.latest().unwrap_err();
	assert!(error.is_transport(), "{error}");
}

#[test]
fn timeout_is_transport_error() {
	let server = MockServer::start();
	server.mock(|when, then| {
		when.method(GET).path("/api/latest.json");
		then.status(200).delay(Duration::from_secs(2)).json_body(rates_body("USD"));
	});

	let options = Options::default()
		.app_id("X")
		.endpoint(server.url("/api/"))
		.timeout(Duration::from_millis(200));
	let error = Client::new(options).unwrap().latest().unwrap_err();
	assert!(error.is_transport(), "{error}");
}

#[test]
fn set_app_id_applies_to_next_request() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET).path("/api/latest.json").query_param("app_id", "second");
		then.status(200).json_body(rates_body("USD"));
	});

	let mut client = client(&server, "first");
	client.set_app_id("second");
	assert!(!client.latest().unwrap().is_failure());
	mock.assert();
}
