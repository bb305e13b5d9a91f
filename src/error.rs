//! [`Error`] type.

/// A local failure of the HTTP transport or of JSON decoding.
///
/// Errors reported by the remote service are not [`Error`]s, they decode into
/// [`ErrorEnvelope`](crate::ErrorEnvelope) values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The request could not be sent or its response could not be read.
	#[error("transport error: {0}")]
	Transport(#[from] reqwest::Error),
	/// The response body is not JSON of the expected shape.
	#[error("failed to decode the response: {0}")]
	Decode(#[from] serde_json::Error),
}

impl Error {
	/// Whether the error came from the HTTP transport.
	pub fn is_transport(&self) -> bool {
		matches!(self, Self::Transport(_))
	}

	/// Whether the error came from decoding the response body.
	pub fn is_decode(&self) -> bool {
		matches!(self, Self::Decode(_))
	}
}
