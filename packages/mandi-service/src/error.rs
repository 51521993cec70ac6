pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fatal request outcomes. Degraded rating enrichment is deliberately not
/// here: it is reported per response, not raised as an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid argument: {message}")]
	InvalidArgument { message: String },
	#[error("Store unavailable: {message}")]
	StoreUnavailable { message: String },
}
impl From<mandi_storage::Error> for Error {
	fn from(err: mandi_storage::Error) -> Self {
		Self::StoreUnavailable { message: err.to_string() }
	}
}
