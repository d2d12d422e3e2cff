use reqwest::StatusCode;

pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to parse as URL '{url}'")]
    InvalidSyntaxUrl {
        url: String,

        #[source]
        source: url::ParseError,
    },

    #[error("Cannot use '{0}' as a base URL")]
    CannotBeABaseUrl(String),

    #[error("Invalid API token: {0}")]
    InvalidToken(#[source] reqwest::header::InvalidHeaderValue),

    #[error("Unsafe path '{path}' from server: {reason}")]
    UnsafePath { path: String, reason: &'static str },

    #[error("Multiple '{exercise}' exercises exist (possible tracks: {})", .possible_track_ids.join(", "))]
    TrackAmbiguous {
        /// Requested exercise, or the solution uuid when none was given.
        exercise: String,
        possible_track_ids: Vec<String>,
    },

    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("Unexpected response code '{got}' (expected '{expected}') while requesting to {requested_url}")]
    UnexpectedResponseCode {
        got: StatusCode,
        expected: StatusCode,
        requested_url: String,
    },

    #[error("Http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
