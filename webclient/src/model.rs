use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use url::Url;

use crate::{error::Result, util};

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Successful body of the download endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SolutionEnvelope {
    pub solution: SolutionPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SolutionPayload {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    pub user: UserPayload,
    pub exercise: ExercisePayload,
    pub file_download_base_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: Vec<String>,
    #[serde(default)]
    pub iteration: Option<IterationPayload>,
}

impl SolutionPayload {
    pub fn file_download_base_url(&self) -> Result<Url> {
        util::parse_url(&self.file_download_base_url)
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.iteration.as_ref().and_then(|it| it.submitted_at)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserPayload {
    pub handle: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_requester: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExercisePayload {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instructions_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub auto_approve: bool,
    pub track: TrackPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackPayload {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IterationPayload {
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Body of a failed request. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: Option<ApiErrorPayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorPayload {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: ApiErrorKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub possible_track_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ApiErrorKind {
    TrackAmbiguous,
    #[default]
    #[serde(other)]
    Other,
}
