use serde::{Deserialize, Serialize};
use url::Url;

use crate::{error::*, util};

pub const DEFAULT_API_BASE_URL: &str = "https://api.exercism.io/v1";

/// Where the API lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "ApiConfig::default_base_url")]
    pub base_url: Url,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            token: None,
        }
    }
}

impl ApiConfig {
    fn default_base_url() -> Url {
        Url::parse(DEFAULT_API_BASE_URL).expect("DEFAULT_API_BASE_URL must be a valid URL")
    }

    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Endpoint URL made of `base_url` followed by `segments`.
    pub fn url<I, S>(&self, segments: I) -> Result<Url>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        util::join_segments(&self.base_url, segments)
    }
}

/// What to ask the download endpoint for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadTarget {
    /// A specific solution, possibly someone else's.
    Solution { uuid: String },

    /// The requester's latest solution of an exercise.
    Latest {
        exercise: String,
        track: Option<String>,
    },
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

impl DownloadTarget {
    const LATEST_SLUG: &'static str = "latest";

    /// Select a target from raw command-line input. Empty strings count as absent.
    /// A uuid takes precedence over exercise and track.
    pub fn from_args(
        uuid: Option<&str>,
        exercise: Option<&str>,
        track: Option<&str>,
    ) -> Option<Self> {
        if let Some(uuid) = non_empty(uuid) {
            return Some(Self::Solution {
                uuid: uuid.to_owned(),
            });
        }
        non_empty(exercise).map(|exercise| Self::Latest {
            exercise: exercise.to_owned(),
            track: non_empty(track).map(str::to_owned),
        })
    }

    pub fn slug(&self) -> &str {
        match self {
            Self::Solution { uuid } => uuid,
            Self::Latest { .. } => Self::LATEST_SLUG,
        }
    }

    pub fn exercise(&self) -> Option<&str> {
        match self {
            Self::Solution { .. } => None,
            Self::Latest { exercise, .. } => Some(exercise),
        }
    }

    pub fn url(&self, api: &ApiConfig) -> Result<Url> {
        let mut url = api.url(["download", self.slug()])?;
        if let Self::Latest { exercise, track } = self {
            let mut query = url.query_pairs_mut();
            query.append_pair("exercise_id", exercise);
            if let Some(track) = track {
                query.append_pair("track_id", track);
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn api() -> ApiConfig {
        ApiConfig::new(Url::parse("https://api.example.com/v1").unwrap())
    }

    #[test]
    fn latest_with_track() {
        let t = DownloadTarget::from_args(None, Some("bob"), Some("ruby")).unwrap();
        assert_eq!(
            t.url(&api()).unwrap().as_str(),
            "https://api.example.com/v1/download/latest?exercise_id=bob&track_id=ruby"
        );
    }

    #[test]
    fn latest_without_track_omits_track_id() {
        for track in [None, Some("")] {
            let t = DownloadTarget::from_args(Some(""), Some("hello-world"), track).unwrap();
            let url = t.url(&api()).unwrap();
            assert_eq!(
                url.as_str(),
                "https://api.example.com/v1/download/latest?exercise_id=hello-world"
            );
            assert!(url.query_pairs().all(|(k, _)| k != "track_id"));
        }
    }

    #[test]
    fn uuid_ignores_exercise_and_track() {
        let t = DownloadTarget::from_args(Some("a1b2c3"), Some("bob"), Some("ruby")).unwrap();
        assert_eq!(
            t,
            DownloadTarget::Solution {
                uuid: "a1b2c3".to_owned()
            }
        );
        let url = t.url(&api()).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/download/a1b2c3");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn nothing_to_download() {
        assert_eq!(DownloadTarget::from_args(None, None, Some("ruby")), None);
        assert_eq!(DownloadTarget::from_args(Some(""), Some(""), None), None);
    }

    #[test]
    fn query_values_are_encoded() {
        let t = DownloadTarget::from_args(None, Some("two fer"), Some("c&c++")).unwrap();
        let url = t.url(&api()).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("exercise_id".to_owned(), "two fer".to_owned()),
                ("track_id".to_owned(), "c&c++".to_owned()),
            ]
        );
    }

    #[test]
    fn default_base_url_is_parsable() {
        assert_eq!(ApiConfig::default().base_url.as_str(), DEFAULT_API_BASE_URL);
    }
}
