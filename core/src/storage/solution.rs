use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use exer_webclient::{files::ensure_safe_segment, SolutionPayload};
use serde::{Deserialize, Serialize};

use super::error::Result;

/// Local record of a downloaded solution, persisted as `.solution.json`
/// inside the solution directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub track: String,
    pub exercise: String,
    pub id: String,
    pub url: String,
    pub handle: String,
    pub is_requester: bool,
    #[serde(default)]
    pub auto_approve: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    pub dir: PathBuf,
}

impl Solution {
    pub const METADATA_FILENAME: &str = ".solution.json";

    /// Build the record from the server response.
    /// Track, exercise and solution ids become directory names, so each
    /// must be a single safe path segment.
    pub fn from_payload(s: &SolutionPayload) -> exer_webclient::Result<Self> {
        ensure_safe_segment(&s.exercise.track.id)?;
        ensure_safe_segment(&s.exercise.id)?;
        ensure_safe_segment(&s.id)?;

        Ok(Self {
            track: s.exercise.track.id.clone(),
            exercise: s.exercise.id.clone(),
            id: s.id.clone(),
            url: s.url.clone(),
            handle: s.user.handle.clone(),
            is_requester: s.user.is_requester,
            auto_approve: s.exercise.auto_approve,
            submitted_at: s.submitted_at(),
            dir: PathBuf::new(),
        })
    }

    /// Workspace-relative directory holding every exercise of this track.
    pub fn path_to_parent(&self) -> PathBuf {
        PathBuf::from(&self.track)
    }

    pub fn metadata_filepath(dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(Self::METADATA_FILENAME)
    }

    /// Persist the metadata into `dir` and remember `dir` as the solution's home.
    pub fn write(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        fsutil::write_json_with_mkdir(Self::metadata_filepath(dir), &*self)?;
        self.dir = dir.to_owned();
        Ok(())
    }

    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut solution: Self =
            fsutil::read_json_with_deserialize(Self::metadata_filepath(dir))?;
        solution.dir = dir.to_owned();
        Ok(solution)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::TempDir;

    fn payload(track: &str, exercise: &str, id: &str) -> SolutionPayload {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "url": "https://example.com/solutions/1",
            "user": { "handle": "alice", "is_requester": false },
            "exercise": {
                "id": exercise,
                "auto_approve": true,
                "track": { "id": track, "language": "Rust" }
            },
            "file_download_base_url": "https://example.com/files/",
            "files": [],
            "iteration": { "submitted_at": "2021-03-04T05:06:07Z" }
        }))
        .unwrap()
    }

    #[test]
    fn record_is_built_from_payload() {
        let s = Solution::from_payload(&payload("rust", "leap", "abc")).unwrap();
        assert_eq!(s.track, "rust");
        assert_eq!(s.exercise, "leap");
        assert_eq!(s.id, "abc");
        assert_eq!(s.handle, "alice");
        assert!(!s.is_requester);
        assert!(s.auto_approve);
        assert!(s.submitted_at.is_some());
        assert_eq!(s.path_to_parent(), Path::new("rust"));
    }

    #[test]
    fn unsafe_ids_are_rejected() {
        assert!(Solution::from_payload(&payload("..", "leap", "abc")).is_err());
        assert!(Solution::from_payload(&payload("rust", "a/b", "abc")).is_err());
        assert!(Solution::from_payload(&payload("rust", "leap", "")).is_err());
    }

    #[test]
    fn write_then_load() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("rust").join("leap").join("abc");
        let mut s = Solution::from_payload(&payload("rust", "leap", "abc")).unwrap();

        s.write(&dir).unwrap();
        assert_eq!(s.dir, dir);
        assert!(dir.join(".solution.json").is_file());

        let loaded = Solution::load(&dir).unwrap();
        assert_eq!(loaded, s);
    }

    #[test]
    fn dir_is_not_persisted() {
        let tmp = TempDir::new().unwrap();
        let mut s = Solution::from_payload(&payload("rust", "leap", "abc")).unwrap();
        s.write(tmp.path()).unwrap();

        let json = fsutil::read_to_string(Solution::metadata_filepath(tmp.path())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("dir").is_none());
        assert_eq!(value["track"], "rust");
        assert_eq!(value["is_requester"], false);
    }
}
