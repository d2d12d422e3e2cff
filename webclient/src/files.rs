//! Validation of file paths and names handed out by the server.
//!
//! Everything the server sends that ends up on the local filesystem goes
//! through here, so a hostile or broken response cannot write outside the
//! solution directory.

use std::path::PathBuf;

use url::Url;

use crate::{error::*, util};

/// Wire path separator.
const SEP: char = '/';

fn check_segment(segment: &str) -> std::result::Result<(), &'static str> {
    match segment {
        "" => Err("empty path segment"),
        "." | ".." => Err("relative path segment"),
        s if s.contains('\\') => Err("backslash in path segment"),
        s if s.contains('\0') => Err("NUL in path segment"),
        _ => Ok(()),
    }
}

/// Ensure `name` can be used as exactly one directory component.
pub fn ensure_safe_segment(name: &str) -> Result<()> {
    let reason = if name.contains(SEP) {
        Err("separator in name")
    } else {
        check_segment(name)
    };
    reason.map_err(|reason| Error::UnsafePath {
        path: name.to_owned(),
        reason,
    })
}

/// One entry of a solution's file list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionFile {
    wire: String,
    segments: Vec<String>,
}

impl SolutionFile {
    /// Parse a slash separated path relative to the solution root.
    /// A single leading slash is tolerated.
    pub fn parse(wire: &str) -> Result<Self> {
        let relative = wire.strip_prefix(SEP).unwrap_or(wire);
        let segments = relative
            .split(SEP)
            .map(|segment| {
                check_segment(segment)
                    .map(|()| segment.to_owned())
                    .map_err(|reason| Error::UnsafePath {
                        path: wire.to_owned(),
                        reason,
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            wire: wire.to_owned(),
            segments,
        })
    }

    /// The entry exactly as the server sent it.
    pub fn as_wire(&self) -> &str {
        &self.wire
    }

    /// Relative path using the local separator convention.
    pub fn local_path(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    pub fn download_url(&self, base_url: &Url) -> Result<Url> {
        util::join_segments(base_url, &self.segments)
    }
}
