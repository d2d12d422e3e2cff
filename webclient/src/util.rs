use url::Url;

use crate::error::*;

pub fn parse_url(url: impl AsRef<str>) -> Result<Url> {
    match Url::parse(url.as_ref()) {
        Ok(url) => Ok(url),
        Err(e) => Err(Error::InvalidSyntaxUrl {
            url: url.as_ref().to_owned(),
            source: e,
        }),
    }
}

/// Append `segments` to the path of `base`, percent-encoding each one.
/// A trailing slash on `base` does not produce an empty segment.
pub fn join_segments<I, S>(base: &Url, segments: I) -> Result<Url>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| Error::CannotBeABaseUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
