use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Response, StatusCode,
};
use url::Url;

use crate::{error::*, model::*, ApiConfig, DownloadTarget, SolutionFile};

const USER_AGENT: &str = concat!("exer/", env!("CARGO_PKG_VERSION"));

pub struct ApiClient {
    http: reqwest::Client,
    cfg: ApiConfig,
}

impl ApiClient {
    pub fn new(cfg: ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &cfg.token {
            let mut value =
                HeaderValue::from_str(&format!("Bearer {}", token)).map_err(Error::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .gzip(true)
            .build()?;
        Ok(Self { http, cfg })
    }

    /// Ask the download endpoint for the solution metadata and its file list.
    ///
    /// A non-200 response is turned into [`Error::TrackAmbiguous`] or
    /// [`Error::Api`] depending on the `error.type` of the body.
    pub async fn fetch_solution(&self, target: &DownloadTarget) -> Result<SolutionPayload> {
        let url = target.url(&self.cfg)?;
        log::debug!("GET {}", url);

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status != StatusCode::OK {
            return Err(Self::api_error(status, &body, target));
        }

        let envelope: SolutionEnvelope = serde_json::from_str(&body)?;
        Ok(envelope.solution)
    }

    fn api_error(status: StatusCode, body: &str, target: &DownloadTarget) -> Error {
        let payload = serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.error)
            .unwrap_or_default();
        log::debug!("{} response with error type '{}'", status, payload.kind);

        match payload.kind {
            ApiErrorKind::TrackAmbiguous => Error::TrackAmbiguous {
                exercise: target.exercise().unwrap_or(target.slug()).to_owned(),
                possible_track_ids: payload.possible_track_ids,
            },
            ApiErrorKind::Other => {
                let message = if payload.message.is_empty() {
                    status.to_string()
                } else {
                    payload.message
                };
                Error::Api { status, message }
            }
        }
    }

    /// GET one solution file. The body is left unread for the caller to stream.
    pub async fn fetch_file(&self, base_url: &Url, file: &SolutionFile) -> Result<Response> {
        let url = file.download_url(base_url)?;
        log::debug!("GET {}", url);

        let resp = self.http.get(url.clone()).send().await?;

        let got = resp.status();
        if got != StatusCode::OK {
            return Err(Error::UnexpectedResponseCode {
                got,
                expected: StatusCode::OK,
                requested_url: url.to_string(),
            });
        }
        Ok(resp)
    }
}
