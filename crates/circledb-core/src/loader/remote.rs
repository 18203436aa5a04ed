// crates/circledb-core/src/loader/remote.rs
use super::raw::parse_district_slice;
use super::DistrictSource;
use crate::error::{CircleDbError, Result};
use crate::model::VillageRecord;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::{StatusCode, Url};
use std::time::Duration;

/// Content endpoint of the public district repository.
pub const DEFAULT_BASE_URL: &str =
    "https://api.github.com/repos/Sumanradhadas/allcirclesbih/contents";

const RAW_MEDIA_TYPE: &str = "application/vnd.github.v3.raw";
const USER_AGENT: &str = concat!("circledb/", env!("CARGO_PKG_VERSION"));

/// District files behind an HTTP content API.
///
/// `GET <base>/<district>.json` with the raw media type, so the body is the
/// file itself. A bearer token is sent when configured.
#[derive(Clone, Debug)]
pub struct RemoteSource {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl RemoteSource {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CircleDbError::InvalidData(format!("Bad base URL {base_url}: {e}")))?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// The public district repository at [`DEFAULT_BASE_URL`].
    pub fn public() -> Result<Self> {
        Self::new(DEFAULT_BASE_URL)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/<district>.json`, the district encoded as a single segment.
    pub fn district_url(&self, district: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                CircleDbError::InvalidData(format!("Base URL {} cannot take a path", self.base_url))
            })?;
            segments.pop_if_empty().push(&format!("{district}.json"));
        }
        Ok(url)
    }
}

impl DistrictSource for RemoteSource {
    fn fetch(&self, district: &str) -> Result<Vec<VillageRecord>> {
        let url = self.district_url(district)?;
        tracing::debug!(district, %url, "fetching district");

        let mut request = self.client.get(url).header(ACCEPT, RAW_MEDIA_TYPE);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send()?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(CircleDbError::NotFound(format!(
                "Remote store has no district {district}"
            ))),
            status if !status.is_success() => Err(CircleDbError::Status {
                district: district.to_owned(),
                status: status.as_u16(),
            }),
            _ => parse_district_slice(&response.bytes()?),
        }
    }
}
