use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::{WxcError, WxcResult};

mod locations;
mod numbers;
mod organizations;
mod workspaces;

pub use locations::Location;
pub use numbers::{LocationRef, NumberFilter, NumberOwner, PhoneNumber, WORKSPACE_OWNER};
pub use organizations::Organization;
pub use workspaces::{Workspace, WorkspaceCreate};

pub const DEFAULT_API_URL: &str = "https://webexapis.com/v1";

/// Query string pairs for a single request.
type Query = Vec<(&'static str, String)>;

/// Authenticated client for the Webex REST API.
///
/// When an organization is set, every lookup is scoped to it with `orgId`.
pub struct WebexClient {
    client: Client,
    base_url: String,
    access_token: String,
    org_id: Option<String>,
}

impl WebexClient {
    pub fn new(base_url: &str, access_token: &str) -> WxcResult<Self> {
        url::Url::parse(base_url).map_err(|source| WxcError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
            org_id: None,
        })
    }

    pub fn with_org(mut self, org_id: Option<String>) -> Self {
        self.org_id = org_id;
        self
    }

    pub fn org_id(&self) -> Option<&str> {
        self.org_id.as_deref()
    }

    fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        tracing::debug!(%method, %url, "Sending request");
        self.client
            .request(method, &url)
            .bearer_auth(&self.access_token)
    }

    /// Start a query with `orgId` filled in when the client is scoped.
    fn scoped_query(&self) -> Query {
        let mut query = Query::new();
        if let Some(org_id) = &self.org_id {
            query.push(("orgId", org_id.clone()));
        }
        query
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> WxcResult<T> {
        let response = Self::check(request.send().await?).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send a request whose response body is not needed.
    async fn send_empty(&self, request: RequestBuilder) -> WxcResult<()> {
        Self::check(request.send().await?).await?;
        Ok(())
    }

    async fn check(response: reqwest::Response) -> WxcResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(WxcError::api(status, error_text))
    }
}
