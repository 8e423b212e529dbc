use reqwest::Method;
use serde::Deserialize;

use super::WebexClient;
use crate::error::{WxcError, WxcResult};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub display_name: Option<String>,
}

impl WebexClient {
    pub async fn get_organization(&self, org_id: &str) -> WxcResult<Organization> {
        let request = self.build_request(Method::GET, &format!("organizations/{}", org_id));
        match self.send(request).await {
            Err(WxcError::Api { status: 404, .. }) => {
                Err(WxcError::not_found("Organization", org_id))
            }
            result => result,
        }
    }
}
