use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::WebexClient;
use crate::callerid::{CallerIdSettings, CallerIdUpdate};
use crate::error::WxcResult;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WorkspaceList {
    #[serde(default)]
    items: Vec<Workspace>,
}

/// Request body for creating a phone workspace with Webex Calling enabled.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceCreate {
    display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    org_id: Option<String>,
    #[serde(rename = "type")]
    workspace_type: &'static str,
    supported_devices: &'static str,
    calling: CallingConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct CallingConfig {
    #[serde(rename = "type")]
    calling_type: &'static str,
    webex_calling: WebexCalling,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct WebexCalling {
    extension: String,
    location_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone_number: Option<String>,
}

/// Only ten-digit North American numbers are assigned; anything else is dropped.
fn direct_dial_number(digits: &str) -> Option<String> {
    if digits.chars().count() == 10 {
        Some(format!("+1{}", digits))
    } else {
        None
    }
}

impl WorkspaceCreate {
    pub fn phones(
        display_name: &str,
        org_id: Option<&str>,
        extension: &str,
        location_id: &str,
        direct_dial: &str,
    ) -> Self {
        let phone_number = direct_dial_number(direct_dial);
        if phone_number.is_none() && !direct_dial.is_empty() {
            tracing::warn!(
                workspace = display_name,
                direct_dial,
                "Direct dial is not 10 digits, creating without a phone number"
            );
        }

        Self {
            display_name: display_name.to_string(),
            org_id: org_id.map(|s| s.to_string()),
            workspace_type: "other",
            supported_devices: "phones",
            calling: CallingConfig {
                calling_type: "webexCalling",
                webex_calling: WebexCalling {
                    extension: extension.to_string(),
                    location_id: location_id.to_string(),
                    phone_number,
                },
            },
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.calling.webex_calling.phone_number.as_deref()
    }
}

impl WebexClient {
    pub async fn list_workspaces(&self, display_name: &str) -> WxcResult<Vec<Workspace>> {
        let mut query = self.scoped_query();
        query.push(("displayName", display_name.to_string()));

        let request = self.build_request(Method::GET, "workspaces").query(&query);
        let list: WorkspaceList = self.send(request).await?;
        Ok(list.items)
    }

    pub async fn workspace_exists(&self, display_name: &str) -> WxcResult<bool> {
        Ok(!self.list_workspaces(display_name).await?.is_empty())
    }

    pub async fn create_workspace(&self, payload: &WorkspaceCreate) -> WxcResult<Workspace> {
        let request = self.build_request(Method::POST, "workspaces").json(payload);
        self.send(request).await
    }

    pub async fn get_caller_id(&self, workspace_id: &str) -> WxcResult<CallerIdSettings> {
        let request = self
            .build_request(
                Method::GET,
                &format!("workspaces/{}/features/callerId", workspace_id),
            )
            .query(&self.scoped_query());
        self.send(request).await
    }

    pub async fn update_caller_id(
        &self,
        workspace_id: &str,
        update: &CallerIdUpdate,
    ) -> WxcResult<()> {
        let request = self
            .build_request(
                Method::PUT,
                &format!("workspaces/{}/features/callerId", workspace_id),
            )
            .query(&self.scoped_query())
            .json(update);
        self.send_empty(request).await
    }
}
