use reqwest::Method;
use serde::Deserialize;

use super::WebexClient;
use crate::error::WxcResult;
use crate::resolve::Resolution;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    pub phone_number: Option<String>,
    pub extension: Option<String>,
    pub location: Option<LocationRef>,
    pub owner: Option<NumberOwner>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRef {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberOwner {
    pub id: String,
    #[serde(rename = "type")]
    pub owner_type: Option<String>,
    // Workspaces report their display name here
    pub first_name: Option<String>,
}

impl NumberOwner {
    /// True for workspaces, and for owners whose type is not reported.
    pub fn is_workspace(&self) -> bool {
        self.owner_type.as_deref().map_or(true, |t| t == WORKSPACE_OWNER)
    }
}

/// `ownerType` of numbers assigned to workspaces.
pub const WORKSPACE_OWNER: &str = "PLACE";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NumberList {
    #[serde(default)]
    phone_numbers: Vec<PhoneNumber>,
}

/// Filters for `telephony/config/numbers`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumberFilter<'a> {
    pub owner_type: Option<&'a str>,
    pub extension: Option<&'a str>,
    pub location_id: Option<&'a str>,
}

impl WebexClient {
    pub async fn list_numbers(&self, filter: NumberFilter<'_>) -> WxcResult<Vec<PhoneNumber>> {
        let mut query = self.scoped_query();
        if let Some(owner_type) = filter.owner_type {
            query.push(("ownerType", owner_type.to_string()));
        }
        if let Some(extension) = filter.extension {
            query.push(("extension", extension.to_string()));
        }
        if let Some(location_id) = filter.location_id {
            query.push(("locationId", location_id.to_string()));
        }

        let request = self
            .build_request(Method::GET, "telephony/config/numbers")
            .query(&query);
        let list: NumberList = self.send(request).await?;
        Ok(list.phone_numbers)
    }

    /// Find the workspace that owns the number assigned to `extension`.
    ///
    /// Numbers owned by people or virtual lines are ignored even if the
    /// server returns them.
    pub async fn workspace_for_extension(
        &self,
        extension: &str,
        location_id: Option<&str>,
    ) -> WxcResult<NumberOwner> {
        let numbers = self
            .list_numbers(NumberFilter {
                owner_type: Some(WORKSPACE_OWNER),
                extension: Some(extension),
                location_id,
            })
            .await?;

        let owned: Vec<(Option<String>, NumberOwner)> = numbers
            .into_iter()
            .filter_map(|n| n.owner.map(|owner| (n.extension, owner)))
            .filter(|(_, owner)| owner.is_workspace())
            .collect();

        let (_, owner) = Resolution::from_candidates(owned, extension, |(ext, _)| ext.as_deref())
            .into_result("Extension", extension)?;
        Ok(owner)
    }
}
