use reqwest::Method;
use serde::Deserialize;

use super::WebexClient;
use crate::error::WxcResult;
use crate::resolve::Resolution;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LocationList {
    #[serde(default)]
    items: Vec<Location>,
}

impl WebexClient {
    pub async fn list_locations(&self, name: &str) -> WxcResult<Vec<Location>> {
        let mut query = self.scoped_query();
        query.push(("name", name.to_string()));

        let request = self.build_request(Method::GET, "locations").query(&query);
        let list: LocationList = self.send(request).await?;
        Ok(list.items)
    }

    /// Resolve a location name to its identifier.
    pub async fn resolve_location_id(&self, name: &str) -> WxcResult<String> {
        let candidates = self.list_locations(name).await?;
        let location = Resolution::from_candidates(candidates, name, |l| l.name.as_deref())
            .into_result("Location", name)?;
        Ok(location.id)
    }
}
