//! Workspace caller-ID settings.
//!
//! The API returns every number and name field side by side and marks the
//! authoritative one with a policy string. Here each policy carries only the
//! value it selects, so a stale field can never be read by mistake.

use serde::{Deserialize, Serialize};

/// Which number is presented as the outbound caller ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberPolicy {
    DirectLine(Option<String>),
    LocationNumber(Option<String>),
    Custom(Option<String>),
    Unrecognized(String),
}

/// Which name is presented as the outbound caller ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePolicy {
    DirectLine(Option<String>),
    LocationNumber(Option<String>),
    Other(Option<String>),
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "CallerIdResponse")]
pub struct CallerIdSettings {
    pub number: NumberPolicy,
    pub name: NamePolicy,
}

/// Flat view of the caller ID as it appears on outbound calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerIdProjection {
    pub number: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CallerIdResponse {
    #[serde(default)]
    selected: String,
    direct_number: Option<String>,
    location_number: Option<String>,
    custom_number: Option<String>,
    #[serde(default)]
    external_caller_id_name_policy: String,
    display_name: Option<String>,
    location_external_caller_id_name: Option<String>,
    custom_external_caller_id_name: Option<String>,
}

impl From<CallerIdResponse> for CallerIdSettings {
    fn from(raw: CallerIdResponse) -> Self {
        let number = match raw.selected.as_str() {
            "DIRECT_LINE" => NumberPolicy::DirectLine(raw.direct_number),
            "LOCATION_NUMBER" => NumberPolicy::LocationNumber(raw.location_number),
            "CUSTOM" => NumberPolicy::Custom(raw.custom_number),
            _ => NumberPolicy::Unrecognized(raw.selected),
        };
        let name = match raw.external_caller_id_name_policy.as_str() {
            "DIRECT_LINE" => NamePolicy::DirectLine(raw.display_name),
            "LOCATION_NUMBER" => NamePolicy::LocationNumber(raw.location_external_caller_id_name),
            "OTHER" => NamePolicy::Other(raw.custom_external_caller_id_name),
            _ => NamePolicy::Unrecognized(raw.external_caller_id_name_policy),
        };
        Self { number, name }
    }
}

impl CallerIdSettings {
    /// Reduce the settings to the number and name callers will see.
    ///
    /// Unrecognized policies project to an empty field and are logged.
    pub fn project(&self) -> CallerIdProjection {
        let number = match &self.number {
            NumberPolicy::DirectLine(v)
            | NumberPolicy::LocationNumber(v)
            | NumberPolicy::Custom(v) => v.clone().unwrap_or_default(),
            NumberPolicy::Unrecognized(policy) => {
                tracing::warn!(policy = %policy, "Unrecognized caller ID number policy");
                String::new()
            }
        };
        let name = match &self.name {
            NamePolicy::DirectLine(v) | NamePolicy::LocationNumber(v) | NamePolicy::Other(v) => {
                v.clone().unwrap_or_default()
            }
            NamePolicy::Unrecognized(policy) => {
                tracing::warn!(policy = %policy, "Unrecognized caller ID name policy");
                String::new()
            }
        };
        CallerIdProjection { number, name }
    }
}

/// Body of a caller-ID update that switches a workspace to a custom number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerIdUpdate {
    selected: &'static str,
    custom_number: String,
}

impl CallerIdUpdate {
    /// `digits` is the number without its leading `+`, as it appears in CSV input.
    pub fn custom(digits: &str) -> Self {
        Self {
            selected: "CUSTOM",
            custom_number: format!("+{}", digits),
        }
    }

    pub fn custom_number(&self) -> &str {
        &self.custom_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(value: serde_json::Value) -> CallerIdSettings {
        serde_json::from_value(value).unwrap()
    }

    fn full_payload(selected: &str, name_policy: &str) -> serde_json::Value {
        json!({
            "selected": selected,
            "directNumber": "+15550000001",
            "locationNumber": "+15550000002",
            "customNumber": "+15550000003",
            "externalCallerIdNamePolicy": name_policy,
            "displayName": "Lobby Phone",
            "locationExternalCallerIdName": "Main Office",
            "customExternalCallerIdName": "Front Desk",
        })
    }

    #[test]
    fn test_custom_selects_custom_number() {
        let projected = settings(full_payload("CUSTOM", "DIRECT_LINE")).project();
        assert_eq!(projected.number, "+15550000003");
        assert_eq!(projected.name, "Lobby Phone");
    }

    #[test]
    fn test_other_selects_custom_name() {
        let projected = settings(full_payload("LOCATION_NUMBER", "OTHER")).project();
        assert_eq!(projected.number, "+15550000002");
        assert_eq!(projected.name, "Front Desk");
    }

    #[test]
    fn test_direct_line_and_location_name() {
        let projected = settings(full_payload("DIRECT_LINE", "LOCATION_NUMBER")).project();
        assert_eq!(projected.number, "+15550000001");
        assert_eq!(projected.name, "Main Office");
    }

    #[test]
    fn test_policy_carries_only_selected_value() {
        let parsed = settings(full_payload("CUSTOM", "OTHER"));
        assert_eq!(
            parsed.number,
            NumberPolicy::Custom(Some("+15550000003".to_string()))
        );
        assert_eq!(parsed.name, NamePolicy::Other(Some("Front Desk".to_string())));
    }

    #[test]
    fn test_unrecognized_policies_project_empty() {
        let parsed = settings(full_payload("MOBILE_NUMBER", "SOMETHING_NEW"));
        assert_eq!(
            parsed.number,
            NumberPolicy::Unrecognized("MOBILE_NUMBER".to_string())
        );

        let projected = parsed.project();
        assert_eq!(projected, CallerIdProjection::default());
    }

    #[test]
    fn test_selected_field_missing_projects_empty() {
        let projected = settings(json!({
            "selected": "CUSTOM",
            "externalCallerIdNamePolicy": "DIRECT_LINE",
            "displayName": "Lobby Phone",
        }))
        .project();
        assert_eq!(projected.number, "");
        assert_eq!(projected.name, "Lobby Phone");
    }

    #[test]
    fn test_update_body_shape() {
        let body = serde_json::to_value(CallerIdUpdate::custom("15551230000")).unwrap();
        assert_eq!(
            body,
            json!({"selected": "CUSTOM", "customNumber": "+15551230000"})
        );
    }
}
