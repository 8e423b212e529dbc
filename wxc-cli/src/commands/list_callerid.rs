use anyhow::{Context, Result};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

use super::resolve_location;
use crate::client::{NumberFilter, WebexClient, WORKSPACE_OWNER};

const NOT_AVAILABLE: &str = "N/A";

/// One line of the workspace caller-ID listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceCallerId {
    pub workspace: String,
    pub extension: String,
    pub did: String,
    pub caller_id_number: String,
    pub caller_id_name: String,
}

/// Collect the caller ID of every workspace-owned number.
pub async fn list_workspace_caller_ids(
    client: &WebexClient,
    location_name: Option<&str>,
) -> Result<Vec<WorkspaceCallerId>> {
    let location_id = resolve_location(client, location_name).await?;
    let numbers = client
        .list_numbers(NumberFilter {
            owner_type: Some(WORKSPACE_OWNER),
            location_id: location_id.as_deref(),
            ..Default::default()
        })
        .await
        .context("Failed to list workspace numbers")?;
    tracing::info!(count = numbers.len(), "Fetched workspace numbers");

    let mut rows = Vec::with_capacity(numbers.len());
    for number in numbers {
        let Some(owner) = number.owner else {
            continue;
        };

        let caller_id = client
            .get_caller_id(&owner.id)
            .await
            .with_context(|| format!("Failed to get caller ID for workspace {}", owner.id))?
            .project();

        rows.push(WorkspaceCallerId {
            workspace: owner.first_name.unwrap_or_default(),
            extension: number
                .extension
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            did: number
                .phone_number
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            caller_id_number: caller_id.number,
            caller_id_name: caller_id.name,
        });
    }

    Ok(rows)
}

pub fn caller_id_table(rows: &[WorkspaceCallerId]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Workspace",
        "Extension",
        "DID",
        "CallerID-Number",
        "CallerID-Name",
    ]);
    for row in rows {
        table.add_row(vec![
            row.workspace.clone(),
            row.extension.clone(),
            row.did.clone(),
            row.caller_id_number.clone(),
            row.caller_id_name.clone(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_listing_columns() {
        let rows = vec![WorkspaceCallerId {
            workspace: "Lobby".to_string(),
            extension: "1001".to_string(),
            did: NOT_AVAILABLE.to_string(),
            caller_id_number: "+15551230000".to_string(),
            caller_id_name: "Front Desk".to_string(),
        }];

        let rendered = caller_id_table(&rows).to_string();
        for expected in ["Workspace", "CallerID-Name", "Lobby", "N/A", "+15551230000"] {
            assert!(rendered.contains(expected), "missing {}", expected);
        }
    }
}
