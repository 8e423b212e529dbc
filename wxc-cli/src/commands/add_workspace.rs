use std::io::Read;

use anyhow::{Context, Result};

use super::{settle_row, BatchOptions};
use crate::client::{WebexClient, WorkspaceCreate};
use crate::csv_input::{read_rows, WorkspaceRow};
use crate::error::WxcResult;
use crate::report::{BatchReport, RowStatus};

/// Create a calling-enabled workspace for every row not already present.
///
/// The existence check and the create are separate calls, so a workspace
/// created by someone else in between is not detected.
pub async fn add_workspaces<R: Read>(
    client: &WebexClient,
    input: R,
    options: BatchOptions,
) -> Result<BatchReport> {
    let rows = read_rows::<WorkspaceRow, _>(input).context("Failed to read CSV file")?;

    let mut report = BatchReport::default();
    for (line, row) in rows {
        let (label, result) = match row {
            Ok(row) => {
                let result = add_row(client, &row, options.dry_run).await;
                (row.name, result)
            }
            Err(err) => ("<unreadable>".to_string(), Err(err)),
        };
        settle_row(&mut report, options, line, &label, result)?;
    }

    Ok(report)
}

async fn add_row(client: &WebexClient, row: &WorkspaceRow, dry_run: bool) -> WxcResult<RowStatus> {
    let location_id = client.resolve_location_id(&row.location).await?;
    if client.workspace_exists(&row.name).await? {
        return Ok(RowStatus::Skipped(format!("Workspace {} exists", row.name)));
    }

    let payload = WorkspaceCreate::phones(
        &row.name,
        client.org_id(),
        &row.extension,
        &location_id,
        &row.direct_dial,
    );
    let detail = format!(
        "extension {}, number {}",
        row.extension,
        payload.phone_number().unwrap_or("none")
    );
    if dry_run {
        tracing::info!(workspace = payload.display_name(), "Dry run, not creating workspace");
        return Ok(RowStatus::DryRun(detail));
    }

    let workspace = client.create_workspace(&payload).await?;
    tracing::info!(workspace_id = %workspace.id, name = %row.name, "Created workspace");
    Ok(RowStatus::Created(detail))
}
