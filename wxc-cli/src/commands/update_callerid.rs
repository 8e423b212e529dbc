use std::io::Read;

use anyhow::{Context, Result};

use super::{resolve_location, settle_row, BatchOptions};
use crate::callerid::CallerIdUpdate;
use crate::client::WebexClient;
use crate::csv_input::{read_rows, CallerIdRow};
use crate::error::WxcResult;
use crate::report::{BatchReport, RowStatus};

/// Point each listed extension's workspace at a custom caller-ID number.
pub async fn update_workspace_caller_ids<R: Read>(
    client: &WebexClient,
    input: R,
    location_name: Option<&str>,
    options: BatchOptions,
) -> Result<BatchReport> {
    let location_id = resolve_location(client, location_name).await?;
    let rows = read_rows::<CallerIdRow, _>(input).context("Failed to read CSV file")?;

    let mut report = BatchReport::default();
    for (line, row) in rows {
        let (label, result) = match row {
            Ok(row) => {
                let result = update_row(client, &row, location_id.as_deref(), options.dry_run).await;
                (row.extension, result)
            }
            Err(err) => ("<unreadable>".to_string(), Err(err)),
        };
        settle_row(&mut report, options, line, &label, result)?;
    }

    Ok(report)
}

async fn update_row(
    client: &WebexClient,
    row: &CallerIdRow,
    location_id: Option<&str>,
    dry_run: bool,
) -> WxcResult<RowStatus> {
    let update = CallerIdUpdate::custom(&row.caller_id_number);
    let owner = client.workspace_for_extension(&row.extension, location_id).await?;
    let current = client.get_caller_id(&owner.id).await?.project();
    tracing::info!(
        extension = %row.extension,
        workspace_id = %owner.id,
        current = %current.number,
        new = update.custom_number(),
        "Updating caller ID"
    );

    let change = format!("{} -> {}", display_number(&current.number), update.custom_number());
    if dry_run {
        return Ok(RowStatus::DryRun(change));
    }
    client.update_caller_id(&owner.id, &update).await?;
    Ok(RowStatus::Updated(change))
}

fn display_number(number: &str) -> &str {
    if number.is_empty() {
        "none"
    } else {
        number
    }
}
