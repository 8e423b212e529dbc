use anyhow::{Context, Result};

use crate::client::WebexClient;
use crate::error::WxcError;
use crate::report::{BatchReport, RowStatus};

mod add_workspace;
mod list_callerid;
mod update_callerid;

pub use add_workspace::add_workspaces;
pub use list_callerid::{caller_id_table, list_workspace_caller_ids, WorkspaceCallerId};
pub use update_callerid::update_workspace_caller_ids;

/// How a CSV batch reacts to its rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Run every lookup but send no PUT or POST
    pub dry_run: bool,
    /// Abort on the first failing row instead of reporting it
    pub fail_fast: bool,
}

/// Verify the organization exists and scope all later calls to it.
pub async fn scope_to_org(client: WebexClient, org_id: Option<&str>) -> Result<WebexClient> {
    let Some(org_id) = org_id else {
        return Ok(client);
    };

    let org = client
        .get_organization(org_id)
        .await
        .with_context(|| format!("Failed to look up organization {}", org_id))?;
    tracing::info!(
        org_id = %org.id,
        name = org.display_name.as_deref().unwrap_or(""),
        "Scoped to organization"
    );
    Ok(client.with_org(Some(org.id)))
}

pub(crate) async fn resolve_location(
    client: &WebexClient,
    location_name: Option<&str>,
) -> Result<Option<String>> {
    match location_name {
        Some(name) => {
            let id = client
                .resolve_location_id(name)
                .await
                .context("Failed to resolve --location-name")?;
            Ok(Some(id))
        }
        None => Ok(None),
    }
}

/// Record one row's result, or turn it into the command's error under `fail_fast`.
pub(crate) fn settle_row(
    report: &mut BatchReport,
    options: BatchOptions,
    line: usize,
    label: &str,
    result: Result<RowStatus, WxcError>,
) -> Result<()> {
    match result {
        Ok(status) => report.record(line, label, status),
        Err(err) if options.fail_fast => {
            return Err(anyhow::Error::new(err).context(format!("Row {} ({}) failed", line, label)));
        }
        Err(err) => report.record(line, label, RowStatus::Failed(err.to_string())),
    }
    Ok(())
}
