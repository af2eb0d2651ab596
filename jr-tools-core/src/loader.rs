//! Bulk loader: declarative, idempotent (re)provisioning of repository
//! resources from a [`Manifest`].
//!
//! The phase order is load-bearing. Stale report units are removed before
//! anything else because they may reference input controls that are about to
//! be recreated under the same names; files go up before report units so
//! jrxml templates exist by the time a unit references them.
//!
//! Failures stop the run immediately and surface to the caller; nothing is
//! rolled back or retried.

use tracing::info;

use crate::client::Client;
use crate::contract::Transport;
use crate::error::Error;
use crate::manifest::Manifest;

/// Summary of one bulk load run, for logging and assertions downstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub reports_deleted: usize,
    pub files_uploaded: usize,
    pub reports_uploaded: usize,
}

/// Apply a manifest in three fixed phases: delete every report unit, upload
/// every file, then upload every report unit.
pub fn load<T: Transport>(client: &Client<T>, manifest: &Manifest) -> Result<LoadReport, Error> {
    let mut report = LoadReport::default();
    info!(
        reports = manifest.reports.len(),
        files = manifest.files.len(),
        "starting bulk load"
    );

    for entry in &manifest.reports {
        client.delete_report(&entry.uri)?;
        report.reports_deleted += 1;
    }
    for entry in &manifest.files {
        client.upload_file(entry)?;
        report.files_uploaded += 1;
    }
    for entry in &manifest.reports {
        client.upload_report(entry)?;
        report.reports_uploaded += 1;
    }

    info!(?report, "bulk load complete");
    Ok(report)
}
