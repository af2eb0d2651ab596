//! `load_config` module: loads the YAML manifest and resolves connection
//! credentials from the environment.
//!
//! This is the only place where untrusted YAML is parsed and where the
//! `JASPER_*` environment variables are read; both are mapped to the core
//! crate's typed models before any network call. Any failure here must
//! produce a clear diagnostic at the CLI boundary.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::Result;
use jr_tools_core::manifest::Manifest;
use jr_tools_core::Connection;
use tracing::{error, info};

pub const ENV_URL: &str = "JASPER_URL";
pub const ENV_USERNAME: &str = "JASPER_USERNAME";
pub const ENV_PASSWORD: &str = "JASPER_PASSWORD";

/// Resolve connection parameters from the `JASPER_*` environment variables.
/// Validation (all three present and non-empty) happens in the core crate,
/// before any request is issued.
pub fn connection_from_env() -> Result<Connection> {
    let url = env::var(ENV_URL).unwrap_or_default();
    let username = env::var(ENV_USERNAME).unwrap_or_default();
    let password = env::var(ENV_PASSWORD).unwrap_or_default();
    let connection = Connection::new(url, username, password).map_err(|e| {
        error!(error = %e, "connection parameters incomplete");
        anyhow::anyhow!("{e}; set {ENV_URL}, {ENV_USERNAME} and {ENV_PASSWORD}")
    })?;
    Ok(connection)
}

/// Load and parse the YAML manifest for the `load` subcommand.
pub fn load_manifest<P: AsRef<Path>>(path: P) -> Result<Manifest> {
    let path_ref = path.as_ref();
    info!(manifest_path = ?path_ref, "loading manifest");

    let content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, manifest_path = ?path_ref, "failed to read manifest");
            return Err(anyhow::anyhow!(
                "failed to read manifest {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let manifest: Manifest = match serde_yaml::from_str(&content) {
        Ok(manifest) => manifest,
        Err(e) => {
            error!(error = ?e, manifest_path = ?path_ref, "failed to parse manifest YAML");
            return Err(anyhow::anyhow!("failed to parse manifest YAML: {e}"));
        }
    };

    info!(
        reports = manifest.reports.len(),
        files = manifest.files.len(),
        "manifest parsed"
    );
    Ok(manifest)
}
