//! # jr-tools CLI Interface (Module)
//!
//! Command parsing, argument validation and orchestration for the `jr-tools`
//! binary. All client and loader logic lives in the [`jr-tools-core`] crate;
//! this module is strictly CLI glue: ergonomic argument exposure,
//! interactive parameter collection, and writing results to disk.
//!
//! - Entry struct [`Cli`] defines the user-facing subcommands.
//! - [`run`] is the synchronous entrypoint, also used by integration tests.
//! - Connection credentials are resolved from the environment here, at the
//!   boundary, and injected into the core client (see [`crate::load_config`]).
//!
//! [`jr-tools-core`]: ../../jr-tools-core/

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jr_tools_core::{loader, Client};
use tracing::info;

use crate::load_config::{connection_from_env, load_manifest};

/// CLI for jr-tools: interact with a JasperReports Server.
#[derive(Parser)]
#[clap(
    name = "jr-tools",
    version,
    about = "Run reports on a JasperReports Server and bulk-load repository resources"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a report on the server and save the rendered output to a file
    RunReport {
        /// Repository path of the report, e.g. /reports/samples/Invoice
        report_path: String,
        /// Local file the rendered report is written to
        output: PathBuf,
        /// Output format: pdf, html, xls, xlsx, rtf, csv, xml, docx, odt,
        /// ods or jrprint
        #[clap(long, default_value = "pdf")]
        format: String,
        /// Prompt interactively for this many name/value report parameters
        #[clap(long, default_value_t = 0)]
        params_quantity: u32,
    },
    /// Bulk-load files and report units from a YAML manifest
    Load {
        /// Path to the YAML manifest
        config: PathBuf,
    },
}

/// Synchronous CLI logic entrypoint for integration tests and main()
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::RunReport {
            report_path,
            output,
            format,
            params_quantity,
        } => {
            let params = prompt_params(params_quantity)?;
            let connection = connection_from_env()?;
            let client = Client::new(connection);
            info!(report_path, format, "running report");
            match client.run_report(&report_path, &params, &format)? {
                Some(bytes) => {
                    fs::write(&output, bytes).with_context(|| {
                        format!("failed to write report to {}", output.display())
                    })?;
                    println!("Report was saved: {}", output.display());
                }
                None => println!("Report not found"),
            }
            Ok(())
        }
        Commands::Load { config } => {
            let manifest = load_manifest(&config)?;
            let connection = connection_from_env()?;
            let client = Client::new(connection);
            info!(manifest = %config.display(), "starting bulk load");
            let report = loader::load(&client, &manifest)?;
            println!(
                "Loaded {} file(s) and {} report(s)",
                report.files_uploaded, report.reports_uploaded
            );
            Ok(())
        }
    }
}

/// Collect name/value report parameters from the terminal.
fn prompt_params(quantity: u32) -> Result<Vec<(String, String)>> {
    let mut params = Vec::with_capacity(quantity as usize);
    for _ in 0..quantity {
        let name: String = dialoguer::Input::new()
            .with_prompt("Parameter name")
            .interact_text()?;
        let value: String = dialoguer::Input::new()
            .with_prompt("Parameter value")
            .interact_text()?;
        params.push((name, value));
    }
    Ok(params)
}
