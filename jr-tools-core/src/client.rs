//! Report client: authenticated REST operations against the report server.
//!
//! Wraps the REST v2 endpoints for running reports and managing repository
//! resources (files, report units, data types, input controls). All
//! operations are synchronous and blocking; the transport is injectable so
//! tests can observe the exact request sequence without a server.

use std::fs;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::config::Connection;
use crate::contract::{HttpResponse, Transport};
use crate::error::Error;
use crate::http::HttpTransport;
use crate::manifest::{FileEntry, InputControlParam, ReportEntry};

/// Output formats the report endpoint can render.
pub const ALLOWED_REPORT_FORMATS: [&str; 11] = [
    "pdf", "html", "xls", "xlsx", "rtf", "csv", "xml", "docx", "odt", "ods", "jrprint",
];

const REPORTS_ENDPOINT: &str = "/rest_v2/reports";
const RESOURCES_ENDPOINT: &str = "/rest_v2/resources";

const CONTENT_TYPE_FILE: &str = "application/repository.file+json";
const CONTENT_TYPE_REPORT_UNIT: &str = "application/repository.reportUnit+json";
const CONTENT_TYPE_DATA_TYPE: &str = "application/repository.dataType+json";
const CONTENT_TYPE_INPUT_CONTROL: &str = "application/repository.inputControl+json";

/// The only input-control kind the loader provisions.
const SINGLE_VALUE_CONTROL: u8 = 2;

/// A rendering format accepted by the reports endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    Html,
    Xls,
    Xlsx,
    Rtf,
    Csv,
    Xml,
    Docx,
    Odt,
    Ods,
    Jrprint,
}

impl OutputFormat {
    /// Case-insensitive parse against [`ALLOWED_REPORT_FORMATS`].
    pub fn parse(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "html" => Ok(Self::Html),
            "xls" => Ok(Self::Xls),
            "xlsx" => Ok(Self::Xlsx),
            "rtf" => Ok(Self::Rtf),
            "csv" => Ok(Self::Csv),
            "xml" => Ok(Self::Xml),
            "docx" => Ok(Self::Docx),
            "odt" => Ok(Self::Odt),
            "ods" => Ok(Self::Ods),
            "jrprint" => Ok(Self::Jrprint),
            _ => Err(Error::InvalidOutputFormat(s.to_string())),
        }
    }

    /// Lowercase file extension appended to report URLs.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Html => "html",
            Self::Xls => "xls",
            Self::Xlsx => "xlsx",
            Self::Rtf => "rtf",
            Self::Csv => "csv",
            Self::Xml => "xml",
            Self::Docx => "docx",
            Self::Odt => "odt",
            Self::Ods => "ods",
            Self::Jrprint => "jrprint",
        }
    }
}

/// Client for the report server's REST v2 API.
///
/// Holds the immutable [`Connection`] and a [`Transport`]; issues one
/// blocking request at a time and never retries.
pub struct Client<T: Transport> {
    connection: Connection,
    transport: T,
}

impl Client<HttpTransport> {
    /// Client over the real blocking HTTP transport.
    pub fn new(connection: Connection) -> Self {
        let transport = HttpTransport::new(&connection);
        Self {
            connection,
            transport,
        }
    }
}

impl<T: Transport> Client<T> {
    /// Client over an injected transport; tests pass the generated mock.
    pub fn with_transport(connection: Connection, transport: T) -> Self {
        Self {
            connection,
            transport,
        }
    }

    fn reports_url(&self, path: &str, format: OutputFormat) -> String {
        format!(
            "{}{}{}.{}",
            self.connection.base_url(),
            REPORTS_ENDPOINT,
            path,
            format.extension()
        )
    }

    fn resources_url(&self, uri: &str) -> String {
        format!("{}{}{}", self.connection.base_url(), RESOURCES_ENDPOINT, uri)
    }

    /// Run a report and return the rendered bytes.
    ///
    /// Returns `Ok(None)` when the server answers with any non-200 status;
    /// the caller reports "not found" rather than failing. A network-level
    /// failure is fatal and surfaces as [`Error::Connection`].
    pub fn run_report(
        &self,
        path: &str,
        params: &[(String, String)],
        output_format: &str,
    ) -> Result<Option<Vec<u8>>, Error> {
        let format = OutputFormat::parse(output_format)?;
        ensure_rooted(path)?;
        let url = self.reports_url(path, format);
        info!(url = %url, params = params.len(), "running report");
        let response = self.transport.get(&url, params).map_err(|e| {
            error!(error = %e, url = %url, "report server unreachable");
            e
        })?;
        if response.status == 200 {
            Ok(Some(response.body))
        } else {
            // The server answers 404 for unknown report paths; other failure
            // statuses are folded into "not found" as well.
            warn!(status = response.status, url = %url, "report request returned non-200");
            Ok(None)
        }
    }

    /// Delete the resource at `uri`. Absence is not an error.
    pub fn delete_report(&self, uri: &str) -> Result<(), Error> {
        ensure_rooted(uri)?;
        info!(uri, "deleting report unit");
        self.transport.delete(&self.resources_url(uri))?;
        Ok(())
    }

    /// Upload a local file into the repository, replacing any resource at
    /// the target uri. The file content travels base64-encoded.
    pub fn upload_file(&self, entry: &FileEntry) -> Result<(), Error> {
        ensure_rooted(&entry.uri)?;
        let (parent, label) = split_uri(&entry.uri);
        // Read before deleting anything remote, so a local IO error cannot
        // leave the uri empty.
        let raw = fs::read(&entry.path).map_err(|e| Error::Io {
            path: entry.path.clone(),
            source: e,
        })?;
        let body = json!({
            "type": entry.resource_type,
            "content": BASE64.encode(&raw),
            "label": label,
        });
        info!(uri = %entry.uri, path = %entry.path.display(), "uploading file resource");
        self.upsert(&entry.uri, parent, CONTENT_TYPE_FILE, &body)?;
        Ok(())
    }

    /// Create a report unit referencing its jrxml template, data source and
    /// freshly provisioned input controls, in manifest parameter order.
    ///
    /// Any previous unit at this uri is expected to have been deleted
    /// already (the loader does this in its first phase).
    pub fn upload_report(&self, entry: &ReportEntry) -> Result<(), Error> {
        ensure_rooted(&entry.uri)?;
        let (parent, label) = split_uri(&entry.uri);
        let prefix = control_prefix(&entry.uri);

        let mut controls = Vec::with_capacity(entry.params.len());
        for param in &entry.params {
            let uri = self.create_input_control(param, &prefix)?;
            controls.push(json!({ "inputControlReference": { "uri": uri } }));
        }

        let body = json!({
            "label": label,
            "jrxml": { "jrxmlFileReference": { "uri": entry.jrxml_uri } },
            "dataSource": { "dataSourceReference": { "uri": entry.data_source_uri } },
            "inputControls": controls,
        });
        info!(uri = %entry.uri, controls = entry.params.len(), "uploading report unit");
        self.create_resource(parent, CONTENT_TYPE_REPORT_UNIT, &body)?;
        Ok(())
    }

    /// Provision the data type and input control backing one report
    /// parameter, returning the input control's server-assigned uri.
    ///
    /// `prefix` namespaces the resources per owning report so two reports
    /// sharing a parameter label cannot collide.
    pub fn create_input_control(
        &self,
        param: &InputControlParam,
        prefix: &str,
    ) -> Result<String, Error> {
        // The stale pair goes first, so the new control can never pick up a
        // data type left over from a previous deployment.
        let control_path = format!("/InputControls/{}/{}", prefix, param.label);
        let data_type_path = format!("/DataTypes/{}/{}", prefix, param.label);
        self.transport.delete(&self.resources_url(&control_path))?;
        self.transport.delete(&self.resources_url(&data_type_path))?;

        let data_type = self.create_resource(
            &format!("/DataTypes/{prefix}"),
            CONTENT_TYPE_DATA_TYPE,
            &json!({ "type": param.value_type, "label": param.label }),
        )?;
        let data_type_uri = resource_uri(&data_type)?;

        info!(label = %param.label, prefix, "creating input control");
        let control = self.create_resource(
            &format!("/InputControls/{prefix}"),
            CONTENT_TYPE_INPUT_CONTROL,
            &json!({
                "type": SINGLE_VALUE_CONTROL,
                "label": param.label,
                "mandatory": param.mandatory,
                "visible": param.visible,
                "dataType": { "dataTypeReference": { "uri": data_type_uri } },
            }),
        )?;
        resource_uri(&control)
    }

    /// Idempotent upsert: delete whatever exists at `uri` (absence
    /// included), then create anew by posting to `parent`. Delete-then-create
    /// is not transactional; a failed create leaves the uri empty.
    fn upsert(
        &self,
        uri: &str,
        parent: &str,
        content_type: &str,
        body: &Value,
    ) -> Result<HttpResponse, Error> {
        self.transport.delete(&self.resources_url(uri))?;
        self.create_resource(parent, content_type, body)
    }

    /// POST a new resource under `parent`, requiring a success status.
    fn create_resource(
        &self,
        parent: &str,
        content_type: &str,
        body: &Value,
    ) -> Result<HttpResponse, Error> {
        let url = self.resources_url(parent);
        let response = self.transport.post(&url, content_type, body)?;
        if !response.is_success() {
            error!(status = response.status, url = %url, "resource create rejected");
            return Err(Error::UnexpectedStatus {
                url,
                status: response.status,
            });
        }
        Ok(response)
    }
}

fn ensure_rooted(uri: &str) -> Result<(), Error> {
    if uri.starts_with('/') {
        Ok(())
    } else {
        Err(Error::InvalidResourceUri(uri.to_string()))
    }
}

/// Splits `"/folder/label"` into `("/folder", "label")`. A top-level uri
/// like `"/label"` yields an empty parent, i.e. the repository root.
fn split_uri(uri: &str) -> (&str, &str) {
    uri.rsplit_once('/').unwrap_or(("", uri))
}

/// Namespace prefix for one report's controls: the uri minus its leading
/// slash, remaining slashes flattened to underscores.
fn control_prefix(uri: &str) -> String {
    uri.trim_start_matches('/').replace('/', "_")
}

/// Extract the server-assigned `uri` field from a create response.
fn resource_uri(response: &HttpResponse) -> Result<String, Error> {
    let value: Value = serde_json::from_slice(&response.body)
        .map_err(|e| Error::MalformedResponse(e.to_string()))?;
    value
        .get("uri")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| Error::MalformedResponse("create response lacks a uri field".to_string()))
}
