//! Bulk load ordering: report deletions strictly precede file uploads, which
//! strictly precede report uploads.

use mockall::Sequence;
use serde_json::json;
use std::fs::write;
use tempfile::NamedTempFile;

use jr_tools_core::contract::{HttpResponse, MockTransport};
use jr_tools_core::loader::{load, LoadReport};
use jr_tools_core::manifest::{FileEntry, Manifest, ReportEntry};
use jr_tools_core::{Client, Connection};

const BASE: &str = "http://example.com/jasperserver";

fn connection() -> Connection {
    Connection::new(BASE, "jasperadmin", "secret").unwrap()
}

fn no_content() -> HttpResponse {
    HttpResponse {
        status: 204,
        body: Vec::new(),
    }
}

fn created() -> HttpResponse {
    HttpResponse {
        status: 201,
        body: serde_json::to_vec(&json!({"uri": "/created"})).unwrap(),
    }
}

#[test]
fn load_deletes_reports_then_uploads_files_then_reports() {
    let jrxml = NamedTempFile::new().unwrap();
    write(jrxml.path(), b"<jasperReport/>").unwrap();

    let mut seq = Sequence::new();
    let mut transport = MockTransport::new();

    // Phase 1: stale report unit removed.
    transport
        .expect_delete()
        .withf(|url| url == format!("{BASE}/rest_v2/resources/reports/sales"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(no_content()));
    // Phase 2: file upsert, delete then create.
    transport
        .expect_delete()
        .withf(|url| url == format!("{BASE}/rest_v2/resources/files/sales.jrxml"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(no_content()));
    transport
        .expect_post()
        .withf(|url, content_type, _| {
            url == format!("{BASE}/rest_v2/resources/files")
                && content_type == "application/repository.file+json"
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(created()));
    // Phase 3: report unit recreated.
    transport
        .expect_post()
        .withf(|url, content_type, _| {
            url == format!("{BASE}/rest_v2/resources/reports")
                && content_type == "application/repository.reportUnit+json"
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(created()));

    let manifest = Manifest {
        reports: vec![ReportEntry {
            uri: "/reports/sales".to_string(),
            jrxml_uri: "/files/sales.jrxml".to_string(),
            data_source_uri: "/datasources/main".to_string(),
            params: Vec::new(),
        }],
        files: vec![FileEntry {
            uri: "/files/sales.jrxml".to_string(),
            path: jrxml.path().to_path_buf(),
            resource_type: "jrxml".to_string(),
        }],
    };

    let client = Client::with_transport(connection(), transport);
    let report = load(&client, &manifest).expect("load succeeds");
    assert_eq!(
        report,
        LoadReport {
            reports_deleted: 1,
            files_uploaded: 1,
            reports_uploaded: 1,
        }
    );
}

#[test]
fn empty_manifest_issues_no_requests() {
    let client = Client::with_transport(connection(), MockTransport::new());
    let report = load(&client, &Manifest::default()).unwrap();
    assert_eq!(report, LoadReport::default());
}
