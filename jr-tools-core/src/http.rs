//! Blocking reqwest implementation of the [`Transport`] contract.

use reqwest::blocking::{Client as ReqwestClient, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;

use crate::config::Connection;
use crate::contract::{HttpResponse, Transport};
use crate::error::Error;

/// Real transport over blocking reqwest. One instance per [`crate::Client`];
/// credentials are captured at construction and attached to every request.
pub struct HttpTransport {
    client: ReqwestClient,
    username: String,
    password: String,
}

impl HttpTransport {
    pub fn new(connection: &Connection) -> Self {
        Self {
            client: ReqwestClient::new(),
            username: connection.username().to_string(),
            password: connection.password().to_string(),
        }
    }

    fn read_response(&self, response: Response) -> Result<HttpResponse, Error> {
        let status = response.status().as_u16();
        let body = response.bytes().map_err(connection_error)?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, Error> {
        let response = self
            .client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, "application/json")
            .query(query)
            .send()
            .map_err(connection_error)?;
        self.read_response(response)
    }

    fn post(&self, url: &str, content_type: &str, body: &Value) -> Result<HttpResponse, Error> {
        // Content type set before `.json()` so reqwest keeps ours.
        let response = self
            .client
            .post(url)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, content_type)
            .json(body)
            .send()
            .map_err(connection_error)?;
        self.read_response(response)
    }

    fn delete(&self, url: &str) -> Result<HttpResponse, Error> {
        let response = self
            .client
            .delete(url)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, "application/json")
            .send()
            .map_err(connection_error)?;
        self.read_response(response)
    }
}

fn connection_error(err: reqwest::Error) -> Error {
    Error::Connection(err.to_string())
}
