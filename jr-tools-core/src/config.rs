use tracing::debug;

use crate::error::Error;

/// Connection parameters for the report server.
///
/// Resolved once at client construction and immutable afterwards. The caller
/// (normally the CLI boundary) is responsible for gathering the values, e.g.
/// from environment variables; this type only validates completeness.
#[derive(Debug, Clone)]
pub struct Connection {
    base_url: String,
    username: String,
    password: String,
}

impl Connection {
    /// Fails with [`Error::IncompleteConnection`] if any value is empty,
    /// before any network activity can happen. Trailing slashes on the base
    /// url are trimmed so endpoint paths can be appended verbatim.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, Error> {
        let base_url = base_url.into();
        let username = username.into();
        let password = password.into();
        if base_url.is_empty() || username.is_empty() || password.is_empty() {
            return Err(Error::IncompleteConnection);
        }
        let base_url = base_url.trim_end_matches('/').to_string();
        debug!(base_url = %base_url, username = %username, "connection resolved");
        Ok(Self {
            base_url,
            username,
            password,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_connection_is_accepted() {
        let conn = Connection::new("http://localhost:8080/jasperserver", "jasperadmin", "secret")
            .expect("complete parameters");
        assert_eq!(conn.base_url(), "http://localhost:8080/jasperserver");
        assert_eq!(conn.username(), "jasperadmin");
        assert_eq!(conn.password(), "secret");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let conn = Connection::new("http://localhost:8080/jasperserver/", "u", "p").unwrap();
        assert_eq!(conn.base_url(), "http://localhost:8080/jasperserver");
    }

    #[test]
    fn missing_values_are_rejected() {
        for (url, user, pass) in [
            ("", "u", "p"),
            ("http://localhost", "", "p"),
            ("http://localhost", "u", ""),
        ] {
            let err = Connection::new(url, user, pass).unwrap_err();
            assert!(matches!(err, Error::IncompleteConnection));
        }
    }
}
