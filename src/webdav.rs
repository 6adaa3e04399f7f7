//! Minimal WebDAV client covering the three operations the backup pipeline
//! needs: existence check (PROPFIND), collection creation (MKCOL) and file
//! upload (PUT).

use reqwest::{Client, Method, StatusCode, Url};
use std::time::Duration;

use crate::constants::{BACKUP_CONTENT_TYPE, PCLOUD_HOST};
use crate::error::{AppError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct DavClient {
    http: Client,
    base_url: Url,
    username: String,
    password: String,
    propfind: Method,
    mkcol: Method,
    always_create_dir: bool,
}

impl DavClient {
    /// Build a client rooted at the given WebDAV URL with basic auth
    pub fn new(base_url: &str, username: &str, password: &str) -> Result<Self> {
        // Normalize to a trailing slash so Url::join appends instead of
        // replacing the last path segment
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| AppError::InvalidInput(format!("Invalid WebDAV URL: {}", e)))?;

        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        let propfind = Method::from_bytes(b"PROPFIND")
            .map_err(|e| AppError::InvalidInput(format!("Invalid method: {}", e)))?;
        let mkcol = Method::from_bytes(b"MKCOL")
            .map_err(|e| AppError::InvalidInput(format!("Invalid method: {}", e)))?;

        let always_create_dir = base_url.host_str() == Some(PCLOUD_HOST);

        Ok(Self {
            http,
            base_url,
            username: username.to_string(),
            password: password.to_string(),
            propfind,
            mkcol,
            always_create_dir,
        })
    }

    /// Override the provider policy of creating the backup directory
    /// unconditionally
    pub fn with_always_create_dir(mut self, always_create_dir: bool) -> Self {
        self.always_create_dir = always_create_dir;
        self
    }

    /// Whether the provider needs the backup directory created
    /// unconditionally, skipping the existence check
    pub fn always_create_dir(&self) -> bool {
        self.always_create_dir
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::InvalidInput(format!("Invalid remote path: {}", e)))
    }

    /// Check whether a directory exists (PROPFIND, Depth 0)
    ///
    /// Returns the raw status; 404 means the directory is absent.
    pub async fn stat_dir(&self, dir: &str) -> Result<StatusCode> {
        let url = self.url_for(dir)?;
        let response = self
            .http
            .request(self.propfind.clone(), url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Depth", "0")
            .send()
            .await?;
        Ok(response.status())
    }

    /// Create a directory (MKCOL)
    pub async fn create_dir(&self, dir: &str) -> Result<StatusCode> {
        let url = self.url_for(dir)?;
        let response = self
            .http
            .request(self.mkcol.clone(), url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;
        Ok(response.status())
    }

    /// Upload a file body (PUT, application/octet-stream)
    pub async fn upload(&self, path: &str, body: Vec<u8>) -> Result<StatusCode> {
        let url = self.url_for(path)?;
        let response = self
            .http
            .put(url)
            .basic_auth(&self.username, Some(&self.password))
            .header(reqwest::header::CONTENT_TYPE, BACKUP_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;
        Ok(response.status())
    }
}
