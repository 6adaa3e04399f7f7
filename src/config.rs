use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub allowed_origins: Vec<String>,
    /// WebDAV endpoint root, e.g. `https://dav.example.com/remote.php/dav/`.
    /// Backups are disabled when unset.
    pub webdav_url: Option<String>,
    pub webdav_username: String,
    pub webdav_password: String,
    /// Run the backup pipeline after every local mutation
    pub auto_backup: bool,
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/ledgerkeeper.db".to_string());

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let webdav_url = env::var("WEBDAV_URL").ok().filter(|s| !s.is_empty());
        let webdav_username = env::var("WEBDAV_USERNAME").unwrap_or_default();
        let webdav_password = env::var("WEBDAV_PASSWORD").unwrap_or_default();

        let auto_backup = env::var("AUTO_BACKUP")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .map_err(|_| "Invalid AUTO_BACKUP")?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            server_host,
            server_port,
            database_path,
            allowed_origins,
            webdav_url,
            webdav_username,
            webdav_password,
            auto_backup,
            environment,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
