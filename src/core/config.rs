use std::env;
use std::time::Duration;

use crate::shared::validation::SQL_IDENTIFIER_REGEX;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub warehouse: WarehouseConfig,
    pub admin: AdminConfig,
    pub swagger: SwaggerConfig,
    /// `None` when `MINIO_ENDPOINT` is not set; preview image uploads are then rejected
    pub minio: Option<MinIOConfig>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Location of the two reference tables inside the warehouse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseConfig {
    pub schema: String,
    pub categories_table: String,
    pub works_table: String,
}

/// Shared-password admin access
#[derive(Clone)]
pub struct AdminConfig {
    pub password: String,
    pub session_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// MinIO/S3 storage configuration for work preview images
#[derive(Debug, Clone)]
pub struct MinIOConfig {
    /// MinIO/S3 endpoint URL
    pub endpoint: String,
    /// Public endpoint URL for publicly accessible files (defaults to endpoint)
    pub public_endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub region: String,
    /// Prefix for public files (e.g., "public")
    pub public_prefix: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            warehouse: WarehouseConfig::from_env()?,
            admin: AdminConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            minio: MinIOConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 5;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl WarehouseConfig {
    pub fn from_env() -> Result<Self, String> {
        let schema = env::var("WAREHOUSE_SCHEMA").unwrap_or_else(|_| "settings".to_string());
        let categories_table =
            env::var("CATEGORIES_TABLE").unwrap_or_else(|_| "works_categories".to_string());
        let works_table = env::var("WORKS_TABLE").unwrap_or_else(|_| "works_index".to_string());

        Self::new(schema, categories_table, works_table)
    }

    /// Build a warehouse location, rejecting names that are not plain SQL identifiers.
    /// Table names end up in statement text, so only bound values may carry user input.
    pub fn new(schema: String, categories_table: String, works_table: String) -> Result<Self, String> {
        for (var, value) in [
            ("WAREHOUSE_SCHEMA", &schema),
            ("CATEGORIES_TABLE", &categories_table),
            ("WORKS_TABLE", &works_table),
        ] {
            if !SQL_IDENTIFIER_REGEX.is_match(value) {
                return Err(format!("{} must be a plain SQL identifier, got '{}'", var, value));
            }
        }

        Ok(Self {
            schema,
            categories_table,
            works_table,
        })
    }

    /// Fully qualified categories table, e.g. `"settings"."works_categories"`
    pub fn categories_ref(&self) -> String {
        format!("\"{}\".\"{}\"", self.schema, self.categories_table)
    }

    /// Fully qualified works table, e.g. `"settings"."works_index"`
    pub fn works_ref(&self) -> String {
        format!("\"{}\".\"{}\"", self.schema, self.works_table)
    }
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            schema: "settings".to_string(),
            categories_table: "works_categories".to_string(),
            works_table: "works_index".to_string(),
        }
    }
}

impl AdminConfig {
    const DEFAULT_PASSWORD: &'static str = "admin123";
    const DEFAULT_SESSION_TTL_SECS: u64 = 8 * 60 * 60; // 8 hours

    pub fn from_env() -> Result<Self, String> {
        let password = match env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()) {
            Some(password) => password,
            None => {
                tracing::warn!("ADMIN_PASSWORD not set, falling back to the default password");
                Self::DEFAULT_PASSWORD.to_string()
            }
        };

        let session_ttl_secs = env::var("ADMIN_SESSION_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_SESSION_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "ADMIN_SESSION_TTL_SECS must be a valid number".to_string())?;

        Ok(Self {
            password,
            session_ttl: Duration::from_secs(session_ttl_secs),
        })
    }
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("password", &"<redacted>")
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Works Admin API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Administration of work categories and works".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl MinIOConfig {
    pub fn from_env() -> Result<Option<Self>, String> {
        let endpoint = match env::var("MINIO_ENDPOINT").ok().filter(|s| !s.is_empty()) {
            Some(endpoint) => endpoint,
            None => return Ok(None),
        };

        // Public endpoint defaults to the main endpoint if not specified
        let public_endpoint =
            env::var("MINIO_PUBLIC_ENDPOINT").unwrap_or_else(|_| endpoint.clone());

        let access_key = env::var("MINIO_ACCESS_KEY")
            .map_err(|_| "MINIO_ACCESS_KEY is required when MINIO_ENDPOINT is set".to_string())?;

        let secret_key = env::var("MINIO_SECRET_KEY")
            .map_err(|_| "MINIO_SECRET_KEY is required when MINIO_ENDPOINT is set".to_string())?;

        let bucket = env::var("MINIO_BUCKET").unwrap_or_else(|_| "works-admin".to_string());

        let region = env::var("MINIO_REGION").unwrap_or_else(|_| "us-east-1".to_string());

        let public_prefix =
            env::var("MINIO_PUBLIC_PREFIX").unwrap_or_else(|_| "public".to_string());

        Ok(Some(Self {
            endpoint,
            public_endpoint,
            access_key,
            secret_key,
            bucket,
            region,
            public_prefix,
        }))
    }
}
