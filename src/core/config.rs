use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub uploads: UploadsConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

/// Settings needed before the Tokio runtime is built
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub worker_threads: usize,
}

/// Location of the directory served under `/uploads`
#[derive(Debug, Clone)]
pub struct UploadsConfig {
    pub dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            uploads: UploadsConfig::from_env(),
        })
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::parse(env::var("TOKIO_WORKER_THREADS").ok().as_deref())
    }

    /// Unset means one worker per available CPU; zero is rejected because the
    /// runtime builder panics on it.
    fn parse(raw: Option<&str>) -> Result<Self, String> {
        let worker_threads = match raw {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    format!("TOKIO_WORKER_THREADS must be a positive number, got {value:?}")
                })?,
            None => std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4),
        };

        Ok(Self { worker_threads })
    }
}

impl AppConfig {
    const DEFAULT_HOST: &'static str = "0.0.0.0";
    const DEFAULT_PORT: u16 = 3000;
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024; // 1MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| Self::DEFAULT_HOST.to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| Self::DEFAULT_PORT.to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let cors_allowed_origins =
            parse_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()));

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_string(),
            port: Self::DEFAULT_PORT,
            cors_allowed_origins: vec!["*".to_string()],
            max_request_body_size: Self::DEFAULT_MAX_REQUEST_BODY_SIZE,
        }
    }
}

impl DatabaseConfig {
    const DEFAULT_URL: &'static str = "sqlite://images.db";
    // SQLite serializes writers, so a small pool is enough
    const DEFAULT_MAX_CONNECTIONS: u32 = 5;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").unwrap_or_else(|_| Self::DEFAULT_URL.to_string());

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            acquire_timeout_secs,
        })
    }
}

impl UploadsConfig {
    const DEFAULT_DIR: &'static str = "uploads";

    pub fn from_env() -> Self {
        let dir = env::var("UPLOADS_DIR").unwrap_or_else(|_| Self::DEFAULT_DIR.to_string());
        Self {
            dir: PathBuf::from(dir),
        }
    }
}

/// Parse a comma-separated origin list, dropping blank entries
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
