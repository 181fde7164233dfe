use std::env;
use std::fmt;
use std::path::PathBuf;

/// Well-known logo file looked up when the caller does not upload one.
pub const DEFAULT_LOGO_PATH: &str = "logo_rosario.png";

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub document: DocumentConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let default_logo_path = env::var("GRADE_LOGO_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOGO_PATH));

        let output_dir = env::var("GRADE_OUTPUT_DIR").unwrap_or_else(|_| ".".to_string());
        if output_dir.trim().is_empty() {
            return Err(ConfigError::EmptyOutputDir);
        }

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            document: DocumentConfig {
                default_logo_path,
                output_dir: PathBuf::from(output_dir),
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where rendered documents go and which logo is used by default.
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    pub default_logo_path: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            default_logo_path: PathBuf::from(DEFAULT_LOGO_PATH),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyOutputDir,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyOutputDir => {
                write!(f, "GRADE_OUTPUT_DIR must not be empty when set")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
