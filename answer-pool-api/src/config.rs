use crate::allocation::SheetLayout;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub sheets: SheetsConfig,
    pub cors: Option<CorsConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SheetsConfig {
    #[serde(default = "default_answers_sheet")]
    pub answers: String,
    #[serde(default = "default_responses_sheet")]
    pub responses: String,
    /// Create missing sheets with their headers when the server starts
    #[serde(default)]
    pub create_missing: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub directory: Option<PathBuf>,
}

fn default_answers_sheet() -> String {
    SheetLayout::default().answers
}

fn default_responses_sheet() -> String {
    SheetLayout::default().responses
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            answers: default_answers_sheet(),
            responses: default_responses_sheet(),
            create_missing: false,
        }
    }
}

impl SheetsConfig {
    pub fn layout(&self) -> SheetLayout {
        SheetLayout {
            answers: self.answers.clone(),
            responses: self.responses.clone(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                path: get_default_db_path(),
            },
            sheets: SheetsConfig::default(),
            cors: Some(CorsConfig {
                allowed_origins: vec!["*".to_string()],
            }),
            logging: None,
        }
    }
}

impl ApiConfig {
    /// Loads the config from its default location, writing a default file
    /// on first run
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        Self::load_from(&get_config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<(Self, PathBuf), ConfigError> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ConfigError::Message(format!("Failed to create config directory: {e}"))
                })?;
            }
        }

        if !config_path.exists() {
            std::fs::write(config_path, default_config_file(&get_default_db_path())).map_err(
                |e| ConfigError::Message(format!("Failed to write default config: {e}")),
            )?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.to_path_buf()))
            .add_source(
                Environment::with_prefix("ANSWER_POOL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: ApiConfig = builder.try_deserialize()?;

        config.database.path = expand_tilde(&config.database.path);
        if let Some(logging) = config.logging.as_mut() {
            logging.directory = logging.directory.as_deref().map(expand_tilde);
        }

        Ok((config, config_path.to_path_buf()))
    }
}

fn default_config_file(db_path: &Path) -> String {
    format!(
        r#"
[server]
host = "127.0.0.1"
port = 8080

[database]
path = "{}"

[sheets]
answers = "Answers"
responses = "Responses"
create_missing = false

[cors]
allowed_origins = ["*"]

[logging]
# directory = "~/.local/share/answer-pool/logs"
"#,
        toml_escape(&db_path.to_string_lossy())
    )
}

/// Escapes text for a TOML basic string, e.g. Windows path separators
fn toml_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn expand_tilde(path: &Path) -> PathBuf {
    if path.starts_with("~") {
        if let Some(home) = home::home_dir() {
            let path_str = path.to_string_lossy();
            let expanded = path_str.replacen('~', &home.to_string_lossy(), 1);
            return PathBuf::from(expanded);
        }
    }
    path.to_path_buf()
}

fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("answer-pool/api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}

fn get_default_db_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        data_dir.join("answer-pool/sheets.db")
    } else {
        PathBuf::from("sheets.db")
    }
}
