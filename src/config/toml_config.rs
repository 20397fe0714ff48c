use crate::core::auth::DEFAULT_READ_ROLES;
use crate::utils::error::{BookshopError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 4004;
pub const DEFAULT_BASE_PATH: &str = "/odata/v4/catalog";
pub const DEFAULT_SEED_FILE: &str = "db/data/my.bookshop-Books.csv";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub service: ServiceSection,
    pub data: DataConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSection {
    pub name: String,
    pub base_path: String,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            name: "CatalogService".to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Csv,
    Http,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub source: SourceKind,
    pub path: Option<String>,
    pub endpoint: Option<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Csv,
            path: Some(DEFAULT_SEED_FILE.to_string()),
            endpoint: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// 預設關閉：所有讀取皆不需驗證
    pub enabled: bool,
    pub roles: Vec<String>,
    pub users: Vec<UserConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            roles: DEFAULT_READ_ROLES.iter().map(|r| r.to_string()).collect(),
            users: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    pub name: String,
    pub token: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl ServiceConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BookshopError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BookshopError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ADMIN_TOKEN})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BookshopError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        validation::validate_positive_number("server.port", self.server.port as usize, 1)?;
        validation::validate_base_path("service.base_path", &self.service.base_path)?;

        match self.data.source {
            SourceKind::Csv => {
                let path = validation::validate_required_field("data.path", &self.data.path)?;
                validation::validate_path("data.path", path)?;
            }
            SourceKind::Http => {
                let endpoint =
                    validation::validate_required_field("data.endpoint", &self.data.endpoint)?;
                validation::validate_url("data.endpoint", endpoint)?;
            }
            SourceKind::Memory => {}
        }

        if self.auth.enabled && self.auth.roles.is_empty() {
            return Err(BookshopError::InvalidConfigValueError {
                field: "auth.roles".to_string(),
                value: "[]".to_string(),
                reason: "At least one role is required when auth is enabled".to_string(),
            });
        }
        for user in &self.auth.users {
            validation::validate_non_empty_string("auth.users.name", &user.name)?;
            validation::validate_non_empty_string("auth.users.token", &user.token)?;
        }

        Ok(())
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
