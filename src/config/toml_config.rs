use crate::domain::ports::SyncSettings;
use crate::utils::error::{Result, SyncError};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_PAGE_SIZE: u64 = 250;
pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_SKU_CONCURRENCY: usize = 5;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_PRODUCTS_PATH: &str = "api/products";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub source: SourceConfig,
    pub target: TargetConfig,
    #[serde(default)]
    pub sync: SyncOptions,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub account: String,
    /// 預設 `https://{account}.vtexcommercestable.com.br`
    pub base_url: Option<String>,
    /// 預設 `https://api.vtex.com/{account}`
    pub pricing_base_url: Option<String>,
    pub app_key: Option<String>,
    pub app_token: Option<String>,
    pub auth_cookie: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    pub base_url: String,
    pub products_path: Option<String>,
    pub api_token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncOptions {
    pub page_size: Option<u64>,
    pub batch_size: Option<usize>,
    pub sku_concurrency: Option<usize>,
    pub max_products: Option<usize>,
    pub dry_run: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_format: Option<String>,
}

impl SourceConfig {
    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("https://{}.vtexcommercestable.com.br", self.account))
    }

    pub fn pricing_base_url(&self) -> String {
        self.pricing_base_url
            .clone()
            .unwrap_or_else(|| format!("https://api.vtex.com/{}", self.account))
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl TargetConfig {
    pub fn products_path(&self) -> &str {
        self.products_path.as_deref().unwrap_or(DEFAULT_PRODUCTS_PATH)
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl SyncConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SyncError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${VTEX_APP_KEY})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR
            .get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_account_name("source.account", &self.source.account)?;
        validation::validate_url("source.base_url", &self.source.base_url())?;
        validation::validate_url("source.pricing_base_url", &self.source.pricing_base_url())?;
        validation::validate_url("target.base_url", &self.target.base_url)?;

        if self.source.app_key.is_some() != self.source.app_token.is_some() {
            return Err(SyncError::ConfigValidationError {
                field: "source.app_key".to_string(),
                message: "app_key and app_token must be configured together".to_string(),
            });
        }

        // 來源 API 單頁上限為 250 筆
        validation::validate_range("sync.page_size", self.page_size(), 1, DEFAULT_PAGE_SIZE)?;
        validation::validate_positive_number("sync.batch_size", self.batch_size(), 1)?;
        validation::validate_positive_number("sync.sku_concurrency", self.sku_concurrency(), 1)?;
        if let Some(max) = self.sync.max_products {
            validation::validate_positive_number("sync.max_products", max, 1)?;
        }

        if let Some(format) = self.monitoring.as_ref().and_then(|m| m.log_format.as_deref()) {
            if LogFormat::parse(format).is_none() {
                return Err(SyncError::InvalidConfigValueError {
                    field: "monitoring.log_format".to_string(),
                    value: format.to_string(),
                    reason: "Valid formats: compact, json".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_format(&self) -> LogFormat {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_format.as_deref())
            .and_then(LogFormat::parse)
            .unwrap_or_default()
    }
}

impl SyncSettings for SyncConfig {
    fn account(&self) -> &str {
        &self.source.account
    }

    fn page_size(&self) -> u64 {
        self.sync.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    fn batch_size(&self) -> usize {
        self.sync.batch_size.unwrap_or(DEFAULT_BATCH_SIZE)
    }

    fn sku_concurrency(&self) -> usize {
        self.sync.sku_concurrency.unwrap_or(DEFAULT_SKU_CONCURRENCY)
    }

    fn max_products(&self) -> Option<usize> {
        self.sync.max_products
    }

    fn dry_run(&self) -> bool {
        self.sync.dry_run.unwrap_or(false)
    }
}

impl Validate for SyncConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
