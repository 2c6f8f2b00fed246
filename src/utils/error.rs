use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("API request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Pagination failed: {message}")]
    PaginationError { message: String },

    #[error("Source catalog returned no product IDs")]
    EmptyCatalog,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, SyncError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SyncError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SyncError::HttpError(_) | SyncError::UnexpectedStatus { .. } => ErrorCategory::Network,
            SyncError::SerializationError(_)
            | SyncError::PaginationError { .. }
            | SyncError::EmptyCatalog => ErrorCategory::Data,
            SyncError::ConfigError { .. }
            | SyncError::ConfigValidationError { .. }
            | SyncError::InvalidConfigValueError { .. }
            | SyncError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SyncError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路錯誤通常可重試
            SyncError::HttpError(_) | SyncError::UnexpectedStatus { .. } => ErrorSeverity::Medium,
            SyncError::SerializationError(_)
            | SyncError::PaginationError { .. }
            | SyncError::EmptyCatalog => ErrorSeverity::High,
            SyncError::ConfigError { .. }
            | SyncError::ConfigValidationError { .. }
            | SyncError::InvalidConfigValueError { .. }
            | SyncError::MissingConfigError { .. } => ErrorSeverity::High,
            SyncError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check network connectivity, the source/target base URLs and the API credentials, then retry"
            }
            ErrorCategory::Data => {
                "Verify the source catalog is reachable and returns products for this account"
            }
            ErrorCategory::Configuration => {
                "Review the TOML configuration file and the environment variables it references"
            }
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SyncError::HttpError(_) | SyncError::UnexpectedStatus { .. } => {
                format!("無法連線到商品目錄服務: {}", self)
            }
            SyncError::EmptyCatalog => "來源目錄沒有任何商品，同步已中止".to_string(),
            SyncError::PaginationError { message } => format!("商品清單分頁失敗: {}", message),
            SyncError::ConfigError { .. }
            | SyncError::ConfigValidationError { .. }
            | SyncError::InvalidConfigValueError { .. }
            | SyncError::MissingConfigError { .. } => format!("配置錯誤: {}", self),
            _ => self.to_string(),
        }
    }
}
