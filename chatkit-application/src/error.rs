use chatkit_domain::error::DomainError;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("command not validated: {0}")]
    NotValidated(String),

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("command already registered: name={name}")]
    AlreadyRegistered { name: String },

    #[error("checks failed: command={command}, reason={reason}")]
    CheckFailed { command: String, reason: String },

    #[error("command failed: command={command}, reason={reason}")]
    CommandFailed { command: String, reason: String },
}

impl AppError {
    /// 是否为命令配置错误（仅由校验阶段产生）
    pub fn is_invalid_command(&self) -> bool {
        matches!(self, AppError::Domain(e) if e.is_invalid_command())
    }
}

pub type AppResult<T> = Result<T, AppError>;
