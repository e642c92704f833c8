//! 领域层统一错误定义
//!
//! 聚焦命令配置校验、加锁状态与事件系统的最小必要集合，
//! 便于在应用层统一转换为 `AppError`。
//!
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 命令配置/状态 ---
    /// 命令配置非法（名称缺失或为空、缺少命令体等），仅由 `validate` 抛出
    #[error("invalid command configuration: command={}, reason={reason}", .name.as_deref().unwrap_or("<unnamed>"))]
    InvalidCommand {
        name: Option<String>,
        reason: String,
    },

    #[error("invalid state: {reason}")]
    InvalidState { reason: String },

    // --- 事件系统 ---
    #[error("event bus error: {reason}")]
    EventBus { reason: String },

    #[error("event handler error: handler={handler}, reason={reason}")]
    EventHandler { handler: String, reason: String },
}

impl DomainError {
    pub fn invalid_command(name: Option<&str>, reason: impl Into<String>) -> Self {
        DomainError::InvalidCommand {
            name: name.map(str::to_string),
            reason: reason.into(),
        }
    }

    pub fn invalid_state(reason: impl Into<String>) -> Self {
        DomainError::InvalidState {
            reason: reason.into(),
        }
    }

    pub fn event_bus(reason: impl Into<String>) -> Self {
        DomainError::EventBus {
            reason: reason.into(),
        }
    }

    pub fn event_handler(handler: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::EventHandler {
            handler: handler.into(),
            reason: reason.into(),
        }
    }

    /// 是否为命令配置错误
    pub fn is_invalid_command(&self) -> bool {
        matches!(self, DomainError::InvalidCommand { .. })
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_command_message_falls_back_for_unnamed() {
        let err = DomainError::invalid_command(None, "no command name given");
        assert!(err.is_invalid_command());
        assert_eq!(
            err.to_string(),
            "invalid command configuration: command=<unnamed>, reason=no command name given"
        );

        let err = DomainError::invalid_command(Some("ping"), "no command body given");
        assert!(err.to_string().contains("command=ping"));
    }
}
