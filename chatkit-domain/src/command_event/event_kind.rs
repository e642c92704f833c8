use serde::{Deserialize, Serialize};

/// 命令事件类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandEventKind {
    /// 命令被调用（命令体执行前）
    Invoked,
    /// 命令体执行成功
    Succeeded,
    /// 前置检查未通过，命令体未执行
    FailedChecks { reason: String },
    /// 命令体执行出错
    FailedWithError { reason: String },
}

impl CommandEventKind {
    /// 稳定的事件类型名，用于处理器路由
    pub fn event_type(&self) -> &'static str {
        match self {
            CommandEventKind::Invoked => "command.invoked",
            CommandEventKind::Succeeded => "command.succeeded",
            CommandEventKind::FailedChecks { .. } => "command.failed_checks",
            CommandEventKind::FailedWithError { .. } => "command.failed_with_error",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            CommandEventKind::FailedChecks { .. } | CommandEventKind::FailedWithError { .. }
        )
    }
}
