use super::{CommandEventKind, InvocationContext};
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
pub struct CommandEvent {
    /// 事件唯一标识符
    #[builder(default = uuid::Uuid::new_v4().to_string())]
    event_id: String,
    /// 命令名称
    #[builder(into)]
    command: String,
    /// 命令所属扩展名称
    #[builder(into)]
    extension: String,
    /// 事件类型
    kind: CommandEventKind,
    /// 事件发生时间
    #[builder(default = Utc::now())]
    occurred_at: DateTime<Utc>,
    /// 调用上下文
    #[builder(default)]
    context: InvocationContext,
}

impl CommandEvent {
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn kind(&self) -> &CommandEventKind {
        &self.kind
    }

    pub fn occurred_at(&self) -> &DateTime<Utc> {
        &self.occurred_at
    }

    pub fn context(&self) -> &InvocationContext {
        &self.context
    }
}
