//! 事件处理器（EventHandler）
//!
//! 定义消费某类/多类/全部命令事件的处理逻辑与元信息（名称、订阅类型）。
//!
use crate::command_event::CommandEvent;
use async_trait::async_trait;

#[derive(Clone, Debug)]
pub enum HandledEventType {
    One(String),
    Many(Vec<String>),
    All,
}

/// 事件处理器：处理某一类型的命令事件
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// 处理器名称（用于失败记录与审计）
    fn handler_name(&self) -> &str;
    /// 返回该处理器支持的事件类型（见 `CommandEventKind::event_type`）
    fn handled_event_type(&self) -> HandledEventType;
    /// 处理事件
    async fn handle(&self, event: &CommandEvent) -> anyhow::Result<()>;
}
