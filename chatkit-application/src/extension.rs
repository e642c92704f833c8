use chatkit_domain::command_event::CommandEvent;
use chatkit_domain::error::DomainResult;
use chatkit_domain::eventing::EventBus;
use std::fmt;
use std::sync::Arc;

/// 扩展（Extension）
///
/// 命令的宿主上下文：一组相关命令归属于同一个扩展，共享宿主提供的事件总线。
/// 命令条目只持有扩展的弱引用，扩展的生命周期由宿主管理。
pub struct Extension {
    name: String,
    bot: Arc<dyn EventBus>,
}

impl Extension {
    pub fn new(name: impl Into<String>, bot: Arc<dyn EventBus>) -> Self {
        Self {
            name: name.into(),
            bot,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 将事件交给宿主事件总线；返回的 future 在投递完成时结束
    pub async fn send(&self, event: &CommandEvent) -> DomainResult<()> {
        tracing::debug!(
            extension = %self.name,
            command = event.command(),
            event_type = event.event_type(),
            "sending command event"
        );
        self.bot.publish(event).await
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
