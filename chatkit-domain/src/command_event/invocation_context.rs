use bon::Builder;
use serde::{Deserialize, Serialize};

/// 调用上下文信息
#[derive(Builder, Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationContext {
    /// 关联ID
    correlation_id: Option<String>,
    /// 触发调用的用户ID
    actor_id: Option<String>,
    /// 调用发生的频道ID
    channel_id: Option<String>,
    /// 调用发生的服务器（群组）ID，私聊时为空
    guild_id: Option<String>,
}

impl InvocationContext {
    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn actor_id(&self) -> Option<&str> {
        self.actor_id.as_deref()
    }

    pub fn channel_id(&self) -> Option<&str> {
        self.channel_id.as_deref()
    }

    pub fn guild_id(&self) -> Option<&str> {
        self.guild_id.as_deref()
    }
}
