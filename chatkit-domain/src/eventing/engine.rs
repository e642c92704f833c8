//! 事件引擎（EventEngine）
//!
//! 统一编排“订阅 → 分发处理”的长驻任务：
//! - 订阅总线事件流，按处理器匹配分发并发执行；
//! - 处理器失败仅记录日志，不影响其他处理器与后续事件；
//! - 提供关闭与等待的 `EngineHandle`。
//!
use super::handler::HandledEventType;
use super::{EventBus, EventHandler};
use crate::command_event::CommandEvent;
use crate::error::{DomainError, DomainResult};
use bon::Builder;
use futures_core::stream::BoxStream;
use futures_util::{StreamExt, stream};
use serde::Deserialize;
use std::{collections::HashMap, sync::Arc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

// 导入由 bon::Builder 生成的 typestate 模块与状态转换别名
use self::event_engine_builder::{IsUnset, SetRegistry, State as BuilderState};

/// EventEngine：
/// - 订阅 Bus 的事件流，分发到匹配的 Handler，并发处理
#[derive(Builder)]
pub struct EventEngine {
    event_bus: Arc<dyn EventBus>,
    #[builder(setters(vis = "pub(crate)"))]
    registry: HandlerRegistry,
    #[builder(default)]
    config: EventEngineConfig,
}

// 自定义 Builder 方法：接收 handlers，内部转换为 HandlerRegistry 并设置到 builder 的 registry 字段。
// 受 typestate 限制，仅当 `registry` 尚未设置时可调用。
impl<S: BuilderState> EventEngineBuilder<S> {
    pub fn event_handlers(
        self,
        handlers: Vec<Arc<dyn EventHandler>>,
    ) -> EventEngineBuilder<SetRegistry<S>>
    where
        <S as BuilderState>::Registry: IsUnset,
    {
        self.registry(HandlerRegistry::new(handlers))
    }
}

impl EventEngine {
    /// 启动事件引擎，返回可用于关闭/等待的句柄
    ///
    /// 订阅在返回前完成，之后发布的事件都会被处理。
    pub async fn start(self: Arc<Self>) -> EngineHandle {
        let token = CancellationToken::new();
        let stream = self.event_bus.subscribe().await;

        let task = tokio::spawn(Self::subscribe_loop(self.clone(), stream, token.clone()));

        EngineHandle {
            token,
            tasks: vec![task],
        }
    }

    async fn subscribe_loop(
        self: Arc<Self>,
        mut stream: BoxStream<'static, DomainResult<CommandEvent>>,
        token: CancellationToken,
    ) {
        let registry = self.registry.clone();
        let concurrency = self.config.handler_concurrency.max(1);

        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    break;
                }
                maybe_event = stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            let merged = registry.matching(event.event_type());
                            if merged.is_empty() { continue; }

                            stream::iter(merged)
                                .for_each_concurrent(Some(concurrency), move |h| {
                                    let ev = event.clone();
                                    async move {
                                        if let Err(err) = deliver(h.as_ref(), &ev).await {
                                            tracing::warn!(
                                                event_type = ev.event_type(),
                                                command = ev.command(),
                                                error = %err,
                                                "event handler failed"
                                            );
                                        }
                                    }
                                })
                                .await;
                        }
                        Some(Err(err)) => {
                            // 忽略错误（如订阅落后），继续处理下一个事件
                            tracing::debug!(error = %err, "event stream error");
                        }
                        None => {
                            break;
                        }
                    }
                }
            }
        }
    }
}

/// 将事件交给单个处理器，失败时包装为 `EventHandler` 错误
async fn deliver(handler: &dyn EventHandler, event: &CommandEvent) -> DomainResult<()> {
    handler
        .handle(event)
        .await
        .map_err(|err| DomainError::event_handler(handler.handler_name(), format!("{err:#}")))
}

#[derive(Clone, Default)]
struct HandlerRegistry {
    by_type: HashMap<String, Vec<Arc<dyn EventHandler>>>,
    all: Vec<Arc<dyn EventHandler>>,
}

impl HandlerRegistry {
    fn new(handlers: Vec<Arc<dyn EventHandler>>) -> Self {
        let mut by_type: HashMap<String, Vec<Arc<dyn EventHandler>>> = HashMap::new();
        let mut all: Vec<Arc<dyn EventHandler>> = Vec::new();

        for h in handlers {
            match h.handled_event_type() {
                HandledEventType::All => all.push(h),
                HandledEventType::One(t) => {
                    by_type.entry(t).or_default().push(h);
                }
                HandledEventType::Many(ts) => {
                    for t in ts {
                        by_type.entry(t).or_default().push(h.clone());
                    }
                }
            }
        }

        Self { by_type, all }
    }

    fn matching(&self, event_type: &str) -> Vec<Arc<dyn EventHandler>> {
        let mut merged: Vec<Arc<dyn EventHandler>> = Vec::new();
        if let Some(list) = self.by_type.get(event_type) {
            merged.extend(list.iter().cloned());
        }
        merged.extend(self.all.iter().cloned());
        merged
    }
}

/// 事件引擎配置
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct EventEngineConfig {
    /// 单事件的处理并发（同一事件广播给多个 handler）
    pub handler_concurrency: usize,
}

impl Default for EventEngineConfig {
    fn default() -> Self {
        Self {
            handler_concurrency: 8,
        }
    }
}

/// 引擎运行句柄：用于优雅关闭与等待任务结束
pub struct EngineHandle {
    token: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl EngineHandle {
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    pub async fn join(mut self) {
        let tasks = std::mem::take(&mut self.tasks);

        for t in tasks {
            let _ = t.await;
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
