/// Eventing 引擎（内存版）示例
/// 展示 Bus -> Handlers 的分发，以及 handler 失败不影响其他处理器
use anyhow::Result as AnyResult;
use chatkit_domain::command_event::{CommandEvent, CommandEventKind, InvocationContext};
use chatkit_domain::eventing::{
    EventBus, EventEngine, EventEngineConfig, EventHandler, HandledEventType, InMemoryEventBus,
};
use std::{sync::Arc, time::Duration};

// ============================================================================
// 示例处理器（EventHandler）
// ============================================================================

#[derive(Clone)]
struct PrintHandler {
    name: &'static str,
    types: HandledEventType,
    fail_on: Option<&'static str>,
}

#[async_trait::async_trait]
impl EventHandler for PrintHandler {
    async fn handle(&self, event: &CommandEvent) -> anyhow::Result<()> {
        if let Some(bad) = self.fail_on
            && event.command() == bad
        {
            anyhow::bail!("{} failed on {}", self.name, bad);
        }
        println!(
            "handler={} type={} command={} actor={:?}",
            self.name,
            event.event_type(),
            event.command(),
            event.context().actor_id()
        );
        Ok(())
    }

    fn handled_event_type(&self) -> HandledEventType {
        self.types.clone()
    }
    fn handler_name(&self) -> &str {
        self.name
    }
}

// ============================================================================
// 工具函数
// ============================================================================

fn mk_event(command: &str, kind: CommandEventKind) -> CommandEvent {
    let context = InvocationContext::builder()
        .maybe_correlation_id(Some(format!("cor-{command}")))
        .maybe_actor_id(Some("u-1".to_string()))
        .maybe_channel_id(Some("general".to_string()))
        .build();

    CommandEvent::builder()
        .command(command)
        .extension("demo")
        .kind(kind)
        .context(context)
        .build()
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> AnyResult<()> {
    println!("=== Eventing 引擎（内存版）示例 ===\n");
    let bus = Arc::new(InMemoryEventBus::new(1024));

    let handlers: Vec<Arc<dyn EventHandler>> = vec![
        Arc::new(PrintHandler {
            name: "printer",
            types: HandledEventType::All,
            fail_on: None,
        }),
        Arc::new(PrintHandler {
            name: "sometimes_fail",
            types: HandledEventType::One("command.succeeded".to_string()),
            fail_on: Some("ban"),
        }),
    ];

    let engine = Arc::new(
        EventEngine::builder()
            .event_bus(bus.clone())
            .event_handlers(handlers)
            .config(EventEngineConfig {
                handler_concurrency: 8,
            })
            .build(),
    );

    let handle = engine.start().await;
    println!("✅ 引擎已启动");

    bus.publish(&mk_event("ping", CommandEventKind::Invoked)).await?;
    bus.publish(&mk_event("ping", CommandEventKind::Succeeded)).await?;
    bus.publish(&mk_event("ban", CommandEventKind::Succeeded)).await?;
    println!("✅ 已发布事件: ping(invoked), ping(succeeded), ban(succeeded)");

    tokio::time::sleep(Duration::from_millis(500)).await;
    handle.shutdown();
    handle.join().await;
    println!("\n✅ 优雅关闭完成");
    Ok(())
}
