use async_trait::async_trait;
use chatkit_application::command::Command;
use chatkit_application::context::CommandContext;
use chatkit_application::extension::Extension;
use chatkit_application::{ChatCommand, CommandEntry, CommandRegistry};
use chatkit_domain::command_event::{CommandEvent, InvocationContext};
use chatkit_domain::eventing::{EventEngine, EventHandler, HandledEventType, InMemoryEventBus};
use std::sync::Arc;
use std::time::Duration;

/// 需要串行执行的命令：同一时刻只允许一个清理任务
struct PurgeCommand {
    entry: CommandEntry,
}

#[async_trait]
impl Command for PurgeCommand {
    fn entry(&self) -> &CommandEntry {
        &self.entry
    }

    fn entry_mut(&mut self) -> &mut CommandEntry {
        &mut self.entry
    }

    async fn run(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        let count: usize = ctx.arg(0).unwrap_or("10").parse()?;
        println!("purging {count} messages...");
        tokio::time::sleep(Duration::from_millis(100)).await;
        println!("purged {count} messages");
        Ok(())
    }
}

struct AuditLog;

#[async_trait]
impl EventHandler for AuditLog {
    fn handler_name(&self) -> &str {
        "audit"
    }

    fn handled_event_type(&self) -> HandledEventType {
        HandledEventType::All
    }

    async fn handle(&self, event: &CommandEvent) -> anyhow::Result<()> {
        println!(
            "[audit] {} {}/{} by {:?}",
            event.event_type(),
            event.extension(),
            event.command(),
            event.context().actor_id()
        );
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bus = Arc::new(InMemoryEventBus::default());
    let engine = Arc::new(
        EventEngine::builder()
            .event_bus(bus.clone())
            .event_handlers(vec![Arc::new(AuditLog)])
            .build(),
    );
    let handle = engine.start().await;

    let ext = Arc::new(Extension::new("moderation", bus));
    let registry = Arc::new(CommandRegistry::new());

    registry.register(
        ChatCommand::new(&ext)
            .with_name("ping")
            .with_alias("p")
            .with_description("Check the bot is alive")
            .with_action(|_| async {
                println!("pong!");
                Ok(())
            }),
    )?;
    registry.register(PurgeCommand {
        entry: CommandEntry::new(&ext).with_name("purge").with_locking(true),
    })?;

    // 名称为空的命令无法注册，其余命令不受影响
    if let Err(err) = registry.register(ChatCommand::new(&ext).with_action(|_| async { Ok(()) })) {
        println!("rejected: {err}");
    }

    let ctx = CommandContext {
        invocation: InvocationContext::builder()
            .maybe_actor_id(Some("u-1".into()))
            .maybe_channel_id(Some("general".into()))
            .build(),
        ..Default::default()
    };
    registry.invoke("p", ctx.clone()).await?;

    // 两次并发清理会按顺序执行
    let (a, b) = tokio::join!(
        registry.invoke("purge", CommandContext { args: vec!["5".into()], ..ctx.clone() }),
        registry.invoke("purge", CommandContext { args: vec!["20".into()], ..ctx.clone() }),
    );
    a?;
    b?;

    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.shutdown();
    handle.join().await;
    Ok(())
}
