use crate::{
    command::Command, command_entry::CommandEntry, context::CommandContext, error::AppResult,
    extension::Extension,
};
use async_trait::async_trait;
use chatkit_domain::error::DomainError;
use chatkit_domain::lockable::Lockable;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

type ChatActionFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'static>>;
type ChatActionFn = Arc<dyn Fn(CommandContext) -> ChatActionFuture + Send + Sync>;

/// 基于闭包的聊天命令
///
/// ```rust
/// # use chatkit_application::{ChatCommand, extension::Extension};
/// # use chatkit_domain::eventing::InMemoryEventBus;
/// # use std::sync::Arc;
/// let ext = Arc::new(Extension::new("core", Arc::new(InMemoryEventBus::default())));
/// let ping = ChatCommand::new(&ext)
///     .with_name("ping")
///     .with_description("Check the bot is alive")
///     .with_alias("p")
///     .with_action(|_ctx| async { Ok(()) });
/// assert_eq!(ping.description(), "Check the bot is alive");
/// ```
pub struct ChatCommand {
    entry: CommandEntry,
    description: String,
    aliases: Vec<String>,
    action: Option<ChatActionFn>,
}

impl ChatCommand {
    pub fn new(owner: &Arc<Extension>) -> Self {
        Self {
            entry: CommandEntry::new(owner),
            description: String::new(),
            aliases: Vec::new(),
            action: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.entry.set_name(name);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn with_locking(mut self, locking: bool) -> Self {
        self.entry.set_locking(locking);
        self
    }

    pub fn with_action<F, Fut>(mut self, action: F) -> Self
    where
        F: Fn(CommandContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.action = Some(Arc::new(move |ctx| -> ChatActionFuture { Box::pin(action(ctx)) }));
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[async_trait]
impl Command for ChatCommand {
    fn entry(&self) -> &CommandEntry {
        &self.entry
    }

    fn entry_mut(&mut self) -> &mut CommandEntry {
        &mut self.entry
    }

    fn aliases(&self) -> &[String] {
        &self.aliases
    }

    fn validate(&mut self) -> AppResult<()> {
        self.entry.validate()?;

        if self.action.is_none() {
            return Err(DomainError::invalid_command(
                self.entry.configured_name(),
                "no command body given",
            )
            .into());
        }
        Ok(())
    }

    async fn run(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        match &self.action {
            Some(action) => action(ctx.clone()).await,
            None => anyhow::bail!("command has no body"),
        }
    }
}
