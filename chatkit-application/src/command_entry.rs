use crate::emit::EmitHandle;
use crate::error::{AppError, AppResult};
use crate::extension::Extension;
use chatkit_domain::command_event::{CommandEvent, CommandEventKind, InvocationContext};
use chatkit_domain::error::{DomainError, DomainResult};
use chatkit_domain::lockable::Lockable;
use chatkit_macros::lockable;
use std::fmt;
use std::sync::{Arc, Weak};

/// 命令条目（Command Entry）
///
/// 一条可调用命令的身份与执行并发策略：
/// - `name`：注册表内唯一的命令名，构造后配置，校验通过前不可读取；
/// - `locking`：为 `true` 时命令体串行执行（由 `#[lockable]` 注入）；
/// - `execution_guard`：校验时惰性创建的独占守卫（由 `#[lockable]` 注入）；
/// - `owner`：所属扩展的弱引用，仅用于访问共享的事件总线。
///
/// 生命周期：构造 → 配置名称/加锁策略 → `validate` → 调用 → 随注册表释放。
#[lockable]
pub struct CommandEntry {
    name: Option<String>,
    validated: bool,
    owner: Weak<Extension>,
}

impl CommandEntry {
    pub fn new(owner: &Arc<Extension>) -> Self {
        Self {
            locking: false,
            execution_guard: None,
            name: None,
            validated: false,
            owner: Arc::downgrade(owner),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    pub fn with_locking(mut self, locking: bool) -> Self {
        self.set_locking(locking);
        self
    }

    /// 设置命令名；重新设置后需要再次校验
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
        self.validated = false;
    }

    /// 已配置但未必通过校验的名称
    pub fn configured_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// 校验通过后的命令名
    pub fn name(&self) -> AppResult<&str> {
        match (&self.name, self.validated) {
            (Some(name), true) => Ok(name),
            _ => Err(AppError::NotValidated(
                self.name.clone().unwrap_or_else(|| "<unnamed>".to_string()),
            )),
        }
    }

    pub fn is_validated(&self) -> bool {
        self.validated
    }

    /// 校验命令配置
    ///
    /// - 名称缺失或为空：返回 `InvalidCommand`，不会创建守卫；
    /// - 开启加锁且尚无守卫：惰性创建；
    /// - 对已合法的条目重复调用没有可观察的差异。
    pub fn validate(&mut self) -> DomainResult<()> {
        if self.name.as_deref().is_none_or(str::is_empty) {
            self.validated = false;
            return Err(DomainError::invalid_command(
                self.name.as_deref(),
                "no command name given",
            ));
        }

        if self.ensure_guard() {
            tracing::trace!(command = self.configured_name(), "execution guard created");
        }
        self.validated = true;
        Ok(())
    }

    pub fn owner(&self) -> Option<Arc<Extension>> {
        self.owner.upgrade()
    }

    /// 以本条目的身份构造一个命令事件
    pub fn event(&self, kind: CommandEventKind, context: InvocationContext) -> CommandEvent {
        let extension = self
            .owner()
            .map(|o| o.name().to_string())
            .unwrap_or_default();

        CommandEvent::builder()
            .command(self.configured_name().unwrap_or_default())
            .extension(extension)
            .kind(kind)
            .context(context)
            .build()
    }

    /// 不阻塞地将事件交给所属扩展的事件总线
    ///
    /// 立即返回进行中的发送句柄；投递失败通过等待句柄得到，条目本身不吞掉也不重试。
    /// 所属扩展已释放或当前不在 Tokio 运行时中时，返回一个立即失败的句柄。
    pub fn dispatch_event(&self, event: CommandEvent) -> EmitHandle {
        let Some(owner) = self.owner() else {
            return EmitHandle::failed(DomainError::event_bus("owner extension dropped"));
        };

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(rt) => rt,
            Err(err) => {
                return EmitHandle::failed(DomainError::event_bus(format!(
                    "no async runtime to emit on: {err}"
                )));
            }
        };

        EmitHandle::running(runtime.spawn(async move {
            let result = owner.send(&event).await;
            if let Err(err) = &result {
                tracing::debug!(
                    extension = owner.name(),
                    command = event.command(),
                    event_type = event.event_type(),
                    error = %err,
                    "command event delivery failed"
                );
            }
            result
        }))
    }
}

impl fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("name", &self.name)
            .field("locking", &self.locking)
            .field("has_guard", &self.execution_guard.is_some())
            .field("validated", &self.validated)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chatkit_domain::eventing::{EventBus, InMemoryEventBus};
    use chatkit_domain::lockable::run_exclusive;
    use futures_core::stream::BoxStream;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    // 慢速事件总线：投递耗时远大于调用返回所需时间
    struct SlowBus {
        delay: Duration,
        fail: bool,
        published: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl EventBus for SlowBus {
        async fn publish(&self, event: &CommandEvent) -> DomainResult<()> {
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err(DomainError::event_bus("bus unavailable"));
            }
            self.published
                .lock()
                .unwrap()
                .push(event.event_type().to_string());
            Ok(())
        }

        async fn subscribe(&self) -> BoxStream<'static, DomainResult<CommandEvent>> {
            Box::pin(futures_util::stream::empty())
        }
    }

    fn extension() -> Arc<Extension> {
        Arc::new(Extension::new("core", Arc::new(InMemoryEventBus::new(8))))
    }

    #[test]
    fn missing_or_empty_name_is_invalid() {
        let ext = extension();

        let mut unnamed = CommandEntry::new(&ext);
        let err = unnamed.validate().unwrap_err();
        assert!(err.is_invalid_command());

        let mut empty = CommandEntry::new(&ext).with_name("").with_locking(true);
        let err = empty.validate().unwrap_err();
        assert!(err.is_invalid_command());
        // 名称非法时不会创建守卫
        assert!(empty.execution_guard().is_none());
        assert!(!empty.is_validated());
    }

    #[test]
    fn ping_without_locking_validates_without_guard() {
        let ext = extension();
        let mut ping = CommandEntry::new(&ext).with_name("ping");

        ping.validate().unwrap();

        assert_eq!(ping.name().unwrap(), "ping");
        assert!(!ping.locking());
        assert!(ping.execution_guard().is_none());
    }

    #[test]
    fn locking_entry_gets_guard_once() {
        let ext = extension();
        let mut entry = CommandEntry::new(&ext).with_name("ban").with_locking(true);

        entry.validate().unwrap();
        let first: *const _ = entry.execution_guard().unwrap();
        entry.validate().unwrap();
        let second = entry.execution_guard().unwrap();

        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn name_is_rejected_before_validation() {
        let ext = extension();
        let mut entry = CommandEntry::new(&ext).with_name("ping");
        assert!(matches!(entry.name(), Err(AppError::NotValidated(n)) if n == "ping"));

        entry.validate().unwrap();
        assert!(entry.name().is_ok());

        // 重新设置名称后需再次校验
        entry.set_name("pong");
        assert!(entry.name().is_err());
        assert_eq!(entry.configured_name(), Some("pong"));
    }

    #[tokio::test]
    async fn lingering_guard_is_not_used_once_locking_is_off() {
        let ext = extension();
        let mut entry = CommandEntry::new(&ext).with_name("ban").with_locking(true);
        entry.validate().unwrap();
        entry.set_locking(false);

        let held = entry.execution_guard().unwrap().try_acquire();
        // 守卫被占用也不影响非加锁执行
        let out = run_exclusive(&entry, async { 7 }).await.unwrap();
        assert_eq!(out, 7);
        drop(held);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn dispatch_returns_before_slow_delivery_completes() {
        let bus = Arc::new(SlowBus {
            delay: Duration::from_millis(300),
            fail: false,
            published: Mutex::new(Vec::new()),
        });
        let ext = Arc::new(Extension::new("core", bus.clone()));
        let mut entry = CommandEntry::new(&ext).with_name("ping");
        entry.validate().unwrap();

        let started = Instant::now();
        let handle = entry.dispatch_event(
            entry.event(CommandEventKind::Invoked, InvocationContext::default()),
        );
        assert!(started.elapsed() < Duration::from_millis(100));
        assert!(!handle.is_finished());
        assert!(bus.published.lock().unwrap().is_empty());

        handle.await.unwrap();
        assert_eq!(*bus.published.lock().unwrap(), vec!["command.invoked"]);
    }

    #[tokio::test]
    async fn delivery_failure_surfaces_to_awaiter() {
        let bus = Arc::new(SlowBus {
            delay: Duration::from_millis(1),
            fail: true,
            published: Mutex::new(Vec::new()),
        });
        let ext = Arc::new(Extension::new("core", bus));
        let mut entry = CommandEntry::new(&ext).with_name("ping");
        entry.validate().unwrap();

        let err = entry
            .dispatch_event(entry.event(CommandEventKind::Succeeded, InvocationContext::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::EventBus { reason } if reason == "bus unavailable"));
    }

    #[tokio::test]
    async fn aborting_emission_leaves_guard_untouched() {
        let bus = Arc::new(SlowBus {
            delay: Duration::from_secs(5),
            fail: false,
            published: Mutex::new(Vec::new()),
        });
        let ext = Arc::new(Extension::new("core", bus.clone()));
        let mut entry = CommandEntry::new(&ext).with_name("ban").with_locking(true);
        entry.validate().unwrap();

        let handle =
            entry.dispatch_event(entry.event(CommandEventKind::Invoked, InvocationContext::default()));
        handle.abort();
        let err = handle.await.unwrap_err();
        assert!(matches!(err, DomainError::EventBus { .. }));

        assert!(!entry.execution_guard().unwrap().is_held());
        assert!(run_exclusive(&entry, async { true }).await.unwrap());
        assert!(bus.published.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn dispatch_after_owner_dropped_fails_fast() {
        let ext = extension();
        let mut entry = CommandEntry::new(&ext).with_name("ping");
        entry.validate().unwrap();
        let event = entry.event(CommandEventKind::Invoked, InvocationContext::default());
        assert_eq!(event.extension(), "core");
        drop(ext);

        let handle = entry.dispatch_event(event);
        assert!(handle.is_finished());
        assert!(matches!(handle.await, Err(DomainError::EventBus { .. })));
    }
}
