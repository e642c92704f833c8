use crate::{
    command::Command, config::RegistryConfig, context::CommandContext, error::AppError,
    error::AppResult,
};
use chatkit_domain::command_event::CommandEventKind;
use chatkit_domain::error::DomainError;
use chatkit_domain::lockable::{Lockable, run_exclusive};
use dashmap::DashMap;
use std::sync::{Arc, Mutex};

/// 基于内存的命令注册表（宿主侧）
/// - 注册前校验命令，校验失败的命令不可调用，且不影响其余命令
/// - 命令名与别名共享同一命名空间，均通过 DashMap 并发查找
/// - 调用时按条目的加锁约定执行命令体，并以“发出即忘”的方式发送命令事件
pub struct CommandRegistry {
    commands: DashMap<String, Arc<dyn Command>>,
    aliases: DashMap<String, String>,
    // 串行化注册/注销，保证命令名与别名的冲突检查和写入是原子的
    write_lock: Mutex<()>,
    config: RegistryConfig,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::with_config(RegistryConfig::default())
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            commands: DashMap::new(),
            aliases: DashMap::new(),
            write_lock: Mutex::new(()),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// 校验并注册命令
    pub fn register<C>(&self, mut command: C) -> AppResult<()>
    where
        C: Command,
    {
        if let Err(err) = command.validate() {
            tracing::warn!(
                command = command.entry().configured_name(),
                error = %err,
                "rejected invalid command"
            );
            return Err(err);
        }

        let name = self.config.normalize(command.entry().name()?);
        // 空别名等同于无名命令，不可调用
        if command.aliases().iter().any(|a| a.is_empty()) {
            tracing::warn!(command = %name, "rejected command with empty alias");
            return Err(DomainError::invalid_command(Some(&name), "empty alias").into());
        }
        let aliases: Vec<String> = command
            .aliases()
            .iter()
            .map(|a| self.config.normalize(a))
            .filter(|a| a != &name)
            .collect();

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        for key in std::iter::once(&name).chain(aliases.iter()) {
            if self.commands.contains_key(key) || self.aliases.contains_key(key) {
                return Err(AppError::AlreadyRegistered { name: key.clone() });
            }
        }
        if let Some(dup) = duplicate(&aliases) {
            return Err(AppError::AlreadyRegistered { name: dup.clone() });
        }

        for alias in &aliases {
            self.aliases.insert(alias.clone(), name.clone());
        }
        tracing::info!(
            command = %name,
            aliases = ?aliases,
            locking = command.entry().locking(),
            "command registered"
        );
        self.commands.insert(name, Arc::new(command));
        Ok(())
    }

    /// 注销命令及其别名
    pub fn unregister(&self, name: &str) -> Option<Arc<dyn Command>> {
        let key = self.config.normalize(name);
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let (_, command) = self.commands.remove(&key)?;
        self.aliases.retain(|_, target| *target != key);
        tracing::info!(command = %key, "command unregistered");
        Some(command)
    }

    /// 按命令名或别名查找
    pub fn get(&self, name_or_alias: &str) -> Option<Arc<dyn Command>> {
        let key = self.config.normalize(name_or_alias);
        if let Some(cmd) = self.commands.get(&key) {
            return Some(cmd.value().clone());
        }
        let target = self.aliases.get(&key).map(|t| t.value().clone())?;
        self.commands.get(&target).map(|c| c.value().clone())
    }

    pub fn contains(&self, name_or_alias: &str) -> bool {
        self.get(name_or_alias).is_some()
    }

    /// 已注册的命令名（不含别名），按字母序
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// 调用命令
    ///
    /// 1. 发送 `Invoked` 事件；
    /// 2. 执行前置检查，失败则发送 `FailedChecks` 并返回 `CheckFailed`；
    /// 3. 按加锁约定执行命令体；
    /// 4. 发送 `Succeeded` 或 `FailedWithError`，后者返回 `CommandFailed`。
    ///
    /// 事件发送不阻塞调用路径，投递失败不影响调用结果。
    pub async fn invoke(&self, name_or_alias: &str, mut ctx: CommandContext) -> AppResult<()> {
        let command = self
            .get(name_or_alias)
            .ok_or_else(|| AppError::CommandNotFound(name_or_alias.to_string()))?;
        let entry = command.entry();
        let name = entry.name()?.to_string();
        ctx.invoked_as = Some(name_or_alias.to_string());

        tracing::debug!(command = %name, invoked_as = name_or_alias, "invoking command");
        self.emit(command.as_ref(), CommandEventKind::Invoked, &ctx);

        if let Err(err) = command.check(&ctx).await {
            let reason = format!("{err:#}");
            tracing::debug!(command = %name, %reason, "command checks failed");
            self.emit(
                command.as_ref(),
                CommandEventKind::FailedChecks {
                    reason: reason.clone(),
                },
                &ctx,
            );
            return Err(AppError::CheckFailed {
                command: name,
                reason,
            });
        }

        match run_exclusive(entry, command.run(&ctx)).await? {
            Ok(()) => {
                self.emit(command.as_ref(), CommandEventKind::Succeeded, &ctx);
                Ok(())
            }
            Err(err) => {
                let reason = format!("{err:#}");
                tracing::warn!(command = %name, %reason, "command failed");
                self.emit(
                    command.as_ref(),
                    CommandEventKind::FailedWithError {
                        reason: reason.clone(),
                    },
                    &ctx,
                );
                Err(AppError::CommandFailed {
                    command: name,
                    reason,
                })
            }
        }
    }

    fn emit(&self, command: &dyn Command, kind: CommandEventKind, ctx: &CommandContext) {
        if !self.config.emit_events {
            return;
        }
        let entry = command.entry();
        let event = entry.event(kind, ctx.invocation.clone());
        // 发出即忘：丢弃句柄后发送任务继续在后台完成
        drop(entry.dispatch_event(event));
    }
}

fn duplicate(keys: &[String]) -> Option<&String> {
    keys.iter()
        .enumerate()
        .find(|(i, k)| keys[..*i].contains(*k))
        .map(|(_, k)| k)
}
