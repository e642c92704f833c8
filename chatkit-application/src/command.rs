use crate::{command_entry::CommandEntry, context::CommandContext, error::AppResult};
use async_trait::async_trait;

/// 可调用命令（Command）
///
/// 各类命令（聊天命令、斜杠命令等）彼此无继承关系，只通过组合 `CommandEntry`
/// 共享名称、加锁策略与事件发送能力。
/// - `validate`：注册前调用，默认只校验条目；命令类型可在此追加自身的校验；
/// - `check`：每次调用前的前置检查，失败时命令体不会执行；
/// - `run`：命令体，由注册表按条目的加锁约定调度。
#[async_trait]
pub trait Command: Send + Sync + 'static {
    fn entry(&self) -> &CommandEntry;

    fn entry_mut(&mut self) -> &mut CommandEntry;

    /// 命令别名（与命令名共享同一命名空间）
    fn aliases(&self) -> &[String] {
        &[]
    }

    fn validate(&mut self) -> AppResult<()> {
        self.entry_mut().validate()?;
        Ok(())
    }

    async fn check(&self, _ctx: &CommandContext) -> anyhow::Result<()> {
        Ok(())
    }

    async fn run(&self, ctx: &CommandContext) -> anyhow::Result<()>;
}
