//! 命令事件（Command Event）
//!
//! 命令调用生命周期中向宿主事件总线广播的通知：
//! - `CommandEvent`：事件本体（命令名、所属扩展、类型、发生时间、调用上下文）；
//! - `CommandEventKind`：调用/成功/检查失败/执行失败；
//! - `InvocationContext`：一次调用的横切信息（关联 ID、触发者、频道等）。

mod event;
mod event_kind;
mod invocation_context;

pub use event::CommandEvent;
pub use event_kind::CommandEventKind;
pub use invocation_context::InvocationContext;
