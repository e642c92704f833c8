//! 聊天机器人命令框架领域层基础库（chatkit-domain）
//!
//! 提供以“命令注册表 + 可选串行执行”为中心的通用抽象，用于在宿主应用中实现：
//! - 可加锁能力（`lockable`）：`Lockable` 与每命令独占的 `ExecutionGuard`
//! - 命令事件（`command_event`）：调用生命周期通知与调用上下文
//! - 事件系统（`eventing`）：总线、处理器与事件引擎
//! - 统一错误（`error`）：命令配置校验与事件系统错误
//!
//! 本 crate 不绑定任何具体聊天平台客户端，仅定义领域层接口与最小必要的错误类型，
//! 以便在不同宿主（Discord、Matrix、IRC 等）上进行适配实现。
//!
//! 典型用法：
//! 1. 为命令类型实现（或通过 `#[lockable]` 派生）`Lockable`；
//! 2. 在校验阶段调用 `ensure_guard` 惰性创建守卫；
//! 3. 使用 `run_exclusive` 按加锁约定执行命令体；
//! 4. 通过 `eventing` 构建事件引擎，订阅命令事件。
//!
pub mod command_event;
pub mod error;
#[cfg(feature = "eventing")]
pub mod eventing;
pub mod lockable;

