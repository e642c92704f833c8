//! 可加锁能力（Lockable）
//!
//! 将“执行需串行化”抽象为可组合的横切能力，而非继承自公共基类：
//! - `Lockable`：暴露 `locking` 开关与惰性创建的 `ExecutionGuard`；
//! - `ExecutionGuard`：每个实体独占的互斥句柄；
//! - `run_exclusive`：调用方在执行命令体时遵循的加锁约定。
//!
//! 任意结构体都可以通过 `#[lockable]` 属性宏（见 `chatkit-macros`）获得该能力。
//!
use crate::error::{DomainError, DomainResult};
use std::future::Future;
use tokio::sync::{Mutex, MutexGuard};

/// 执行守卫：保证同一实体的命令体同一时刻至多执行一次
///
/// 基于 `tokio::sync::Mutex`，等待者按请求顺序（FIFO）获得守卫。
/// 不实现 `Clone`：守卫归所属实体独占，不能在实体之间共享。
#[derive(Debug, Default)]
pub struct ExecutionGuard {
    inner: Mutex<()>,
}

impl ExecutionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取守卫；若已被占用则挂起直至前一个持有者释放
    pub async fn acquire(&self) -> ExecutionPermit<'_> {
        ExecutionPermit {
            _permit: self.inner.lock().await,
        }
    }

    /// 非阻塞地尝试获取守卫
    pub fn try_acquire(&self) -> Option<ExecutionPermit<'_>> {
        self.inner
            .try_lock()
            .ok()
            .map(|permit| ExecutionPermit { _permit: permit })
    }

    /// 当前是否有执行正在持有守卫
    pub fn is_held(&self) -> bool {
        self.inner.try_lock().is_err()
    }
}

/// 持有期间独占执行权，离开作用域（包括出错或 panic 展开）时释放
#[must_use = "dropping the permit releases the execution guard immediately"]
pub struct ExecutionPermit<'a> {
    _permit: MutexGuard<'a, ()>,
}

/// 可串行化执行的能力
pub trait Lockable {
    /// 是否开启加锁执行
    fn locking(&self) -> bool;

    fn set_locking(&mut self, locking: bool);

    /// 已创建的执行守卫（可能是此前 `locking = true` 时遗留的）
    fn execution_guard(&self) -> Option<&ExecutionGuard>;

    fn execution_guard_mut(&mut self) -> &mut Option<ExecutionGuard>;

    /// 开启加锁且尚无守卫时惰性创建；返回本次是否新建了守卫
    fn ensure_guard(&mut self) -> bool {
        if self.locking() && self.execution_guard().is_none() {
            *self.execution_guard_mut() = Some(ExecutionGuard::new());
            return true;
        }
        false
    }

    /// 执行路径实际应使用的守卫：`locking = false` 时永远为 `None`
    fn active_guard(&self) -> Option<&ExecutionGuard> {
        if self.locking() {
            self.execution_guard()
        } else {
            None
        }
    }
}

/// 按加锁约定执行 `body`
///
/// - `locking = true`：获取守卫 → 执行 → 无条件释放；
/// - `locking = false`：直接执行，允许并发交错；
/// - 开启加锁却尚未创建守卫（未经校验）时返回 `InvalidState`，不执行 `body`。
pub async fn run_exclusive<L, F, T>(lockable: &L, body: F) -> DomainResult<T>
where
    L: Lockable + ?Sized,
    F: Future<Output = T>,
{
    if !lockable.locking() {
        return Ok(body.await);
    }

    let guard = lockable.active_guard().ok_or_else(|| {
        DomainError::invalid_state("locking enabled but no execution guard; validate first")
    })?;
    let _permit = guard.acquire().await;
    Ok(body.await)
}
