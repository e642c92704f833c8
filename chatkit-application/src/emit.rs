use chatkit_domain::error::{DomainError, DomainResult};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::task::JoinHandle;

/// 进行中的事件发送句柄
///
/// 由 `CommandEntry::dispatch_event` 立即返回，调用方可选择等待、忽略或取消：
/// - `.await`：得到下游事件总线的投递结果；
/// - 直接丢弃：发送任务继续在后台执行；
/// - `abort()`：取消发送，不影响命令体本身的执行与守卫状态。
#[must_use = "await the handle to observe delivery failures, or drop it to detach"]
pub struct EmitHandle {
    state: EmitState,
}

enum EmitState {
    Running(JoinHandle<DomainResult<()>>),
    Failed(Option<DomainError>),
}

impl EmitHandle {
    pub(crate) fn running(task: JoinHandle<DomainResult<()>>) -> Self {
        Self {
            state: EmitState::Running(task),
        }
    }

    /// 无法发起发送（如所属扩展已释放）时，返回一个立即完成的失败句柄
    pub(crate) fn failed(err: DomainError) -> Self {
        Self {
            state: EmitState::Failed(Some(err)),
        }
    }

    /// 取消尚未完成的发送
    pub fn abort(&self) {
        if let EmitState::Running(task) = &self.state {
            task.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        match &self.state {
            EmitState::Running(task) => task.is_finished(),
            EmitState::Failed(_) => true,
        }
    }
}

impl Future for EmitHandle {
    type Output = DomainResult<()>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().state {
            EmitState::Running(task) => Pin::new(task).poll(cx).map(|joined| match joined {
                Ok(result) => result,
                Err(err) if err.is_cancelled() => {
                    Err(DomainError::event_bus("event emission cancelled"))
                }
                Err(err) => Err(DomainError::event_bus(format!(
                    "event emission task failed: {err}"
                ))),
            }),
            EmitState::Failed(err) => Poll::Ready(Err(err
                .take()
                .unwrap_or_else(|| DomainError::event_bus("emit handle polled after completion")))),
        }
    }
}
