//! 事件子系统（eventing）
//!
//! 提供命令事件发布/订阅与处理的基础抽象与运行时：
//! - `EventBus`：统一发布/订阅接口，扩展（Extension）借此向宿主广播命令事件；
//! - `InMemoryEventBus`：基于广播通道的进程内实现；
//! - `EventHandler`：对命令事件进行消费处理；
//! - `EventEngine`：订阅总线并按类型分发到处理器，并发执行、失败记录。
//!
//! 该模块仅定义协议与引擎，不绑定具体传输实现，可对接任意消息系统或内存实现。
//!
pub mod bus;
pub mod bus_inmemory;
pub mod engine;
pub mod handler;

pub use bus::EventBus;
pub use bus_inmemory::InMemoryEventBus;
pub use engine::{EngineHandle, EventEngine, EventEngineConfig};
pub use handler::{EventHandler, HandledEventType};
