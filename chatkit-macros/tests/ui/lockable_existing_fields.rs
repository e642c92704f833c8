use chatkit_domain::lockable::{ExecutionGuard, Lockable};
use chatkit_macros::lockable;

// 已声明的字段保留用户定义（含可见性），不会重复追加
#[lockable]
pub struct Poll<T> {
    pub locking: bool,
    pub execution_guard: Option<ExecutionGuard>,
    pub options: Vec<T>,
}

// 显式指定 crate 路径（如通过再导出使用）
mod reexport {
    pub use chatkit_domain as kit;
}

#[lockable(crate = crate::reexport::kit)]
struct Giveaway {
    prize: &'static str,
}

fn main() {
    let mut poll = Poll {
        locking: true,
        execution_guard: None,
        options: vec![1, 2, 3],
    };
    assert!(poll.ensure_guard());
    assert_eq!(poll.options.len(), 3);

    let g = Giveaway {
        locking: false,
        execution_guard: None,
        prize: "sticker",
    };
    assert!(!g.locking());
    assert!(g.active_guard().is_none());
    let _ = g.prize;
}
