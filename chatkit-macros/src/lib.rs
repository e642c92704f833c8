use proc_macro::TokenStream;

mod field_utils;
mod lockable;

/// 可加锁能力宏
/// - 若缺失则追加字段：`locking: bool`, `execution_guard: Option<ExecutionGuard>`
/// - 自动为目标结构体实现 `::chatkit_domain::lockable::Lockable`
/// - 支持参数：`#[lockable(crate = path)]`，默认 `::chatkit_domain`
#[proc_macro_attribute]
pub fn lockable(attr: TokenStream, item: TokenStream) -> TokenStream {
    lockable::expand(attr, item)
}
