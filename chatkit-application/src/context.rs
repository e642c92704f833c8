use chatkit_domain::command_event::InvocationContext;

/// 命令调用上下文（Command Context）
///
/// 承载一次命令调用所需的横切信息，例如：
/// - 调用语境（`InvocationContext`）：关联追踪 `correlation_id`、触发者、频道、服务器等；
/// - 参数（`args`）：宿主解析消息后得到的位置参数；
/// - 调用名（`invoked_as`）：实际使用的命令名或别名，由注册表在调用时填写。
///
/// 典型用法：
/// ```rust
/// use chatkit_application::context::CommandContext;
/// use chatkit_domain::command_event::InvocationContext;
///
/// let ctx = CommandContext {
///     invocation: InvocationContext::builder()
///         .maybe_correlation_id(Some("cor-123".into()))
///         .maybe_actor_id(Some("u-1".into()))
///         .maybe_channel_id(Some("general".into()))
///         .build(),
///     args: vec!["@spammer".into(), "7d".into()],
///     ..Default::default()
/// };
/// assert_eq!(ctx.arg(1), Some("7d"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CommandContext {
    /// 调用语境（链路追踪、触发者、频道）
    pub invocation: InvocationContext,
    /// 位置参数
    pub args: Vec<String>,
    /// 实际使用的调用名（命令名或别名）
    pub invoked_as: Option<String>,
}

impl CommandContext {
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}
