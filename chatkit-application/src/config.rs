use serde::Deserialize;

/// 命令注册表配置
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// 调用过程中是否向扩展的事件总线发送命令事件
    pub emit_events: bool,
    /// 命令名与别名是否忽略大小写
    pub case_insensitive: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            emit_events: true,
            case_insensitive: false,
        }
    }
}

impl RegistryConfig {
    pub(crate) fn normalize(&self, name: &str) -> String {
        if self.case_insensitive {
            name.to_lowercase()
        } else {
            name.to_string()
        }
    }
}
