pub mod chat_command;
pub mod command;
pub mod command_entry;
pub mod config;
pub mod context;
pub mod emit;
pub mod error;
pub mod extension;
pub mod registry;

pub use chat_command::ChatCommand;
pub use command_entry::CommandEntry;
pub use registry::CommandRegistry;
