pub mod memtool;
pub mod run;
pub mod validator;

pub use memtool::{resolve_memory_tool, MemTool, ToolPrefix};
pub use run::{Invoke, ProcessInvoker};
pub use validator::Validator;
