mod host;
mod shell_hook;

pub use host::*;
pub use shell_hook::*;
