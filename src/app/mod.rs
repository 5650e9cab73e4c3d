mod context;
mod report;
mod run;

pub use context::AppContext;
pub use report::{ActionKind, ActionReport};
pub use run::{RunOptions, execute};
