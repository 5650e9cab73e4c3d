mod error;
mod invocation;
mod on_exists;
mod resource;
mod resource_spec;

pub use error::AppError;
pub use invocation::{CommandInvocation, CommandResult, quote};
pub use on_exists::{OnExists, resolve_on_exists};
pub use resource::{RESOURCE_ORDER, ResourceIdentity, ResourceType};
pub use resource_spec::{ResourceSpec, comma_join, scalar_to_string};
