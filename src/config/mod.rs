mod discovery;
mod env_vars;
mod loader;
mod plan;

pub use discovery::{YamlSource, find_yaml_files};
pub use env_vars::{expand_mapping, expand_value, load_env_file, resolve_env_str};
pub use loader::load_and_merge;
pub use plan::{Block, BlockEntry, plan_blocks};
