use crate::domain::{AppError, CommandInvocation, ResourceSpec, ResourceType};
use crate::services::builder::{Scratch, generic};

/// Keys emitted first as positionals, in this order. The platform CLI
/// selects its provider-specific subcommand from them (e.g.
/// `credentials add aws`, `compute-envs add aws-batch forge`).
const PRIORITY_KEYS: [&str; 3] = ["type", "config-mode", "file-path"];

/// Builder for resources described either by a structured `type` block or
/// by an exported definition file (`credentials`, `compute-envs`, `actions`).
pub fn build(
    resource: ResourceType,
    spec: &ResourceSpec,
    scratch: &mut Scratch,
) -> Result<Vec<CommandInvocation>, AppError> {
    let args = args(spec, scratch, &[])?;
    Ok(vec![CommandInvocation::new(resource.block_name(), Some("add"), args)])
}

pub fn args(
    spec: &ResourceSpec,
    scratch: &mut Scratch,
    skip: &[&str],
) -> Result<Vec<String>, AppError> {
    if !spec.contains("type") && !spec.contains("file-path") {
        return Err(AppError::Configuration(
            "Please specify at least 'type' or 'file-path' for creating the resource.".to_string(),
        ));
    }

    let mut args = Vec::new();
    for key in PRIORITY_KEYS {
        if let Some(value) = spec.get_str(key) {
            args.push(value);
        }
    }
    for (key, value) in spec.entries() {
        if PRIORITY_KEYS.contains(&key) || skip.contains(&key) {
            continue;
        }
        if key == "params" {
            args.push("--params-file".to_string());
            args.push(scratch.write_params(value)?);
        } else {
            generic::push_flag(&mut args, key, value)?;
        }
    }
    Ok(args)
}
