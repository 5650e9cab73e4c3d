use serde_yaml::Value;

use crate::domain::{AppError, ResourceSpec, comma_join, scalar_to_string};

/// Translate every field of a spec into `--key value` pairs.
pub fn args(spec: &ResourceSpec) -> Result<Vec<String>, AppError> {
    args_excluding(spec, &[])
}

/// Same as [`args`], skipping the named keys (handled elsewhere as
/// positionals or follow-up invocations).
pub fn args_excluding(spec: &ResourceSpec, skip: &[&str]) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    for (key, value) in spec.entries() {
        if skip.contains(&key) {
            continue;
        }
        push_flag(&mut args, key, value)?;
    }
    Ok(args)
}

/// Append one field as command-line arguments: booleans become bare flags
/// emitted only when true, scalar lists are comma-joined, everything else
/// is `--key value`.
pub fn push_flag(args: &mut Vec<String>, key: &str, value: &Value) -> Result<(), AppError> {
    match value {
        Value::Bool(true) => args.push(format!("--{key}")),
        Value::Bool(false) => {}
        Value::Sequence(items) => {
            args.push(format!("--{key}"));
            args.push(comma_join(key, items)?);
        }
        other => match scalar_to_string(other) {
            Some(s) => {
                args.push(format!("--{key}"));
                args.push(s);
            }
            None => {
                return Err(AppError::Configuration(format!(
                    "Field '{key}' has a nested value that cannot be passed as a command-line flag"
                )));
            }
        },
    }
    Ok(())
}
