use std::env;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::domain::{AppError, scalar_to_string};

/// Resolve environment variable references inside a single string.
///
/// Supported syntaxes: `$VAR` and `${VAR}` (Unix), `%VAR%` (Windows),
/// `$env:VAR` (PowerShell). `$$` escapes a literal dollar so Nextflow
/// expressions like `$${projectDir}` survive untouched. A reference to an
/// unset variable is an error naming the variable.
pub fn resolve_env_str(input: &str) -> Result<String, AppError> {
    let bytes = input.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'$' => {
                if bytes.get(i + 1) == Some(&b'$') {
                    out.push(b'$');
                    i += 2;
                } else if bytes.get(i + 1) == Some(&b'{') {
                    match input[i + 2..].find('}') {
                        Some(rel) => {
                            let name = &input[i + 2..i + 2 + rel];
                            if is_var_name(name) {
                                out.extend_from_slice(lookup(name)?.as_bytes());
                                i += 2 + rel + 1;
                            } else {
                                out.push(b'$');
                                i += 1;
                            }
                        }
                        None => {
                            out.push(b'$');
                            i += 1;
                        }
                    }
                } else if input[i + 1..].starts_with("env:") {
                    let start = i + 5;
                    let end = start + name_len(&input[start..]);
                    if end > start {
                        out.extend_from_slice(lookup(&input[start..end])?.as_bytes());
                        i = end;
                    } else {
                        out.push(b'$');
                        i += 1;
                    }
                } else {
                    let start = i + 1;
                    let end = start + name_len(&input[start..]);
                    if end > start {
                        out.extend_from_slice(lookup(&input[start..end])?.as_bytes());
                        i = end;
                    } else {
                        out.push(b'$');
                        i += 1;
                    }
                }
            }
            b'%' => match input[i + 1..].find('%') {
                Some(rel) if rel > 0 && is_var_name(&input[i + 1..i + 1 + rel]) => {
                    out.extend_from_slice(lookup(&input[i + 1..i + 1 + rel])?.as_bytes());
                    i += 1 + rel + 1;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            },
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn lookup(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::UnresolvedEnvVar(name.to_string()))
}

fn is_var_name(s: &str) -> bool {
    !s.is_empty() && name_len(s) == s.len()
}

/// Length of the leading `[A-Za-z_][A-Za-z0-9_]*` run.
fn name_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    if bytes.is_empty() || !(bytes[0].is_ascii_alphabetic() || bytes[0] == b'_') {
        return 0;
    }
    bytes.iter().take_while(|b| b.is_ascii_alphanumeric() || **b == b'_').count()
}

/// Resolve environment variables in every string scalar of a YAML tree.
/// Mapping keys are left untouched.
pub fn expand_value(value: &mut Value) -> Result<(), AppError> {
    match value {
        Value::String(s) => {
            *s = resolve_env_str(s)?;
        }
        Value::Sequence(items) => {
            for item in items {
                expand_value(item)?;
            }
        }
        Value::Mapping(mapping) => expand_mapping(mapping)?,
        _ => {}
    }
    Ok(())
}

pub fn expand_mapping(mapping: &mut Mapping) -> Result<(), AppError> {
    for (_, v) in mapping.iter_mut() {
        expand_value(v)?;
    }
    Ok(())
}

/// Load a YAML mapping of environment variables into the process
/// environment, before any interpolation runs. Explicit nulls are skipped
/// and values are themselves resolved, so an env file can build on
/// variables that are already set.
pub fn load_env_file(path: &Path) -> Result<(), AppError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        AppError::Configuration(format!("Could not read env file '{}': {e}", path.display()))
    })?;
    let value: Value = serde_yaml::from_str(&text)?;
    let Value::Mapping(entries) = value else {
        return Err(AppError::Configuration(format!(
            "Env file '{}' must contain a YAML mapping of variable names to values",
            path.display()
        )));
    };

    for (key, value) in &entries {
        let Some(name) = key.as_str() else {
            return Err(AppError::Configuration(format!(
                "Env file '{}' contains a non-string variable name",
                path.display()
            )));
        };
        if value.is_null() {
            continue;
        }
        let Some(raw) = scalar_to_string(value) else {
            return Err(AppError::Configuration(format!(
                "Env file variable '{name}' must be a scalar value"
            )));
        };
        let resolved = resolve_env_str(&raw)?;
        // Runs single-threaded at startup, before any worker is spawned.
        unsafe {
            env::set_var(name, resolved);
        }
    }
    Ok(())
}
