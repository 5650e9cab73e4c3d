use std::fs;
use std::io::Read;

use serde_yaml::{Mapping, Value};

use crate::config::YamlSource;
use crate::domain::AppError;

/// Load every source and merge them into one document.
///
/// Top-level block keys accumulate across files: when the same block appears
/// in several files, the entries are appended (structurally identical
/// duplicates are dropped) rather than overwritten.
pub fn load_and_merge(sources: &[YamlSource]) -> Result<Mapping, AppError> {
    let mut merged = Mapping::new();

    for source in sources {
        let text = read_source(source)?;
        let value: Value = serde_yaml::from_str(&text)?;
        let Value::Mapping(data) = value else {
            return Err(AppError::Configuration(format!(
                "The input from {source} is empty or does not contain valid YAML data"
            )));
        };
        if data.is_empty() {
            return Err(AppError::Configuration(format!(
                "The input from {source} is empty or does not contain valid YAML data"
            )));
        }

        for (key, new_value) in data {
            match (merged.get_mut(&key), new_value) {
                (Some(Value::Sequence(existing)), Value::Sequence(incoming))
                    if incoming.iter().all(Value::is_mapping) =>
                {
                    for item in incoming {
                        if !existing.contains(&item) {
                            existing.push(item);
                        }
                    }
                }
                (_, new_value) => {
                    merged.insert(key, new_value);
                }
            }
        }
    }

    Ok(merged)
}

fn read_source(source: &YamlSource) -> Result<String, AppError> {
    match source {
        YamlSource::Stdin => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
        YamlSource::File(path) => Ok(fs::read_to_string(path)?),
    }
}
