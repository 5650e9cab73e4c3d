use std::fs;

use serde_yaml::{Mapping, Value};
use tempfile::TempPath;

use crate::domain::{AppError, CommandInvocation, ResourceSpec, scalar_to_string};
use crate::ports::PlatformPort;

/// Holder for transient files created during argument building. Files are
/// removed when the scratch space drops, which covers every exit path
/// including failures mid-run.
#[derive(Debug, Default)]
pub struct Scratch {
    files: Vec<TempPath>,
}

impl Scratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize a mapping to a transient YAML file and return its path.
    pub fn write_yaml(&mut self, mapping: &Mapping) -> Result<String, AppError> {
        let mut file = tempfile::Builder::new()
            .prefix("platformkit-params-")
            .suffix(".yaml")
            .tempfile()?;
        serde_yaml::to_writer(file.as_file_mut(), mapping)?;
        let path = file.into_temp_path();
        let display = path.to_string_lossy().into_owned();
        self.files.push(path);
        Ok(display)
    }

    /// Write a `params` field (which must be a mapping) to a transient file.
    pub fn write_params(&mut self, value: &Value) -> Result<String, AppError> {
        let Value::Mapping(mapping) = value else {
            return Err(AppError::Configuration(
                "'params' must be a mapping of parameter names to values".to_string(),
            ));
        };
        self.write_yaml(mapping)
    }
}

/// Build the `--params-file` arguments for a pipeline or launch entry.
///
/// With only `params-file`, the path is passed through. With inline
/// `params`, a `dataset` reference is resolved first, then the file (if any)
/// is loaded and inline keys override same-named file keys; the merged
/// mapping is written to a transient file so the platform CLI still receives
/// a single params argument.
pub fn params_args<P: PlatformPort + ?Sized>(
    spec: &ResourceSpec,
    scratch: &mut Scratch,
    platform: &P,
) -> Result<Vec<String>, AppError> {
    let inline = match spec.get("params") {
        Some(Value::Mapping(mapping)) => Some(mapping.clone()),
        Some(_) => {
            return Err(AppError::Configuration(
                "'params' must be a mapping of parameter names to values".to_string(),
            ));
        }
        None => None,
    };
    let file = spec.get_str("params-file");

    match (inline, file) {
        (Some(mut inline), file) => {
            resolve_dataset_reference(&mut inline, spec, platform)?;
            let merged = merged_params(file.as_deref(), &inline)?;
            Ok(vec!["--params-file".to_string(), scratch.write_yaml(&merged)?])
        }
        (None, Some(file)) => Ok(vec!["--params-file".to_string(), file]),
        (None, None) => Ok(vec![]),
    }
}

/// A `dataset: <name>` key inside `params` is shorthand for the dataset's
/// download URL: the URL is fetched with `datasets url` in the entry's
/// workspace and substituted as the `input` parameter.
fn resolve_dataset_reference<P: PlatformPort + ?Sized>(
    inline: &mut Mapping,
    spec: &ResourceSpec,
    platform: &P,
) -> Result<(), AppError> {
    let Some(value) = inline.remove("dataset") else {
        return Ok(());
    };
    let name = scalar_to_string(&value).ok_or_else(|| {
        AppError::Configuration("'dataset' in params must be a dataset name".to_string())
    })?;
    let workspace = spec.get_str("workspace").ok_or_else(|| {
        AppError::Configuration(format!(
            "Resolving the dataset '{name}' requires a 'workspace'"
        ))
    })?;

    // Dry runs never query the platform; the URL from `datasets url` is
    // stood in for.
    let url = if platform.dry_run() {
        "<dataset-url>".to_string()
    } else {
        let invocation = CommandInvocation::json(
            "datasets",
            Some("url"),
            vec!["-n".into(), name.clone(), "-w".into(), workspace],
        );
        let result = platform.run(&invocation)?;
        result.json().as_ref().and_then(find_dataset_url).ok_or_else(|| {
            AppError::Configuration(format!("No URL found for dataset '{name}'"))
        })?
    };

    inline.insert(Value::String("input".to_string()), Value::String(url));
    Ok(())
}

fn find_dataset_url(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Object(map) => {
            if let Some(serde_json::Value::String(url)) = map.get("datasetUrl") {
                return Some(url.clone());
            }
            map.values().find_map(find_dataset_url)
        }
        serde_json::Value::Array(items) => items.iter().find_map(find_dataset_url),
        _ => None,
    }
}

/// Ordered merge of file-sourced parameters and inline overrides: file keys
/// keep their position, inline values win on conflicts, inline-only keys
/// are appended.
pub fn merged_params(
    params_file: Option<&str>,
    inline: &Mapping,
) -> Result<Mapping, AppError> {
    let mut merged = match params_file {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| {
                AppError::Configuration(format!("Could not read params file '{path}': {e}"))
            })?;
            match serde_yaml::from_str::<Value>(&text)? {
                Value::Mapping(mapping) => mapping,
                Value::Null => Mapping::new(),
                _ => {
                    return Err(AppError::Configuration(format!(
                        "Params file '{path}' must contain a YAML mapping"
                    )));
                }
            }
        }
        None => Mapping::new(),
    };

    for (key, value) in inline {
        merged.insert(key.clone(), value.clone());
    }
    Ok(merged)
}
