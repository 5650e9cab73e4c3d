use crate::domain::{AppError, CommandInvocation, ResourceSpec};
use crate::services::builder::{Scratch, typed};

/// Compute environments accept either a structured YAML description
/// (translated flag-by-flag) or a reference to an exported JSON definition,
/// which switches `add` to `import`. A `primary: true` field is not a CLI
/// flag; it becomes a follow-up `primary set` call after creation.
pub fn build(spec: &ResourceSpec, scratch: &mut Scratch) -> Result<Vec<CommandInvocation>, AppError> {
    let mut working = spec.clone();
    let primary = matches!(working.remove("primary"), Some(serde_yaml::Value::Bool(true)));

    let args = typed::args(&working, scratch, &[])?;
    let is_import =
        working.get_str("file-path").is_some_and(|path| path.ends_with(".json"));
    let method = if is_import { "import" } else { "add" };

    let mut invocations = vec![CommandInvocation::new("compute-envs", Some(method), args)];

    if primary {
        let name = working.get_str("name").ok_or_else(|| {
            AppError::Configuration(
                "A primary compute environment requires a 'name'".to_string(),
            )
        })?;
        let workspace = working.get_str("workspace").ok_or_else(|| {
            AppError::Configuration(
                "A primary compute environment requires a 'workspace'".to_string(),
            )
        })?;
        invocations.push(CommandInvocation::new(
            "compute-envs",
            Some("primary"),
            vec!["set".into(), "--name".into(), name, "--workspace".into(), workspace],
        ));
    }

    Ok(invocations)
}
