use crate::domain::{AppError, CommandInvocation, ResourceSpec};
use crate::services::builder::generic;

/// Datasets upload a local file: the path comes first as a positional,
/// everything else stays a flag.
pub fn build(spec: &ResourceSpec) -> Result<Vec<CommandInvocation>, AppError> {
    let path = spec.get_str("file-path").ok_or_else(|| {
        AppError::Configuration("A dataset entry requires a 'file-path'".to_string())
    })?;

    let mut args = vec![path];
    args.extend(generic::args_excluding(spec, &["file-path"])?);

    Ok(vec![CommandInvocation::new("datasets", Some("add"), args)])
}
