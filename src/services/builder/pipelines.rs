use crate::domain::{AppError, CommandInvocation, ResourceSpec};
use crate::ports::PlatformPort;
use crate::services::builder::{Scratch, generic, params};

/// Pipelines are registered from a repository URL (`add`) or an exported
/// JSON definition (`import`); either way the source is the positional
/// argument after the flags, followed by the params arguments.
pub fn build<P: PlatformPort + ?Sized>(
    spec: &ResourceSpec,
    scratch: &mut Scratch,
    platform: &P,
) -> Result<Vec<CommandInvocation>, AppError> {
    let mut args =
        generic::args_excluding(spec, &["url", "file-path", "params", "params-file"])?;

    let mut import = false;
    if let Some(url) = spec.get_str("url") {
        args.push(url);
    } else if let Some(path) = spec.get_str("file-path") {
        import = path.ends_with(".json");
        args.push(path);
    } else {
        return Err(AppError::Configuration(
            "A pipeline entry requires either 'url' or 'file-path'".to_string(),
        ));
    }

    args.extend(params::params_args(spec, scratch, platform)?);

    let method = if import { "import" } else { "add" };
    Ok(vec![CommandInvocation::new("pipelines", Some(method), args)])
}
