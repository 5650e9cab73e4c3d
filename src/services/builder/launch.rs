use crate::domain::{AppError, CommandInvocation, ResourceSpec};
use crate::ports::PlatformPort;
use crate::services::builder::{Scratch, generic, params};

/// Launch entries run a pipeline rather than register one: the pipeline name
/// or repository URL is the positional argument of a bare `launch` command.
pub fn build<P: PlatformPort + ?Sized>(
    spec: &ResourceSpec,
    scratch: &mut Scratch,
    platform: &P,
) -> Result<Vec<CommandInvocation>, AppError> {
    let target = spec
        .get_str("pipeline")
        .or_else(|| spec.get_str("url"))
        .ok_or_else(|| {
            AppError::Configuration(
                "A launch entry requires either 'pipeline' or 'url'".to_string(),
            )
        })?;

    let mut args = generic::args_excluding(
        spec,
        &["pipeline", "url", "params", "params-file"],
    )?;
    args.push(target);
    args.extend(params::params_args(spec, scratch, platform)?);

    Ok(vec![CommandInvocation::new("launch", None, args)])
}
