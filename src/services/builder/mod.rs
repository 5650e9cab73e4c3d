//! Translation of resource specs into platform CLI invocations.
//!
//! Most block types map one-to-one onto `<block> add --key value ...`; the
//! submodules cover the types with positional arguments, follow-up calls, or
//! params-file handling.

mod compute_envs;
mod datasets;
mod generic;
mod launch;
mod members;
mod params;
mod pipelines;
mod teams;
mod typed;

pub use params::Scratch;

use crate::domain::{AppError, CommandInvocation, ResourceSpec, ResourceType};
use crate::ports::PlatformPort;

/// Build the create-side invocations for one resource entry. Returns one or
/// more commands; follow-ups (team members, primary compute env) come after
/// the creating command. The platform port is consulted for `dataset`
/// references inside pipeline and launch params.
pub fn build<P: PlatformPort + ?Sized>(
    resource: ResourceType,
    spec: &ResourceSpec,
    scratch: &mut Scratch,
    platform: &P,
) -> Result<Vec<CommandInvocation>, AppError> {
    match resource {
        ResourceType::ComputeEnvs => compute_envs::build(spec, scratch),
        ResourceType::Credentials | ResourceType::Actions => typed::build(resource, spec, scratch),
        ResourceType::Datasets => datasets::build(spec),
        ResourceType::Launch => launch::build(spec, scratch, platform),
        ResourceType::Members => members::build(spec),
        ResourceType::Pipelines => pipelines::build(spec, scratch, platform),
        ResourceType::Teams => teams::build(spec),
        _ => {
            let args = generic::args(spec)?;
            Ok(vec![CommandInvocation::new(resource.block_name(), Some("add"), args)])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedPlatform;

    fn spec(block: &str, yaml: &str) -> ResourceSpec {
        ResourceSpec::from_value(block, serde_yaml::from_str(yaml).unwrap()).unwrap()
    }

    #[test]
    fn plain_blocks_use_the_generic_add() {
        let mut scratch = Scratch::new();
        let invocations = build(
            ResourceType::Workspaces,
            &spec("workspaces", "name: demo\norganization: org1\nvisibility: PRIVATE\n"),
            &mut scratch,
            &ScriptedPlatform::new(),
        )
        .unwrap();
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].subcommand, "workspaces");
        assert_eq!(invocations[0].method, Some("add"));
        assert_eq!(
            invocations[0].args,
            vec!["--name", "demo", "--organization", "org1", "--visibility", "PRIVATE"]
        );
    }

    #[test]
    fn secrets_and_labels_are_generic_too() {
        let mut scratch = Scratch::new();
        for (resource, yaml) in [
            (ResourceType::Secrets, "name: TOKEN\nworkspace: org1/demo\nvalue: s3cr3t\n"),
            (ResourceType::Labels, "name: env\nvalue: prod\nworkspace: org1/demo\n"),
        ] {
            let invocations = build(
                resource,
                &spec(resource.block_name(), yaml),
                &mut scratch,
                &ScriptedPlatform::new(),
            )
            .unwrap();
            assert_eq!(invocations[0].method, Some("add"));
        }
    }
}
