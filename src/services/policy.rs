use tracing::info;

use crate::domain::{AppError, CommandInvocation, OnExists, ResourceIdentity, ResourceType};
use crate::ports::PlatformPort;
use crate::services::existence;

/// Resolved action for one resource after checking remote state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The resource is absent: run the create invocations.
    Create,
    /// The resource exists and the policy is `ignore`: do nothing.
    Skip,
    /// The resource exists and the policy is `overwrite`: run `delete`
    /// first, then the create invocations.
    Replace { delete: CommandInvocation },
}

/// Run the per-resource state machine: check remote existence, then apply
/// the effective `on_exists` policy.
pub fn decide<P: PlatformPort + ?Sized>(
    platform: &P,
    resource: ResourceType,
    identity: &ResourceIdentity,
    on_exists: OnExists,
) -> Result<Decision, AppError> {
    let block = resource.block_name();
    let existence = existence::check(platform, resource, identity)?;
    if !existence.exists {
        return Ok(Decision::Create);
    }

    match on_exists {
        OnExists::Ignore => {
            info!("The {block} resource '{}' already exists. Skipping creation.", identity.name());
            Ok(Decision::Skip)
        }
        OnExists::Fail => Err(AppError::ResourceExists(format!(
            "The {block} resource '{}' already exists and will not be created. \
             Set 'on_exists: overwrite' to replace it.",
            identity.name()
        ))),
        OnExists::Overwrite => {
            if !resource.supports_delete() {
                return Err(AppError::NoDeletionStrategy(block.to_string()));
            }
            info!("The {block} resource '{}' already exists. Overwriting.", identity.name());
            let delete = resource.delete_invocation(identity, existence.remote_id.as_deref())?;
            Ok(Decision::Replace { delete })
        }
    }
}

/// Resolve the deletion command for one resource in delete mode. Deleting a
/// resource that does not exist remotely is an error.
pub fn decide_delete<P: PlatformPort + ?Sized>(
    platform: &P,
    resource: ResourceType,
    identity: &ResourceIdentity,
) -> Result<CommandInvocation, AppError> {
    let existence = existence::check(platform, resource, identity)?;
    if !existence.exists {
        return Err(AppError::ResourceNotFound(format!(
            "The {} resource '{}' does not exist",
            resource.block_name(),
            identity.name()
        )));
    }
    resource.delete_invocation(identity, existence.remote_id.as_deref())
}
