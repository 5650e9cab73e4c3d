use crate::domain::{AppError, CommandInvocation, ResourceSpec};

/// Every resource block the tool knows how to provision, in the dependency
/// order they must be created (e.g. organizations before workspaces, and
/// compute environments after the credentials they reference).
pub const RESOURCE_ORDER: [ResourceType; 15] = [
    ResourceType::Organizations,
    ResourceType::Teams,
    ResourceType::Workspaces,
    ResourceType::Labels,
    ResourceType::Members,
    ResourceType::Participants,
    ResourceType::Credentials,
    ResourceType::ComputeEnvs,
    ResourceType::Secrets,
    ResourceType::Actions,
    ResourceType::Datasets,
    ResourceType::Pipelines,
    ResourceType::Launch,
    ResourceType::DataLinks,
    ResourceType::Studios,
];

/// Supported resource block types, one per platform CLI noun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Organizations,
    Teams,
    Workspaces,
    Labels,
    Members,
    Participants,
    Credentials,
    ComputeEnvs,
    Secrets,
    Actions,
    Datasets,
    Pipelines,
    Launch,
    DataLinks,
    Studios,
}

impl ResourceType {
    pub fn from_block_name(name: &str) -> Option<Self> {
        RESOURCE_ORDER.into_iter().find(|r| r.block_name() == name)
    }

    /// The YAML block key, which is also the CLI subcommand.
    pub fn block_name(&self) -> &'static str {
        match self {
            ResourceType::Organizations => "organizations",
            ResourceType::Teams => "teams",
            ResourceType::Workspaces => "workspaces",
            ResourceType::Labels => "labels",
            ResourceType::Members => "members",
            ResourceType::Participants => "participants",
            ResourceType::Credentials => "credentials",
            ResourceType::ComputeEnvs => "compute-envs",
            ResourceType::Secrets => "secrets",
            ResourceType::Actions => "actions",
            ResourceType::Datasets => "datasets",
            ResourceType::Pipelines => "pipelines",
            ResourceType::Launch => "launch",
            ResourceType::DataLinks => "data-links",
            ResourceType::Studios => "studios",
        }
    }

    /// Keys that uniquely identify one resource of this type. The same key
    /// set drives existence checks and deletions, so an overwrite can never
    /// delete a same-named resource in a different scope.
    pub fn identifying_keys(&self) -> &'static [&'static str] {
        match self {
            ResourceType::Organizations => &["name"],
            ResourceType::Teams | ResourceType::Workspaces => &["name", "organization"],
            ResourceType::Labels => &["name", "value", "workspace"],
            ResourceType::Members => &["user", "organization"],
            ResourceType::Participants => &["name", "type", "workspace"],
            ResourceType::Launch => &[],
            _ => &["name", "workspace"],
        }
    }

    /// JSON field holding the resource name in `list` output.
    pub fn name_key(&self) -> &'static str {
        match self {
            ResourceType::Organizations => "orgName",
            ResourceType::Workspaces => "workspaceName",
            ResourceType::Members | ResourceType::Participants => "email",
            _ => "name",
        }
    }

    /// Whether the remote state of this type can be queried at all. A launch
    /// is an event rather than a named resource, so it has nothing to check.
    pub fn checkable(&self) -> bool {
        !matches!(self, ResourceType::Launch)
    }

    pub fn supports_delete(&self) -> bool {
        !matches!(self, ResourceType::Launch)
    }

    /// Processing order for delete mode: reverse dependency order, with
    /// undeletable types left out.
    pub fn deletion_order() -> Vec<ResourceType> {
        RESOURCE_ORDER.into_iter().rev().filter(ResourceType::supports_delete).collect()
    }

    /// Extract the identifying key values from a spec. Returns `None` for
    /// types without identity (launch); errors when a required key is
    /// missing, since such a spec could never be queried or deleted safely.
    pub fn identity(&self, spec: &ResourceSpec) -> Result<Option<ResourceIdentity>, AppError> {
        let keys = self.identifying_keys();
        if keys.is_empty() {
            return Ok(None);
        }
        let mut values = Vec::with_capacity(keys.len());
        for key in keys {
            match spec.get_str(key) {
                Some(value) => values.push((*key, value)),
                None => {
                    return Err(AppError::Configuration(format!(
                        "The '{}' entry is missing the required identifying key '{key}'",
                        self.block_name()
                    )));
                }
            }
        }
        Ok(Some(ResourceIdentity { values }))
    }

    /// Read-only query listing resources of this type within the identity's
    /// scope. `None` for types that cannot be checked.
    pub fn list_invocation(&self, id: &ResourceIdentity) -> Option<CommandInvocation> {
        let args = match self {
            ResourceType::Organizations => vec![],
            ResourceType::Teams | ResourceType::Workspaces | ResourceType::Members => {
                vec!["-o".to_string(), id.value("organization").to_string()]
            }
            ResourceType::Launch => return None,
            _ => vec!["-w".to_string(), id.value("workspace").to_string()],
        };
        Some(CommandInvocation::json(self.block_name(), Some("list"), args))
    }

    /// Deletion command for one resource of this type. `remote_id` is the
    /// identifier learned from the existence check, required where the CLI
    /// deletes by id rather than by name (labels).
    pub fn delete_invocation(
        &self,
        id: &ResourceIdentity,
        remote_id: Option<&str>,
    ) -> Result<CommandInvocation, AppError> {
        let args: Vec<String> = match self {
            ResourceType::Launch => {
                return Err(AppError::NoDeletionStrategy(self.block_name().to_string()));
            }
            ResourceType::Organizations => {
                vec!["-n".into(), id.name().into()]
            }
            // Deleting a workspace cascades to its participants on the
            // platform side; teams cascade their members.
            ResourceType::Teams | ResourceType::Workspaces => {
                vec!["-n".into(), id.name().into(), "-o".into(), id.value("organization").into()]
            }
            ResourceType::Labels => {
                let label_id = remote_id.ok_or_else(|| {
                    AppError::Configuration(format!(
                        "Could not determine the remote id for label '{}'",
                        id.name()
                    ))
                })?;
                vec!["-i".into(), label_id.into(), "-w".into(), id.value("workspace").into()]
            }
            ResourceType::Members => {
                vec!["-u".into(), id.name().into(), "-o".into(), id.value("organization").into()]
            }
            ResourceType::Participants => {
                vec![
                    "-n".into(),
                    id.name().into(),
                    "-t".into(),
                    id.value("type").into(),
                    "-w".into(),
                    id.value("workspace").into(),
                ]
            }
            _ => {
                vec!["-n".into(), id.name().into(), "-w".into(), id.value("workspace").into()]
            }
        };
        Ok(CommandInvocation::new(self.block_name(), Some("delete"), args))
    }
}

/// The resolved identifying key values for one resource entry, in the order
/// declared by [`ResourceType::identifying_keys`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceIdentity {
    values: Vec<(&'static str, String)>,
}

impl ResourceIdentity {
    /// The primary name (first identifying key: `name` or `user`).
    pub fn name(&self) -> &str {
        self.values.first().map(|(_, v)| v.as_str()).unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    // Identifying keys are validated at extraction, so lookups of declared
    // keys always succeed.
    fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }
}
