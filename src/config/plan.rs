use std::collections::HashSet;

use serde_yaml::{Mapping, Value};
use tracing::warn;

use crate::domain::{
    AppError, OnExists, RESOURCE_ORDER, ResourceIdentity, ResourceSpec, ResourceType,
};

/// One parsed resource entry, with its block-level policy and identity
/// already extracted from the raw fields.
#[derive(Debug, Clone)]
pub struct BlockEntry {
    pub spec: ResourceSpec,
    pub on_exists: Option<OnExists>,
    pub identity: Option<ResourceIdentity>,
}

/// All entries of one resource block, in declaration order.
#[derive(Debug, Clone)]
pub struct Block {
    pub resource: ResourceType,
    pub entries: Vec<BlockEntry>,
}

/// Turn the merged YAML document into an ordered processing plan.
///
/// Blocks are ordered by resource dependency (reverse order in delete
/// mode), unknown top-level keys are rejected, and duplicate identifying
/// names within a block are an error.
pub fn plan_blocks(
    merged: Mapping,
    targets: Option<&str>,
    delete: bool,
) -> Result<Vec<Block>, AppError> {
    for key in merged.keys() {
        let Some(name) = key.as_str() else {
            return Err(AppError::Configuration(format!("Non-string top-level key: {key:?}")));
        };
        if ResourceType::from_block_name(name).is_none() {
            return Err(AppError::UnknownBlock(name.to_string()));
        }
    }

    let target_set: Option<HashSet<&str>> =
        targets.map(|t| t.split(',').map(str::trim).filter(|s| !s.is_empty()).collect());

    let order: Vec<ResourceType> =
        if delete { ResourceType::deletion_order() } else { RESOURCE_ORDER.to_vec() };

    let mut blocks = Vec::new();
    for resource in order {
        let block_name = resource.block_name();
        let Some(value) = merged.get(block_name) else { continue };
        if let Some(targets) = &target_set {
            if !targets.contains(block_name) {
                continue;
            }
        }

        let Value::Sequence(items) = value else {
            return Err(AppError::Configuration(format!(
                "The '{block_name}' block must be a list of resource entries"
            )));
        };

        let mut entries = Vec::with_capacity(items.len());
        let mut seen_names: HashSet<String> = HashSet::new();
        for item in items {
            let mut spec = ResourceSpec::from_value(block_name, item.clone())?;
            let on_exists = extract_on_exists(&mut spec, block_name)?;
            let identity = resource.identity(&spec)?;
            if let Some(identity) = &identity {
                if !seen_names.insert(identity.name().to_string()) {
                    return Err(AppError::DuplicateName {
                        block: block_name.to_string(),
                        name: identity.name().to_string(),
                    });
                }
            }
            entries.push(BlockEntry { spec, on_exists, identity });
        }
        blocks.push(Block { resource, entries });
    }

    Ok(blocks)
}

/// Pop the `on_exists` field (and the deprecated `overwrite` boolean) from
/// a spec so it never leaks into the generated command line.
fn extract_on_exists(
    spec: &mut ResourceSpec,
    block: &str,
) -> Result<Option<OnExists>, AppError> {
    let legacy = spec.remove("overwrite");
    let on_exists = spec.remove("on_exists");

    if let Some(value) = legacy {
        warn!("The 'overwrite' field is deprecated. Please use 'on_exists: overwrite' instead.");
        let Value::Bool(flag) = value else {
            return Err(AppError::Configuration(format!(
                "'overwrite' in the '{block}' block must be a boolean"
            )));
        };
        return Ok(Some(if flag { OnExists::Overwrite } else { OnExists::Fail }));
    }

    match on_exists {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.parse()?)),
        Some(_) => Err(AppError::Configuration(format!(
            "'on_exists' in the '{block}' block must be one of: fail, ignore, overwrite"
        ))),
    }
}
