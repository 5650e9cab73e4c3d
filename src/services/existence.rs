use serde_json::Value;

use crate::domain::{AppError, ResourceIdentity, ResourceType};
use crate::ports::PlatformPort;

/// JSON fields that may carry the remote identifier of a listed resource.
const ID_KEYS: [&str; 6] = ["id", "orgId", "workspaceId", "labelId", "datasetId", "pipelineId"];

/// Outcome of one remote existence check. Results are never cached:
/// resources can be created and deleted within a single run, so every check
/// issues a fresh query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistenceResult {
    pub exists: bool,
    pub remote_id: Option<String>,
}

impl ExistenceResult {
    fn absent() -> Self {
        Self { exists: false, remote_id: None }
    }
}

/// Query the platform for a same-named resource within the identity's scope.
pub fn check<P: PlatformPort + ?Sized>(
    platform: &P,
    resource: ResourceType,
    identity: &ResourceIdentity,
) -> Result<ExistenceResult, AppError> {
    let Some(invocation) = resource.list_invocation(identity) else {
        return Ok(ExistenceResult::absent());
    };

    let result = match platform.run(&invocation) {
        Ok(result) => result,
        // An empty scope (e.g. a workspace with no resources of this type)
        // surfaces as a "not found" diagnostic rather than an empty list.
        Err(AppError::ResourceNotFound(_)) => return Ok(ExistenceResult::absent()),
        Err(err) => return Err(err),
    };

    let Some(json) = result.json() else {
        return Ok(ExistenceResult::absent());
    };

    match find_named(&json, resource.name_key(), identity.name()) {
        Some(object) => Ok(ExistenceResult { exists: true, remote_id: extract_id(object) }),
        None => Ok(ExistenceResult::absent()),
    }
}

/// Depth-first search for an object whose `name_key` field equals `name`.
/// `list` output nests resources under varying envelope keys, so the search
/// covers the whole tree.
fn find_named<'a>(
    value: &'a Value,
    name_key: &str,
    name: &str,
) -> Option<&'a serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) => {
            if map.get(name_key).is_some_and(|v| scalar_eq(v, name)) {
                return Some(map);
            }
            map.values().find_map(|v| find_named(v, name_key, name))
        }
        Value::Array(items) => items.iter().find_map(|v| find_named(v, name_key, name)),
        _ => None,
    }
}

fn scalar_eq(value: &Value, name: &str) -> bool {
    match value {
        Value::String(s) => s == name,
        Value::Number(n) => n.to_string() == name,
        _ => false,
    }
}

fn extract_id(object: &serde_json::Map<String, Value>) -> Option<String> {
    ID_KEYS.iter().find_map(|key| match object.get(*key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
