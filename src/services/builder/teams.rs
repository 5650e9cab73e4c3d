use serde_yaml::Value;

use crate::domain::{AppError, CommandInvocation, ResourceSpec, scalar_to_string};
use crate::services::builder::generic;

/// Teams carry an optional `members` list that the platform CLI has no flag
/// for; each listed member becomes a follow-up `teams members add` call.
pub fn build(spec: &ResourceSpec) -> Result<Vec<CommandInvocation>, AppError> {
    let args = generic::args_excluding(spec, &["members"])?;
    let mut invocations = vec![CommandInvocation::new("teams", Some("add"), args)];

    if let Some(members) = spec.get("members") {
        let Value::Sequence(members) = members else {
            return Err(AppError::Configuration(
                "'members' must be a list of usernames or email addresses".to_string(),
            ));
        };
        let team = spec.get_str("name").ok_or_else(|| {
            AppError::Configuration("A team with members requires a 'name'".to_string())
        })?;
        let organization = spec.get_str("organization").ok_or_else(|| {
            AppError::Configuration(
                "A team with members requires an 'organization'".to_string(),
            )
        })?;
        for member in members {
            let member = scalar_to_string(member).ok_or_else(|| {
                AppError::Configuration(
                    "'members' must be a list of usernames or email addresses".to_string(),
                )
            })?;
            invocations.push(CommandInvocation::new(
                "teams",
                Some("members"),
                vec![
                    "--team".into(),
                    team.clone(),
                    "--organization".into(),
                    organization.clone(),
                    "add".into(),
                    "--member".into(),
                    member,
                ],
            ));
        }
    }

    Ok(invocations)
}
