use crate::domain::{AppError, CommandInvocation, ResourceSpec};

/// Organization members are added by user handle; the `members add` command
/// has no role flag, so a `role` field turns into a follow-up
/// `members update` call.
pub fn build(spec: &ResourceSpec) -> Result<Vec<CommandInvocation>, AppError> {
    let user = spec.get_str("user").ok_or_else(|| {
        AppError::Configuration("A member entry requires a 'user'".to_string())
    })?;
    let organization = spec.get_str("organization").ok_or_else(|| {
        AppError::Configuration("A member entry requires an 'organization'".to_string())
    })?;

    let mut invocations = vec![CommandInvocation::new(
        "members",
        Some("add"),
        vec![
            "--user".into(),
            user.clone(),
            "--organization".into(),
            organization.clone(),
        ],
    )];

    if let Some(role) = spec.get_str("role") {
        invocations.push(CommandInvocation::new(
            "members",
            Some("update"),
            vec![
                "--user".into(),
                user,
                "--organization".into(),
                organization,
                "--role".into(),
                role,
            ],
        ));
    }

    Ok(invocations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(yaml: &str) -> ResourceSpec {
        ResourceSpec::from_value("members", serde_yaml::from_str(yaml).unwrap()).unwrap()
    }

    #[test]
    fn member_without_role_is_a_single_add() {
        let invocations = build(&spec("user: alice@example.com\norganization: org1\n")).unwrap();
        assert_eq!(invocations.len(), 1);
        assert_eq!(
            invocations[0].args,
            vec!["--user", "alice@example.com", "--organization", "org1"]
        );
    }

    #[test]
    fn role_becomes_an_update_follow_up() {
        let invocations =
            build(&spec("user: alice@example.com\norganization: org1\nrole: ADMIN\n")).unwrap();
        assert_eq!(invocations.len(), 2);
        assert_eq!(invocations[1].method, Some("update"));
        assert!(invocations[1].args.ends_with(&["--role".into(), "ADMIN".into()]));
    }

    #[test]
    fn missing_user_is_rejected() {
        let err = build(&spec("organization: org1\n")).unwrap_err();
        assert!(err.to_string().contains("'user'"));
    }
}
