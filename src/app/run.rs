use std::path::PathBuf;

use crate::app::context::AppContext;
use crate::app::report::{ActionKind, ActionReport};
use crate::config::{self, Block, BlockEntry};
use crate::domain::{AppError, CommandInvocation, OnExists, resolve_on_exists};
use crate::ports::PlatformPort;
use crate::services::builder::{self, Scratch};
use crate::services::policy::{self, Decision};

/// Everything one provisioning run needs, resolved from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Positional YAML arguments: files, directories, or `-` for stdin.
    pub yaml: Vec<String>,
    /// Global `on_exists` override; takes precedence over block-level values.
    pub on_exists: Option<OnExists>,
    pub dry_run: bool,
    pub delete: bool,
    pub json: bool,
    /// Comma-separated block names to process, e.g. "teams,workspaces".
    pub targets: Option<String>,
    pub env_file: Option<PathBuf>,
    /// Global passthrough arguments inserted before the subcommand.
    pub cli_args: Vec<String>,
}

/// Load, plan, and process every resource entry in order.
pub fn execute<P: PlatformPort>(
    context: &AppContext<P>,
    options: &RunOptions,
) -> Result<(), AppError> {
    if let Some(env_file) = &options.env_file {
        config::load_env_file(env_file)?;
    }

    let sources = config::find_yaml_files(&options.yaml)?;
    let mut merged = config::load_and_merge(&sources)?;
    config::expand_mapping(&mut merged)?;
    let blocks = config::plan_blocks(merged, options.targets.as_deref(), options.delete)?;

    let mut scratch = Scratch::new();
    for block in &blocks {
        for entry in &block.entries {
            let report = if options.delete {
                process_delete(context, options, block, entry)?
            } else {
                process_create(context, options, block, entry, &mut scratch)?
            };
            report.emit(options.json);
        }
    }
    Ok(())
}

fn process_create<P: PlatformPort>(
    context: &AppContext<P>,
    options: &RunOptions,
    block: &Block,
    entry: &BlockEntry,
    scratch: &mut Scratch,
) -> Result<ActionReport, AppError> {
    let resource = block.resource;
    let name = entry.identity.as_ref().map(|id| id.name().to_string()).unwrap_or_default();

    // An entry that opts into overwrite for a type with no deletion command
    // can never be honored; a global override alone is not an error, since
    // it legitimately applies to the rest of the document.
    if entry.on_exists == Some(OnExists::Overwrite) && !resource.supports_delete() {
        return Err(AppError::NoDeletionStrategy(resource.block_name().to_string()));
    }

    let invocations = builder::build(resource, &entry.spec, scratch, context.platform())?;

    // Dry runs render commands without querying remote state, so the
    // existence check and policy are bypassed entirely.
    if options.dry_run {
        let mut commands = Vec::with_capacity(invocations.len());
        for invocation in &invocations {
            context.platform().run(invocation)?;
            commands.push(context.platform().rendered(invocation));
        }
        return Ok(ActionReport {
            block: resource.block_name(),
            name,
            action: ActionKind::Planned,
            commands,
        });
    }

    let decision = match &entry.identity {
        None => Decision::Create,
        Some(identity) => {
            let effective = resolve_on_exists(options.on_exists, entry.on_exists);
            policy::decide(context.platform(), resource, identity, effective)?
        }
    };

    match decision {
        Decision::Skip => Ok(ActionReport {
            block: resource.block_name(),
            name,
            action: ActionKind::Skipped,
            commands: vec![],
        }),
        Decision::Create => {
            let commands = run_all(context, &invocations)?;
            Ok(ActionReport {
                block: resource.block_name(),
                name,
                action: ActionKind::Created,
                commands,
            })
        }
        Decision::Replace { delete } => {
            // The delete must succeed before any create runs; a failure here
            // leaves the existing resource untouched.
            let mut commands = vec![context.platform().rendered(&delete)];
            context.platform().run(&delete)?;
            commands.extend(run_all(context, &invocations)?);
            Ok(ActionReport {
                block: resource.block_name(),
                name,
                action: ActionKind::Replaced,
                commands,
            })
        }
    }
}

fn process_delete<P: PlatformPort>(
    context: &AppContext<P>,
    options: &RunOptions,
    block: &Block,
    entry: &BlockEntry,
) -> Result<ActionReport, AppError> {
    let resource = block.resource;
    let identity = entry.identity.as_ref().ok_or_else(|| {
        AppError::NoDeletionStrategy(resource.block_name().to_string())
    })?;

    let invocation = if options.dry_run {
        // No remote query in a dry run, so ids learned from `list` output
        // are stood in for.
        resource.delete_invocation(identity, Some("<id>"))?
    } else {
        policy::decide_delete(context.platform(), resource, identity)?
    };

    let rendered = context.platform().rendered(&invocation);
    context.platform().run(&invocation)?;

    Ok(ActionReport {
        block: resource.block_name(),
        name: identity.name().to_string(),
        action: if options.dry_run { ActionKind::Planned } else { ActionKind::Deleted },
        commands: vec![rendered],
    })
}

fn run_all<P: PlatformPort>(
    context: &AppContext<P>,
    invocations: &[CommandInvocation],
) -> Result<Vec<String>, AppError> {
    let mut commands = Vec::with_capacity(invocations.len());
    for invocation in invocations {
        commands.push(context.platform().rendered(invocation));
        context.platform().run(invocation)?;
    }
    Ok(commands)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::testing::ScriptedPlatform;

    fn write_yaml(dir: &tempfile::TempDir, content: &str) -> String {
        let path = dir.path().join("config.yaml");
        fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn options(yaml: String) -> RunOptions {
        RunOptions { yaml: vec![yaml], ..RunOptions::default() }
    }

    #[test]
    fn absent_resources_are_checked_then_created() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = write_yaml(
            &dir,
            "organizations:\n  - name: org1\n    full-name: Org One\n",
        );

        let platform = ScriptedPlatform::new();
        platform.push_stdout(r#"{"organizations":[]}"#);
        let context = AppContext::new(platform);

        execute(&context, &options(yaml)).unwrap();

        let calls = context.platform().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].method, Some("list"));
        assert_eq!(calls[1].method, Some("add"));
        assert!(calls[1].args.contains(&"--full-name".to_string()));
    }

    #[test]
    fn overwrite_deletes_before_creating() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = write_yaml(
            &dir,
            "workspaces:\n  - name: demo\n    organization: org1\n    on_exists: overwrite\n",
        );

        let platform = ScriptedPlatform::new();
        platform.push_stdout(
            r#"{"workspaces":[{"orgName":"org1","workspaceName":"demo","workspaceId":42}]}"#,
        );
        let context = AppContext::new(platform);

        execute(&context, &options(yaml)).unwrap();

        let calls = context.platform().calls();
        let methods: Vec<_> = calls.iter().map(|c| c.method).collect();
        assert_eq!(methods, vec![Some("list"), Some("delete"), Some("add")]);
    }

    #[test]
    fn global_override_beats_block_level_policy() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = write_yaml(
            &dir,
            "organizations:\n  - name: org1\n    on_exists: overwrite\n",
        );

        let platform = ScriptedPlatform::new();
        platform.push_stdout(r#"{"organizations":[{"orgName":"org1","orgId":7}]}"#);
        let context = AppContext::new(platform);

        let mut opts = options(yaml);
        opts.on_exists = Some(OnExists::Ignore);
        execute(&context, &opts).unwrap();

        // Ignore wins: only the list query ran.
        assert_eq!(context.platform().calls().len(), 1);
    }

    #[test]
    fn existing_resource_fails_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = write_yaml(&dir, "organizations:\n  - name: org1\n");

        let platform = ScriptedPlatform::new();
        platform.push_stdout(r#"{"organizations":[{"orgName":"org1","orgId":7}]}"#);
        let context = AppContext::new(platform);

        let err = execute(&context, &options(yaml)).unwrap_err();
        assert!(matches!(err, AppError::ResourceExists(_)));
        assert_eq!(context.platform().calls().len(), 1);
    }

    #[test]
    fn dry_run_skips_existence_checks() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = write_yaml(
            &dir,
            "workspaces:\n  - name: demo\n    organization: org1\n",
        );

        let platform = ScriptedPlatform::new();
        let context = AppContext::new(platform);

        let mut opts = options(yaml);
        opts.dry_run = true;
        execute(&context, &opts).unwrap();

        let calls = context.platform().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Some("add"));
    }

    #[test]
    fn launch_with_block_level_overwrite_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = write_yaml(
            &dir,
            "launch:\n  - pipeline: hello\n    workspace: org1/demo\n    on_exists: overwrite\n",
        );

        let context = AppContext::new(ScriptedPlatform::new());
        let err = execute(&context, &options(yaml)).unwrap_err();
        assert!(matches!(err, AppError::NoDeletionStrategy(_)));
    }

    #[test]
    fn launch_runs_under_a_global_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = write_yaml(
            &dir,
            "launch:\n  - pipeline: hello\n    workspace: org1/demo\n",
        );

        let context = AppContext::new(ScriptedPlatform::new());
        let mut opts = options(yaml);
        opts.on_exists = Some(OnExists::Overwrite);
        execute(&context, &opts).unwrap();

        let calls = context.platform().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].subcommand, "launch");
    }

    #[test]
    fn delete_mode_removes_in_reverse_order() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = write_yaml(
            &dir,
            "organizations:\n  - name: org1\nworkspaces:\n  - name: demo\n    organization: org1\n",
        );

        let platform = ScriptedPlatform::new();
        platform.push_stdout(
            r#"{"workspaces":[{"orgName":"org1","workspaceName":"demo","workspaceId":42}]}"#,
        );
        platform.push_stdout(r#"{}"#); // workspace delete
        platform.push_stdout(r#"{"organizations":[{"orgName":"org1","orgId":7}]}"#);
        let context = AppContext::new(platform);

        let mut opts = options(yaml);
        opts.delete = true;
        execute(&context, &opts).unwrap();

        let calls = context.platform().calls();
        let summary: Vec<_> = calls.iter().map(|c| (c.subcommand, c.method)).collect();
        assert_eq!(
            summary,
            vec![
                ("workspaces", Some("list")),
                ("workspaces", Some("delete")),
                ("organizations", Some("list")),
                ("organizations", Some("delete")),
            ]
        );
    }

    #[test]
    fn delete_mode_fails_for_absent_resources() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = write_yaml(&dir, "organizations:\n  - name: org1\n");

        let platform = ScriptedPlatform::new();
        platform.push_stdout(r#"{"organizations":[]}"#);
        let context = AppContext::new(platform);

        let mut opts = options(yaml);
        opts.delete = true;
        let err = execute(&context, &opts).unwrap_err();
        assert!(matches!(err, AppError::ResourceNotFound(_)));
    }

    #[test]
    fn failed_delete_aborts_the_replacement() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = write_yaml(
            &dir,
            "workspaces:\n  - name: demo\n    organization: org1\n    on_exists: overwrite\n",
        );

        let platform = ScriptedPlatform::new();
        platform.push_stdout(
            r#"{"workspaces":[{"orgName":"org1","workspaceName":"demo","workspaceId":42}]}"#,
        );
        platform.push_err(AppError::Command {
            command: "tw workspaces delete".into(),
            exit_code: 1,
            stderr: "permission denied".into(),
        });
        let context = AppContext::new(platform);

        let err = execute(&context, &options(yaml)).unwrap_err();
        assert!(matches!(err, AppError::Command { .. }));
        // list, delete; never the add.
        assert_eq!(context.platform().calls().len(), 2);
    }

    #[test]
    fn targets_restrict_processing() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = write_yaml(
            &dir,
            "organizations:\n  - name: org1\nworkspaces:\n  - name: demo\n    organization: org1\n",
        );

        let platform = ScriptedPlatform::new();
        platform.push_stdout(r#"{"organizations":[]}"#);
        let context = AppContext::new(platform);

        let mut opts = options(yaml);
        opts.targets = Some("organizations".to_string());
        execute(&context, &opts).unwrap();

        let calls = context.platform().calls();
        assert!(calls.iter().all(|c| c.subcommand == "organizations"));
    }
}
