/// Shell operators that are passed through unquoted when rendering a
/// command line for display.
const PASSTHROUGH: [&str; 6] = ["|", ">", ">>", "<", "&&", "||"];

/// One fully-built platform CLI call: `tw [<global args>] [-o json] <subcommand> [<method>] <args..>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// Top-level CLI noun, e.g. "workspaces", "compute-envs", "launch".
    pub subcommand: &'static str,
    /// Verb under the noun ("add", "import", "delete", "list"); `None` for
    /// bare invocations such as `tw launch`.
    pub method: Option<&'static str>,
    /// Remaining positional and flag arguments.
    pub args: Vec<String>,
    /// Force `-o json` regardless of the global output mode (used for
    /// read-only existence queries whose output must be parseable).
    pub json_output: bool,
}

impl CommandInvocation {
    pub fn new(subcommand: &'static str, method: Option<&'static str>, args: Vec<String>) -> Self {
        Self { subcommand, method, args, json_output: false }
    }

    /// Same as [`CommandInvocation::new`] but with `-o json` forced on.
    pub fn json(subcommand: &'static str, method: Option<&'static str>, args: Vec<String>) -> Self {
        Self { subcommand, method, args, json_output: true }
    }

    /// Iterate the subcommand path and arguments in execution order.
    pub fn argv(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.subcommand)
            .chain(self.method.iter().copied())
            .chain(self.args.iter().map(String::as_str))
    }

    /// Render the full command line with shell quoting, for logs and dry runs.
    pub fn rendered(&self, binary: &str, global_args: &[String], json_mode: bool) -> String {
        let mut parts = vec![quote(binary)];
        parts.extend(global_args.iter().map(|a| quote(a)));
        if json_mode || self.json_output {
            parts.push("-o".to_string());
            parts.push("json".to_string());
        }
        parts.extend(self.argv().map(quote));
        parts.join(" ")
    }
}

/// Quote an argument for display if it contains whitespace or shell
/// metacharacters. Recognized shell operators are left as-is.
pub fn quote(arg: &str) -> String {
    if PASSTHROUGH.contains(&arg) {
        return arg.to_string();
    }
    if arg.is_empty() {
        return "''".to_string();
    }
    let safe = arg
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-' | '_'));
    if safe { arg.to_string() } else { format!("'{}'", arg.replace('\'', r"'\''")) }
}

/// Captured outcome of one platform CLI call.
#[derive(Debug, Clone, Default)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    /// Parse stdout as JSON if possible.
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(self.stdout.trim()).ok()
    }
}
