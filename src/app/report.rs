use serde::Serialize;
use tracing::info;

/// What happened to one resource entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Created,
    Skipped,
    Replaced,
    Deleted,
    /// Dry-run placeholder: the commands were rendered but not executed.
    Planned,
}

/// Per-entry outcome record. In JSON mode each report is one line on
/// stdout, keeping machine output separate from the logs on stderr.
#[derive(Debug, Clone, Serialize)]
pub struct ActionReport {
    pub block: &'static str,
    pub name: String,
    pub action: ActionKind,
    pub commands: Vec<String>,
}

impl ActionReport {
    pub fn emit(&self, json_mode: bool) {
        if json_mode {
            // Serialization of this struct cannot fail.
            if let Ok(line) = serde_json::to_string(self) {
                println!("{line}");
            }
        } else {
            info!("{:?} {} resource '{}'", self.action, self.block, self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_serialize_to_snake_case_actions() {
        let report = ActionReport {
            block: "workspaces",
            name: "demo".to_string(),
            action: ActionKind::Replaced,
            commands: vec!["tw workspaces delete -n demo -o org1".to_string()],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["action"], "replaced");
        assert_eq!(json["block"], "workspaces");
        assert_eq!(json["commands"].as_array().unwrap().len(), 1);
    }
}
