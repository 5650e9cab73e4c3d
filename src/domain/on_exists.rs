use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::domain::AppError;

/// Per-resource directive controlling behavior when a same-named resource
/// is already present remotely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnExists {
    /// Abort the run with an error (the default).
    #[default]
    Fail,
    /// Skip the resource and continue with the next one.
    Ignore,
    /// Delete the existing resource, then recreate it.
    Overwrite,
}

impl OnExists {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnExists::Fail => "fail",
            OnExists::Ignore => "ignore",
            OnExists::Overwrite => "overwrite",
        }
    }
}

impl fmt::Display for OnExists {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnExists {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fail" => Ok(OnExists::Fail),
            "ignore" => Ok(OnExists::Ignore),
            "overwrite" => Ok(OnExists::Overwrite),
            other => Err(AppError::Configuration(format!(
                "Invalid on_exists option: '{other}'. Valid options are: fail, ignore, overwrite"
            ))),
        }
    }
}

/// Compute the effective policy for one resource.
///
/// The global CLI override takes precedence over the block-level setting,
/// which takes precedence over the default of `fail`.
pub fn resolve_on_exists(global: Option<OnExists>, block_level: Option<OnExists>) -> OnExists {
    global.or(block_level).unwrap_or_default()
}
