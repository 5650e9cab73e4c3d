use std::fmt;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::domain::AppError;

/// One YAML input: a file on disk or the process's standard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YamlSource {
    Stdin,
    File(PathBuf),
}

impl fmt::Display for YamlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YamlSource::Stdin => f.write_str("stdin"),
            YamlSource::File(path) => write!(f, "'{}'", path.display()),
        }
    }
}

/// Resolve the positional YAML arguments into concrete sources.
///
/// Accepts files, directories (searched recursively for `*.yml` / `*.yaml`,
/// case-insensitive) and `-` for stdin. With no arguments at all, piped
/// stdin is used; an interactive terminal with no arguments is an error.
pub fn find_yaml_files(paths: &[String]) -> Result<Vec<YamlSource>, AppError> {
    if paths.is_empty() {
        if std::io::stdin().is_terminal() {
            return Err(AppError::Configuration(
                "No YAML(s) provided and no input from stdin. Please provide at least one YAML \
                 configuration file or pipe input from stdin."
                    .to_string(),
            ));
        }
        return Ok(vec![YamlSource::Stdin]);
    }

    let mut sources = Vec::new();
    for raw in paths {
        if raw == "-" {
            // Stdin can only be consumed once, however often it is named.
            if !sources.contains(&YamlSource::Stdin) {
                sources.push(YamlSource::Stdin);
            }
            continue;
        }
        let path = Path::new(raw);
        if !path.exists() {
            return Err(AppError::Configuration(format!("File '{raw}' does not exist")));
        }
        if path.is_dir() {
            collect_dir(path, &mut sources)?;
        } else {
            sources.push(YamlSource::File(path.to_path_buf()));
        }
    }
    Ok(sources)
}

fn collect_dir(dir: &Path, out: &mut Vec<YamlSource>) -> Result<(), AppError> {
    let mut entries: Vec<PathBuf> =
        fs::read_dir(dir)?.map(|entry| entry.map(|e| e.path())).collect::<Result<_, _>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_dir(&path, out)?;
        } else if has_yaml_extension(&path) {
            out.push(YamlSource::File(path));
        }
    }
    Ok(())
}

fn has_yaml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}
