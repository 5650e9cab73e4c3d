use serde_yaml::{Mapping, Value};

use crate::domain::AppError;

/// One resource entry from a YAML block: a mapping from field name to value.
///
/// Field order from the source file is preserved, which keeps generated
/// command lines stable.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSpec {
    fields: Mapping,
}

impl ResourceSpec {
    /// Wrap a YAML value, rejecting anything that is not a mapping with
    /// string keys.
    pub fn from_value(block: &str, value: Value) -> Result<Self, AppError> {
        let Value::Mapping(fields) = value else {
            return Err(AppError::Configuration(format!(
                "Each entry in the '{block}' block must be a mapping of field names to values"
            )));
        };
        for key in fields.keys() {
            if !key.is_string() {
                return Err(AppError::Configuration(format!(
                    "Non-string field name in the '{block}' block: {key:?}"
                )));
            }
        }
        Ok(Self { fields })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    /// Fetch a field coerced to its command-line string form.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get(key).and_then(scalar_to_string)
    }

    pub fn get_bool(&self, key: &str) -> bool {
        matches!(self.get(key), Some(Value::Bool(true)))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key).filter(|v| !v.is_null())
    }

    /// Iterate fields in declaration order, skipping explicit nulls.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .iter()
            .filter(|(_, v)| !v.is_null())
            .filter_map(|(k, v)| k.as_str().map(|k| (k, v)))
    }
}

/// Render a YAML scalar the way it appears on a command line.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Join a YAML sequence of scalars into a single comma-separated argument.
pub fn comma_join(key: &str, values: &[Value]) -> Result<String, AppError> {
    let mut parts = Vec::with_capacity(values.len());
    for value in values {
        match scalar_to_string(value) {
            Some(s) => parts.push(s),
            None => {
                return Err(AppError::Configuration(format!(
                    "List values for '{key}' must be scalars"
                )));
            }
        }
    }
    Ok(parts.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(yaml: &str) -> ResourceSpec {
        ResourceSpec::from_value("test", serde_yaml::from_str(yaml).unwrap()).unwrap()
    }

    #[test]
    fn null_fields_are_invisible() {
        let s = spec("name: demo\ndescription: null");
        assert!(s.contains("name"));
        assert!(!s.contains("description"));
        assert_eq!(s.entries().count(), 1);
    }

    #[test]
    fn scalars_coerce_to_strings() {
        let s = spec("name: demo\nmax-cpus: 100\nheader: true");
        assert_eq!(s.get_str("max-cpus").as_deref(), Some("100"));
        assert_eq!(s.get_str("header").as_deref(), Some("true"));
    }

    #[test]
    fn non_mapping_entry_is_rejected() {
        let err =
            ResourceSpec::from_value("workspaces", serde_yaml::from_str("- a\n- b").unwrap())
                .unwrap_err();
        assert!(err.to_string().contains("must be a mapping"));
    }

    #[test]
    fn comma_join_flattens_scalar_lists() {
        let values: Vec<Value> = serde_yaml::from_str("[c5.large, m5.xlarge]").unwrap();
        assert_eq!(comma_join("instance-types", &values).unwrap(), "c5.large,m5.xlarge");
    }

    #[test]
    fn comma_join_rejects_nested_values() {
        let values: Vec<Value> = serde_yaml::from_str("[{a: 1}]").unwrap();
        assert!(comma_join("subnets", &values).is_err());
    }
}
