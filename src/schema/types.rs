use serde::{Deserialize, Serialize};
use std::fmt;

/// Database-agnostic column type, ported from the teacher's
/// `graph_catalog::schema_types::SchemaType`. This crate targets exactly one
/// backend (DuckDB), so `to_sql_literal` drops the teacher's `dialect`
/// parameter — there is only ever one rendering to choose (DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Integer,
    Float,
    String,
    Boolean,
    DateTime,
    Date,
}

impl SchemaType {
    /// Case-insensitive parse with the teacher's common aliases.
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().trim() {
            "integer" | "int" | "long" => Ok(SchemaType::Integer),
            "float" | "double" | "decimal" => Ok(SchemaType::Float),
            "string" | "text" => Ok(SchemaType::String),
            "boolean" | "bool" => Ok(SchemaType::Boolean),
            "datetime" | "timestamp" => Ok(SchemaType::DateTime),
            "date" => Ok(SchemaType::Date),
            _ => Err(format!(
                "unknown type: '{s}'. supported: integer, float, string, boolean, datetime, date"
            )),
        }
    }

    /// Render a string value as a DuckDB SQL literal of this type.
    pub fn to_sql_literal(&self, value: &str) -> Result<String, String> {
        match self {
            SchemaType::Integer => value
                .parse::<i64>()
                .map(|i| i.to_string())
                .map_err(|_| format!("invalid integer: '{value}'")),
            SchemaType::Float => value
                .parse::<f64>()
                .map(|f| f.to_string())
                .map_err(|_| format!("invalid float: '{value}'")),
            SchemaType::String => Ok(format!("'{}'", value.replace('\'', "''"))),
            SchemaType::Boolean => match value.to_lowercase().trim() {
                "true" | "1" => Ok("TRUE".to_string()),
                "false" | "0" => Ok("FALSE".to_string()),
                _ => Err(format!("invalid boolean: '{value}' (expected true, false, 1, or 0)")),
            },
            SchemaType::DateTime | SchemaType::Date => {
                Ok(format!("'{}'", value.replace('\'', "''")))
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Integer => "integer",
            SchemaType::Float => "float",
            SchemaType::String => "string",
            SchemaType::Boolean => "boolean",
            SchemaType::DateTime => "datetime",
            SchemaType::Date => "date",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_aliases() {
        assert_eq!(SchemaType::from_str("INT").unwrap(), SchemaType::Integer);
        assert_eq!(SchemaType::from_str("text").unwrap(), SchemaType::String);
        assert_eq!(SchemaType::from_str("bool").unwrap(), SchemaType::Boolean);
    }

    #[test]
    fn test_from_str_invalid() {
        assert!(SchemaType::from_str("varchar").is_err());
    }

    #[test]
    fn test_to_sql_literal_string_escapes_quote() {
        let t = SchemaType::String;
        assert_eq!(t.to_sql_literal("O'Reilly").unwrap(), "'O''Reilly'");
    }

    #[test]
    fn test_to_sql_literal_boolean() {
        let t = SchemaType::Boolean;
        assert_eq!(t.to_sql_literal("true").unwrap(), "TRUE");
        assert_eq!(t.to_sql_literal("0").unwrap(), "FALSE");
        assert!(t.to_sql_literal("maybe").is_err());
    }

    #[test]
    fn test_to_sql_literal_integer() {
        assert_eq!(SchemaType::Integer.to_sql_literal("42").unwrap(), "42");
        assert!(SchemaType::Integer.to_sql_literal("4.2").is_err());
    }
}
