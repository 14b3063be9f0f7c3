use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::errors::SchemaError;
use super::model::Column;
use super::registry::SchemaRegistry;
use super::types::SchemaType;

/// YAML schema file shape (spec.md §6 "Schema file format"): top-level
/// `tables` and `models` lists. Loading is an out-of-scope external
/// collaborator per spec.md §1, but it's ambient plumbing every test fixture
/// and the CLI binary need, so it's built the way the teacher's
/// `GraphSchemaConfig::from_yaml_file` builds its own YAML loader
/// (`graph_catalog::config`), via `serde_yaml`.
#[derive(Debug, Deserialize)]
pub struct SchemaFile {
    pub tables: Vec<TableEntry>,
    #[serde(default)]
    pub models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Csv,
    DuckdbVariable,
}

#[derive(Debug, Deserialize)]
pub struct TableEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TableKind,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ModelEntry {
    pub name: String,
    pub table: String,
    pub columns: Vec<ColumnEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ColumnEntry {
    pub name: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub primary: bool,
}

impl SchemaFile {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| SchemaError::ConfigReadError(e.to_string()))?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, SchemaError> {
        serde_yaml::from_str(yaml).map_err(|e| SchemaError::ConfigParseError(e.to_string()))
    }

    /// Populate a fresh [`SchemaRegistry`] from this file's declarations.
    pub fn load(&self) -> Result<SchemaRegistry, SchemaError> {
        let mut registry = SchemaRegistry::new();

        for table in &self.tables {
            match table.kind {
                TableKind::Csv => {
                    let path = table.path.as_ref().ok_or_else(|| {
                        SchemaError::InvalidConfig(format!(
                            "table `{}` has type csv but no path",
                            table.name
                        ))
                    })?;
                    registry.add_table_from_csv(&table.name, path)?;
                }
                TableKind::DuckdbVariable => {
                    registry.add_table_from_variable(&table.name)?;
                }
            }
        }

        for model in &self.models {
            let columns = model
                .columns
                .iter()
                .map(|c| -> Result<Column, SchemaError> {
                    let ty = SchemaType::from_str(&c.type_name)
                        .map_err(SchemaError::InvalidConfig)?;
                    Ok(Column {
                        name: c.name.clone(),
                        field: c.field.clone(),
                        ty,
                        primary: c.primary,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            registry.add_model(&model.name, &model.table, columns)?;
        }

        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
tables:
  - name: customer
    type: csv
    path: customer.csv
  - name: infos
    type: csv
    path: infos.csv
models:
  - name: Customer
    table: customer
    columns:
      - name: id
        type: integer
        primary: true
      - name: first_name
        type: string
  - name: CustomerInfo
    table: infos
    columns:
      - name: id
        type: integer
        primary: true
      - name: age
        type: integer
"#;

    #[test]
    fn test_parses_and_loads() {
        let file = SchemaFile::from_yaml_str(SAMPLE).unwrap();
        let registry = file.load().unwrap();
        assert_eq!(registry.table_of("Customer").unwrap(), "customer");
        assert_eq!(registry.primary_field("CustomerInfo").unwrap(), "id");
    }

    #[test]
    fn test_missing_csv_path_errors() {
        let yaml = r#"
tables:
  - name: customer
    type: csv
models: []
"#;
        let file = SchemaFile::from_yaml_str(yaml).unwrap();
        assert!(file.load().is_err());
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        assert!(SchemaFile::from_yaml_str("not: [valid").is_err());
    }
}
