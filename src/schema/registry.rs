use std::collections::HashMap;
use std::path::Path;

use super::errors::SchemaError;
use super::model::{Column, Model};
use super::table::Table;

/// Tables and models known to the compiler (spec.md §3 "Schema entities",
/// §4.2 "Schema Registry", §6 schema declaration API). Populated once by the
/// external loader, then read-only for the lifetime of every compilation
/// (spec.md §5) — mirrors the teacher's `GraphSchema`, but as a single owned
/// value rather than process-global state (DESIGN.md, re-architecting note
/// "Schema registry as an explicit value").
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    tables: HashMap<String, Table>,
    models: HashMap<String, Model>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table_from_csv(
        &mut self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<(), SchemaError> {
        let name = name.into();
        if self.tables.contains_key(&name) {
            return Err(SchemaError::DuplicateTable { name });
        }
        self.tables
            .insert(name.clone(), Table::from_csv(name, path.as_ref()));
        Ok(())
    }

    pub fn add_table_from_variable(&mut self, name: impl Into<String>) -> Result<(), SchemaError> {
        let name = name.into();
        if self.tables.contains_key(&name) {
            return Err(SchemaError::DuplicateTable { name });
        }
        self.tables.insert(name.clone(), Table::from_variable(name));
        Ok(())
    }

    pub fn add_model(
        &mut self,
        type_name: impl Into<String>,
        table_name: impl Into<String>,
        columns: Vec<Column>,
    ) -> Result<(), SchemaError> {
        let name = type_name.into();
        if self.models.contains_key(&name) {
            return Err(SchemaError::DuplicateModel { name });
        }
        let table = table_name.into();
        if !self.tables.contains_key(&table) {
            return Err(SchemaError::InvalidConfig(format!(
                "model `{name}` references unknown table `{table}`"
            )));
        }
        if columns.iter().filter(|c| c.primary).count() != 1 {
            return Err(SchemaError::InvalidConfig(format!(
                "model `{name}` must have exactly one primary column"
            )));
        }
        self.models.insert(
            name.clone(),
            Model {
                name,
                table,
                columns,
            },
        );
        Ok(())
    }

    fn model(&self, type_name: &str) -> Result<&Model, SchemaError> {
        self.models
            .get(type_name)
            .ok_or_else(|| SchemaError::UnknownType {
                type_name: type_name.to_string(),
            })
    }

    /// `table_of(type) -> table_name`
    pub fn table_of(&self, type_name: &str) -> Result<&str, SchemaError> {
        Ok(self.model(type_name)?.table.as_str())
    }

    /// `field_of(type, column) -> (table, physical_field)`
    pub fn field_of<'a>(
        &'a self,
        type_name: &str,
        column: &str,
    ) -> Result<(&'a str, &'a str), SchemaError> {
        let model = self.model(type_name)?;
        let col = model
            .column(column)
            .ok_or_else(|| SchemaError::UnknownColumn {
                type_name: type_name.to_string(),
                column: column.to_string(),
            })?;
        Ok((model.table.as_str(), col.physical()))
    }

    /// `all_fields(type) -> [physical_field]`, used to expand `alias.*`.
    pub fn all_fields(&self, type_name: &str) -> Result<Vec<&str>, SchemaError> {
        let model = self.model(type_name)?;
        Ok(model.columns.iter().map(|c| c.physical()).collect())
    }

    /// `primary_field(type) -> physical_field`
    pub fn primary_field(&self, type_name: &str) -> Result<&str, SchemaError> {
        let model = self.model(type_name)?;
        model
            .primary()
            .map(|c| c.physical())
            .ok_or_else(|| SchemaError::NoPrimary {
                type_name: type_name.to_string(),
            })
    }

    /// `join_fields(left_type, right_type) -> (left_field, right_field)`.
    /// Two node patterns adjacent in the *same* join group (sharing a table
    /// under distinct types, spec.md §4.4 step 1) never reach this call -
    /// they merge and need no join at all. This call is reached whenever two
    /// *groups* are joined, which can still back onto the same physical
    /// table (e.g. a third pattern re-using an already-seen type forces a
    /// new group even though the table repeats, spec.md §8 scenario 4's
    /// "self-join through a third type"). Per spec.md §4.2: when both sides'
    /// types map to the same table, both sides use the *left* side's primary
    /// field - not each type's own primary field independently - since a
    /// self-join's two aliases are views over the same columns.
    pub fn join_fields(
        &self,
        left_type: &str,
        right_type: &str,
    ) -> Result<(&str, &str), SchemaError> {
        let left_table = self.table_of(left_type)?;
        let right_table = self.table_of(right_type)?;
        if left_table == right_table {
            if left_type == right_type {
                return Err(SchemaError::InvalidJoin {
                    left_type: left_type.to_string(),
                    right_type: right_type.to_string(),
                });
            }
            let field = self.primary_field(left_type)?;
            return Ok((field, field));
        }
        Ok((self.primary_field(left_type)?, self.primary_field(right_type)?))
    }

    pub fn show_models(&self, type_names: &[&str]) -> Vec<&Model> {
        if type_names.is_empty() {
            let mut all: Vec<&Model> = self.models.values().collect();
            all.sort_by(|a, b| a.name.cmp(&b.name));
            return all;
        }
        type_names
            .iter()
            .filter_map(|n| self.models.get(*n))
            .collect()
    }

    pub fn show_tables(&self) -> Vec<&Table> {
        let mut all: Vec<&Table> = self.tables.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }
}
