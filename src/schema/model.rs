use super::types::SchemaType;

/// One exposed column of a [`Model`]. `physical` is `field` if set, else
/// `name` itself (spec.md §3: "physical = field if set else name").
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub field: Option<String>,
    pub ty: SchemaType,
    pub primary: bool,
}

impl Column {
    pub fn physical(&self) -> &str {
        self.field.as_deref().unwrap_or(&self.name)
    }
}

/// The mapping from one graph entity type to a backing table and the subset
/// of columns it exposes (spec.md §3, GLOSSARY "Model").
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub name: String,
    pub table: String,
    pub columns: Vec<Column>,
}

impl Model {
    pub fn column(&self, logical_name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == logical_name)
    }

    pub fn primary(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.primary)
    }
}
