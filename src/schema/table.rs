use std::path::PathBuf;

/// Where a registered table's rows come from. The registry only tracks this
/// for the executor adapter to act on (spec.md §4.5); the compiler core never
/// inspects it.
#[derive(Debug, Clone, PartialEq)]
pub enum TableOrigin {
    Csv(PathBuf),
    Variable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub origin: TableOrigin,
}

impl Table {
    pub fn from_csv(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Table {
            name: name.into(),
            origin: TableOrigin::Csv(path.into()),
        }
    }

    pub fn from_variable(name: impl Into<String>) -> Self {
        Table {
            name: name.into(),
            origin: TableOrigin::Variable,
        }
    }
}
