use thiserror::Error;

/// Errors raised while populating or querying a [`super::SchemaRegistry`].
/// Mirrors the flat, per-case shape of the teacher's `GraphSchemaError`
/// (`graph_catalog::errors`), trimmed to the cases spec.md §7 names.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemaError {
    #[error("no model found for type `{type_name}`")]
    UnknownType { type_name: String },

    #[error("type `{type_name}` has no column `{column}`")]
    UnknownColumn { type_name: String, column: String },

    #[error("type `{type_name}` has no primary column")]
    NoPrimary { type_name: String },

    #[error(
        "cannot join `{left_type}` and `{right_type}`: same type and table (self-join on identity is disallowed)"
    )]
    InvalidJoin { left_type: String, right_type: String },

    #[error("table `{name}` is already registered")]
    DuplicateTable { name: String },

    #[error("model `{name}` is already registered")]
    DuplicateModel { name: String },

    #[error("failed to read schema file: {0}")]
    ConfigReadError(String),

    #[error("failed to parse schema file: {0}")]
    ConfigParseError(String),

    #[error("invalid schema configuration: {0}")]
    InvalidConfig(String),
}
