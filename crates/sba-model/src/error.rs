use thiserror::Error;

/// Structural defects in a mapping registry or schema order contract.
///
/// These are fatal: a registry that fails one of these checks can never
/// produce a schema-valid document, so the run stops before any row is read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error("element path '{path}' is declared more than once")]
    DuplicateElement { path: String },
    #[error("'{parent}' declares order index {order} for both '{first}' and '{second}'")]
    DuplicateOrder {
        parent: String,
        order: u16,
        first: String,
        second: String,
    },
    #[error("element '{path}' has no declared parent group '{parent}'")]
    DanglingParent { path: String, parent: String },
    #[error("element '{path}' is nested under '{parent}', which is a field and not a group")]
    NotAGroup { path: String, parent: String },
    #[error("group '{group}' orders child '{child}' at both {first} and {second}")]
    ConflictingGroupOrder {
        group: String,
        child: String,
        first: u16,
        second: u16,
    },
    #[error("record root '{root}' is not a top-level group in the registry")]
    MissingRecordRoot { root: String },
}

pub type Result<T> = std::result::Result<T, ContractError>;
