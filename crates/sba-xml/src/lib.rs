//! XML side of the SBA converter.
//!
//! - **builder**: cleaned records to schema-ordered element trees
//! - **fixer**: reorder existing documents against the same contract
//! - **reader** / **writer**: the quick-xml boundary

pub mod builder;
pub mod error;
pub mod fixer;
pub mod reader;
pub mod writer;

pub use builder::{Decision, OrderedBuilder, build, decide};
pub use error::{FixError, XmlError};
pub use fixer::{FixStats, OrderViolation, order_violations, reorder, reorder_in_place};
pub use reader::{parse_document, read_document};
pub use writer::{DEFAULT_INDENT, to_xml_string, write_document, write_document_file};
