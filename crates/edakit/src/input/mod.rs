//! Input table abstraction and cell values.

mod records;
mod source;
mod value;

pub use records::parse_value;
pub use source::{Column, DataTable};
pub use value::Value;
