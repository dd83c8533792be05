//! Row data: delimited record storage and the placeholder template engine

mod store;
pub mod template;

pub use store::{split_line, Row, RowStore, RowStoreError};
pub use template::substitute;
