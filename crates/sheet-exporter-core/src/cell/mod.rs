//! Cell values and addressing

mod address;
mod value;

pub use address::{CellAddress, CellRange};
pub use value::CellValue;
