pub mod category;
pub mod column;
pub mod document;
pub mod error;
pub mod field;
pub mod index;
pub mod merge;
pub mod numeric;
pub mod value;

pub use category::{Category, CategoryView, EMPTY_CATEGORY, select_rows};
pub use column::{Column, EMPTY_COLUMN};
pub use document::Document;
pub use error::{ModelError, Result};
pub use field::MetadataField;
pub use index::{DEFAULT_SET_ID, IndexValue};
pub use merge::{MergedCategory, flatten_rows, merged_column_name};
pub use numeric::{
    meters_to_millimeters, normalize_number, numbers_equal, parse_number, shift_decimal,
};
pub use value::{CellValue, ValueKind, is_meaningful};
