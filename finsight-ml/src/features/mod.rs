//! Feature encoding: raw input records, encoded column names, column transforms.

pub mod encoding;
pub mod record;
pub mod transforms;

pub use encoding::{FeatureColumn, NAME_DELIMITER, TransformKind};
pub use record::{InputRecord, InputValue};
pub use transforms::{CategoricalColumn, ColumnTransformer, NumericColumn};
