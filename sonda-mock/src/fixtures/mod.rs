pub mod domain;
pub mod email;
pub mod ip;
pub mod name;
pub mod phone;

use sonda_core::{Field, FieldMap, FieldValue};

pub(crate) fn fields<const N: usize>(pairs: [(Field, FieldValue); N]) -> FieldMap {
    pairs.into_iter().collect()
}
