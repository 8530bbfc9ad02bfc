pub mod energy;
pub mod spectrum;

pub(crate) use energy::{local_field_at, local_fields};
