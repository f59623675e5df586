pub mod property;

pub use property::{p, PrimitiveKind, Property, PropertyKind, Schema};
