pub mod error;

pub mod merge;
pub mod schema;
pub mod state;
