//! Classification, geometry flattening, index aggregation, partitioning and search.

pub mod aggregate;
pub mod classify;
pub mod feature;
pub mod flatten;
pub mod partition;
pub mod search;
pub mod validation;
