//! Request construction: fluent builders, typed body sub-builders, and immutable descriptors.

pub mod body;
pub mod builder;
pub mod descriptor;

pub use body::*;
pub use builder::*;
pub use descriptor::*;
