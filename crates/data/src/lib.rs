//! Definition and snapshot loading for the combat simulator.

pub mod load;
pub mod schema;
pub mod snapshot;

pub use load::*;
pub use schema::*;
pub use snapshot::*;
