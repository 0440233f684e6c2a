pub mod characteristics;
pub mod models;

pub use characteristics::{Characteristic, MemberCounts};
pub use models::*;
