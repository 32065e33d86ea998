pub mod annotation;
pub mod extraction;
pub mod filtering;
pub mod preprocessing;

pub use annotation::*;
pub use extraction::*;
pub use filtering::*;
pub use preprocessing::*;
