pub mod aggregate;
pub mod category;
pub mod factors;
pub mod normalize;
pub mod policy;

pub use aggregate::*;
pub use category::*;
pub use factors::*;
pub use normalize::*;
pub use policy::*;
