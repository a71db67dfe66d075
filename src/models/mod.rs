pub mod product;
pub mod quantity;
pub mod update;

pub use product::*;
pub use quantity::Quantity;
pub use update::*;
