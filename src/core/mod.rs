pub mod ambient;
pub mod constants;
pub mod draw;
pub mod field;
pub mod page;
pub mod schedule;

pub use ambient::*;
pub use draw::*;
pub use field::*;
pub use schedule::*;
