pub mod menu;
pub mod store;
pub mod working_hours;

pub use menu::*;
pub use store::*;
pub use working_hours::*;
