pub mod event;
pub mod layout;
pub mod store;

pub use event::{Event, EventCategory};
pub use layout::{layout_month, DayCell, EventFragment};
pub use store::Store;
