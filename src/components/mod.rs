pub mod category_form;
pub mod day_panel;
pub mod event_form;
pub mod month_view;

pub use category_form::{CategoryForm, CategoryFormState};
pub use day_panel::DayPanel;
pub use event_form::{EventForm, EventFormState};
pub use month_view::MonthView;
