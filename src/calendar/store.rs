use chrono::NaiveDate;

use super::event::{Event, EventCategory};

/// The in-memory working set of events and user-created categories.
///
/// An explicit owned value: the application holds one for its
/// lifetime, tests construct their own. Removal is equality-based and
/// drops the first match. Built-in categories are not stored here;
/// `category_choices` merges them in for the forms.
#[derive(Debug, Clone, Default)]
pub struct Store {
    events: Vec<Event>,
    categories: Vec<EventCategory>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the store from persisted collections.
    pub fn from_parts(events: Vec<Event>, categories: Vec<EventCategory>) -> Self {
        Self { events, categories }
    }

    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Returns true iff the event was present and removed.
    pub fn remove_event(&mut self, event: &Event) -> bool {
        match self.events.iter().position(|e| e == event) {
            Some(idx) => {
                self.events.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events whose *start* date equals `date`, in insertion order.
    ///
    /// Narrower than the layout engine's span test on purpose: the
    /// remove flow has always keyed on start date, so a multi-day
    /// event is visible on intermediate days but only removable from
    /// its first.
    pub fn events_on(&self, date: NaiveDate) -> Vec<Event> {
        self.events
            .iter()
            .filter(|e| e.start.date() == date)
            .cloned()
            .collect()
    }

    pub fn add_category(&mut self, category: EventCategory) {
        self.categories.push(category);
    }

    /// Returns true iff the category was present and removed.
    pub fn remove_category(&mut self, category: &EventCategory) -> bool {
        match self.categories.iter().position(|c| c == category) {
            Some(idx) => {
                self.categories.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn categories(&self) -> &[EventCategory] {
        &self.categories
    }

    /// User categories followed by any built-ins not shadowed by them.
    pub fn category_choices(&self) -> Vec<EventCategory> {
        let mut choices = self.categories.clone();
        for builtin in EventCategory::builtins() {
            if !choices.contains(&builtin) {
                choices.push(builtin);
            }
        }
        choices
    }
}
