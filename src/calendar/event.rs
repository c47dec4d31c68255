use chrono::{Duration, NaiveDateTime};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::theme::color_str;

/// A named, colored classification applied to events.
///
/// Four built-ins always exist; user-created categories live in the
/// store alongside them. Equality is by value (name + color).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCategory {
    pub name: String,
    #[serde(with = "color_str")]
    pub color: Color,
}

impl EventCategory {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    pub fn default_category() -> Self {
        Self::new("Default", Color::Gray)
    }

    pub fn work() -> Self {
        Self::new("Work", Color::Red)
    }

    pub fn school() -> Self {
        Self::new("School", Color::Green)
    }

    pub fn personal() -> Self {
        Self::new("Personal", Color::Blue)
    }

    /// The fixed built-in categories, in display order.
    pub fn builtins() -> [Self; 4] {
        [
            Self::default_category(),
            Self::work(),
            Self::school(),
            Self::personal(),
        ]
    }
}

/// A named time interval with a category.
///
/// `end >= start` is the creators' responsibility (the add-event form
/// validates it); the type itself accepts anything. An inverted event
/// simply never shows up in the month grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub category: EventCategory,
}

impl Event {
    pub fn new(
        name: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        category: EventCategory,
    ) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            category,
        }
    }

    /// May be zero when start equals end.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn is_multi_day(&self) -> bool {
        self.start.date() != self.end.date()
    }

    /// Closed-interval intersection: events touching at a single
    /// instant count as overlapping.
    pub fn overlaps(&self, other: &Event) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}
