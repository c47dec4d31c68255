use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDate};

use crate::calendar::{layout_month, DayCell, Event, Store};
use crate::components::{CategoryFormState, EventFormState};
use crate::persistence::{self, SaveData};
use crate::theme::Theme;

/// Application state: one store, one theme, the selected date, and the
/// derived month layout. All mutations go through explicit command
/// methods so the core stays testable without a terminal.
pub struct App {
    pub running: bool,
    pub selected_date: NaiveDate,
    pub today: NaiveDate,
    pub store: Store,
    pub theme: Theme,
    pub month_cells: Vec<DayCell>,
    pub day_events: Vec<Event>,
    pub day_cursor: usize,
    pub event_form: Option<EventFormState>,
    pub category_form: Option<CategoryFormState>,
    pub status_message: Option<String>,
    pub show_help: bool,
    data_path: Option<PathBuf>,
}

impl App {
    pub fn new() -> Self {
        Self::with_data_path(persistence::data_path())
    }

    /// Start from the persisted file if it loads, otherwise an empty
    /// store with the configured theme. Load failure is not fatal.
    pub fn with_data_path(data_path: Option<PathBuf>) -> Self {
        let today = Local::now().date_naive();

        let (store, theme) = match data_path.as_deref().map(persistence::load) {
            Some(Ok(SaveData {
                events,
                categories,
                theme,
            })) => (Store::from_parts(events, categories), theme),
            _ => (Store::new(), Theme::from_config()),
        };

        let mut app = Self {
            running: true,
            selected_date: today,
            today,
            store,
            theme,
            month_cells: Vec::new(),
            day_events: Vec::new(),
            day_cursor: 0,
            event_form: None,
            category_form: None,
            status_message: None,
            show_help: false,
            data_path,
        };
        app.refresh();
        app
    }

    /// Recompute the month layout and the selected day's list after any
    /// store or date change.
    pub fn refresh(&mut self) {
        self.month_cells = layout_month(self.selected_date, self.store.events());
        self.day_events = self.store.events_on(self.selected_date);
        if self.day_cursor >= self.day_events.len() {
            self.day_cursor = self.day_events.len().saturating_sub(1);
        }
    }

    // ── Navigation ──

    pub fn next_day(&mut self) {
        self.selected_date = self.selected_date.succ_opt().unwrap_or(self.selected_date);
        self.refresh();
    }

    pub fn prev_day(&mut self) {
        self.selected_date = self.selected_date.pred_opt().unwrap_or(self.selected_date);
        self.refresh();
    }

    pub fn next_month(&mut self) {
        self.shift_month(1);
    }

    pub fn prev_month(&mut self) {
        self.shift_month(-1);
    }

    fn shift_month(&mut self, delta: i32) {
        let month0 = self.selected_date.month0() as i32 + delta;
        let year = self.selected_date.year() + month0.div_euclid(12);
        let month = month0.rem_euclid(12) as u32 + 1;
        let day = self
            .selected_date
            .day()
            .min(crate::calendar::layout::days_in_month(year, month));
        self.selected_date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        self.refresh();
    }

    pub fn go_to_today(&mut self) {
        self.today = Local::now().date_naive();
        self.selected_date = self.today;
        self.refresh();
    }

    pub fn cursor_up(&mut self) {
        self.day_cursor = self.day_cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.day_cursor + 1 < self.day_events.len() {
            self.day_cursor += 1;
        }
    }

    // ── Commands ──

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next_preset();
        self.status_message = Some(format!("Theme: {}", self.theme.name));
    }

    pub fn save(&mut self) {
        let Some(path) = self.data_path.clone() else {
            self.status_message = Some("No data directory available".to_string());
            return;
        };
        let data = SaveData {
            events: self.store.events().to_vec(),
            categories: self.store.categories().to_vec(),
            theme: self.theme.clone(),
        };
        match persistence::save(&path, &data) {
            Ok(()) => self.status_message = Some("Saved".to_string()),
            Err(err) => self.status_message = Some(format!("Save failed: {err}")),
        }
    }

    pub fn open_event_form(&mut self) {
        self.event_form = Some(EventFormState::new(self.selected_date));
    }

    pub fn close_event_form(&mut self) {
        self.event_form = None;
    }

    pub fn submit_event_form(&mut self) {
        let Some(form) = self.event_form.as_ref() else {
            return;
        };
        match form.build(&self.store.category_choices()) {
            Ok(event) => {
                self.status_message = Some(format!("Added \"{}\"", event.name));
                self.store.add_event(event);
                self.event_form = None;
                self.refresh();
            }
            Err(msg) => self.status_message = Some(msg),
        }
    }

    pub fn open_category_form(&mut self) {
        self.category_form = Some(CategoryFormState::default());
    }

    pub fn close_category_form(&mut self) {
        self.category_form = None;
    }

    pub fn submit_category_form(&mut self) {
        let Some(form) = self.category_form.as_ref() else {
            return;
        };
        match form.build() {
            Ok(category) => {
                self.status_message = Some(format!("Added category \"{}\"", category.name));
                self.store.add_category(category);
                self.category_form = None;
            }
            Err(msg) => self.status_message = Some(msg),
        }
    }

    /// Remove the event under the day-panel cursor. Only events that
    /// start on the selected date are offered, matching `events_on`.
    pub fn delete_selected_event(&mut self) {
        let Some(event) = self.day_events.get(self.day_cursor).cloned() else {
            self.status_message = Some("No event selected".to_string());
            return;
        };
        if self.store.remove_event(&event) {
            self.status_message = Some(format!("Removed \"{}\"", event.name));
        } else {
            self.status_message = Some("Event already removed".to_string());
        }
        self.refresh();
    }
}
