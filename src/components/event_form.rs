use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::calendar::{Event, EventCategory};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Name,
    StartDate,
    StartTime,
    EndDate,
    EndTime,
    Category,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Name => FormField::StartDate,
            FormField::StartDate => FormField::StartTime,
            FormField::StartTime => FormField::EndDate,
            FormField::EndDate => FormField::EndTime,
            FormField::EndTime => FormField::Category,
            FormField::Category => FormField::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Name => FormField::Category,
            FormField::StartDate => FormField::Name,
            FormField::StartTime => FormField::StartDate,
            FormField::EndDate => FormField::StartTime,
            FormField::EndTime => FormField::EndDate,
            FormField::Category => FormField::EndTime,
        }
    }
}

/// Add-event form state. All inputs are free text until submit; `build`
/// performs the validation the core entities deliberately skip.
#[derive(Debug, Clone)]
pub struct EventFormState {
    pub name: String,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub category_index: usize,
    pub active_field: FormField,
}

impl EventFormState {
    /// Defaults: the given date at 09:00, ending an hour later.
    pub fn new(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        let end = start + Duration::hours(1);
        Self {
            name: String::new(),
            start_date: start.format("%Y-%m-%d").to_string(),
            start_time: start.format("%H:%M").to_string(),
            end_date: end.format("%Y-%m-%d").to_string(),
            end_time: end.format("%H:%M").to_string(),
            category_index: 0,
            active_field: FormField::Name,
        }
    }

    pub fn input_char(&mut self, c: char) {
        match self.active_field {
            FormField::Name => self.name.push(c),
            FormField::StartDate => self.start_date.push(c),
            FormField::StartTime => self.start_time.push(c),
            FormField::EndDate => self.end_date.push(c),
            FormField::EndTime => self.end_time.push(c),
            FormField::Category => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.active_field {
            FormField::Name => {
                self.name.pop();
            }
            FormField::StartDate => {
                self.start_date.pop();
            }
            FormField::StartTime => {
                self.start_time.pop();
            }
            FormField::EndDate => {
                self.end_date.pop();
            }
            FormField::EndTime => {
                self.end_time.pop();
            }
            FormField::Category => {}
        }
    }

    pub fn next_category(&mut self, total: usize) {
        if total > 0 {
            self.category_index = (self.category_index + 1) % total;
        }
    }

    fn parsed_start(&self) -> Option<NaiveDateTime> {
        parse_date_time(&self.start_date, &self.start_time)
    }

    fn parsed_end(&self) -> Option<NaiveDateTime> {
        parse_date_time(&self.end_date, &self.end_time)
    }

    /// Validate and construct the event, or explain what is wrong.
    pub fn build(&self, choices: &[EventCategory]) -> Result<Event, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Please enter a name".to_string());
        }
        let start = self
            .parsed_start()
            .ok_or_else(|| "Start must be yyyy-mm-dd / hh:mm".to_string())?;
        let end = self
            .parsed_end()
            .ok_or_else(|| "End must be yyyy-mm-dd / hh:mm".to_string())?;
        if end < start {
            return Err("End must be at or after start".to_string());
        }
        let category = choices
            .get(self.category_index)
            .cloned()
            .unwrap_or_else(EventCategory::default_category);
        Ok(Event::new(name, start, end, category))
    }
}

fn parse_date_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M").ok()?;
    Some(date.and_time(time))
}

pub struct EventForm;

impl EventForm {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        state: &EventFormState,
        choices: &[EventCategory],
        theme: &Theme,
    ) {
        let form_w = area.width.min(50).max(30);
        let form_h = area.height.min(12).max(10);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h);

        frame.render_widget(Clear, form_area);

        let block = Block::default()
            .title(" Add Event ")
            .title_style(theme.header())
            .borders(Borders::ALL)
            .border_style(theme.border())
            .style(theme.base());

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // name
            Constraint::Length(1), // start date
            Constraint::Length(1), // start time
            Constraint::Length(1), // end date
            Constraint::Length(1), // end time
            Constraint::Length(1), // category
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        let active = state.active_field;
        render_field(frame, rows[0], "Name:", &state.name, active == FormField::Name, theme);
        render_field(
            frame,
            rows[1],
            "Start:",
            &state.start_date,
            active == FormField::StartDate,
            theme,
        );
        render_field(
            frame,
            rows[2],
            "Time:",
            &state.start_time,
            active == FormField::StartTime,
            theme,
        );
        render_field(
            frame,
            rows[3],
            "End:",
            &state.end_date,
            active == FormField::EndDate,
            theme,
        );
        render_field(
            frame,
            rows[4],
            "Time:",
            &state.end_time,
            active == FormField::EndTime,
            theme,
        );

        let category = choices
            .get(state.category_index)
            .map(|c| c.name.as_str())
            .unwrap_or("Default");
        render_field(frame, rows[5], "Cat:", category, active == FormField::Category, theme);

        let help = Line::from(vec![
            Span::styled("Tab", theme.base().add_modifier(Modifier::BOLD)),
            Span::styled(":Next ", theme.dim()),
            Span::styled("Space", theme.base().add_modifier(Modifier::BOLD)),
            Span::styled(":Cat ", theme.dim()),
            Span::styled("Enter", theme.base().add_modifier(Modifier::BOLD)),
            Span::styled(":Add ", theme.dim()),
            Span::styled("Esc", theme.base().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", theme.dim()),
        ]);
        frame.render_widget(Paragraph::new(help), rows[7]);
    }
}

pub(crate) fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    active: bool,
    theme: &Theme,
) {
    let cursor = if active { "_" } else { "" };
    let style = if active { theme.selected() } else { theme.base() };

    let line = Line::from(vec![
        Span::styled(format!("{:<7}", label), theme.dim()),
        Span::styled(format!("{}{}", value, cursor), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> EventFormState {
        let mut state = EventFormState::new(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
        state.name = "Trip".to_string();
        state
    }

    #[test]
    fn defaults_to_one_hour_on_the_given_date() {
        let state = EventFormState::new(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
        assert_eq!(state.start_date, "2024-02-10");
        assert_eq!(state.start_time, "09:00");
        assert_eq!(state.end_date, "2024-02-10");
        assert_eq!(state.end_time, "10:00");
    }

    #[test]
    fn build_produces_a_validated_event() {
        let mut state = filled();
        state.end_date = "2024-02-12".to_string();
        state.end_time = "17:00".to_string();
        state.category_index = 1;

        let event = state.build(&EventCategory::builtins()).unwrap();
        assert_eq!(event.name, "Trip");
        assert_eq!(event.category, EventCategory::work());
        assert!(event.is_multi_day());
    }

    #[test]
    fn build_rejects_blank_names() {
        let mut state = filled();
        state.name = "   ".to_string();
        assert!(state.build(&EventCategory::builtins()).is_err());
    }

    #[test]
    fn build_rejects_end_before_start() {
        let mut state = filled();
        state.end_time = "08:00".to_string();
        let err = state.build(&EventCategory::builtins()).unwrap_err();
        assert!(err.contains("at or after"));
    }

    #[test]
    fn build_accepts_zero_duration() {
        let mut state = filled();
        state.end_time = "09:00".to_string();
        let event = state.build(&EventCategory::builtins()).unwrap();
        assert_eq!(event.start, event.end);
    }

    #[test]
    fn build_rejects_malformed_dates() {
        let mut state = filled();
        state.start_date = "02/10/2024".to_string();
        assert!(state.build(&EventCategory::builtins()).is_err());
    }

    #[test]
    fn tab_order_wraps_both_ways() {
        let mut field = FormField::Name;
        for _ in 0..6 {
            field = field.next();
        }
        assert_eq!(field, FormField::Name);
        assert_eq!(FormField::Name.prev(), FormField::Category);
    }
}
