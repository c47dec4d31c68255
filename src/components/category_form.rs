use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::calendar::EventCategory;
use crate::theme::{self, Theme};

use super::event_form::render_field;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CategoryField {
    #[default]
    Name,
    Color,
}

/// Add-category form: a name plus a color given as hex or a color name.
#[derive(Debug, Clone, Default)]
pub struct CategoryFormState {
    pub name: String,
    pub color: String,
    pub active_field: CategoryField,
}

impl CategoryFormState {
    pub fn input_char(&mut self, c: char) {
        match self.active_field {
            CategoryField::Name => self.name.push(c),
            CategoryField::Color => self.color.push(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.active_field {
            CategoryField::Name => {
                self.name.pop();
            }
            CategoryField::Color => {
                self.color.pop();
            }
        }
    }

    pub fn toggle_field(&mut self) {
        self.active_field = match self.active_field {
            CategoryField::Name => CategoryField::Color,
            CategoryField::Color => CategoryField::Name,
        };
    }

    pub fn build(&self) -> Result<EventCategory, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Please enter a name".to_string());
        }
        let color = theme::parse_color(&self.color)
            .ok_or_else(|| "Color must be #rrggbb or a color name".to_string())?;
        Ok(EventCategory::new(name, color))
    }
}

pub struct CategoryForm;

impl CategoryForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &CategoryFormState, theme: &Theme) {
        let form_w = area.width.min(40).max(26);
        let form_h = 6;
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h);

        frame.render_widget(Clear, form_area);

        let block = Block::default()
            .title(" Add Category ")
            .title_style(theme.header())
            .borders(Borders::ALL)
            .border_style(theme.border())
            .style(theme.base());

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        render_field(
            frame,
            rows[0],
            "Name:",
            &state.name,
            state.active_field == CategoryField::Name,
            theme,
        );
        render_field(
            frame,
            rows[1],
            "Color:",
            &state.color,
            state.active_field == CategoryField::Color,
            theme,
        );

        let help = Line::from(vec![
            Span::styled("Tab", theme.base().add_modifier(Modifier::BOLD)),
            Span::styled(":Field ", theme.dim()),
            Span::styled("Enter", theme.base().add_modifier(Modifier::BOLD)),
            Span::styled(":Add ", theme.dim()),
            Span::styled("Esc", theme.base().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", theme.dim()),
        ]);
        frame.render_widget(Paragraph::new(help), rows[3]);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::*;

    #[test]
    fn build_parses_hex_and_named_colors() {
        let state = CategoryFormState {
            name: "Gym".to_string(),
            color: "#ff00ff".to_string(),
            active_field: CategoryField::Name,
        };
        assert_eq!(
            state.build().unwrap(),
            EventCategory::new("Gym", Color::Rgb(0xFF, 0x00, 0xFF))
        );

        let named = CategoryFormState {
            color: "magenta".to_string(),
            ..state
        };
        assert_eq!(named.build().unwrap().color, Color::Magenta);
    }

    #[test]
    fn build_rejects_blank_name_and_bad_color() {
        let blank = CategoryFormState {
            name: " ".to_string(),
            color: "red".to_string(),
            active_field: CategoryField::Name,
        };
        assert!(blank.build().is_err());

        let bad = CategoryFormState {
            name: "Gym".to_string(),
            color: "#zzzzzz".to_string(),
            active_field: CategoryField::Color,
        };
        assert!(bad.build().is_err());
    }
}
