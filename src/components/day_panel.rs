use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::Event;
use crate::theme::Theme;

/// Side panel listing the events that *start* on the selected date,
/// with a cursor for the remove flow. Multi-day events passing through
/// the date show up in the grid but not here; removal keys on the
/// start date.
pub struct DayPanel;

impl DayPanel {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        date: NaiveDate,
        events: &[Event],
        cursor: usize,
        theme: &Theme,
    ) {
        let block = Block::default()
            .title(format!(" {} ", date.format("%a, %b %d")))
            .title_style(theme.header())
            .borders(Borders::ALL)
            .border_style(theme.border())
            .style(theme.base());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if events.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("No events start today", theme.dim())),
                inner,
            );
            return;
        }

        let lines: Vec<Line> = events
            .iter()
            .enumerate()
            .map(|(i, event)| {
                let marker = if i == cursor { "> " } else { "  " };
                let time = format!(
                    "{} - {} ",
                    event.start.format("%H:%M"),
                    event.end.format("%H:%M")
                );
                let row_style = if i == cursor {
                    theme.selected()
                } else {
                    theme.base()
                };
                Line::from(vec![
                    Span::styled(marker, row_style),
                    Span::styled(time, if i == cursor { row_style } else { theme.dim() }),
                    Span::styled(event.name.as_str(), row_style.fg(event.category.color)),
                    Span::styled(
                        format!(" [{}]", event.category.name),
                        if i == cursor { row_style } else { theme.dim() },
                    ),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
