use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::{DayCell, EventFragment};
use crate::theme::Theme;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub struct MonthView;

impl MonthView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        cells: &[DayCell],
        selected_date: NaiveDate,
        today: NaiveDate,
        theme: &Theme,
    ) {
        let title = format!(
            " {} {} ",
            month_name(selected_date.month()),
            selected_date.year()
        );

        let block = Block::default()
            .title(title)
            .title_style(theme.header())
            .borders(Borders::ALL)
            .border_style(theme.border())
            .style(theme.base());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width < 7 || inner.height < 2 {
            return;
        }

        let weeks = cells.len().div_ceil(7);

        // Header row + equal-height week rows
        let mut row_constraints = vec![Constraint::Length(1)];
        for _ in 0..weeks {
            row_constraints.push(Constraint::Fill(1));
        }
        let rows = Layout::vertical(row_constraints).split(inner);

        let header_cells: Vec<Span> = DAY_NAMES
            .iter()
            .map(|d| {
                Span::styled(
                    format!("{:^width$}", d, width = (inner.width / 7) as usize),
                    theme.header(),
                )
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(header_cells)), rows[0]);

        for week in 0..weeks {
            let cols = Layout::horizontal([Constraint::Fill(1); 7]).split(rows[week + 1]);
            for col in 0..7 {
                if let Some(cell) = cells.get(week * 7 + col) {
                    render_cell(frame, cols[col], cell, selected_date, today, theme);
                }
            }
        }
    }
}

fn render_cell(
    frame: &mut Frame,
    area: Rect,
    cell: &DayCell,
    selected_date: NaiveDate,
    today: NaiveDate,
    theme: &Theme,
) {
    let DayCell::Day { date, fragments } = cell else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let day_style = if *date == selected_date {
        theme.selected()
    } else if *date == today {
        theme.today()
    } else {
        theme.dim()
    };

    let mut lines = vec![Line::from(Span::styled(format!("{:>2}", date.day()), day_style))];

    let visible = (inner.height as usize).saturating_sub(1);
    for fragment in fragments.iter().take(visible) {
        lines.push(fragment_line(fragment, theme));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn fragment_line<'a>(fragment: &'a EventFragment, theme: &Theme) -> Line<'a> {
    let time = format!(
        "{}-{} ",
        fragment.start.format("%H:%M"),
        fragment.end.format("%H:%M")
    );
    let time_style = if fragment.is_continuation {
        theme.continuation()
    } else {
        theme.dim()
    };
    let name_style = if fragment.is_continuation {
        theme.continuation().fg(fragment.event.category.color)
    } else {
        theme.base().fg(fragment.event.category.color)
    };

    Line::from(vec![
        Span::styled(time, time_style),
        Span::styled(fragment.event.name.as_str(), name_style),
    ])
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
