use std::time::Duration;

use docket::app::App;
use docket::{components, tui};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

fn main() -> Result<()> {
    color_eyre::install()?;

    let mut app = App::new();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;

    // Flush state on normal exit; a failure here is reported, not fatal.
    app.save();
    if let Some(msg) = app.status_message.as_deref() {
        if msg.starts_with("Save failed") {
            eprintln!("{msg}");
        }
    }

    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            let layout =
                Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
            let content = layout[0];

            if content.width >= 70 {
                let cols =
                    Layout::horizontal([Constraint::Min(40), Constraint::Length(32)])
                        .split(content);
                components::MonthView::render(
                    frame,
                    cols[0],
                    &app.month_cells,
                    app.selected_date,
                    app.today,
                    &app.theme,
                );
                components::DayPanel::render(
                    frame,
                    cols[1],
                    app.selected_date,
                    &app.day_events,
                    app.day_cursor,
                    &app.theme,
                );
            } else {
                components::MonthView::render(
                    frame,
                    content,
                    &app.month_cells,
                    app.selected_date,
                    app.today,
                    &app.theme,
                );
            }

            if let Some(ref form) = app.event_form {
                let choices = app.store.category_choices();
                components::EventForm::render(frame, area, form, &choices, &app.theme);
            }

            if let Some(ref form) = app.category_form {
                components::CategoryForm::render(frame, area, form, &app.theme);
            }

            if app.show_help {
                render_help(frame, area, app);
            }

            render_status_bar(frame, layout[1], app);
        })?;

        if let Some(key) = tui::next_key_event(Duration::from_millis(100))? {
            app.status_message = None;

            if app.show_help {
                if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
                    app.show_help = false;
                }
                continue;
            }

            if app.event_form.is_some() {
                handle_event_form_input(app, key.code);
            } else if app.category_form.is_some() {
                handle_category_form_input(app, key.code);
            } else {
                handle_normal_input(app, key.code, key.modifiers);
            }
        }
    }

    Ok(())
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Char('s'), _) => app.save(),
        (KeyCode::Char('t'), _) => app.go_to_today(),
        (KeyCode::Char('n'), _) => app.open_event_form(),
        (KeyCode::Char('c'), _) => app.open_category_form(),
        (KeyCode::Char('d'), _) => app.delete_selected_event(),
        (KeyCode::Char('T'), _) => app.cycle_theme(),
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.prev_day(),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.next_day(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.cursor_up(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.cursor_down(),
        (KeyCode::Char('['), _) => app.prev_month(),
        (KeyCode::Char(']'), _) => app.next_month(),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_event_form_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_event_form(),
        KeyCode::Enter => app.submit_event_form(),
        KeyCode::Tab => {
            if let Some(ref mut form) = app.event_form {
                form.active_field = form.active_field.next();
            }
        }
        KeyCode::BackTab => {
            if let Some(ref mut form) = app.event_form {
                form.active_field = form.active_field.prev();
            }
        }
        KeyCode::Backspace => {
            if let Some(ref mut form) = app.event_form {
                form.backspace();
            }
        }
        KeyCode::Char(' ') => {
            // Space cycles the category when that field is active.
            let total = app.store.category_choices().len();
            if let Some(ref mut form) = app.event_form {
                if form.active_field == components::event_form::FormField::Category {
                    form.next_category(total);
                } else {
                    form.input_char(' ');
                }
            }
        }
        KeyCode::Char(c) => {
            if let Some(ref mut form) = app.event_form {
                form.input_char(c);
            }
        }
        _ => {}
    }
}

fn handle_category_form_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_category_form(),
        KeyCode::Enter => app.submit_category_form(),
        KeyCode::Tab | KeyCode::BackTab => {
            if let Some(ref mut form) = app.category_form {
                form.toggle_field();
            }
        }
        KeyCode::Backspace => {
            if let Some(ref mut form) = app.category_form {
                form.backspace();
            }
        }
        KeyCode::Char(c) => {
            if let Some(ref mut form) = app.category_form {
                form.input_char(c);
            }
        }
        _ => {}
    }
}

fn render_status_bar(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let w = area.width as usize;

    let left = format!(" Docket | {} ", app.theme.name);
    let right = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else if w >= 80 {
        " hjkl:Nav [/]:Month t:Today n:New c:Cat d:Del T:Theme s:Save ?:Help q:Quit ".to_string()
    } else if w >= 50 {
        " n:New d:Del s:Save ?:Help q:Quit ".to_string()
    } else {
        " ?:Help q:Quit ".to_string()
    };

    let padding = " ".repeat(w.saturating_sub(left.len() + right.len()));
    let line = Line::from(vec![
        Span::styled(left, app.theme.status()),
        Span::styled(padding, app.theme.status()),
        Span::styled(right, app.theme.status()),
    ]);

    frame.render_widget(Paragraph::new(line).style(app.theme.status()), area);
}

fn render_help(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let popup_w = area.width.min(48).max(28);
    let popup_h = area.height.min(18).max(10);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(app.theme.header())
        .borders(Borders::ALL)
        .border_style(app.theme.border())
        .style(app.theme.base());

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = app.theme.base().add_modifier(Modifier::BOLD);
    let section_style = app
        .theme
        .base()
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let lines = vec![
        Line::from(Span::styled("Navigation", section_style)),
        Line::from(vec![
            Span::styled("  h/l       ", key_style),
            Span::raw("Previous/next day"),
        ]),
        Line::from(vec![
            Span::styled("  j/k       ", key_style),
            Span::raw("Move day-list cursor"),
        ]),
        Line::from(vec![
            Span::styled("  [/]       ", key_style),
            Span::raw("Previous/next month"),
        ]),
        Line::from(vec![
            Span::styled("  t         ", key_style),
            Span::raw("Jump to today"),
        ]),
        Line::from(""),
        Line::from(Span::styled("Actions", section_style)),
        Line::from(vec![
            Span::styled("  n         ", key_style),
            Span::raw("Add event"),
        ]),
        Line::from(vec![
            Span::styled("  c         ", key_style),
            Span::raw("Add category"),
        ]),
        Line::from(vec![
            Span::styled("  d         ", key_style),
            Span::raw("Remove selected event"),
        ]),
        Line::from(vec![
            Span::styled("  T         ", key_style),
            Span::raw("Cycle theme"),
        ]),
        Line::from(vec![
            Span::styled("  s         ", key_style),
            Span::raw("Save"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  q", key_style),
            Span::raw(" / "),
            Span::styled("Esc     ", key_style),
            Span::raw("Quit / close popup"),
        ]),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}
