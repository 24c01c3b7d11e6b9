use crate::app::App;
use crate::domain::NICKNAME_MAX;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_setup(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Title card
            Constraint::Length(4), // Nickname input
            Constraint::Min(4),    // Tagline + status
            Constraint::Length(1), // Location footer
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    render_title_card(f, layout[0]);
    render_nickname_input(app, f, layout[1]);
    render_tagline(app, f, layout[2]);
    render_location_footer(app, f, layout[3]);
}

fn render_title_card(f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    f.render_widget(block, area);

    let title = Paragraph::new(Text::from(vec![
        TextLine::from(""),
        TextLine::from(vec![
            Span::styled(
                "RADIO",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "ACTIVE",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        TextLine::from(Span::styled(
            "proximity mesh chat",
            Style::default().fg(Color::DarkGray),
        )),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(title, area.inner(Margin::new(1, 1)));
}

fn render_nickname_input(app: &App, f: &mut Frame<'_>, area: Rect) {
    let counter = format!(" {}/{NICKNAME_MAX} ", app.current_input.chars().count());
    let block = Block::default()
        .title(" Identity for today ")
        .title_style(Style::default().fg(Color::Green))
        .title_bottom(TextLine::from(counter).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let blink = (app.animation_counter * 2.0).sin() > 0.0;
    let cursor = if blink { "\u{2588}" } else { " " };

    let input = Paragraph::new(TextLine::from(Span::styled(
        format!("> {}{cursor}", app.current_input),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )))
    .block(block);
    f.render_widget(input, area);
}

fn render_tagline(app: &App, f: &mut Frame<'_>, area: Rect) {
    let mut lines = vec![
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Temporary proximity mesh. Nicknames reset at midnight.",
            Style::default().fg(Color::Gray),
        )),
        TextLine::from(Span::styled(
            "No logs. No accounts.",
            Style::default().fg(Color::Gray),
        )),
    ];

    if !app.status_message.is_empty() {
        lines.push(TextLine::from(""));
        lines.push(TextLine::from(Span::styled(
            &app.status_message,
            Style::default().fg(Color::Red),
        )));
    }

    let tagline = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(tagline, area);
}

fn render_location_footer(app: &App, f: &mut Frame<'_>, area: Rect) {
    let footer = Paragraph::new(TextLine::from(vec![
        Span::styled("SECTOR ", Style::default().fg(Color::DarkGray)),
        Span::styled(&*app.location, Style::default().fg(Color::Green)),
        Span::styled("  |  F1 help", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(footer, area);
}
