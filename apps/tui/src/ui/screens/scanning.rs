use crate::app::App;
use crate::ui::widgets::radar::render_sweep;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render_scanning(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(8),    // Radar dish
            Constraint::Length(3), // Status lines
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    let header = Paragraph::new(TextLine::from(Span::styled(
        "SCANNING",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(header, layout[0]);

    render_sweep(f, layout[1], app.radar.as_ref(), app.animation_counter);

    // Trailing dot count pulses with the sweep.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let dots = ".".repeat((app.animation_counter as usize % 3) + 1);
    let status = Paragraph::new(Text::from(vec![
        TextLine::from(Span::styled(
            format!("Pulsing local area{dots}"),
            Style::default().fg(Color::Green),
        )),
        TextLine::from(Span::styled(
            format!(
                "Looking for nearby radioactive signals in sector {}",
                app.location
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(status, layout[2]);
}
