use crate::app::App;
use crate::domain::Message;
use crate::ui::hex_color;
use chrono::TimeZone;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

pub fn render_chat(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(4),    // Message feed
            Constraint::Length(1), // Typing indicator
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    render_header(app, f, layout[0]);
    render_feed(app, f, layout[1]);
    render_typing(app, f, layout[2]);
    render_input(app, f, layout[3]);
    render_footer(f, layout[4]);
}

fn render_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let (nickname, color) = app.profile.as_ref().map_or_else(
        || (String::new(), Color::Green),
        |p| (p.nickname.clone(), hex_color(&p.color)),
    );

    let header = Paragraph::new(vec![
        TextLine::from(vec![
            Span::styled(
                "LOCAL MESH ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(&*app.location, Style::default().fg(Color::DarkGray)),
            Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
            Span::styled(nickname, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ]),
        TextLine::from(Span::styled(
            "\u{2500}".repeat(usize::from(area.width)),
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    f.render_widget(header, area);
}

const MESH_DISCLAIMER: &str = "\"Radioactive\" encryption active. Messages in this mesh fade \
    once you leave the area or disconnect. Quitting resets the session.";

fn render_feed(app: &App, f: &mut Frame<'_>, area: Rect) {
    let mut lines = vec![
        TextLine::from(Span::styled(
            MESH_DISCLAIMER,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
        TextLine::from(""),
    ];

    let visible = usize::from(area.height).saturating_sub(lines.len());
    let start = app.messages.len().saturating_sub(visible);
    lines.extend(
        app.messages[start..]
            .iter()
            .map(|message| feed_line(app, message)),
    );

    f.render_widget(Paragraph::new(lines), area);
}

fn feed_line<'a>(app: &App, message: &'a Message) -> TextLine<'a> {
    let own = app
        .profile
        .as_ref()
        .is_some_and(|p| !message.is_ai && message.sender == p.nickname);

    let sender_style = if message.is_ai {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else if own {
        let color = app
            .profile
            .as_ref()
            .map_or(Color::White, |p| hex_color(&p.color));
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD)
    };

    let mut spans = vec![
        Span::styled(
            format!("{} ", clock(message.timestamp)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!("{}: ", message.sender), sender_style),
        Span::styled(&*message.text, Style::default().fg(Color::White)),
    ];

    if !own {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        spans.push(Span::styled(
            format!("  \u{00b7} {}m", message.distance.round() as u32),
            Style::default().fg(Color::DarkGray),
        ));
    }

    TextLine::from(spans)
}

fn render_typing(app: &App, f: &mut Frame<'_>, area: Rect) {
    if !app.is_typing {
        return;
    }

    let throbber = Throbber::default()
        .label("PROXIMA is composing a reply")
        .style(Style::default().fg(Color::Green))
        .throbber_style(Style::default().fg(Color::LightGreen));
    let mut state = app.typing_throbber.clone();
    f.render_stateful_widget(throbber, area, &mut state);
}

fn render_input(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Cast your signal... ")
        .title_style(Style::default().fg(Color::Green))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let blink = (app.animation_counter * 2.0).sin() > 0.0;
    let cursor = if blink { "\u{2588}" } else { " " };

    let input = Paragraph::new(TextLine::from(Span::styled(
        format!("> {}{cursor}", app.current_input),
        Style::default().fg(Color::White),
    )))
    .block(block);
    f.render_widget(input, area);
}

fn render_footer(f: &mut Frame<'_>, area: Rect) {
    let footer = Paragraph::new(TextLine::from(vec![
        Span::styled("SIGNAL RANGE: 50M", Style::default().fg(Color::DarkGray)),
        Span::styled("  |  F1 help  |  Esc quit", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn clock(timestamp: i64) -> String {
    chrono::Local
        .timestamp_millis_opt(timestamp)
        .single()
        .map_or_else(|| "--:--".to_string(), |t| t.format("%H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppActions;
    use crate::domain::{MeshPhase, UserProfile};
    use crate::mesh::doubles::CannedMesh;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn chat_app() -> App {
        let mut app = App::new(
            AppActions::new(Box::new(CannedMesh {
                roster: Vec::new(),
                reply: "ok".to_string(),
            })),
            "51.5074, -0.1278".to_string(),
        );
        app.phase = MeshPhase::Chat;
        app.profile = Some(UserProfile::for_today("Fox"));
        app
    }

    #[test]
    fn feed_opens_with_the_encryption_disclaimer() {
        let app = chat_app();
        let mut terminal = Terminal::new(TestBackend::new(160, 24)).unwrap();

        terminal.draw(|f| render_chat(&app, f)).unwrap();

        let rendered: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(rendered.contains("encryption active"));
    }
}
