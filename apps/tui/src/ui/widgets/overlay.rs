use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const HELP_LINES: &[&str] = &[
    "",
    "  Setup     type a nickname, Enter to join the mesh",
    "  Scanning  wait for the sweep to finish",
    "  Chat      type a message, Enter to cast it",
    "",
    "  F1        toggle this overlay",
    "  Esc       close overlay / quit",
    "",
];

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}

pub fn render_help(f: &mut Frame<'_>) {
    let mut lines: Vec<Line<'_>> = HELP_LINES.iter().map(|l| Line::from(*l)).collect();

    lines.push(Line::from("  Flags:"));
    let cli_help = crate::cli::CliArgs::help_text();
    for line in cli_help.lines() {
        if line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty() {
            continue;
        }
        lines.push(Line::from(format!("  {}", line.trim_start())));
    }
    lines.push(Line::from(""));

    let height = u16::try_from(lines.len()).unwrap_or(20) + 2;
    let area = centered(f.area(), 56, height);
    let popup = Paragraph::new(lines).block(
        Block::default()
            .title(" Keys ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}
