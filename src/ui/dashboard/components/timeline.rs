//! Event timeline component
//!
//! Renders the backend's event feed exactly in producer order: no re-sort,
//! no dedup, no cap. Icon and color derive purely from the event kind.

use super::super::state::DashboardState;
use super::super::utils::{event_kind_color, event_kind_icon};

use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub fn render_event_timeline(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let lines: Vec<Line> = match state.events().data() {
        Some(events) => events
            .iter()
            .map(|event| {
                let color = event_kind_color(event.kind);
                Line::from(vec![
                    Span::raw(format!("{} ", event_kind_icon(event.kind))),
                    Span::styled(
                        format!("{:<8} ", event.kind.to_string().to_uppercase()),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(event.message.clone(), Style::default().fg(Color::Gray)),
                    Span::styled(
                        format!("  {}", event.timestamp),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect(),
        None => vec![Line::from(Span::styled(
            "Awaiting telemetry...",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let block = Block::default()
        .title("LIVE ACTIVITY")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
