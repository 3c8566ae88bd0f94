//! Dashboard header component
//!
//! Renders the title bar and the backend summary counters.

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render the title and summary strip.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let title = Paragraph::new(format!("TRUSTLOCK CONSOLE v{version}"))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    // Summary counters come with the stats payload; dashes until it arrives.
    let mut spans = vec![
        Span::styled(
            format!("Env: {} ", state.environment),
            Style::default().fg(Color::LightBlue),
        ),
        Span::raw("| "),
    ];
    match state.stats().data() {
        Some(stats) => {
            spans.push(Span::styled(
                format!("Sessions: {} ", stats.active_sessions),
                Style::default().fg(Color::Gray),
            ));
            spans.push(Span::raw("| "));
            let threat_color = if stats.threats_detected > 0 {
                Color::Red
            } else {
                Color::Green
            };
            spans.push(Span::styled(
                format!("Threats: {} ", stats.threats_detected),
                Style::default().fg(threat_color),
            ));
            spans.push(Span::raw("| "));
            spans.push(Span::styled(
                format!("Recent vulns: {}", stats.recent_vulnerabilities),
                Style::default().fg(Color::Gray),
            ));
        }
        None => {
            spans.push(Span::styled(
                "Awaiting first telemetry sync...",
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    let summary = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(summary, header_chunks[1]);
}
