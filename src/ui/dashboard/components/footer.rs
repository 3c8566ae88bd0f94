//! Dashboard footer component
//!
//! Renders key hints and the most recent telemetry sync stamp.

use super::super::state::DashboardState;
use super::super::utils::format_compact_timestamp;

use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let uptime = state.start_time.elapsed();
    let uptime_text = format!(
        "Up {}m {}s",
        uptime.as_secs() / 60,
        uptime.as_secs() % 60
    );

    let footer_text = match state.last_synced() {
        Some(stamp) => format!(
            "[Q] Quit | [Tab] Editor focus | [Ctrl+R] Run scan | {} | Synced {}",
            uptime_text,
            format_compact_timestamp(stamp)
        ),
        None => format!("[Q] Quit | [Tab] Editor focus | [Ctrl+R] Run scan | {uptime_text}"),
    };

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
