//! Composite risk gauge component
//!
//! The score tier and the status banner are two independent classifications
//! and are styled independently; they can and do disagree.

use super::super::state::DashboardState;
use super::super::utils::tier_color;
use crate::severity::{risk_tier, status_banner, status_tier};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Padding, Paragraph};

pub fn render_risk_gauge(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let snapshot = state.risk_snapshot();
    let score = snapshot.global_risk_score;
    let score_color = tier_color(risk_tier(score));
    let banner_color = tier_color(status_tier(&snapshot.status));

    let block = Block::default()
        .title("COMPOSITE RISK")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(score_color))
        .padding(Padding::uniform(1));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(inner);

    let gauge = Gauge::default()
        .block(Block::default().title("Global Risk Score"))
        .gauge_style(
            Style::default()
                .fg(score_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent((score as u16).min(100))
        .label(format!("{score}/100"));
    f.render_widget(gauge, chunks[0]);

    let banner = Paragraph::new(status_banner(&snapshot.status))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(banner_color)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(banner, chunks[2]);
}
