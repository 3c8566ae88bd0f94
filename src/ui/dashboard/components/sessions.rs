//! Identity session table component
//!
//! One row per session with an initials badge and a severity chip. Risk
//! levels the console does not recognize render in the danger style.

use super::super::state::DashboardState;
use super::super::utils::session_severity_color;
use crate::severity::{initials, session_severity};

use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Padding, Paragraph, Row, Table};

pub fn render_session_table(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let block = Block::default()
        .title("IDENTITY SESSIONS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let sessions = match state.sessions().data() {
        Some(sessions) if !sessions.is_empty() => sessions,
        _ => {
            let placeholder = Paragraph::new(Line::from(Span::styled(
                "No session telemetry yet.",
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            f.render_widget(placeholder, area);
            return;
        }
    };

    let header = Row::new(vec![
        Cell::from("USER PRINCIPAL"),
        Cell::from("LOCATION"),
        Cell::from("SESSION RISK"),
    ])
    .style(
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .bottom_margin(1);

    let rows: Vec<Row> = sessions
        .iter()
        .map(|session| {
            let severity = session_severity(&session.risk_level);
            let color = session_severity_color(severity);
            Row::new(vec![
                Cell::from(Line::from(vec![
                    Span::styled(
                        format!("[{:<2}] ", initials(&session.user)),
                        Style::default()
                            .fg(Color::LightBlue)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(session.user.clone(), Style::default().fg(Color::Gray)),
                ])),
                Cell::from(Span::styled(
                    session.location.clone(),
                    Style::default().fg(Color::Gray),
                )),
                Cell::from(Span::styled(
                    session.risk_level.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ],
    )
    .header(header)
    .block(block);

    f.render_widget(table, area);
}
