//! Code auditor component
//!
//! Snippet editor plus the analysis report panel. The report theme follows
//! the vulnerability score threshold while the findings panel branches on
//! list emptiness; the two are independent and rendered as-is.

use super::super::state::DashboardState;
use crate::auditor::AuditPhase;
use crate::consts::cli_consts::SPINNER_FRAMES;
use crate::severity::audit_is_danger;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub fn render_code_auditor(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_editor(f, chunks[0], state);
    render_report(f, chunks[1], state);
}

fn render_editor(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let auditor = &state.auditor;

    let title = match auditor.phase() {
        AuditPhase::Analyzing => format!(
            "CODE AUDITOR {} analyzing...",
            SPINNER_FRAMES[state.tick % SPINNER_FRAMES.len()]
        ),
        AuditPhase::Idle => "CODE AUDITOR - paste a snippet to arm the scan".to_string(),
        AuditPhase::Ready => "CODE AUDITOR - [Ctrl+R] run security scan".to_string(),
    };

    let border_color = if state.input_focused {
        Color::Magenta
    } else {
        Color::DarkGray
    };

    let mut text = auditor.input().to_string();
    if state.input_focused {
        // Block cursor at the insertion point.
        text.push('▌');
    }
    let content = if text.is_empty() {
        Paragraph::new(Span::styled(
            "// Paste code snippet to analyze security posture...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Paragraph::new(text).style(Style::default().fg(Color::Gray))
    };

    let editor = content
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color))
                .padding(Padding::uniform(1)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(editor, area);
}

fn render_report(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let Some(report) = state.auditor.report() else {
        let placeholder = Paragraph::new(Span::styled(
            "No analysis yet.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(
            Block::default()
                .title("ANALYSIS REPORT")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::uniform(1)),
        );
        f.render_widget(placeholder, area);
        return;
    };

    // Score threshold picks the theme, independently of the findings list.
    let theme = if audit_is_danger(report.vulnerability_score) {
        Color::Red
    } else {
        Color::Green
    };

    let mut lines = vec![Line::from(vec![
        Span::styled("Risk Score: ", Style::default().fg(Color::Gray)),
        Span::styled(
            report.vulnerability_score.to_string(),
            Style::default().fg(theme).add_modifier(Modifier::BOLD),
        ),
    ])];
    lines.push(Line::from(""));

    if report.owasp_top_10.is_empty() {
        lines.push(Line::from(Span::styled(
            "✅ Code passed all security checks.",
            Style::default().fg(Color::Green),
        )));
    } else {
        for finding in &report.owasp_top_10 {
            lines.push(Line::from(vec![
                Span::styled("⚠ ", Style::default().fg(Color::Red)),
                Span::styled(finding.clone(), Style::default().fg(Color::LightRed)),
            ]));
        }
    }

    if let Some(rewrite) = &report.secure_rewrite_suggestion {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "SUGGESTED REWRITE",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )));
        for rewrite_line in rewrite.lines() {
            lines.push(Line::from(Span::styled(
                rewrite_line.to_string(),
                Style::default().fg(Color::Magenta),
            )));
        }
    }

    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .title("ANALYSIS REPORT")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme))
                .padding(Padding::uniform(1)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(panel, area);
}
