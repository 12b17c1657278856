//! Exhibitor details for the selected stand.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::Theme;
use crate::models::Stand;

/// Lines describing `stand`, without the key help.
pub fn stand_lines(stand: &Stand, favorite: bool, theme: &Theme) -> Vec<Line<'static>> {
    let info = &stand.info;
    let mut lines = Vec::new();

    let star = if favorite {
        Span::styled("★ ", Style::default().fg(theme.favorite))
    } else {
        Span::styled("☆ ", Style::default().fg(theme.text_muted))
    };
    lines.push(Line::from(vec![
        star,
        Span::styled(
            if info.title.is_empty() { stand.label.clone() } else { info.title.clone() },
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Booth: ", Style::default().fg(theme.text_secondary)),
        Span::styled(stand.label.clone(), Style::default().fg(theme.accent)),
    ]));
    if info.match_count > 1 {
        lines.push(Line::from(Span::styled(
            format!("{} exhibitors share this booth", info.match_count),
            Style::default().fg(theme.text_muted),
        )));
    }

    if let Some(website) = &info.website {
        lines.push(Line::from(vec![
            Span::styled("Web: ", Style::default().fg(theme.text_secondary)),
            Span::styled(website.clone(), Style::default().fg(theme.primary)),
        ]));
    }

    let others: Vec<&str> = info
        .siblings
        .iter()
        .map(String::as_str)
        .filter(|booth| *booth != stand.label && !stand.label.ends_with(&format!(".{booth}")))
        .collect();
    if !others.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Also at: ", Style::default().fg(theme.text_secondary)),
            Span::styled(others.join(", "), Style::default().fg(theme.text)),
        ]));
    }

    if !info.description.is_empty() {
        lines.push(Line::from(""));
        lines.extend(info.description.lines().map(|text| {
            Line::from(Span::styled(text.to_string(), Style::default().fg(theme.text)))
        }));
    }
    lines
}

/// Render the stand popup
pub fn render_stand_popup(
    f: &mut Frame,
    stand: &Stand,
    favorite: bool,
    list: Option<&str>,
    theme: &Theme,
) {
    let area = super::centered_rect(60, 50, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", stand.label))
        .border_style(Style::default().fg(if favorite { theme.favorite } else { theme.primary }))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    let details = Paragraph::new(stand_lines(stand, favorite, theme)).wrap(Wrap { trim: true });
    f.render_widget(details, chunks[0]);

    let toggle = match (favorite, list) {
        (true, Some(list)) => format!(": Remove from {list}  "),
        (false, Some(list)) => format!(": Add to {list}  "),
        (_, None) => ": Add to a new list  ".to_string(),
    };
    let help = Paragraph::new(Line::from(vec![
        Span::styled("f", Style::default().fg(theme.primary)),
        Span::raw(toggle),
        Span::styled("Tab", Style::default().fg(theme.primary)),
        Span::raw(": Next  "),
        Span::styled("Esc", Style::default().fg(theme.primary)),
        Span::raw(": Close"),
    ]))
    .style(Style::default().fg(theme.text_muted));
    f.render_widget(help, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExhibitorInfo, MapPoint};

    fn text(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn stand(info: ExhibitorInfo) -> Stand {
        Stand {
            label: "1.E211".into(),
            points: vec![MapPoint::new(0.0, 0.0)],
            info,
        }
    }

    #[test]
    fn test_details_show_exhibitor() {
        let stand = stand(ExhibitorInfo {
            title: "Acme, Globex".into(),
            description: "Rockets".into(),
            website: Some("https://acme.example".into()),
            siblings: vec!["E211".into(), "F100".into()],
            match_count: 2,
        });
        let rendered = text(&stand_lines(&stand, true, &Theme::dark()));
        assert!(rendered.starts_with("★ Acme, Globex"));
        assert!(rendered.contains("Booth: 1.E211"));
        assert!(rendered.contains("2 exhibitors share this booth"));
        assert!(rendered.contains("Web: https://acme.example"));
        assert!(rendered.contains("Also at: F100"));
        assert!(rendered.ends_with("Rockets"));
    }

    #[test]
    fn test_unmatched_stand_falls_back_to_label() {
        let rendered = text(&stand_lines(&stand(ExhibitorInfo::default()), false, &Theme::dark()));
        assert_eq!(rendered, "☆ 1.E211\nBooth: 1.E211");
    }
}
