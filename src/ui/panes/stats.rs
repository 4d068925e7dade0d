//! Statistics pane for the selected cache

use crate::snapshot::CacheLineState;
use crate::stats::CacheStats;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the statistics pane
pub fn render_stats_pane(
    frame: &mut Frame,
    area: Rect,
    stats: Option<&CacheStats>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let title = match stats {
        Some(s) => format!(" Statistics: Cache {} ", s.cache_id),
        None => " Statistics ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let Some(stats) = stats else {
        let paragraph = Paragraph::new("(no cache selected)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let label = Style::default().fg(DEFAULT_THEME.comment);
    let value = Style::default().fg(DEFAULT_THEME.number);

    let mut lines = Vec::new();
    match stats.last_used {
        Some(range) => {
            lines.push(Line::from(vec![
                Span::styled(" Min last used  ", label),
                Span::styled(range.min.to_string(), value),
            ]));
            lines.push(Line::from(vec![
                Span::styled(" Max last used  ", label),
                Span::styled(range.max.to_string(), value),
            ]));
        }
        None => lines.push(Line::from(Span::styled(" No data", label))),
    }
    lines.push(Line::default());

    for state in [
        CacheLineState::Modified,
        CacheLineState::Exclusive,
        CacheLineState::Shared,
        CacheLineState::Invalid,
    ] {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", state),
                Style::default()
                    .fg(DEFAULT_THEME.state(state))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{:<13}", format!("{:?}", state)), label),
            Span::styled(stats.count(state).to_string(), value),
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled(" Total          ", label),
        Span::styled(stats.total.to_string(), value),
    ]));

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll_offset = (*scroll_offset).min(lines.len().saturating_sub(visible_height));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((*scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}
