//! Cache list pane: one row per cache with its overall verdict

use crate::checker::{CheckReport, Outcome};
use crate::snapshot::CacheId;
use crate::stats::StatsReport;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Data needed to render the cache list
pub struct CachesRenderData<'a> {
    pub cache_ids: &'a [CacheId],
    pub stats: &'a StatsReport,
    pub checks: &'a CheckReport,
    pub selected: usize,
}

fn verdict_span(verdict: Outcome) -> Span<'static> {
    let label = format!(" {} ", verdict.label());
    match verdict {
        Outcome::Pass => Span::styled(label, Style::default().fg(DEFAULT_THEME.success)),
        Outcome::Skipped => Span::styled(label, Style::default().fg(DEFAULT_THEME.comment)),
        Outcome::Fail { .. } => Span::styled(
            label,
            Style::default()
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::BOLD),
        ),
    }
}

/// Render the cache list pane
pub fn render_caches_pane(
    frame: &mut Frame,
    area: Rect,
    data: CachesRenderData,
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

    let block = Block::default()
        .title(" Caches ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if data.cache_ids.is_empty() {
        let paragraph = Paragraph::new("(no caches in snapshot)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Keep the selection on screen
    if data.selected < *scroll_offset {
        *scroll_offset = data.selected;
    } else if data.selected >= *scroll_offset + visible_height {
        *scroll_offset = data.selected + 1 - visible_height;
    }

    let items: Vec<ListItem> = data
        .cache_ids
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(i, id)| {
            let records = data.stats.get(*id).map(|s| s.total).unwrap_or(0);
            let verdict = verdict_span(data.checks.cache_verdict(*id));
            let line = Line::from(vec![
                Span::styled(
                    format!(" Cache {:<4}", id.0),
                    Style::default().fg(DEFAULT_THEME.fg),
                ),
                Span::styled(
                    format!("{:>6} lines ", records),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                verdict,
            ]);

            let style = if i == data.selected {
                Style::default().bg(DEFAULT_THEME.current_line_bg)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_labels() {
        assert_eq!(verdict_span(Outcome::Pass).content, " PASS ");
        assert_eq!(verdict_span(Outcome::Skipped).content, " SKIP ");
        assert_eq!(
            verdict_span(Outcome::Fail { violations: 2 }).content,
            " FAIL "
        );
    }
}
