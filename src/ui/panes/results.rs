//! Results pane: invariant outcomes and the violations touching one cache

use crate::checker::{CheckReport, Outcome, Violation};
use crate::snapshot::CacheId;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding},
    Frame,
};

/// Render the results pane for `cache`
pub fn render_results_pane(
    frame: &mut Frame,
    area: Rect,
    checks: &CheckReport,
    cache: Option<CacheId>,
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
        .title(" Invariant Checks ")
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::new(1, 0, 0, 0));

    let mut all_items = Vec::new();

    if let Some(cache) = cache {
        for outcome in checks.outcomes_for(cache) {
            let color = match outcome.outcome {
                Outcome::Pass => DEFAULT_THEME.success,
                Outcome::Fail { .. } => DEFAULT_THEME.error,
                Outcome::Skipped => DEFAULT_THEME.comment,
            };
            all_items.push(ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<5}", outcome.outcome.label()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    outcome.invariant.test_name(),
                    Style::default().fg(DEFAULT_THEME.fg),
                ),
            ])));
        }

        let involved: Vec<&Violation> =
            checks.violations.iter().filter(|v| v.involves(cache)).collect();

        all_items.push(ListItem::new(""));
        if involved.is_empty() {
            all_items.push(
                ListItem::new("(no violations involve this cache)")
                    .style(Style::default().fg(DEFAULT_THEME.comment)),
            );
        } else {
            all_items.push(
                ListItem::new(format!("Violations ({})", involved.len())).style(
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                ),
            );
            for violation in involved {
                all_items.push(ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("[{}] ", violation.invariant()),
                        Style::default().fg(DEFAULT_THEME.comment),
                    ),
                    Span::styled(
                        violation.to_string(),
                        Style::default().fg(DEFAULT_THEME.error),
                    ),
                ])));
            }
        }
    } else {
        all_items.push(
            ListItem::new("(no cache selected)").style(Style::default().fg(DEFAULT_THEME.comment)),
        );
    }

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if total_items > visible_height {
        *scroll_offset = (*scroll_offset).min(total_items - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
