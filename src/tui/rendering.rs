use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage};
use super::layout::AppLayout;
use crate::filters::CategoryToggles;
use crate::models::{Category, ELLIPSIS, SearchMatch, Snippet};
use crate::theme::{Rgb, Theme};
use crate::utils::sanitize_for_terminal;
use crate::utils::terminal::single_line;

/// Everything a frame needs, borrowed from the app
pub struct RenderState<'a> {
    pub input: &'a str,
    pub matches: &'a [&'a SearchMatch],
    pub selected_idx: usize,
    pub toggles: &'a CategoryToggles,
    pub theme: &'a Theme,
    /// Persistent status (prompt, "No results found", result count)
    pub status: String,
    pub filter_error: Option<&'a str>,
    pub status_message: Option<&'a StatusMessage>,
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn border_style(theme: &Theme) -> Style {
    Style::default().fg(color(theme.muted))
}

pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_input(frame, layout.input_area, state);
    render_toggles(frame, layout.toggles_area, state.toggles, state.theme);
    render_results_list(frame, layout.results_area, state);
    render_preview(
        frame,
        layout.preview_area,
        state.matches.get(state.selected_idx).copied(),
        state.theme,
    );
    render_status_bar(frame, layout.status_area, state);
}

fn render_input(frame: &mut Frame, area: Rect, state: &RenderState) {
    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(color(state.theme.accent))),
        Span::styled(single_line(state.input), Style::default().fg(color(state.theme.text))),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(state.theme))
            .title(" Search characters "),
    );
    frame.render_widget(input, area);
}

fn render_toggles(frame: &mut Frame, area: Rect, toggles: &CategoryToggles, theme: &Theme) {
    let mut spans = Vec::new();
    for (idx, category) in Category::ALL.into_iter().enumerate() {
        let on = toggles.allows(category);
        let mark = if on { "[x]" } else { "[ ]" };
        let style = if on {
            Style::default().fg(color(theme.text))
        } else {
            Style::default().fg(color(theme.muted))
        };
        spans.push(Span::styled(format!(" F{} {} {} ", idx + 1, mark, category.label()), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Snippet as spans: matched text bold in the accent colour, the rest in `base`
fn snippet_spans(snippet: &Snippet, base: Style, accent: Color) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if snippet.leading_ellipsis {
        spans.push(Span::styled(ELLIPSIS, base));
    }
    spans.push(Span::styled(single_line(&snippet.before), base));
    if !snippet.matched.is_empty() {
        spans.push(Span::styled(
            single_line(&snippet.matched),
            base.fg(accent).add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled(single_line(&snippet.after), base));
    if snippet.trailing_ellipsis {
        spans.push(Span::styled(ELLIPSIS, base));
    }
    spans
}

fn render_results_list(frame: &mut Frame, area: Rect, state: &RenderState) {
    let theme = state.theme;
    let items: Vec<ListItem> = state
        .matches
        .iter()
        .enumerate()
        .map(|(idx, m)| {
            let base = if idx == state.selected_idx {
                Style::default().fg(color(theme.text)).bg(color(theme.selection))
            } else {
                Style::default().fg(color(theme.text))
            };

            let mut spans = vec![
                Span::styled(format!("{:<13} ", m.category.label()), base.fg(color(theme.muted))),
                Span::styled(single_line(&m.character_name), base.add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!(" · {}: ", single_line(&m.field)),
                    base.fg(color(theme.muted)),
                ),
            ];
            spans.extend(snippet_spans(&m.snippet, base, color(theme.accent)));

            ListItem::new(Line::from(spans)).style(base)
        })
        .collect();

    let title = format!(" Results ({}) ", state.matches.len());
    let list = List::new(items).block(
        Block::default().borders(Borders::ALL).border_style(border_style(theme)).title(title),
    );

    let mut list_state = ListState::default();
    if !state.matches.is_empty() {
        list_state.select(Some(state.selected_idx.min(state.matches.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_preview(frame: &mut Frame, area: Rect, selected: Option<&SearchMatch>, theme: &Theme) {
    let muted = Style::default().fg(color(theme.muted));

    let content = match selected {
        Some(m) => {
            let target = m.navigation_target();
            let mut lines = vec![
                Line::from(vec![
                    Span::styled("Character: ", muted),
                    Span::raw(single_line(&m.character_name)),
                ]),
                Line::from(vec![
                    Span::styled("Section: ", muted),
                    Span::raw(format!("{} (tab {})", m.category, target.tab_index)),
                ]),
                Line::from(vec![Span::styled("Field: ", muted), Span::raw(single_line(&m.field))]),
                Line::from(""),
                Line::from(snippet_spans(&m.snippet, Style::default(), color(theme.accent))),
                Line::from(""),
            ];

            for line in sanitize_for_terminal(&m.value).lines() {
                lines.push(Line::from(line.to_string()));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Tab: open  Ctrl+Y: copy value", muted)));

            Text::from(lines)
        }
        None => Text::from("No match selected"),
    };

    let block =
        Block::default().borders(Borders::ALL).border_style(border_style(theme)).title(" Preview ");
    let paragraph = Paragraph::new(content).block(block).wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let theme = state.theme;
    let normal = Style::default().fg(color(theme.text)).bg(color(theme.background));
    let error = Style::default().fg(color(theme.error)).bg(color(theme.background));

    let (text, style) = if let Some(msg) = state.status_message {
        let style = match msg.message_type {
            MessageType::Success => normal.fg(color(theme.accent)),
            MessageType::Error => error,
        };
        (format!(" {} ", msg.text), style)
    } else if let Some(filter_error) = state.filter_error {
        (format!(" [ERROR] {} ", filter_error), error)
    } else {
        (
            format!(
                " {} | F1-F4: categories | Tab: open | Ctrl+T: theme | Esc: clear | Ctrl+C: quit ",
                state.status
            ),
            normal,
        )
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}
