//! Main content area rendering (song lists and text views)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, ContentData, SongRow, UiState};

use super::utils::{calculate_num_width, format_duration, truncate_string};

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content: &ContentData,
    playing_title: Option<&str>,
) {
    let is_focused = ui_state.active_section == ActiveSection::SongList;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    match content {
        ContentData::Songs {
            title,
            rows,
            selected,
            empty_message,
        } => {
            if rows.is_empty() {
                let empty = Paragraph::new(*empty_message)
                    .style(Style::default().fg(Color::DarkGray))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(title.clone())
                            .padding(Padding::horizontal(1))
                            .border_style(border_style),
                    );
                frame.render_widget(empty, area);
                return;
            }

            let content_width = area.width.saturating_sub(4) as usize;
            let items = song_list_items(rows, *selected, is_focused, playing_title, content_width);

            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(title.clone())
                        .padding(Padding::horizontal(1))
                        .border_style(border_style),
                )
                .highlight_style(Style::default());

            let mut list_state = ListState::default();
            list_state.select(Some(*selected));

            frame.render_stateful_widget(list, area, &mut list_state);
        }
        ContentData::Text { title, body } => {
            let text = Paragraph::new(body.clone())
                .style(Style::default().fg(Color::White))
                .wrap(ratatui::widgets::Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(title.clone())
                        .padding(Padding::horizontal(1))
                        .border_style(border_style),
                );
            frame.render_widget(text, area);
        }
    }
}

fn song_list_items(
    rows: &[SongRow],
    selected: usize,
    is_focused: bool,
    playing_title: Option<&str>,
    content_width: usize,
) -> Vec<ListItem<'static>> {
    // Format: " {num}  {liked}  {title}  {duration}"
    let num_width = calculate_num_width(rows.len());
    let duration_width = 8;
    let fixed_width = 1 + num_width + 2 + 2 + 2 + 2 + duration_width;
    let title_width = content_width.saturating_sub(fixed_width).max(8);

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let is_playing = playing_title == Some(row.title.as_str());
            let liked_marker = if row.liked { "♥" } else { " " };
            let playing_marker = if is_playing { "▶" } else { " " };

            let text = format!(
                " {:>num_width$}  {}{}  {}  {:>duration_width$}",
                i + 1,
                playing_marker,
                liked_marker,
                truncate_string(&row.title, title_width),
                format_duration(row.duration_ms),
            );

            let style = if i == selected && is_focused {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else if i == selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else if is_playing {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(text).style(style)
        })
        .collect()
}
