//! Layout rendering (top bar, sidebar)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, LibraryShortcut, UiState};

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(25), // Account
        ])
        .split(area);

    let search_style = if ui_state.active_section == ActiveSection::Search {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let search_text = if ui_state.search_query.is_empty() {
        "Type to search..."
    } else {
        &ui_state.search_query
    };

    let search = Paragraph::new(search_text).style(search_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .padding(Padding::horizontal(1))
            .border_style(if ui_state.active_section == ActiveSection::Search {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            }),
    );
    frame.render_widget(search, chunks[0]);

    // Account box: username while logged in, sign-in hint otherwise
    let (account_text, account_style) = match &ui_state.account_label {
        Some(name) => (format!("👤 {}", name), Style::default().fg(Color::Cyan)),
        None => (
            "Sign in (i) / up (s)".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };
    let account = Paragraph::new(account_text)
        .style(account_style)
        .block(Block::default().borders(Borders::ALL).title(" Account "));
    frame.render_widget(account, chunks[1]);
}

pub fn render_sidebar(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    playlist_names: &[String],
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Library (5 items + 2 borderlines)
            Constraint::Min(0),    // Playlists (fills remaining space)
        ])
        .split(area);

    // Library section
    let library_items: Vec<ListItem> = LibraryShortcut::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == ui_state.library_selected
                && ui_state.active_section == ActiveSection::Library
            {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else if i == ui_state.library_selected {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(item.label()).style(style)
        })
        .collect();

    let library_border_style = if ui_state.active_section == ActiveSection::Library {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let library = List::new(library_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Library ")
            .padding(Padding::horizontal(1))
            .border_style(library_border_style),
    );
    frame.render_widget(library, chunks[0]);

    let playlist_items: Vec<ListItem> = playlist_names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let style = if i == ui_state.playlist_selected
                && ui_state.active_section == ActiveSection::Playlists
            {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else if i == ui_state.playlist_selected {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(name.clone()).style(style)
        })
        .collect();

    let playlists_border_style = if ui_state.active_section == ActiveSection::Playlists {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let playlists = List::new(playlist_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Playlists (c: new) ")
                .padding(Padding::horizontal(1))
                .border_style(playlists_border_style),
        )
        .highlight_style(Style::default()); // Highlight handled by item styles

    let mut list_state = ListState::default();
    list_state.select(Some(ui_state.playlist_selected));

    frame.render_stateful_widget(playlists, chunks[1], &mut list_state);
}
