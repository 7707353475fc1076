//! Overlay rendering (error notification, modal forms, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::model::{LoginField, Modal, PasswordStrength, SignupField, UiState};

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));
    Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    }
}

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    if let Some(ref error_msg) = ui_state.error_message {
        let area = frame.area();

        // Fixed width popup (responsive to screen size)
        let popup_width = 52.min(area.width.saturating_sub(4));
        let inner_width = popup_width.saturating_sub(4) as usize; // account for borders

        // Calculate how many lines the message will take when wrapped
        let error_line_count =
            ((error_msg.chars().count() as f32) / (inner_width as f32)).ceil() as u16;

        let popup_height = (2 + error_line_count.max(1)).min(area.height - 4);
        let popup_area = centered_popup(area, popup_width, popup_height);

        // Clear the area behind the popup first
        frame.render_widget(Clear, popup_area);

        let error_widget = Paragraph::new(error_msg.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(ratatui::widgets::Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Notice (Esc to dismiss) ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                    .style(Style::default().bg(Color::Black)),
            );

        frame.render_widget(error_widget, popup_area);
    }
}

/// One labeled input line; the focused field renders green with a cursor.
fn field_line(label: &str, value: &str, focused: bool, mask: bool) -> Line<'static> {
    let shown = if mask {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let value_span = if focused {
        Span::styled(
            format!("{}█", shown),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(shown, Style::default().fg(Color::White))
    };
    Line::from(vec![
        Span::styled(format!("{:>10}: ", label), Style::default().fg(Color::Cyan)),
        value_span,
    ])
}

fn checkbox_line(label: &str, checked: bool, focused: bool) -> Line<'static> {
    let marker = if checked { "[x]" } else { "[ ]" };
    let style = if focused {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        Span::styled(format!("{:>10}: ", label), Style::default().fg(Color::Cyan)),
        Span::styled(format!("{} (space toggles)", marker), style),
    ])
}

fn error_line(error: &Option<String>) -> Line<'static> {
    match error {
        Some(msg) => Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(""),
    }
}

fn strength_line(strength: Option<PasswordStrength>) -> Line<'static> {
    match strength {
        Some(s) => {
            let color = match s {
                PasswordStrength::Weak => Color::Red,
                PasswordStrength::Medium => Color::Yellow,
                PasswordStrength::Strong => Color::Green,
            };
            Line::from(vec![
                Span::styled("  strength: ", Style::default().fg(Color::DarkGray)),
                Span::styled(s.label().to_string(), Style::default().fg(color)),
            ])
        }
        None => Line::from(""),
    }
}

pub fn render_modal(frame: &mut Frame, modal: &Modal, playlist_names: &[String]) {
    let area = frame.area();

    let (title, lines): (&str, Vec<Line>) = match modal {
        Modal::CreatePlaylist { name, error } => (
            " New Playlist (Enter to create, Esc to cancel) ",
            vec![
                field_line("Name", name, true, false),
                Line::from(""),
                error_line(error),
            ],
        ),
        Modal::AddSong {
            query,
            playlist_choice,
            error,
        } => {
            let mut lines = vec![
                field_line("Song", query, true, false),
                Line::from(""),
                Line::from(Span::styled(
                    "  Playlist (↑/↓):",
                    Style::default().fg(Color::Cyan),
                )),
            ];
            for (i, name) in playlist_names.iter().enumerate() {
                let style = if i == *playlist_choice {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                lines.push(Line::from(Span::styled(format!("    {}", name), style)));
            }
            lines.push(Line::from(""));
            lines.push(error_line(error));
            (" Add Song (Enter to add, Esc to cancel) ", lines)
        }
        Modal::Login {
            user,
            password,
            remember_me,
            field,
            error,
        } => (
            " Sign In (Tab: next field, Enter: submit) ",
            vec![
                field_line("User", user, *field == LoginField::User, false),
                field_line("Password", password, *field == LoginField::Password, true),
                checkbox_line("Remember", *remember_me, *field == LoginField::RememberMe),
                Line::from(""),
                error_line(error),
            ],
        ),
        Modal::Signup {
            email,
            username,
            password,
            confirm,
            field,
            error,
        } => (
            " Sign Up (Tab: next field, Enter: submit) ",
            vec![
                field_line("Email", email, *field == SignupField::Email, false),
                field_line("Username", username, *field == SignupField::Username, false),
                field_line("Password", password, *field == SignupField::Password, true),
                strength_line(modal.password_strength()),
                field_line("Confirm", confirm, *field == SignupField::Confirm, true),
                Line::from(""),
                error_line(error),
            ],
        ),
        Modal::ForgotPassword { email, error } => (
            " Reset Password (Enter to submit, Esc to cancel) ",
            vec![
                field_line("Email", email, true, false),
                Line::from(""),
                error_line(error),
            ],
        ),
    };

    let popup_height = (lines.len() as u16 + 2).max(5);
    let popup_area = centered_popup(area, 56, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title)
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(form, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    // Define keybindings organized by category
    let keybindings = vec![
        ("", "── Navigation ──"),
        ("Tab / Shift+Tab", "Cycle sections"),
        ("↑ / ↓", "Move selection"),
        ("Enter", "Select / Play"),
        ("Backspace / Esc", "Back to sidebar"),
        ("G", "Focus search"),
        ("L", "Focus playlists"),
        ("", ""),
        ("", "── Playback ──"),
        ("Space", "Play / Pause"),
        ("N", "Next song"),
        ("P", "Previous song"),
        ("← / →", "Seek 5s"),
        ("+ / -", "Volume up / down"),
        ("", ""),
        ("", "── Library ──"),
        ("X", "Like / Unlike song"),
        ("C", "New playlist"),
        ("A", "Add song to playlist"),
        ("Delete", "Remove song / playlist"),
        ("", ""),
        ("", "── Account ──"),
        ("I", "Sign in"),
        ("S", "Sign up"),
        ("O", "Sign out"),
        ("F", "Forgot password"),
        ("", ""),
        ("", "── General ──"),
        ("H", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let popup_width = 62;
    let popup_height = (keybindings.len() as u16 + 2).min(area.height - 4);
    let popup_area = centered_popup(area, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    // Create help text lines
    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
