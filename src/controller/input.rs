//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{ActiveSection, AuthError, Modal};

use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = &self.model;

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    model.clear_error().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') => {
                    model.hide_help_popup().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Modal forms capture all input while open
        if model.is_modal_open().await {
            return self.handle_modal_key(key).await;
        }

        let ui_state = model.get_ui_state().await;

        // Handle search input when in search section
        if ui_state.active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        model.cycle_section_backward().await;
                    } else {
                        model.cycle_section_forward().await;
                    }
                    return Ok(());
                }
                KeyCode::Enter => {
                    let query = ui_state.search_query.clone();
                    self.perform_search(&query).await;
                    return Ok(());
                }
                KeyCode::Esc => {
                    model.clear_search().await;
                    return Ok(());
                }
                KeyCode::Backspace => {
                    model.backspace_search().await;
                    return Ok(());
                }
                KeyCode::Char(c) => {
                    // Q still quits even in search mode when Ctrl is pressed
                    if (c == 'q' || c == 'Q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        model.set_should_quit(true).await;
                        return Ok(());
                    }
                    model.append_to_search(c).await;
                    return Ok(());
                }
                _ => {}
            }
        }

        // Handle song list section navigation
        if ui_state.active_section == ActiveSection::SongList {
            match key.code {
                KeyCode::Up => {
                    model.content_move_up().await;
                    return Ok(());
                }
                KeyCode::Down => {
                    model.content_move_down().await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    self.play_selected().await;
                    return Ok(());
                }
                KeyCode::Backspace | KeyCode::Esc => {
                    model.set_active_section(ActiveSection::Library).await;
                    return Ok(());
                }
                KeyCode::Char('x') | KeyCode::Char('X') => {
                    self.toggle_liked_selected().await;
                    return Ok(());
                }
                KeyCode::Char('a') | KeyCode::Char('A') => {
                    self.open_add_song_modal().await;
                    return Ok(());
                }
                KeyCode::Delete => {
                    self.remove_selected_from_playlist().await;
                    return Ok(());
                }
                _ => {}
            }
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    model.cycle_section_backward().await;
                } else {
                    model.cycle_section_forward().await;
                }
            }
            KeyCode::BackTab => {
                model.cycle_section_backward().await;
            }
            KeyCode::Up => {
                model.move_selection_up().await;
            }
            KeyCode::Down => {
                model.move_selection_down().await;
            }
            KeyCode::Enter => {
                match ui_state.active_section {
                    ActiveSection::Library => {
                        self.open_library_item(ui_state.library_selected).await;
                    }
                    ActiveSection::Playlists => {
                        self.open_selected_playlist().await;
                    }
                    _ => {}
                }
            }
            KeyCode::Delete => {
                if ui_state.active_section == ActiveSection::Playlists {
                    self.delete_selected_playlist().await;
                }
            }
            // Play/Pause toggle
            KeyCode::Char(' ') => {
                self.model.toggle_playback().await;
            }
            // Next song
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.model.next_song().await;
            }
            // Previous song
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.model.previous_song().await;
            }
            // Seek
            KeyCode::Left => {
                self.model.seek_by(-5_000).await;
            }
            KeyCode::Right => {
                self.model.seek_by(5_000).await;
            }
            // Volume
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.volume_up().await;
            }
            KeyCode::Char('-') => {
                self.volume_down().await;
            }
            // Focus search
            KeyCode::Char('g') | KeyCode::Char('G') => {
                model.set_active_section(ActiveSection::Search).await;
            }
            // Focus playlists
            KeyCode::Char('l') | KeyCode::Char('L') => {
                model.set_active_section(ActiveSection::Playlists).await;
            }
            // New playlist
            KeyCode::Char('c') | KeyCode::Char('C') => {
                match model.require_login().await {
                    Ok(()) => model.open_modal(Modal::create_playlist()).await,
                    Err(e) => model.set_error(e.to_string()).await,
                }
            }
            // Account: sign in / sign up / sign out / forgot password
            KeyCode::Char('i') | KeyCode::Char('I') => {
                if !model.is_logged_in().await {
                    self.open_login_modal().await;
                }
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                if !model.is_logged_in().await {
                    model.open_modal(Modal::signup()).await;
                }
            }
            KeyCode::Char('o') | KeyCode::Char('O') => {
                if model.is_logged_in().await {
                    model.logout().await;
                }
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                if !model.is_logged_in().await {
                    model.open_modal(Modal::forgot_password()).await;
                }
            }
            // Show help popup
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }

    /// Like/unlike requires a session; surface the gate as a popup so the
    /// user learns how to proceed.
    pub(crate) async fn toggle_liked_selected(&self) {
        let Some(index) = self.model.selected_song_index().await else {
            return;
        };
        if let Err(e) = self.model.toggle_liked(index).await {
            self.model.set_error(e.to_string()).await;
        }
    }

    pub(crate) async fn open_add_song_modal(&self) {
        if let Err(e @ AuthError::LoginRequired) = self.model.require_login().await {
            self.model.set_error(e.to_string()).await;
            return;
        }
        if self.model.playlists_snapshot().await.is_empty() {
            self.model
                .set_error("Create a playlist first (press 'c')".to_string())
                .await;
            return;
        }
        let query = self.model.selected_song_title().await.unwrap_or_default();
        self.model.open_modal(Modal::add_song(query, 0)).await;
    }

    pub(crate) async fn open_login_modal(&self) {
        let mut modal = Modal::login();
        if let Some(remembered) = self.model.remembered_user().await
            && let Modal::Login {
                user, remember_me, ..
            } = &mut modal
        {
            *user = remembered;
            *remember_me = true;
        }
        self.model.open_modal(modal).await;
    }
}
