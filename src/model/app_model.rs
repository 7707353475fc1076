//! Main application model with state management
//!
//! All state lives behind async mutexes and is mutated through accessor
//! methods; every successful mutation of a persisted collection writes a
//! fresh snapshot to the store.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::storage::{Store, keys};

use super::catalog::Catalog;
use super::content::{ContentData, ContentState, ContentView, SongRow};
use super::library::{LibraryError, LibraryState, Playlist, RecentEntry};
use super::playback::{
    DEFAULT_VOLUME_PERCENT, PlaybackInfo, PlaybackState, PlaybackTiming,
};
use super::session::{self, AuthError, Session};
use super::types::{ActiveSection, LibraryShortcut, Modal, UiState};

/// Main application model containing all state
pub struct AppModel {
    pub catalog: Catalog,
    store: Store,
    library: Arc<Mutex<LibraryState>>,
    session: Arc<Mutex<Session>>,
    playback: Arc<Mutex<PlaybackState>>,
    timing: Arc<Mutex<PlaybackTiming>>,
    volume: Arc<Mutex<u8>>,
    pub ui_state: Arc<Mutex<UiState>>,
    pub content_state: Arc<Mutex<ContentState>>,
    should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    /// Build the model from the persisted snapshot. The failed-login counter
    /// resets on every fresh start.
    pub async fn load(store: Store) -> Result<Self> {
        let catalog = Catalog::builtin();

        let mut library = LibraryState::new();
        if let Some(liked) = store.get::<Vec<usize>>(keys::LIKED).await {
            library.liked = liked.into_iter().collect();
        }
        if let Some(recent) = store.get::<Vec<RecentEntry>>(keys::RECENTLY_PLAYED).await {
            library.recently_played = recent;
        }
        if let Some(playlists) = store.get::<Vec<Playlist>>(keys::PLAYLISTS).await {
            library.playlists = playlists;
        }

        let volume = store
            .get::<u8>(keys::VOLUME)
            .await
            .unwrap_or(DEFAULT_VOLUME_PERCENT)
            .min(100);

        let mut session = Session::new();
        if store.get::<bool>(keys::LOGGED_IN).await.unwrap_or(false) {
            session.logged_in = true;
            session.username = store.get(keys::USERNAME).await;
            session.email = store.get(keys::USER_EMAIL).await;
        }

        store.set(keys::LOGIN_ATTEMPTS, &0u32).await?;

        let ui_state = UiState {
            account_label: session.username.clone().filter(|_| session.logged_in),
            ..UiState::default()
        };

        tracing::info!(
            liked = library.liked.len(),
            playlists = library.playlists.len(),
            logged_in = session.logged_in,
            "Model loaded from store"
        );

        Ok(Self {
            catalog,
            store,
            library: Arc::new(Mutex::new(library)),
            session: Arc::new(Mutex::new(session)),
            playback: Arc::new(Mutex::new(PlaybackState::default())),
            timing: Arc::new(Mutex::new(PlaybackTiming::default())),
            volume: Arc::new(Mutex::new(volume)),
            ui_state: Arc::new(Mutex::new(ui_state)),
            content_state: Arc::new(Mutex::new(ContentState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        })
    }

    // ========================================================================
    // Persistence helpers
    // ========================================================================

    async fn persist<T: serde::Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.store.set(key, value).await {
            tracing::error!(key, error = %e, "Failed to persist state");
        }
    }

    async fn remove_key(&self, key: &str) {
        if let Err(e) = self.store.remove(key).await {
            tracing::error!(key, error = %e, "Failed to remove persisted state");
        }
    }

    async fn persist_liked(&self, library: &LibraryState) {
        self.persist(keys::LIKED, &library.liked_sorted()).await;
    }

    async fn persist_recent(&self, library: &LibraryState) {
        self.persist(keys::RECENTLY_PLAYED, &library.recently_played)
            .await;
    }

    async fn persist_playlists(&self, library: &LibraryState) {
        self.persist(keys::PLAYLISTS, &library.playlists).await;
    }

    // ========================================================================
    // Playback
    // ========================================================================

    /// Select and start a catalog entry, recording it into recently played.
    pub async fn play_song(&self, index: usize) -> Option<String> {
        let song = self.catalog.get(index)?.clone();

        {
            let mut playback = self.playback.lock().await;
            playback.current = Some(index);
            playback.is_playing = true;
        }
        {
            let mut timing = self.timing.lock().await;
            timing.start(song.duration_ms);
        }
        {
            let mut library = self.library.lock().await;
            library.record_played(song.title, Utc::now());
            self.persist_recent(&library).await;
        }

        tracing::info!(index, title = song.title, "Playing song");
        Some(song.title.to_string())
    }

    /// Flip play/pause; defaults to the first catalog entry when nothing has
    /// been selected yet.
    pub async fn toggle_playback(&self) {
        let current = {
            let playback = self.playback.lock().await;
            playback.current
        };

        match current {
            None => {
                self.play_song(0).await;
            }
            Some(_) => {
                let now_playing = {
                    let mut playback = self.playback.lock().await;
                    playback.is_playing = !playback.is_playing;
                    playback.is_playing
                };
                self.timing.lock().await.set_playing(now_playing);
                tracing::debug!(now_playing, "Playback toggled");
            }
        }
    }

    pub async fn next_song(&self) {
        let base = self.playback.lock().await.current.unwrap_or(0);
        let next = (base + 1) % self.catalog.len();
        self.play_song(next).await;
    }

    pub async fn previous_song(&self) {
        let len = self.catalog.len();
        let base = self.playback.lock().await.current.unwrap_or(0);
        let prev = (base + len - 1) % len;
        self.play_song(prev).await;
    }

    /// True when the simulated transport reached the end of the song.
    pub async fn playback_ended(&self) -> bool {
        self.timing.lock().await.has_ended()
    }

    pub async fn seek_by(&self, delta_ms: i64) {
        let mut timing = self.timing.lock().await;
        let position = i64::from(timing.current_position_ms()) + delta_ms;
        timing.seek_to(position.max(0) as u32);
    }

    pub async fn get_volume(&self) -> u8 {
        *self.volume.lock().await
    }

    pub async fn set_volume(&self, volume: u8) {
        let volume = volume.min(100);
        *self.volume.lock().await = volume;
        self.persist(keys::VOLUME, &volume).await;
    }

    pub async fn get_playback_info(&self) -> PlaybackInfo {
        let playback = *self.playback.lock().await;
        let timing = self.timing.lock().await;
        let volume = *self.volume.lock().await;

        PlaybackInfo {
            title: playback
                .current
                .and_then(|i| self.catalog.get(i))
                .map(|s| s.title.to_string()),
            progress_ms: timing.current_position_ms(),
            duration_ms: timing.duration_ms,
            is_playing: playback.is_playing,
            volume,
        }
    }

    // ========================================================================
    // Session
    // ========================================================================

    pub async fn is_logged_in(&self) -> bool {
        self.session.lock().await.logged_in
    }

    pub async fn require_login(&self) -> Result<(), AuthError> {
        if self.is_logged_in().await {
            Ok(())
        } else {
            Err(AuthError::LoginRequired)
        }
    }

    pub async fn failed_attempts(&self) -> u32 {
        self.session.lock().await.failed_attempts
    }

    pub async fn signup(
        &self,
        email: &str,
        username: &str,
        password: &str,
        confirm: &str,
    ) -> Result<(), AuthError> {
        session::validate_signup(email, username, password, confirm)?;

        if let Some(existing) = self.store.get::<String>(keys::USER_EMAIL).await
            && existing == email
        {
            return Err(AuthError::AccountExists);
        }

        self.persist(keys::USER_EMAIL, &email).await;
        self.persist(keys::USERNAME, &username).await;
        self.persist(keys::PASSWORD_HASH, &session::hash_password(password))
            .await;
        self.persist(keys::ACCOUNT_CREATED, &Utc::now().to_rfc3339())
            .await;

        tracing::info!(username, "Account created");
        Ok(())
    }

    pub async fn login(
        &self,
        user_input: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<(), AuthError> {
        if user_input.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let stored_email = self.store.get::<String>(keys::USER_EMAIL).await;
        let stored_username = self.store.get::<String>(keys::USERNAME).await;
        let stored_pass = self.store.get::<String>(keys::PASSWORD_HASH).await;

        let (Some(email), Some(username), Some(pass)) =
            (stored_email, stored_username, stored_pass)
        else {
            return Err(AuthError::NoAccount);
        };

        let identity_match = user_input == email || user_input == username;
        let password_match = session::hash_password(password) == pass;

        if identity_match && password_match {
            {
                let mut session = self.session.lock().await;
                session.logged_in = true;
                session.username = Some(username.clone());
                session.email = Some(email);
                session.failed_attempts = 0;
            }
            self.persist(keys::LOGGED_IN, &true).await;
            self.persist(keys::LAST_LOGIN, &Utc::now().to_rfc3339()).await;
            if remember_me {
                self.persist(keys::REMEMBER_ME, &true).await;
            }
            self.persist(keys::LOGIN_ATTEMPTS, &0u32).await;

            self.ui_state.lock().await.account_label = Some(username.clone());
            tracing::info!(username, "Login successful");
            Ok(())
        } else {
            let attempts = {
                let mut session = self.session.lock().await;
                session.failed_attempts += 1;
                session.failed_attempts
            };
            self.persist(keys::LOGIN_ATTEMPTS, &attempts).await;
            tracing::warn!(attempts, "Login failed");
            Err(AuthError::InvalidCredentials)
        }
    }

    pub async fn logout(&self) {
        {
            let mut session = self.session.lock().await;
            session.logged_in = false;
            session.failed_attempts = 0;
        }
        self.remove_key(keys::LOGGED_IN).await;
        self.remove_key(keys::LAST_LOGIN).await;
        self.remove_key(keys::REMEMBER_ME).await;
        self.persist(keys::LOGIN_ATTEMPTS, &0u32).await;

        self.ui_state.lock().await.account_label = None;
        tracing::info!("Logged out");

        // Auth-gated views are no longer accessible
        self.show_home().await;
    }

    /// Report where a reset link would go. No state changes.
    pub async fn forgot_password(&self, email: &str) -> Result<String, AuthError> {
        match self.store.get::<String>(keys::USER_EMAIL).await {
            Some(stored) if stored == email => {
                Ok(format!("Password reset link would be sent to: {email}"))
            }
            _ => Err(AuthError::NoAccount),
        }
    }

    /// Prefill for the login form when "remember me" was checked.
    pub async fn remembered_user(&self) -> Option<String> {
        if self.store.get::<bool>(keys::REMEMBER_ME).await.unwrap_or(false) {
            self.store.get::<String>(keys::USER_EMAIL).await
        } else {
            None
        }
    }

    // ========================================================================
    // Library collections
    // ========================================================================

    /// Toggle liked-set membership; requires an authenticated session.
    /// Returns the new membership state.
    pub async fn toggle_liked(&self, index: usize) -> Result<bool, AuthError> {
        self.require_login().await?;

        let mut library = self.library.lock().await;
        let liked = library.toggle_liked(index);
        self.persist_liked(&library).await;

        let status = if liked { "added to" } else { "removed from" };
        tracing::info!(index, status, "Liked songs updated");
        Ok(liked)
    }

    pub async fn create_playlist(&self, name: &str) -> Result<i64, LibraryError> {
        let mut library = self.library.lock().await;
        let id = library.create_playlist(name, Utc::now())?;
        self.persist_playlists(&library).await;
        tracing::info!(id, name, "Playlist created");
        Ok(id)
    }

    pub async fn add_song_to_playlist(
        &self,
        playlist_id: i64,
        title_query: &str,
    ) -> Result<String, LibraryError> {
        let mut library = self.library.lock().await;
        let title = library.add_song_to_playlist(&self.catalog, playlist_id, title_query)?;
        self.persist_playlists(&library).await;
        tracing::info!(playlist_id, title, "Song added to playlist");
        Ok(title)
    }

    pub async fn remove_song_from_playlist(
        &self,
        playlist_id: i64,
        title: &str,
    ) -> Result<(), LibraryError> {
        let mut library = self.library.lock().await;
        library.remove_song_from_playlist(playlist_id, title)?;
        self.persist_playlists(&library).await;
        tracing::info!(playlist_id, title, "Song removed from playlist");
        Ok(())
    }

    /// Delete a playlist. When the deleted playlist was being viewed, the
    /// view resets to the full catalog.
    pub async fn delete_playlist(&self, id: i64) -> bool {
        let existed = {
            let mut library = self.library.lock().await;
            let existed = library.delete_playlist(id);
            if existed {
                self.persist_playlists(&library).await;
            }
            existed
        };

        if existed {
            tracing::info!(id, "Playlist deleted");
            let viewing_deleted = {
                let content = self.content_state.lock().await;
                content.view == ContentView::Playlist { id }
            };
            if viewing_deleted {
                self.show_home().await;
            }

            // Keep the sidebar selection in bounds
            let playlist_count = self.library.lock().await.playlists.len();
            let mut ui_state = self.ui_state.lock().await;
            if ui_state.playlist_selected >= playlist_count {
                ui_state.playlist_selected = playlist_count.saturating_sub(1);
            }
        }
        existed
    }

    pub async fn playlists_snapshot(&self) -> Vec<Playlist> {
        self.library.lock().await.playlists.clone()
    }

    pub async fn selected_playlist_id(&self) -> Option<i64> {
        let selected = self.ui_state.lock().await.playlist_selected;
        let library = self.library.lock().await;
        library.playlists.get(selected).map(|p| p.id)
    }

    // ========================================================================
    // Content views
    // ========================================================================

    async fn set_view(&self, view: ContentView) {
        let mut content = self.content_state.lock().await;
        content.view = view;
        content.selected = 0;
    }

    pub async fn show_home(&self) {
        self.set_view(ContentView::AllSongs).await;
    }

    pub async fn show_liked(&self) -> Result<(), AuthError> {
        self.require_login().await?;
        self.set_view(ContentView::LikedSongs).await;
        Ok(())
    }

    pub async fn show_recently_played(&self) {
        self.set_view(ContentView::RecentlyPlayed).await;
    }

    pub async fn show_library_summary(&self) {
        self.set_view(ContentView::LibrarySummary).await;
    }

    pub async fn show_about(&self) {
        self.set_view(ContentView::About).await;
    }

    pub async fn open_playlist(&self, id: i64) -> bool {
        let exists = self.library.lock().await.playlist(id).is_some();
        if exists {
            self.set_view(ContentView::Playlist { id }).await;
        }
        exists
    }

    /// Case-insensitive substring filter over catalog titles. An empty query
    /// yields no results.
    pub async fn perform_search(&self, query: &str) {
        let indices = self.catalog.search(query);
        tracing::debug!(query, hits = indices.len(), "Search performed");
        self.set_view(ContentView::SearchResults {
            query: query.to_string(),
            indices,
        })
        .await;
    }

    fn song_rows(&self, library: &LibraryState, indices: &[usize]) -> Vec<SongRow> {
        indices
            .iter()
            .filter_map(|&index| {
                self.catalog.get(index).map(|song| SongRow {
                    index,
                    title: song.title.to_string(),
                    duration_ms: song.duration_ms,
                    liked: library.is_liked(index),
                })
            })
            .collect()
    }

    /// Resolve the current view to renderable content.
    pub async fn get_content_data(&self) -> ContentData {
        let library = self.library.lock().await;
        let content = self.content_state.lock().await;

        match &content.view {
            ContentView::AllSongs => {
                let all: Vec<usize> = (0..self.catalog.len()).collect();
                ContentData::Songs {
                    title: " All Songs ".to_string(),
                    rows: self.song_rows(&library, &all),
                    selected: content.selected,
                    empty_message: "The catalog is empty",
                }
            }
            ContentView::SearchResults { query, indices } => ContentData::Songs {
                title: format!(" Search: {} ", query),
                rows: self.song_rows(&library, indices),
                selected: content.selected,
                empty_message: if query.trim().is_empty() {
                    "Type in search and press Enter to find songs"
                } else {
                    "No songs found"
                },
            },
            ContentView::LikedSongs => ContentData::Songs {
                title: " Liked Songs ".to_string(),
                rows: self.song_rows(&library, &library.liked_sorted()),
                selected: content.selected,
                empty_message: "No liked songs yet",
            },
            ContentView::RecentlyPlayed => {
                let indices: Vec<usize> = library
                    .recently_played
                    .iter()
                    .filter_map(|e| self.catalog.index_of_title(&e.title))
                    .collect();
                ContentData::Songs {
                    title: " Recently Played ".to_string(),
                    rows: self.song_rows(&library, &indices),
                    selected: content.selected,
                    empty_message: "No recently played songs yet",
                }
            }
            ContentView::Playlist { id } => match library.playlist(*id) {
                Some(playlist) => {
                    let indices: Vec<usize> = playlist
                        .songs
                        .iter()
                        .filter_map(|title| self.catalog.index_of_title(title))
                        .collect();
                    ContentData::Songs {
                        title: format!(" Playlist: {} ", playlist.name),
                        rows: self.song_rows(&library, &indices),
                        selected: content.selected,
                        empty_message: "No songs in this playlist yet",
                    }
                }
                None => ContentData::Text {
                    title: " Playlist ".to_string(),
                    body: "Playlist not found".to_string(),
                },
            },
            ContentView::LibrarySummary => ContentData::Text {
                title: " Your Library ".to_string(),
                body: format!(
                    "{} liked songs\n{} playlists\n\nOpen \"Liked Songs\" in the sidebar to view them.",
                    library.liked.len(),
                    library.playlists.len()
                ),
            },
            ContentView::About => ContentData::Text {
                title: " About MyMusic ".to_string(),
                body: "Welcome to MyMusic\n\n\
                       A demo music player: browse the catalog, like your \
                       favorite songs, and manage playlists.\n\n\
                       Create an account to save liked songs and playlists."
                    .to_string(),
            },
        }
    }

    async fn visible_row_count(&self) -> usize {
        match self.get_content_data().await {
            ContentData::Songs { rows, .. } => rows.len(),
            ContentData::Text { .. } => 0,
        }
    }

    pub async fn content_move_up(&self) {
        let mut content = self.content_state.lock().await;
        if content.selected > 0 {
            content.selected -= 1;
        }
    }

    pub async fn content_move_down(&self) {
        let max = self.visible_row_count().await;
        let mut content = self.content_state.lock().await;
        if content.selected < max.saturating_sub(1) {
            content.selected += 1;
        }
    }

    /// Catalog index of the highlighted song in the main area.
    pub async fn selected_song_index(&self) -> Option<usize> {
        match self.get_content_data().await {
            ContentData::Songs { rows, selected, .. } => rows.get(selected).map(|r| r.index),
            ContentData::Text { .. } => None,
        }
    }

    /// Title of the highlighted song, for playlist removal.
    pub async fn selected_song_title(&self) -> Option<String> {
        match self.get_content_data().await {
            ContentData::Songs { rows, selected, .. } => {
                rows.get(selected).map(|r| r.title.clone())
            }
            ContentData::Text { .. } => None,
        }
    }

    /// Id of the playlist currently shown in the main area, if any.
    pub async fn viewed_playlist_id(&self) -> Option<i64> {
        match self.content_state.lock().await.view {
            ContentView::Playlist { id } => Some(id),
            _ => None,
        }
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.prev();
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.active_section = section;
    }

    pub async fn move_selection_up(&self) {
        let mut state = self.ui_state.lock().await;
        match state.active_section {
            ActiveSection::Library => {
                if state.library_selected > 0 {
                    state.library_selected -= 1;
                }
            }
            ActiveSection::Playlists => {
                if state.playlist_selected > 0 {
                    state.playlist_selected -= 1;
                }
            }
            _ => {}
        }
    }

    pub async fn move_selection_down(&self) {
        let playlist_count = self.library.lock().await.playlists.len();
        let mut state = self.ui_state.lock().await;
        match state.active_section {
            ActiveSection::Library => {
                if state.library_selected < LibraryShortcut::ALL.len() - 1 {
                    state.library_selected += 1;
                }
            }
            ActiveSection::Playlists => {
                if state.playlist_selected < playlist_count.saturating_sub(1) {
                    state.playlist_selected += 1;
                }
            }
            _ => {}
        }
    }

    pub async fn append_to_search(&self, c: char) {
        let mut state = self.ui_state.lock().await;
        state.search_query.push(c);
    }

    pub async fn backspace_search(&self) {
        let mut state = self.ui_state.lock().await;
        state.search_query.pop();
    }

    pub async fn clear_search(&self) {
        let mut state = self.ui_state.lock().await;
        state.search_query.clear();
    }

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp
            && timestamp.elapsed().as_secs() > 5
        {
            state.error_message = None;
            state.error_timestamp = None;
        }
    }

    pub async fn open_modal(&self, modal: Modal) {
        let mut state = self.ui_state.lock().await;
        state.modal = Some(modal);
    }

    pub async fn close_modal(&self) {
        let mut state = self.ui_state.lock().await;
        state.modal = None;
    }

    pub async fn is_modal_open(&self) -> bool {
        self.ui_state.lock().await.modal.is_some()
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_model() -> (AppModel, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("state.json")).unwrap();
        let model = AppModel::load(store).await.unwrap();
        (model, dir)
    }

    async fn signed_in_model() -> (AppModel, tempfile::TempDir) {
        let (model, dir) = test_model().await;
        model
            .signup("a@b.co", "user", "Password1!", "Password1!")
            .await
            .unwrap();
        model.login("user", "Password1!", false).await.unwrap();
        (model, dir)
    }

    #[tokio::test]
    async fn next_wraps_to_first_and_previous_to_last() {
        let (model, _dir) = test_model().await;
        let last = model.catalog.len() - 1;

        model.play_song(last).await;
        model.next_song().await;
        assert_eq!(
            model.get_playback_info().await.title.as_deref(),
            model.catalog.get(0).map(|s| s.title)
        );

        model.play_song(0).await;
        model.previous_song().await;
        assert_eq!(
            model.get_playback_info().await.title.as_deref(),
            model.catalog.get(last).map(|s| s.title)
        );
    }

    #[tokio::test]
    async fn toggle_playback_defaults_to_first_song() {
        let (model, _dir) = test_model().await;
        model.toggle_playback().await;
        let info = model.get_playback_info().await;
        assert!(info.is_playing);
        assert_eq!(info.title.as_deref(), model.catalog.get(0).map(|s| s.title));
    }

    #[tokio::test]
    async fn liking_requires_login() {
        let (model, _dir) = test_model().await;
        assert_eq!(model.toggle_liked(0).await, Err(AuthError::LoginRequired));

        let (model, _dir) = signed_in_model().await;
        assert_eq!(model.toggle_liked(0).await, Ok(true));
        assert_eq!(model.toggle_liked(0).await, Ok(false));
    }

    #[tokio::test]
    async fn deleting_viewed_playlist_resets_to_catalog() {
        let (model, _dir) = signed_in_model().await;
        let id = model.create_playlist("Road Trip").await.unwrap();
        assert!(model.open_playlist(id).await);

        assert!(model.delete_playlist(id).await);
        assert_eq!(
            model.content_state.lock().await.view,
            ContentView::AllSongs
        );
    }

    #[tokio::test]
    async fn deleting_other_playlist_keeps_view() {
        let (model, _dir) = signed_in_model().await;
        let kept = model.create_playlist("Keep").await.unwrap();
        // Ids derive from the clock; force distinct ids
        let doomed = loop {
            match model.create_playlist("Doomed").await {
                Ok(id) if id != kept => break id,
                Ok(id) => {
                    model.delete_playlist(id).await;
                }
                Err(_) => unreachable!(),
            }
        };

        model.open_playlist(kept).await;
        model.delete_playlist(doomed).await;
        assert_eq!(
            model.content_state.lock().await.view,
            ContentView::Playlist { id: kept }
        );
    }

    #[tokio::test]
    async fn failed_logins_are_counted_and_reset_on_success() {
        let (model, _dir) = test_model().await;
        model
            .signup("a@b.co", "user", "Password1!", "Password1!")
            .await
            .unwrap();

        for _ in 0..3 {
            assert_eq!(
                model.login("user", "wrong-pass", false).await,
                Err(AuthError::InvalidCredentials)
            );
        }
        assert_eq!(model.failed_attempts().await, 3);

        model.login("a@b.co", "Password1!", false).await.unwrap();
        assert_eq!(model.failed_attempts().await, 0);
        assert!(model.is_logged_in().await);
    }

    #[tokio::test]
    async fn signup_rejects_existing_email() {
        let (model, _dir) = test_model().await;
        model
            .signup("a@b.co", "user", "Password1!", "Password1!")
            .await
            .unwrap();
        assert_eq!(
            model
                .signup("a@b.co", "other", "Password1!", "Password1!")
                .await,
            Err(AuthError::AccountExists)
        );
    }

    #[tokio::test]
    async fn state_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        {
            let store = Store::open(&path).unwrap();
            let model = AppModel::load(store).await.unwrap();
            model
                .signup("a@b.co", "user", "Password1!", "Password1!")
                .await
                .unwrap();
            model.login("user", "Password1!", true).await.unwrap();
            model.toggle_liked(2).await.unwrap();
            model.create_playlist("Persisted").await.unwrap();
            model.set_volume(40).await;
        }

        let store = Store::open(&path).unwrap();
        let model = AppModel::load(store).await.unwrap();
        assert!(model.is_logged_in().await);
        assert_eq!(model.get_volume().await, 40);
        assert_eq!(model.remembered_user().await.as_deref(), Some("a@b.co"));
        let playlists = model.playlists_snapshot().await;
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].name, "Persisted");
        assert_eq!(model.toggle_liked(2).await, Ok(false));
    }

    #[tokio::test]
    async fn logout_leaves_gated_views() {
        let (model, _dir) = signed_in_model().await;
        model.show_liked().await.unwrap();
        model.logout().await;
        assert!(!model.is_logged_in().await);
        assert_eq!(
            model.content_state.lock().await.view,
            ContentView::AllSongs
        );
        assert_eq!(model.show_liked().await, Err(AuthError::LoginRequired));
    }

    #[tokio::test]
    async fn empty_search_shows_no_results() {
        let (model, _dir) = test_model().await;
        model.perform_search("").await;
        match model.get_content_data().await {
            ContentData::Songs { rows, .. } => assert!(rows.is_empty()),
            _ => panic!("expected song list"),
        }

        model.perform_search("song that does not exist").await;
        match model.get_content_data().await {
            ContentData::Songs { rows, empty_message, .. } => {
                assert!(rows.is_empty());
                assert_eq!(empty_message, "No songs found");
            }
            _ => panic!("expected song list"),
        }
    }

    #[tokio::test]
    async fn playing_a_song_records_it_as_recently_played() {
        let (model, _dir) = test_model().await;
        model.play_song(2).await;
        model.show_recently_played().await;
        match model.get_content_data().await {
            ContentData::Songs { rows, .. } => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].index, 2);
            }
            _ => panic!("expected song list"),
        }
    }
}
