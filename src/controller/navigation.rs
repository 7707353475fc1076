//! Library, playlist and search navigation

use crate::model::{ActiveSection, LibraryShortcut, Modal};

use super::AppController;

impl AppController {
    pub(crate) async fn perform_search(&self, query: &str) {
        self.model.perform_search(query).await;
        self.model.set_active_section(ActiveSection::SongList).await;
    }

    /// Open a sidebar shortcut by its position in the list.
    pub(crate) async fn open_library_item(&self, index: usize) {
        let Some(shortcut) = LibraryShortcut::ALL.get(index).copied() else {
            return;
        };

        match shortcut {
            LibraryShortcut::Home => self.model.show_home().await,
            LibraryShortcut::LikedSongs => {
                if let Err(e) = self.model.show_liked().await {
                    self.model.set_error(e.to_string()).await;
                    self.open_login_modal().await;
                    return;
                }
            }
            LibraryShortcut::RecentlyPlayed => self.model.show_recently_played().await,
            LibraryShortcut::YourLibrary => self.model.show_library_summary().await,
            LibraryShortcut::About => self.model.show_about().await,
        }
        self.model.set_active_section(ActiveSection::SongList).await;
    }

    pub(crate) async fn open_selected_playlist(&self) {
        let Some(id) = self.model.selected_playlist_id().await else {
            match self.model.require_login().await {
                // No playlists yet; jump straight to the create form
                Ok(()) => self.model.open_modal(Modal::create_playlist()).await,
                Err(e) => self.model.set_error(e.to_string()).await,
            }
            return;
        };
        if self.model.open_playlist(id).await {
            self.model.set_active_section(ActiveSection::SongList).await;
        }
    }

    pub(crate) async fn delete_selected_playlist(&self) {
        let Some(id) = self.model.selected_playlist_id().await else {
            return;
        };
        self.model.delete_playlist(id).await;
    }

    /// Delete the highlighted song from the playlist being viewed. Ignored
    /// outside playlist views.
    pub(crate) async fn remove_selected_from_playlist(&self) {
        let Some(playlist_id) = self.model.viewed_playlist_id().await else {
            return;
        };
        let Some(title) = self.model.selected_song_title().await else {
            return;
        };
        if let Err(e) = self
            .model
            .remove_song_from_playlist(playlist_id, &title)
            .await
        {
            self.model.set_error(e.to_string()).await;
        } else {
            self.model.content_move_up().await;
        }
    }
}
