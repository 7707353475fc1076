//! User collections: liked songs, recently played, custom playlists

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::Catalog;

/// Most-recent entries kept in the recently-played list.
pub const RECENTLY_PLAYED_CAP: usize = 20;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LibraryError {
    #[error("Playlist name cannot be empty")]
    EmptyPlaylistName,
    #[error("A playlist with this name already exists")]
    DuplicatePlaylistName,
    #[error("Playlist not found")]
    PlaylistNotFound,
    #[error("Song not found")]
    SongNotFound,
    #[error("Song already in playlist")]
    SongAlreadyInPlaylist,
}

/// One recently-played entry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RecentEntry {
    pub title: String,
    pub date: DateTime<Utc>,
}

/// A user-created, named, ordered collection of song titles.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Playlist {
    pub id: i64,
    pub name: String,
    pub songs: Vec<String>,
}

/// The user-scoped collections. All mutations are pure state transitions;
/// persistence happens in the model layer after every successful mutation.
#[derive(Clone, Debug, Default)]
pub struct LibraryState {
    pub liked: HashSet<usize>,
    pub recently_played: Vec<RecentEntry>,
    pub playlists: Vec<Playlist>,
}

impl LibraryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle liked-set membership. Returns the new membership state.
    pub fn toggle_liked(&mut self, index: usize) -> bool {
        if self.liked.remove(&index) {
            false
        } else {
            self.liked.insert(index);
            true
        }
    }

    pub fn is_liked(&self, index: usize) -> bool {
        self.liked.contains(&index)
    }

    /// Front-insert into recently played, deduplicating by title and keeping
    /// at most [`RECENTLY_PLAYED_CAP`] entries.
    pub fn record_played(&mut self, title: &str, now: DateTime<Utc>) {
        self.recently_played.retain(|e| e.title != title);
        self.recently_played.insert(
            0,
            RecentEntry {
                title: title.to_string(),
                date: now,
            },
        );
        self.recently_played.truncate(RECENTLY_PLAYED_CAP);
    }

    /// Create a playlist. The identifier is the creation time in epoch
    /// milliseconds; names are unique case-insensitively.
    pub fn create_playlist(&mut self, name: &str, now: DateTime<Utc>) -> Result<i64, LibraryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LibraryError::EmptyPlaylistName);
        }

        let lower = name.to_lowercase();
        if self.playlists.iter().any(|p| p.name.to_lowercase() == lower) {
            return Err(LibraryError::DuplicatePlaylistName);
        }

        let id = now.timestamp_millis();
        self.playlists.push(Playlist {
            id,
            name: name.to_string(),
            songs: Vec::new(),
        });
        Ok(id)
    }

    pub fn playlist(&self, id: i64) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }

    /// Resolve `title_query` against the catalog and append the resolved
    /// song title to the playlist. Membership is checked by exact title, so
    /// the same song cannot be added twice under different queries.
    pub fn add_song_to_playlist(
        &mut self,
        catalog: &Catalog,
        playlist_id: i64,
        title_query: &str,
    ) -> Result<String, LibraryError> {
        let index = catalog
            .resolve_query(title_query)
            .ok_or(LibraryError::SongNotFound)?;
        let title = catalog
            .get(index)
            .map(|s| s.title.to_string())
            .ok_or(LibraryError::SongNotFound)?;

        let playlist = self
            .playlists
            .iter_mut()
            .find(|p| p.id == playlist_id)
            .ok_or(LibraryError::PlaylistNotFound)?;

        if playlist.songs.iter().any(|s| s == &title) {
            return Err(LibraryError::SongAlreadyInPlaylist);
        }

        playlist.songs.push(title.clone());
        Ok(title)
    }

    /// Remove all occurrences of `title` from the playlist.
    pub fn remove_song_from_playlist(
        &mut self,
        playlist_id: i64,
        title: &str,
    ) -> Result<(), LibraryError> {
        let playlist = self
            .playlists
            .iter_mut()
            .find(|p| p.id == playlist_id)
            .ok_or(LibraryError::PlaylistNotFound)?;

        playlist.songs.retain(|s| s != title);
        Ok(())
    }

    /// Delete the playlist. Returns true if it existed.
    pub fn delete_playlist(&mut self, id: i64) -> bool {
        let before = self.playlists.len();
        self.playlists.retain(|p| p.id != id);
        self.playlists.len() != before
    }

    /// Liked indices in ascending order, for display and persistence.
    pub fn liked_sorted(&self) -> Vec<usize> {
        let mut liked: Vec<usize> = self.liked.iter().copied().collect();
        liked.sort_unstable();
        liked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn toggle_liked_flips_membership() {
        let mut lib = LibraryState::new();
        assert!(lib.toggle_liked(3));
        assert!(lib.is_liked(3));
        assert!(!lib.toggle_liked(3));
        assert!(!lib.is_liked(3));
    }

    #[test]
    fn recently_played_dedups_and_moves_to_front() {
        let mut lib = LibraryState::new();
        lib.record_played("Ocean Waves", at(1));
        lib.record_played("Golden Hour", at(2));
        lib.record_played("Ocean Waves", at(3));

        assert_eq!(lib.recently_played.len(), 2);
        assert_eq!(lib.recently_played[0].title, "Ocean Waves");
        assert_eq!(lib.recently_played[0].date, at(3));
        assert_eq!(lib.recently_played[1].title, "Golden Hour");
    }

    #[test]
    fn recently_played_is_capped() {
        let mut lib = LibraryState::new();
        let titles: Vec<String> = (0..30).map(|i| format!("Song {i}")).collect();
        for (i, title) in titles.iter().enumerate() {
            lib.record_played(title, at(i as i64));
        }

        assert_eq!(lib.recently_played.len(), RECENTLY_PLAYED_CAP);
        // Newest first, oldest dropped
        assert_eq!(lib.recently_played[0].title, "Song 29");
        assert!(lib.recently_played.iter().all(|e| e.title != "Song 0"));
    }

    #[test]
    fn playlist_names_are_unique_case_insensitively() {
        let mut lib = LibraryState::new();
        lib.create_playlist("Road Trip", at(1)).unwrap();
        assert_eq!(
            lib.create_playlist("road trip", at(2)),
            Err(LibraryError::DuplicatePlaylistName)
        );
    }

    #[test]
    fn empty_playlist_name_is_rejected() {
        let mut lib = LibraryState::new();
        assert_eq!(
            lib.create_playlist("   ", at(1)),
            Err(LibraryError::EmptyPlaylistName)
        );
        assert!(lib.playlists.is_empty());
    }

    #[test]
    fn playlist_id_derives_from_creation_time() {
        let mut lib = LibraryState::new();
        let id = lib.create_playlist("Focus", at(1700)).unwrap();
        assert_eq!(id, 1_700_000);
        assert!(lib.playlist(id).is_some());
    }

    #[test]
    fn add_song_resolves_query_and_rejects_duplicates() {
        let catalog = Catalog::builtin();
        let mut lib = LibraryState::new();
        let id = lib.create_playlist("Chill", at(1)).unwrap();

        let title = lib.add_song_to_playlist(&catalog, id, "ocean").unwrap();
        assert_eq!(title, "Ocean Waves");

        // Same song under a different query is still a duplicate
        assert_eq!(
            lib.add_song_to_playlist(&catalog, id, "OCEAN WAVES"),
            Err(LibraryError::SongAlreadyInPlaylist)
        );
        assert_eq!(lib.playlist(id).unwrap().songs.len(), 1);
    }

    #[test]
    fn add_song_reports_missing_song_and_playlist() {
        let catalog = Catalog::builtin();
        let mut lib = LibraryState::new();
        let id = lib.create_playlist("Chill", at(1)).unwrap();

        assert_eq!(
            lib.add_song_to_playlist(&catalog, id, "does not exist"),
            Err(LibraryError::SongNotFound)
        );
        assert_eq!(
            lib.add_song_to_playlist(&catalog, 999, "ocean"),
            Err(LibraryError::PlaylistNotFound)
        );
    }

    #[test]
    fn remove_song_removes_all_occurrences() {
        let catalog = Catalog::builtin();
        let mut lib = LibraryState::new();
        let id = lib.create_playlist("Chill", at(1)).unwrap();
        lib.add_song_to_playlist(&catalog, id, "ocean").unwrap();

        lib.remove_song_from_playlist(id, "Ocean Waves").unwrap();
        assert!(lib.playlist(id).unwrap().songs.is_empty());

        // Removing again is a silent no-op
        lib.remove_song_from_playlist(id, "Ocean Waves").unwrap();
    }

    #[test]
    fn delete_playlist_reports_existence() {
        let mut lib = LibraryState::new();
        let id = lib.create_playlist("Gone", at(1)).unwrap();
        assert!(lib.delete_playlist(id));
        assert!(!lib.delete_playlist(id));
    }
}
