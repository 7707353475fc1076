//! The fixed song catalog

/// One song in the catalog. The catalog is fixed at startup and immutable;
/// playlists and the liked set reference songs by index or title, they never
/// own them.
#[derive(Clone, Debug)]
pub struct Song {
    pub title: &'static str,
    pub source: &'static str,
    pub duration_ms: u32,
}

/// The immutable song catalog.
#[derive(Clone, Debug)]
pub struct Catalog {
    songs: Vec<Song>,
}

impl Catalog {
    /// The built-in demo catalog.
    pub fn builtin() -> Self {
        Self {
            songs: vec![
                Song {
                    title: "Summer Vibes",
                    source: "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3",
                    duration_ms: 369_000,
                },
                Song {
                    title: "Electric Dreams",
                    source: "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-2.mp3",
                    duration_ms: 425_000,
                },
                Song {
                    title: "Midnight Echo",
                    source: "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-3.mp3",
                    duration_ms: 283_000,
                },
                Song {
                    title: "Ocean Waves",
                    source: "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3",
                    duration_ms: 369_000,
                },
                Song {
                    title: "Golden Hour",
                    source: "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-2.mp3",
                    duration_ms: 425_000,
                },
                Song {
                    title: "Starlight Night",
                    source: "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-3.mp3",
                    duration_ms: 283_000,
                },
                Song {
                    title: "Urban Jungle",
                    source: "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3",
                    duration_ms: 369_000,
                },
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Exact-title lookup (titles are unique within the catalog).
    pub fn index_of_title(&self, title: &str) -> Option<usize> {
        self.songs.iter().position(|s| s.title == title)
    }

    /// Resolve a free-text query to a song via case-insensitive substring
    /// match, returning the first hit.
    pub fn resolve_query(&self, query: &str) -> Option<usize> {
        let needle = query.to_lowercase();
        self.songs
            .iter()
            .position(|s| s.title.to_lowercase().contains(&needle))
    }

    /// Case-insensitive substring search over titles. An empty query yields
    /// no results, not all results.
    pub fn search(&self, query: &str) -> Vec<usize> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.songs
            .iter()
            .enumerate()
            .filter(|(_, s)| s.title.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_query_is_case_insensitive_substring() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.resolve_query("midnight"), Some(2));
        assert_eq!(catalog.resolve_query("WAVES"), Some(3));
        assert_eq!(catalog.resolve_query("polka"), None);
    }

    #[test]
    fn empty_search_yields_no_results() {
        let catalog = Catalog::builtin();
        assert!(catalog.search("").is_empty());
        assert!(catalog.search("   ").is_empty());
        assert!(!catalog.search("e").is_empty());
    }
}
