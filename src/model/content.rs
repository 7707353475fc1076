//! Content view state for the main area

/// What the main content area is showing.
#[derive(Clone, Debug, PartialEq)]
pub enum ContentView {
    AllSongs,
    SearchResults { query: String, indices: Vec<usize> },
    LikedSongs,
    RecentlyPlayed,
    Playlist { id: i64 },
    LibrarySummary,
    About,
}

#[derive(Clone, Debug)]
pub struct ContentState {
    pub view: ContentView,
    pub selected: usize,
}

impl Default for ContentState {
    fn default() -> Self {
        Self {
            view: ContentView::AllSongs,
            selected: 0,
        }
    }
}

/// One row of a rendered song list.
#[derive(Clone, Debug)]
pub struct SongRow {
    /// Index into the catalog.
    pub index: usize,
    pub title: String,
    pub duration_ms: u32,
    pub liked: bool,
}

/// Snapshot of the main area, resolved against catalog and library state so
/// the view layer renders without touching the model.
#[derive(Clone, Debug)]
pub enum ContentData {
    Songs {
        title: String,
        rows: Vec<SongRow>,
        selected: usize,
        empty_message: &'static str,
    },
    Text {
        title: String,
        body: String,
    },
}
