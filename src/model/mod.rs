//! Application state and domain logic

mod app_model;
mod catalog;
mod content;
mod library;
mod playback;
mod session;
mod types;

pub use app_model::AppModel;
pub use catalog::{Catalog, Song};
pub use content::{ContentData, ContentState, ContentView, SongRow};
pub use library::{LibraryError, LibraryState, Playlist, RecentEntry, RECENTLY_PLAYED_CAP};
pub use playback::{PlaybackInfo, PlaybackState, PlaybackTiming, DEFAULT_VOLUME_PERCENT};
pub use session::{
    hash_password, is_valid_email, is_valid_username, password_strength, validate_signup,
    AuthError, PasswordStrength, Session,
};
pub use types::{
    ActiveSection, LibraryShortcut, LoginField, Modal, SignupField, UiState,
};
