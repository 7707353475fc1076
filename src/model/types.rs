//! Core type definitions for the player UI

use std::time::Instant;

use super::session::PasswordStrength;

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    Library,
    Playlists,
    SongList,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Library,
            ActiveSection::Library => ActiveSection::Playlists,
            ActiveSection::Playlists => ActiveSection::SongList,
            ActiveSection::SongList => ActiveSection::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::SongList,
            ActiveSection::Library => ActiveSection::Search,
            ActiveSection::Playlists => ActiveSection::Library,
            ActiveSection::SongList => ActiveSection::Playlists,
        }
    }
}

/// Fixed sidebar shortcuts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LibraryShortcut {
    Home,
    LikedSongs,
    RecentlyPlayed,
    YourLibrary,
    About,
}

impl LibraryShortcut {
    pub const ALL: [LibraryShortcut; 5] = [
        LibraryShortcut::Home,
        LibraryShortcut::LikedSongs,
        LibraryShortcut::RecentlyPlayed,
        LibraryShortcut::YourLibrary,
        LibraryShortcut::About,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LibraryShortcut::Home => "All Songs",
            LibraryShortcut::LikedSongs => "Liked Songs",
            LibraryShortcut::RecentlyPlayed => "Recently Played",
            LibraryShortcut::YourLibrary => "Your Library",
            LibraryShortcut::About => "About",
        }
    }
}

/// Which field of the login form has focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    User,
    Password,
    RememberMe,
}

impl LoginField {
    pub fn next(self) -> Self {
        match self {
            LoginField::User => LoginField::Password,
            LoginField::Password => LoginField::RememberMe,
            LoginField::RememberMe => LoginField::User,
        }
    }
}

/// Which field of the signup form has focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SignupField {
    #[default]
    Email,
    Username,
    Password,
    Confirm,
}

impl SignupField {
    pub fn next(self) -> Self {
        match self {
            SignupField::Email => SignupField::Username,
            SignupField::Username => SignupField::Password,
            SignupField::Password => SignupField::Confirm,
            SignupField::Confirm => SignupField::Email,
        }
    }
}

/// Modal overlays. Each carries its own input buffers and inline
/// validation error; Esc closes, Enter confirms.
#[derive(Clone, Debug, PartialEq)]
pub enum Modal {
    CreatePlaylist {
        name: String,
        error: Option<String>,
    },
    AddSong {
        query: String,
        /// Index into the playlists list, not a playlist id.
        playlist_choice: usize,
        error: Option<String>,
    },
    Login {
        user: String,
        password: String,
        remember_me: bool,
        field: LoginField,
        error: Option<String>,
    },
    Signup {
        email: String,
        username: String,
        password: String,
        confirm: String,
        field: SignupField,
        error: Option<String>,
    },
    ForgotPassword {
        email: String,
        error: Option<String>,
    },
}

impl Modal {
    pub fn login() -> Self {
        Modal::Login {
            user: String::new(),
            password: String::new(),
            remember_me: false,
            field: LoginField::default(),
            error: None,
        }
    }

    pub fn signup() -> Self {
        Modal::Signup {
            email: String::new(),
            username: String::new(),
            password: String::new(),
            confirm: String::new(),
            field: SignupField::default(),
            error: None,
        }
    }

    pub fn create_playlist() -> Self {
        Modal::CreatePlaylist {
            name: String::new(),
            error: None,
        }
    }

    pub fn add_song(query: String, playlist_choice: usize) -> Self {
        Modal::AddSong {
            query,
            playlist_choice,
            error: None,
        }
    }

    pub fn forgot_password() -> Self {
        Modal::ForgotPassword {
            email: String::new(),
            error: None,
        }
    }

    /// Live strength indicator shown under the signup password field.
    pub fn password_strength(&self) -> Option<PasswordStrength> {
        match self {
            Modal::Signup { password, .. } if !password.is_empty() => {
                Some(super::session::password_strength(password))
            }
            _ => None,
        }
    }
}

/// UI state for the player.
#[derive(Clone)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_query: String,
    pub library_selected: usize,
    pub playlist_selected: usize,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub modal: Option<Modal>,
    pub show_help_popup: bool,
    /// Username shown in the top bar while logged in.
    pub account_label: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Library,
            search_query: String::new(),
            library_selected: 0,
            playlist_selected: 0,
            error_message: None,
            error_timestamp: None,
            modal: None,
            show_help_popup: false,
            account_label: None,
        }
    }
}
