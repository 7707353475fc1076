//! Modal form input and submission

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::model::{LoginField, Modal, SignupField};

use super::AppController;

impl AppController {
    pub(crate) async fn handle_modal_key(&self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Esc {
            self.model.close_modal().await;
            return Ok(());
        }

        let Some(mut modal) = self.model.get_ui_state().await.modal else {
            return Ok(());
        };

        let submit = match (&mut modal, key.code) {
            // --- Create playlist ---
            (Modal::CreatePlaylist { name, .. }, KeyCode::Char(c)) => {
                name.push(c);
                false
            }
            (Modal::CreatePlaylist { name, .. }, KeyCode::Backspace) => {
                name.pop();
                false
            }
            (Modal::CreatePlaylist { .. }, KeyCode::Enter) => true,

            // --- Add song to playlist ---
            (Modal::AddSong { query, .. }, KeyCode::Char(c)) => {
                query.push(c);
                false
            }
            (Modal::AddSong { query, .. }, KeyCode::Backspace) => {
                query.pop();
                false
            }
            (Modal::AddSong { playlist_choice, .. }, KeyCode::Up) => {
                *playlist_choice = playlist_choice.saturating_sub(1);
                false
            }
            (Modal::AddSong { playlist_choice, .. }, KeyCode::Down) => {
                let count = self.model.playlists_snapshot().await.len();
                if *playlist_choice < count.saturating_sub(1) {
                    *playlist_choice += 1;
                }
                false
            }
            (Modal::AddSong { .. }, KeyCode::Enter) => true,

            // --- Login ---
            (Modal::Login { field, .. }, KeyCode::Tab | KeyCode::Down) => {
                *field = field.next();
                false
            }
            (
                Modal::Login {
                    user,
                    password,
                    remember_me,
                    field,
                    ..
                },
                KeyCode::Char(c),
            ) => {
                match field {
                    LoginField::User => user.push(c),
                    LoginField::Password => password.push(c),
                    LoginField::RememberMe => {
                        if c == ' ' {
                            *remember_me = !*remember_me;
                        }
                    }
                }
                false
            }
            (
                Modal::Login {
                    user,
                    password,
                    field,
                    ..
                },
                KeyCode::Backspace,
            ) => {
                match field {
                    LoginField::User => {
                        user.pop();
                    }
                    LoginField::Password => {
                        password.pop();
                    }
                    LoginField::RememberMe => {}
                }
                false
            }
            (Modal::Login { .. }, KeyCode::Enter) => true,

            // --- Signup ---
            (Modal::Signup { field, .. }, KeyCode::Tab | KeyCode::Down) => {
                *field = field.next();
                false
            }
            (
                Modal::Signup {
                    email,
                    username,
                    password,
                    confirm,
                    field,
                    ..
                },
                KeyCode::Char(c),
            ) => {
                match field {
                    SignupField::Email => email.push(c),
                    SignupField::Username => username.push(c),
                    SignupField::Password => password.push(c),
                    SignupField::Confirm => confirm.push(c),
                }
                false
            }
            (
                Modal::Signup {
                    email,
                    username,
                    password,
                    confirm,
                    field,
                    ..
                },
                KeyCode::Backspace,
            ) => {
                match field {
                    SignupField::Email => email.pop(),
                    SignupField::Username => username.pop(),
                    SignupField::Password => password.pop(),
                    SignupField::Confirm => confirm.pop(),
                };
                false
            }
            (Modal::Signup { .. }, KeyCode::Enter) => true,

            // --- Forgot password ---
            (Modal::ForgotPassword { email, .. }, KeyCode::Char(c)) => {
                email.push(c);
                false
            }
            (Modal::ForgotPassword { email, .. }, KeyCode::Backspace) => {
                email.pop();
                false
            }
            (Modal::ForgotPassword { .. }, KeyCode::Enter) => true,

            _ => false,
        };

        if submit {
            self.submit_modal(modal).await;
        } else {
            self.model.open_modal(modal).await;
        }
        Ok(())
    }

    /// Run the action behind a confirmed modal. Validation failures land as
    /// an inline message and the form stays open.
    async fn submit_modal(&self, modal: Modal) {
        match modal {
            Modal::CreatePlaylist { name, .. } => {
                match self.model.create_playlist(&name).await {
                    Ok(id) => {
                        self.model.close_modal().await;
                        self.model.open_playlist(id).await;
                    }
                    Err(e) => {
                        self.model
                            .open_modal(Modal::CreatePlaylist {
                                name,
                                error: Some(e.to_string()),
                            })
                            .await;
                    }
                }
            }
            Modal::AddSong {
                query,
                playlist_choice,
                ..
            } => {
                let playlists = self.model.playlists_snapshot().await;
                let Some(playlist) = playlists.get(playlist_choice) else {
                    self.model.close_modal().await;
                    return;
                };
                match self.model.add_song_to_playlist(playlist.id, &query).await {
                    Ok(_) => self.model.close_modal().await,
                    Err(e) => {
                        self.model
                            .open_modal(Modal::AddSong {
                                query,
                                playlist_choice,
                                error: Some(e.to_string()),
                            })
                            .await;
                    }
                }
            }
            Modal::Login {
                user,
                password,
                remember_me,
                field,
                ..
            } => {
                match self.model.login(&user, &password, remember_me).await {
                    Ok(()) => self.model.close_modal().await,
                    Err(e) => {
                        let attempts = self.model.failed_attempts().await;
                        self.model
                            .open_modal(Modal::Login {
                                user,
                                password: String::new(),
                                remember_me,
                                field,
                                error: Some(Self::login_error_message(&e, attempts)),
                            })
                            .await;
                    }
                }
            }
            Modal::Signup {
                email,
                username,
                password,
                confirm,
                field,
                ..
            } => {
                match self.model.signup(&email, &username, &password, &confirm).await {
                    Ok(()) => {
                        // Land on the login form with the new identity filled in
                        self.model
                            .open_modal(Modal::Login {
                                user: email,
                                password: String::new(),
                                remember_me: false,
                                field: LoginField::Password,
                                error: None,
                            })
                            .await;
                    }
                    Err(e) => {
                        self.model
                            .open_modal(Modal::Signup {
                                email,
                                username,
                                password,
                                confirm,
                                field,
                                error: Some(e.to_string()),
                            })
                            .await;
                    }
                }
            }
            Modal::ForgotPassword { email, .. } => {
                match self.model.forgot_password(&email).await {
                    Ok(message) => {
                        self.model.close_modal().await;
                        self.model.set_error(message).await;
                    }
                    Err(e) => {
                        self.model
                            .open_modal(Modal::ForgotPassword {
                                email,
                                error: Some(e.to_string()),
                            })
                            .await;
                    }
                }
            }
        }
    }
}
