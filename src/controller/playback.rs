//! Playback control methods

use super::AppController;

const VOLUME_STEP: u8 = 5;

impl AppController {
    /// Start the song highlighted in the main area.
    pub(crate) async fn play_selected(&self) {
        if let Some(index) = self.model.selected_song_index().await {
            self.model.play_song(index).await;
        }
    }

    pub(crate) async fn volume_up(&self) {
        let volume = self.model.get_volume().await;
        self.model
            .set_volume(volume.saturating_add(VOLUME_STEP))
            .await;
    }

    pub(crate) async fn volume_down(&self) {
        let volume = self.model.get_volume().await;
        self.model
            .set_volume(volume.saturating_sub(VOLUME_STEP))
            .await;
    }

    /// Called from the main loop each tick; advances to the next song when
    /// the current one has played out.
    pub async fn handle_playback_tick(&self) {
        if self.model.playback_ended().await {
            self.model.next_song().await;
        }
    }
}
