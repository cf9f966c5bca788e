use crate::video::embedded::EmbeddedPlayer;
use crate::video::native::NativeMedia;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PlaybackState {
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn toggled(self) -> Self {
        match self {
            PlaybackState::Playing => PlaybackState::Paused,
            PlaybackState::Paused => PlaybackState::Playing,
        }
    }
}

/// The playback medium behind the control panel. Which variant to build
/// is decided once at setup, from the configuration that is present;
/// after that every play/pause goes through the same two methods.
pub enum PlayerBackend {
    /// In-process playback of decoded frames.
    Native(NativeMedia),
    /// External player driven over an asynchronous command channel.
    Embedded(EmbeddedPlayer),
}

impl PlayerBackend {
    pub fn play(&mut self) {
        match self {
            PlayerBackend::Native(media) => media.play(),
            PlayerBackend::Embedded(player) => player.play(),
        }
    }

    pub fn pause(&mut self) {
        match self {
            PlayerBackend::Native(media) => media.pause(),
            PlayerBackend::Embedded(player) => player.pause(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_returns_to_the_starting_state() {
        assert_eq!(
            PlaybackState::Paused.toggled().toggled(),
            PlaybackState::Paused
        );
        assert_eq!(
            PlaybackState::Playing.toggled().toggled(),
            PlaybackState::Playing
        );
    }
}
