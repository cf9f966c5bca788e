pub mod backend;
pub mod embedded;
pub mod native;

use anyhow::Result;
use raylib::prelude::*;

use crate::constants::*;
pub use backend::{PlaybackState, PlayerBackend};

const CONTROL_BAR_HEIGHT: f32 = 44.0;

/// The custom video controls: a playing/paused flag mirrored onto the
/// control icons, one backend picked at setup, and a streamed frame
/// texture when that backend is the native one. Fullscreen is never
/// cached; the window is asked each time it matters.
pub struct VideoPanel {
    state: PlaybackState,
    backend: PlayerBackend,
    texture: Option<Texture2D>,
}

impl VideoPanel {
    pub fn new(rl: &mut RaylibHandle, thread: &RaylibThread, backend: PlayerBackend) -> Result<Self> {
        let texture = match &backend {
            PlayerBackend::Native(media) => {
                let image = Image::gen_image_color(VIDEO_WIDTH, VIDEO_HEIGHT, Color::BLACK);
                let mut texture = rl
                    .load_texture_from_image(thread, &image)
                    .map_err(|e| anyhow::anyhow!("failed to create video texture: {e}"))?;
                texture.update_texture(media.frame());
                Some(texture)
            }
            PlayerBackend::Embedded(_) => None,
        };
        Ok(Self {
            state: PlaybackState::Paused,
            backend,
            texture,
        })
    }

    /// Flip playing/paused, fire the backend side effect, and let the
    /// icon pick up the new state on the next draw.
    pub fn toggle_playback(&mut self) {
        self.state = self.state.toggled();
        match self.state {
            PlaybackState::Playing => self.backend.play(),
            PlaybackState::Paused => self.backend.pause(),
        }
    }

    pub fn update(&mut self, dt: f32) {
        if let PlayerBackend::Native(media) = &mut self.backend {
            if media.advance(dt) {
                if let Some(texture) = &mut self.texture {
                    texture.update_texture(media.frame());
                }
            }
            // End of stream is the medium telling us it stopped.
            if media.finished() && self.state == PlaybackState::Playing {
                self.state = PlaybackState::Paused;
            }
        }
    }

    fn play_button(frame: Rectangle) -> Rectangle {
        Rectangle::new(
            frame.x + 12.0,
            frame.y + frame.height - CONTROL_BAR_HEIGHT + 8.0,
            CONTROL_BAR_HEIGHT - 16.0,
            CONTROL_BAR_HEIGHT - 16.0,
        )
    }

    fn fullscreen_button(frame: Rectangle) -> Rectangle {
        Rectangle::new(
            frame.x + frame.width - CONTROL_BAR_HEIGHT + 4.0,
            frame.y + frame.height - CONTROL_BAR_HEIGHT + 8.0,
            CONTROL_BAR_HEIGHT - 16.0,
            CONTROL_BAR_HEIGHT - 16.0,
        )
    }

    /// Mouse click inside the video section. Returns true when the
    /// click landed on one of the controls.
    pub fn handle_click(
        &mut self,
        rl: &mut RaylibHandle,
        frame: Rectangle,
        point: Vector2,
    ) -> bool {
        if Self::play_button(frame).check_collision_point_rec(point) {
            self.toggle_playback();
            return true;
        }
        if Self::fullscreen_button(frame).check_collision_point_rec(point) {
            rl.toggle_fullscreen();
            return true;
        }
        false
    }

    /// Keyboard shortcuts, active while the video section is in view.
    pub fn handle_keys(&mut self, rl: &mut RaylibHandle) {
        if rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
            self.toggle_playback();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_F) {
            rl.toggle_fullscreen();
        }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, frame: Rectangle, alpha: f32) {
        match &self.texture {
            Some(texture) => {
                d.draw_texture_pro(
                    texture,
                    Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32),
                    frame,
                    Vector2::new(0.0, 0.0),
                    0.0,
                    Color::WHITE.fade(alpha),
                );
            }
            None => {
                d.draw_rectangle_rec(frame, Color::new(18, 18, 24, 255).fade(alpha));
                let label = "Embedded player (external window)";
                d.draw_text(
                    label,
                    (frame.x + 16.0) as i32,
                    (frame.y + frame.height / 2.0) as i32,
                    18,
                    Color::GRAY.fade(alpha),
                );
            }
        }

        // Control bar over the bottom edge of the frame.
        let bar = Rectangle::new(
            frame.x,
            frame.y + frame.height - CONTROL_BAR_HEIGHT,
            frame.width,
            CONTROL_BAR_HEIGHT,
        );
        d.draw_rectangle_rec(bar, Color::BLACK.fade(0.55 * alpha));

        let ink = Color::WHITE.fade(alpha);
        let play = Self::play_button(frame);
        match self.state {
            PlaybackState::Paused => {
                // Play triangle.
                d.draw_triangle(
                    Vector2::new(play.x, play.y),
                    Vector2::new(play.x, play.y + play.height),
                    Vector2::new(play.x + play.width, play.y + play.height / 2.0),
                    ink,
                );
            }
            PlaybackState::Playing => {
                // Pause bars.
                let bar_w = play.width * 0.3;
                d.draw_rectangle_rec(
                    Rectangle::new(play.x, play.y, bar_w, play.height),
                    ink,
                );
                d.draw_rectangle_rec(
                    Rectangle::new(play.x + play.width - bar_w, play.y, bar_w, play.height),
                    ink,
                );
            }
        }

        // Fullscreen toggle, filled while the window really is
        // fullscreen (queried, not remembered).
        let fs = Self::fullscreen_button(frame);
        if d.is_window_fullscreen() {
            d.draw_rectangle_rec(fs, ink);
        } else {
            d.draw_rectangle_lines_ex(fs, 2.0, ink);
        }
    }
}
