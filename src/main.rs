use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use raylib::prelude::*;
use tracing::{info, warn};

mod carousel;
mod constants;
mod navbar;
mod page;
mod reveal;
mod scroll;
mod texture_loader;
mod video;

use crate::constants::*;
use crate::navbar::{NavResponse, Navbar};
use crate::page::Page;
use crate::scroll::Scroll;
use crate::video::embedded::EmbeddedPlayer;
use crate::video::native::NativeMedia;
use crate::video::{PlayerBackend, VideoPanel};

#[derive(Parser)]
#[command(name = "folio", about = "Interactive portfolio page viewer")]
struct Cli {
    /// Asset directory holding about/ and food/ image subdirectories
    assets: PathBuf,

    /// Video file for the native playback backend
    #[arg(long)]
    video: Option<PathBuf>,

    /// Command line of an external player, driven over its stdin
    #[arg(long, conflicts_with = "video")]
    embed: Option<String>,

    /// Auto-advance the carousels on a fixed interval
    #[arg(long)]
    auto_advance: bool,

    /// Initial window size as WIDTHxHEIGHT, e.g. 1280x800
    #[arg(long, value_parser = parse_window_size)]
    window: Option<(i32, i32)>,
}

fn parse_window_size(s: &str) -> Result<(i32, i32), String> {
    let Some((w, h)) = s.split_once(['x', 'X']) else {
        return Err(format!("expected WIDTHxHEIGHT, got '{s}'"));
    };
    let w: i32 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h: i32 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    if w <= 0 || h <= 0 {
        return Err(format!("window size must be positive, got {w}x{h}"));
    }
    Ok((w, h))
}

/// The video panel is the one optional piece of the page: if its file,
/// child process, or texture cannot be set up, registration is skipped
/// and the rest of the page is unaffected.
fn build_video_panel(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    cli: &Cli,
) -> Option<VideoPanel> {
    let backend = if let Some(path) = &cli.video {
        NativeMedia::open(path).map(PlayerBackend::Native)
    } else if let Some(command) = &cli.embed {
        EmbeddedPlayer::spawn(command).map(PlayerBackend::Embedded)
    } else {
        return None;
    };
    let panel = backend.and_then(|backend| VideoPanel::new(rl, thread, backend));
    match panel {
        Ok(panel) => Some(panel),
        Err(e) => {
            warn!(error = %e, "skipping the video panel");
            None
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let (window_width, window_height) = cli.window.unwrap_or((WINDOW_WIDTH, WINDOW_HEIGHT));

    let (mut rl, thread) = raylib::init()
        .size(window_width, window_height)
        .title("Portfolio")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let video_panel = build_video_panel(&mut rl, &thread, &cli);

    let mut page = match Page::build(&cli.assets, video_panel, cli.auto_advance) {
        Ok(page) => page,
        Err(e) => {
            let mut d = rl.begin_drawing(&thread);
            d.clear_background(Color::BLACK);
            d.draw_text(&format!("Error: {e}"), 20, 20, 20, Color::RED);
            drop(d);
            std::thread::sleep(Duration::from_secs(5));
            return Err(e);
        }
    };

    let viewport = (rl.get_screen_height() as f32 - NAVBAR_HEIGHT).max(0.0);
    let mut scroll = Scroll::new(page.height, viewport);
    let mut navbar = Navbar::new(page.nav_links());

    info!(
        sections = page.sections.len(),
        page_height = page.height,
        "page ready"
    );

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        if rl.is_window_resized() {
            let viewport = (rl.get_screen_height() as f32 - NAVBAR_HEIGHT).max(0.0);
            scroll.resize(page.height, viewport);
        }

        // --- Input ---
        scroll.wheel(rl.get_mouse_wheel_move());
        if rl.is_key_pressed(KeyboardKey::KEY_PAGE_DOWN) {
            scroll.scroll_by(scroll.viewport() * 0.9);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_PAGE_UP) {
            scroll.scroll_by(-scroll.viewport() * 0.9);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_HOME) {
            scroll.jump_to(0.0);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_END) {
            scroll.jump_to(page.height);
        }

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            let point = rl.get_mouse_position();
            let screen_width = rl.get_screen_width() as f32;
            match navbar.handle_click(point, screen_width) {
                NavResponse::Navigate(y) => scroll.jump_to(y),
                NavResponse::Consumed => {}
                NavResponse::Ignored => {
                    if point.y > NAVBAR_HEIGHT {
                        page.handle_click(&mut rl, point, &scroll);
                    }
                }
            }
        }
        page.handle_keys(&mut rl, &scroll);

        // --- Update ---
        scroll.update(dt);
        page.update(&mut rl, &thread, dt, &scroll);

        // --- Draw ---
        let screen_width = rl.get_screen_width() as f32;
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::new(247, 250, 252, 255));
        page.draw(&mut d, &scroll);
        navbar.draw(&mut d, screen_width, scroll.is_scrolled(), scroll.fraction());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_size_parses_width_by_height() {
        assert_eq!(parse_window_size("800x600"), Ok((800, 600)));
        assert_eq!(parse_window_size("1920X1080"), Ok((1920, 1080)));
    }

    #[test]
    fn window_size_rejects_malformed_input() {
        assert!(parse_window_size("800").is_err());
        assert!(parse_window_size("800x").is_err());
        assert!(parse_window_size("x600").is_err());
        assert!(parse_window_size("-800x600").is_err());
        assert!(parse_window_size("0x600").is_err());
    }

    #[test]
    fn cli_accepts_the_window_flag() {
        let cli = Cli::try_parse_from(["folio", "assets", "--window", "800x600"]).unwrap();
        assert_eq!(cli.window, Some((800, 600)));

        let cli = Cli::try_parse_from(["folio", "assets"]).unwrap();
        assert_eq!(cli.window, None);
    }
}
