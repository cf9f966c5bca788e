use std::io::{ErrorKind, Read};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

use anyhow::{Context, Result, bail};

use crate::constants::*;

const FRAME_BYTES: usize = (VIDEO_WIDTH * VIDEO_HEIGHT * 4) as usize; // RGBA
const FRAME_INTERVAL: f32 = 1.0 / VIDEO_FPS as f32;

/// In-process playback medium: an ffmpeg child decodes the file to raw
/// RGBA frames on a pipe, and we consume one frame per tick of the
/// playback clock. Pausing stops the clock; the decoder then blocks on
/// the full pipe until playback resumes. When the stream runs out the
/// child has already exited and is reaped on the spot.
pub struct NativeMedia {
    child: Child,
    stdout: ChildStdout,
    frame: Vec<u8>,
    clock: f32,
    paused: bool,
    finished: bool,
    reaped: bool,
}

impl NativeMedia {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            bail!("video file {} does not exist", path.display());
        }
        let mut command = Command::new("ffmpeg");
        command
            .args(["-loglevel", "error"])
            .args(["-i", &path.display().to_string()])
            .args(["-f", "rawvideo"])
            .args(["-pix_fmt", "rgba"])
            .args(["-vf", &format!("scale={}:{}", VIDEO_WIDTH, VIDEO_HEIGHT)])
            .args(["-r", &VIDEO_FPS.to_string()])
            .arg("-");
        Self::start(command).with_context(|| format!("decoding {}", path.display()))
    }

    /// Spawn any frame source writing raw RGBA frames to stdout.
    fn start(mut command: Command) -> Result<Self> {
        let mut child = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .spawn()
            .context("failed to start frame decoder")?;
        let stdout = child.stdout.take().context("decoder has no stdout pipe")?;

        let mut media = Self {
            child,
            stdout,
            frame: vec![0; FRAME_BYTES],
            clock: 0.0,
            paused: true,
            finished: false,
            reaped: false,
        };
        // Pull the first frame eagerly so the panel has a poster image.
        if !media.read_frame() {
            bail!("video produced no frames");
        }
        Ok(media)
    }

    fn read_frame(&mut self) -> bool {
        match self.stdout.read_exact(&mut self.frame) {
            Ok(()) => true,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                self.finish();
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "video decode pipe failed");
                self.finish();
                false
            }
        }
    }

    // The stream is over; the child has exited (or is unusable), so
    // collect it now instead of leaving it for Drop.
    fn finish(&mut self) {
        self.finished = true;
        self.reap();
    }

    fn reap(&mut self) {
        if !self.reaped {
            self.reaped = true;
            let _ = self.child.wait();
        }
    }

    pub fn play(&mut self) {
        self.paused = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Advance the playback clock. Returns true when the frame buffer
    /// holds a newly decoded frame.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.paused || self.finished {
            return false;
        }
        self.clock += dt;
        let mut refreshed = false;
        while self.clock >= FRAME_INTERVAL && !self.finished {
            self.clock -= FRAME_INTERVAL;
            if self.read_frame() {
                refreshed = true;
            }
        }
        refreshed
    }

    /// RGBA pixels of the most recent frame.
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// The stream ran out; the medium reports this once so the panel can
    /// fall back to its paused presentation.
    pub fn finished(&self) -> bool {
        self.finished
    }
}

impl Drop for NativeMedia {
    fn drop(&mut self) {
        // Mid-stream the decoder is still blocked on the pipe.
        if !self.reaped {
            let _ = self.child.kill();
        }
        self.reap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A stand-in frame source: emits exactly `frames` frames of zeroed
    // RGBA and then closes its stdout.
    fn frame_source(frames: usize) -> Command {
        let mut command = Command::new("sh");
        command.args(["-c", &format!("head -c {} /dev/zero", frames * FRAME_BYTES)]);
        command
    }

    #[test]
    fn end_of_stream_finishes_and_reaps_the_decoder() {
        let mut media = NativeMedia::start(frame_source(2)).unwrap();
        assert!(!media.finished());
        assert!(!media.reaped);

        media.play();
        // One interval consumes the second frame; the next hits EOF.
        media.advance(FRAME_INTERVAL);
        media.advance(FRAME_INTERVAL);
        assert!(media.finished());
        assert!(media.reaped);

        // A finished medium stays inert.
        assert!(!media.advance(FRAME_INTERVAL));
    }

    #[test]
    fn paused_media_never_consumes_frames() {
        let mut media = NativeMedia::start(frame_source(2)).unwrap();
        assert!(!media.advance(10.0 * FRAME_INTERVAL));
        assert!(!media.finished());
    }

    #[test]
    fn empty_stream_is_rejected_at_open() {
        assert!(NativeMedia::start(frame_source(0)).is_err());
    }
}
