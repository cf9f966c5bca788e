use crate::constants::*;

#[derive(Debug, PartialEq, Clone, Copy)]
enum Phase {
    Hidden,           // Never been inside the viewport
    Fading,           // Transition running
    Shown,            // Done, stays done
}

/// One-shot fade-in for a section: arms the first time the section enters
/// the (margin-shrunk) viewport, runs a fixed fade, and never reverts.
pub struct Reveal {
    phase: Phase,
    timer: f32,
}

impl Reveal {
    pub fn new() -> Self {
        Self {
            phase: Phase::Hidden,
            timer: 0.0,
        }
    }

    /// Visibility check against the viewport, in page coordinates.
    /// `top`/`bottom` bound the section; the viewport spans
    /// `[scroll_offset, scroll_offset + viewport_height - REVEAL_MARGIN]`.
    /// Arms the fade once at least REVEAL_THRESHOLD of the section height
    /// overlaps that span.
    pub fn observe(&mut self, top: f32, bottom: f32, scroll_offset: f32, viewport_height: f32) {
        if self.phase != Phase::Hidden {
            return;
        }
        let view_top = scroll_offset;
        let view_bottom = scroll_offset + viewport_height - REVEAL_MARGIN;
        let overlap = bottom.min(view_bottom) - top.max(view_top);
        let height = (bottom - top).max(1.0);
        if overlap / height >= REVEAL_THRESHOLD {
            self.phase = Phase::Fading;
            self.timer = 0.0;
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.phase == Phase::Fading {
            self.timer += dt;
            if self.timer >= REVEAL_DURATION {
                self.phase = Phase::Shown;
            }
        }
    }

    fn progress(&self) -> f32 {
        match self.phase {
            Phase::Hidden => 0.0,
            Phase::Fading => (self.timer / REVEAL_DURATION).min(1.0),
            Phase::Shown => 1.0,
        }
    }

    /// Opacity in [0, 1].
    pub fn alpha(&self) -> f32 {
        self.progress()
    }

    /// Vertical draw offset: starts REVEAL_RISE below, settles at 0.
    pub fn offset_y(&self) -> f32 {
        REVEAL_RISE * (1.0 - self.progress())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(reveal: &mut Reveal, seconds: f32) {
        let steps = (seconds * 60.0) as u32;
        for _ in 0..steps {
            reveal.update(1.0 / 60.0);
        }
    }

    #[test]
    fn hidden_until_observed() {
        let mut reveal = Reveal::new();
        run(&mut reveal, 5.0);
        assert_eq!(reveal.alpha(), 0.0);
        assert_eq!(reveal.offset_y(), REVEAL_RISE);
    }

    #[test]
    fn fades_in_exactly_once_on_first_intersection() {
        let mut reveal = Reveal::new();
        // Section at [1000, 1400), viewport 800 tall, scrolled to 500:
        // visible span is [500, 1250), overlap 250 of 400 -> armed.
        reveal.observe(1000.0, 1400.0, 500.0, 800.0);
        run(&mut reveal, 1.0);
        assert_eq!(reveal.alpha(), 1.0);
        assert_eq!(reveal.offset_y(), 0.0);
    }

    #[test]
    fn never_reverts_after_leaving_the_viewport() {
        let mut reveal = Reveal::new();
        reveal.observe(1000.0, 1400.0, 500.0, 800.0);
        run(&mut reveal, 1.0);
        // Scrolled far past: no overlap at all.
        reveal.observe(1000.0, 1400.0, 9000.0, 800.0);
        run(&mut reveal, 1.0);
        assert_eq!(reveal.alpha(), 1.0);
    }

    #[test]
    fn below_threshold_overlap_does_not_arm() {
        let mut reveal = Reveal::new();
        // Section 400 tall, only 20 px inside the margin-shrunk viewport.
        reveal.observe(730.0, 1130.0, 0.0, 800.0);
        run(&mut reveal, 1.0);
        assert_eq!(reveal.alpha(), 0.0);
    }

    #[test]
    fn alpha_rises_during_the_fade() {
        let mut reveal = Reveal::new();
        reveal.observe(0.0, 400.0, 0.0, 800.0);
        reveal.update(REVEAL_DURATION / 2.0);
        let mid = reveal.alpha();
        assert!(mid > 0.0 && mid < 1.0);
        assert!(reveal.offset_y() > 0.0 && reveal.offset_y() < REVEAL_RISE);
    }
}
