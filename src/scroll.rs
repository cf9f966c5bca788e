use crate::constants::*;

// Eased ease-out cubic, clamped to the end value.
fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

struct AnchorJump {
    from: f32,
    to: f32,
    timer: f32,
}

/// Vertical scroll position of the page.
///
/// Owns the offset, its clamping range, and the smooth anchor animation.
/// The progress bar and the navbar variant both read from here.
pub struct Scroll {
    offset: f32,
    page_height: f32,
    viewport: f32,
    jump: Option<AnchorJump>,
}

impl Scroll {
    pub fn new(page_height: f32, viewport: f32) -> Self {
        Self {
            offset: 0.0,
            page_height,
            viewport,
            jump: None,
        }
    }

    fn max_offset(&self) -> f32 {
        (self.page_height - self.viewport).max(0.0)
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn viewport(&self) -> f32 {
        self.viewport
    }

    /// Immediate scroll by raw pixels. User input wins over a running
    /// anchor animation.
    pub fn scroll_by(&mut self, pixels: f32) {
        self.jump = None;
        self.offset = (self.offset + pixels).clamp(0.0, self.max_offset());
    }

    /// Mouse wheel, in notches. Wheel up (positive) moves toward the top.
    pub fn wheel(&mut self, notches: f32) {
        if notches != 0.0 {
            self.scroll_by(-notches * WHEEL_STEP);
        }
    }

    /// Begin a smooth jump to an absolute page position (anchor link).
    pub fn jump_to(&mut self, y: f32) {
        let to = y.clamp(0.0, self.max_offset());
        self.jump = Some(AnchorJump {
            from: self.offset,
            to,
            timer: 0.0,
        });
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(jump) = &mut self.jump {
            jump.timer += dt;
            let t = (jump.timer / SMOOTH_SCROLL_DURATION).min(1.0);
            let t = ease_out_cubic(t);
            self.offset = jump.from + (jump.to - jump.from) * t;
            if jump.timer >= SMOOTH_SCROLL_DURATION {
                self.offset = jump.to;
                self.jump = None;
            }
        }
    }

    /// Window or page size changed. The offset keeps its value but is
    /// re-clamped against the new range.
    pub fn resize(&mut self, page_height: f32, viewport: f32) {
        self.page_height = page_height;
        self.viewport = viewport;
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    /// Scrolled fraction of the page in [0, 1]. A page that fits the
    /// viewport counts as fully unscrolled.
    pub fn fraction(&self) -> f32 {
        let range = self.page_height - self.viewport;
        if range <= 0.0 {
            0.0
        } else {
            (self.offset / range).clamp(0.0, 1.0)
        }
    }

    /// The navbar swaps to its scrolled variant past a fixed threshold.
    pub fn is_scrolled(&self) -> bool {
        self.offset > SCROLLED_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_is_zero_at_top_and_one_at_bottom() {
        let mut scroll = Scroll::new(3000.0, 800.0);
        assert_eq!(scroll.fraction(), 0.0);
        scroll.scroll_by(10_000.0);
        assert_eq!(scroll.offset(), 2200.0);
        assert_eq!(scroll.fraction(), 1.0);
    }

    #[test]
    fn fraction_is_monotone_under_monotone_scroll() {
        let mut scroll = Scroll::new(4000.0, 800.0);
        let mut last = scroll.fraction();
        for _ in 0..60 {
            scroll.wheel(-1.0);
            let now = scroll.fraction();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn short_page_reports_zero_fraction() {
        let scroll = Scroll::new(500.0, 800.0);
        assert_eq!(scroll.fraction(), 0.0);
    }

    #[test]
    fn navbar_variant_threshold() {
        let mut scroll = Scroll::new(3000.0, 800.0);
        scroll.scroll_by(50.0);
        assert!(!scroll.is_scrolled());
        scroll.scroll_by(1.0);
        assert!(scroll.is_scrolled());
    }

    #[test]
    fn anchor_jump_lands_on_target() {
        let mut scroll = Scroll::new(3000.0, 800.0);
        scroll.jump_to(1200.0);
        for _ in 0..60 {
            scroll.update(1.0 / 60.0);
        }
        assert_eq!(scroll.offset(), 1200.0);
    }

    #[test]
    fn wheel_cancels_running_jump() {
        let mut scroll = Scroll::new(3000.0, 800.0);
        scroll.jump_to(2000.0);
        scroll.update(0.1);
        let mid = scroll.offset();
        scroll.wheel(1.0);
        scroll.update(1.0);
        assert_eq!(scroll.offset(), (mid - WHEEL_STEP).max(0.0));
    }

    #[test]
    fn jump_target_is_clamped_to_page() {
        let mut scroll = Scroll::new(1000.0, 800.0);
        scroll.jump_to(5000.0);
        for _ in 0..60 {
            scroll.update(1.0 / 60.0);
        }
        assert_eq!(scroll.offset(), 200.0);
    }
}
