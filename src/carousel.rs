use anyhow::{Result, bail};

use crate::constants::*;

struct TrackSlide {
    from: f32,
    to: f32,
    timer: f32,
}

/// One carousel: a wrapping index over a fixed set of slides, an eased
/// track offset, a heading lookup table, and an optional auto-advance
/// timer. Both page carousels are instances of this.
pub struct Carousel {
    index: usize,
    labels: Vec<String>,
    headings: Vec<String>,
    track_pos: f32,
    track: Option<TrackSlide>,
    auto_advance: Option<f32>,
}

impl Carousel {
    /// `labels` name each slide; `headings` is the per-index heading
    /// lookup. Both must be non-empty and the same length, so indicators
    /// can never disagree with the slide count.
    pub fn new(labels: Vec<String>, headings: Vec<String>, auto_advance: bool) -> Result<Self> {
        if labels.is_empty() {
            bail!("carousel needs at least one slide");
        }
        if labels.len() != headings.len() {
            bail!(
                "carousel has {} slides but {} headings",
                labels.len(),
                headings.len()
            );
        }
        Ok(Self {
            index: 0,
            labels,
            headings,
            track_pos: 0.0,
            track: None,
            auto_advance: auto_advance.then_some(0.0),
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn heading(&self) -> &str {
        &self.headings[self.index]
    }

    pub fn indicator_active(&self, i: usize) -> bool {
        i == self.index
    }

    pub fn next(&mut self) {
        let to = (self.index + 1) % self.len();
        self.set_index(to);
    }

    pub fn prev(&mut self) {
        let to = (self.index + self.len() - 1) % self.len();
        self.set_index(to);
    }

    /// Jump straight to slide `k` (indicator click). Out-of-range
    /// indices are ignored.
    pub fn goto(&mut self, k: usize) {
        if k < self.len() {
            self.set_index(k);
        }
    }

    fn set_index(&mut self, to: usize) {
        self.index = to;
        self.track = Some(TrackSlide {
            from: self.track_pos,
            to: to as f32,
            timer: 0.0,
        });
        // Manual or timed navigation both restart the interval.
        if let Some(timer) = &mut self.auto_advance {
            *timer = 0.0;
        }
    }

    /// Rendered track position in slide-widths; the track is drawn at
    /// `-track_offset() * slide_width`.
    pub fn track_offset(&self) -> f32 {
        self.track_pos
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(track) = &mut self.track {
            track.timer += dt;
            let t = (track.timer / TRACK_TRANSITION).min(1.0);
            let t = 1.0 - (1.0 - t).powi(3); // easeOutCubic
            self.track_pos = track.from + (track.to - track.from) * t;
            if track.timer >= TRACK_TRANSITION {
                self.track_pos = track.to;
                self.track = None;
            }
        }

        let fire = match &mut self.auto_advance {
            Some(timer) => {
                *timer += dt;
                *timer >= AUTO_ADVANCE_INTERVAL
            }
            None => false,
        };
        if fire {
            self.next();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(n: usize) -> Carousel {
        let labels: Vec<String> = (0..n).map(|i| format!("slide {i}")).collect();
        let headings = labels.clone();
        Carousel::new(labels, headings, false).unwrap()
    }

    #[test]
    fn next_then_prev_is_identity_for_every_start() {
        for n in 1..=6 {
            for start in 0..n {
                let mut c = carousel(n);
                c.goto(start);
                c.next();
                c.prev();
                assert_eq!(c.index(), start);
            }
        }
    }

    #[test]
    fn next_wraps_at_the_end_and_prev_at_the_start() {
        let mut c = carousel(6);
        c.goto(5);
        c.next();
        assert_eq!(c.index(), 0);
        c.prev();
        assert_eq!(c.index(), 5);
    }

    #[test]
    fn goto_marks_exactly_one_indicator_active() {
        let mut c = carousel(6);
        for k in 0..6 {
            c.goto(k);
            let active: Vec<usize> = (0..6).filter(|&i| c.indicator_active(i)).collect();
            assert_eq!(active, vec![k]);
        }
    }

    #[test]
    fn out_of_range_goto_is_ignored() {
        let mut c = carousel(4);
        c.goto(2);
        c.goto(4);
        c.goto(usize::MAX);
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn empty_or_mismatched_construction_is_rejected() {
        assert!(Carousel::new(vec![], vec![], false).is_err());
        assert!(Carousel::new(vec!["a".into()], vec![], false).is_err());
    }

    #[test]
    fn heading_follows_the_lookup_table() {
        let labels = vec!["About Me".into(), "Reading".into(), "Badminton".into()];
        let headings = vec!["About Me".into(), "My Hobbies".into(), "My Hobbies".into()];
        let mut c = Carousel::new(labels, headings, false).unwrap();
        assert_eq!(c.heading(), "About Me");
        c.next();
        assert_eq!(c.heading(), "My Hobbies");
    }

    #[test]
    fn track_settles_on_the_current_index() {
        let mut c = carousel(5);
        c.goto(3);
        for _ in 0..60 {
            c.update(1.0 / 60.0);
        }
        assert_eq!(c.track_offset(), 3.0);
        assert!(c.track.is_none());
    }

    #[test]
    fn auto_advance_fires_on_the_interval_and_manual_navigation_resets_it() {
        let labels: Vec<String> = (0..3).map(|i| i.to_string()).collect();
        let mut c = Carousel::new(labels.clone(), labels, true).unwrap();
        c.update(AUTO_ADVANCE_INTERVAL);
        assert_eq!(c.index(), 1);

        c.update(AUTO_ADVANCE_INTERVAL / 2.0);
        c.prev(); // resets the interval
        c.update(AUTO_ADVANCE_INTERVAL / 2.0);
        assert_eq!(c.index(), 0);
        c.update(AUTO_ADVANCE_INTERVAL / 2.0);
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn single_slide_carousel_never_moves() {
        let mut c = carousel(1);
        c.next();
        c.prev();
        assert_eq!(c.index(), 0);
        for _ in 0..60 {
            c.update(1.0 / 60.0);
        }
        assert_eq!(c.track_offset(), 0.0);
    }
}
