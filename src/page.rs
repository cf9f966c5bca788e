use std::path::PathBuf;

use anyhow::Result;
use raylib::prelude::*;
use tracing::warn;

use crate::carousel::Carousel;
use crate::constants::*;
use crate::reveal::Reveal;
use crate::scroll::Scroll;
use crate::texture_loader::{caption_for, load_texture, sorted_image_paths};
use crate::video::VideoPanel;

const CONTENT_MAX_WIDTH: f32 = 1000.0;
const CAROUSEL_HEADING_SPACE: f32 = 48.0;
const CAROUSEL_FOOTER_SPACE: f32 = 70.0;
const CARD_HEIGHT: f32 = 150.0;
const CARD_GAP: f32 = 20.0;
const CARD_COLUMNS: usize = 3;

const ABOUT_SLIDES: [&str; 6] = [
    "About Me",
    "Reading",
    "Badminton",
    "Running",
    "Speedcubing",
    "Making Videos",
];

// Placeholder tints for slides whose image is missing or not yet loaded.
fn slide_tint(i: usize) -> Color {
    const TINTS: [(u8, u8, u8); 6] = [
        (43, 108, 176),
        (49, 130, 206),
        (56, 161, 105),
        (214, 158, 46),
        (197, 48, 48),
        (128, 90, 213),
    ];
    let (r, g, b) = TINTS[i % TINTS.len()];
    Color::new(r, g, b, 255)
}

struct SlideArt {
    path: Option<PathBuf>,
    texture: Option<Texture2D>,
    caption: String,
    tint: Color,
}

/// A carousel bound to its slide artwork. Textures are decoded lazily,
/// the first time the owning section comes into view.
pub struct CarouselPanel {
    pub carousel: Carousel,
    slides: Vec<SlideArt>,
    textures_loaded: bool,
}

impl CarouselPanel {
    /// The About carousel: a fixed slide set (About plus five hobbies)
    /// with the heading rule: "About Me" on the first slide, "My
    /// Hobbies" on every other.
    pub fn about(image_dir: &std::path::Path, auto_advance: bool) -> Result<Self> {
        let paths = sorted_image_paths(image_dir).unwrap_or_else(|e| {
            warn!(error = %e, "about carousel runs without images");
            Vec::new()
        });
        let labels: Vec<String> = ABOUT_SLIDES.iter().map(|s| s.to_string()).collect();
        let headings: Vec<String> = (0..ABOUT_SLIDES.len())
            .map(|i| {
                if i == 0 {
                    "About Me".to_string()
                } else {
                    "My Hobbies".to_string()
                }
            })
            .collect();
        let slides = labels
            .iter()
            .enumerate()
            .map(|(i, label)| SlideArt {
                path: paths.get(i).cloned(),
                texture: None,
                caption: label.clone(),
                tint: slide_tint(i),
            })
            .collect();
        Ok(Self {
            carousel: Carousel::new(labels, headings, auto_advance)?,
            slides,
            textures_loaded: false,
        })
    }

    /// The food carousel: one slide per image in the directory, headed
    /// by the image's own caption.
    pub fn food(image_dir: &std::path::Path, auto_advance: bool) -> Result<Self> {
        let paths = sorted_image_paths(image_dir)?;
        let labels: Vec<String> = paths.iter().map(|p| caption_for(p)).collect();
        let headings = labels.clone();
        let slides = paths
            .iter()
            .enumerate()
            .map(|(i, path)| SlideArt {
                path: Some(path.clone()),
                texture: None,
                caption: labels[i].clone(),
                tint: slide_tint(i),
            })
            .collect();
        Ok(Self {
            carousel: Carousel::new(labels, headings, auto_advance)?,
            slides,
            textures_loaded: false,
        })
    }

    fn ensure_textures(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        if self.textures_loaded {
            return;
        }
        self.textures_loaded = true;
        for slide in &mut self.slides {
            let Some(path) = &slide.path else { continue };
            match load_texture(rl, thread, path) {
                Ok(texture) => slide.texture = Some(texture),
                Err(e) => warn!(error = %e, "slide keeps its placeholder"),
            }
        }
    }

    fn slide_area(rect: Rectangle) -> Rectangle {
        Rectangle::new(
            rect.x,
            rect.y + CAROUSEL_HEADING_SPACE,
            rect.width,
            rect.height - CAROUSEL_HEADING_SPACE - CAROUSEL_FOOTER_SPACE,
        )
    }

    fn prev_button(rect: Rectangle) -> Rectangle {
        let area = Self::slide_area(rect);
        Rectangle::new(area.x + 8.0, area.y + area.height / 2.0 - 18.0, 36.0, 36.0)
    }

    fn next_button(rect: Rectangle) -> Rectangle {
        let area = Self::slide_area(rect);
        Rectangle::new(
            area.x + area.width - 44.0,
            area.y + area.height / 2.0 - 18.0,
            36.0,
            36.0,
        )
    }

    fn indicator_center(&self, rect: Rectangle, i: usize) -> Vector2 {
        let area = Self::slide_area(rect);
        let n = self.carousel.len() as f32;
        let spacing = 24.0;
        let first_x = rect.x + rect.width / 2.0 - (n - 1.0) * spacing / 2.0;
        Vector2::new(first_x + i as f32 * spacing, area.y + area.height + 28.0)
    }

    fn handle_click(&mut self, rect: Rectangle, point: Vector2) -> bool {
        if Self::prev_button(rect).check_collision_point_rec(point) {
            self.carousel.prev();
            return true;
        }
        if Self::next_button(rect).check_collision_point_rec(point) {
            self.carousel.next();
            return true;
        }
        for i in 0..self.carousel.len() {
            let center = self.indicator_center(rect, i);
            let dot = Rectangle::new(center.x - 9.0, center.y - 9.0, 18.0, 18.0);
            if dot.check_collision_point_rec(point) {
                self.carousel.goto(i);
                return true;
            }
        }
        false
    }

    fn draw(&self, d: &mut RaylibDrawHandle, rect: Rectangle, alpha: f32) {
        let ink = Color::new(26, 32, 44, 255).fade(alpha);

        d.draw_text(
            self.carousel.heading(),
            rect.x as i32,
            (rect.y + 8.0) as i32,
            28,
            ink,
        );

        let area = Self::slide_area(rect);
        let track = self.carousel.track_offset();
        for (i, slide) in self.slides.iter().enumerate() {
            let shift = (i as f32 - track) * area.width;
            // Outside the one-slide window on either side: nothing of it
            // can intersect the slide area.
            if shift.abs() >= area.width {
                continue;
            }
            let dest = Rectangle::new(area.x + shift, area.y, area.width, area.height);
            draw_clipped_slide(d, slide, dest, area, alpha);
            if shift.abs() < area.width * 0.5 {
                d.draw_text(
                    &slide.caption,
                    (area.x + 16.0) as i32,
                    (area.y + area.height - 34.0) as i32,
                    20,
                    Color::WHITE.fade(alpha),
                );
            }
        }

        // Prev / next arrows.
        let control = Color::WHITE.fade(0.9 * alpha);
        let prev = Self::prev_button(rect);
        d.draw_triangle(
            Vector2::new(prev.x + prev.width, prev.y),
            Vector2::new(prev.x, prev.y + prev.height / 2.0),
            Vector2::new(prev.x + prev.width, prev.y + prev.height),
            control,
        );
        let next = Self::next_button(rect);
        d.draw_triangle(
            Vector2::new(next.x, next.y),
            Vector2::new(next.x, next.y + next.height),
            Vector2::new(next.x + next.width, next.y + next.height / 2.0),
            control,
        );

        // Indicator dots, exactly one active.
        for i in 0..self.carousel.len() {
            let center = self.indicator_center(rect, i);
            let color = if self.carousel.indicator_active(i) {
                Color::new(43, 108, 176, 255).fade(alpha)
            } else {
                Color::new(160, 174, 192, 255).fade(alpha)
            };
            d.draw_circle(center.x as i32, center.y as i32, 6.0, color);
        }
    }
}

// Draw one slide clipped to the slide area. dest is the slide's full
// rectangle on the track; only its intersection with the area is drawn,
// with the texture source cropped to match.
fn draw_clipped_slide(
    d: &mut RaylibDrawHandle,
    slide: &SlideArt,
    dest: Rectangle,
    area: Rectangle,
    alpha: f32,
) {
    let left = dest.x.max(area.x);
    let right = (dest.x + dest.width).min(area.x + area.width);
    if right <= left {
        return;
    }
    let visible = Rectangle::new(left, dest.y, right - left, dest.height);

    match &slide.texture {
        Some(texture) => {
            let tex_w = texture.width() as f32;
            let tex_h = texture.height() as f32;
            let src_x = (left - dest.x) / dest.width * tex_w;
            let src_w = visible.width / dest.width * tex_w;
            d.draw_texture_pro(
                texture,
                Rectangle::new(src_x, 0.0, src_w, tex_h),
                visible,
                Vector2::new(0.0, 0.0),
                0.0,
                Color::WHITE.fade(alpha),
            );
        }
        None => {
            d.draw_rectangle_rec(visible, slide.tint.fade(alpha));
        }
    }
}

pub struct Card {
    pub title: String,
    pub blurb: String,
    hovered: bool,
    art_path: Option<PathBuf>,
    art: Option<Texture2D>,
}

impl Card {
    pub fn new(title: &str, blurb: &str) -> Self {
        Self {
            title: title.to_string(),
            blurb: blurb.to_string(),
            hovered: false,
            art_path: None,
            art: None,
        }
    }
}

/// A grid of work/project cards with the hover lift from the original
/// page: the card under the cursor rises and scales up slightly. Cards
/// may carry a thumbnail, decoded lazily like the carousel slides.
pub struct CardGrid {
    cards: Vec<Card>,
    textures_loaded: bool,
}

impl CardGrid {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards,
            textures_loaded: false,
        }
    }

    /// Pair the cards with the images of an asset directory, in sorted
    /// order. Cards without a matching image simply stay text-only, as
    /// does the whole grid when the directory is absent.
    pub fn attach_images(&mut self, dir: &std::path::Path) {
        let Ok(paths) = sorted_image_paths(dir) else {
            return;
        };
        for (card, path) in self.cards.iter_mut().zip(paths) {
            card.art_path = Some(path);
        }
    }

    fn ensure_textures(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        if self.textures_loaded {
            return;
        }
        self.textures_loaded = true;
        for card in &mut self.cards {
            let Some(path) = &card.art_path else { continue };
            match load_texture(rl, thread, path) {
                Ok(texture) => card.art = Some(texture),
                Err(e) => warn!(error = %e, "card stays text-only"),
            }
        }
    }

    pub fn grid_height(&self) -> f32 {
        let rows = self.cards.len().div_ceil(CARD_COLUMNS) as f32;
        rows * (CARD_HEIGHT + CARD_GAP)
    }

    fn card_rect(&self, i: usize, rect: Rectangle) -> Rectangle {
        let column_width = (rect.width - (CARD_COLUMNS as f32 - 1.0) * CARD_GAP) / CARD_COLUMNS as f32;
        let col = (i % CARD_COLUMNS) as f32;
        let row = (i / CARD_COLUMNS) as f32;
        Rectangle::new(
            rect.x + col * (column_width + CARD_GAP),
            rect.y + CAROUSEL_HEADING_SPACE + row * (CARD_HEIGHT + CARD_GAP),
            column_width,
            CARD_HEIGHT,
        )
    }

    fn update_hover(&mut self, rect: Rectangle, mouse: Vector2) {
        for i in 0..self.cards.len() {
            let hovered = self.card_rect(i, rect).check_collision_point_rec(mouse);
            self.cards[i].hovered = hovered;
        }
    }

    fn draw(&self, d: &mut RaylibDrawHandle, title: &str, rect: Rectangle, alpha: f32) {
        let ink = Color::new(26, 32, 44, 255).fade(alpha);
        d.draw_text(title, rect.x as i32, (rect.y + 8.0) as i32, 28, ink);

        for (i, card) in self.cards.iter().enumerate() {
            let mut r = self.card_rect(i, rect);
            if card.hovered {
                let grow_w = r.width * (CARD_HOVER_SCALE - 1.0);
                let grow_h = r.height * (CARD_HOVER_SCALE - 1.0);
                r = Rectangle::new(
                    r.x - grow_w / 2.0,
                    r.y - grow_h / 2.0 - CARD_HOVER_RISE,
                    r.width + grow_w,
                    r.height + grow_h,
                );
            }
            d.draw_rectangle_rec(r, Color::WHITE.fade(alpha));
            d.draw_rectangle_lines_ex(r, 1.0, Color::new(203, 213, 224, 255).fade(alpha));
            if let Some(art) = &card.art {
                d.draw_texture_pro(
                    art,
                    Rectangle::new(0.0, 0.0, art.width() as f32, art.height() as f32),
                    Rectangle::new(r.x + r.width - 62.0, r.y + 14.0, 48.0, 48.0),
                    Vector2::new(0.0, 0.0),
                    0.0,
                    Color::WHITE.fade(alpha),
                );
            }
            d.draw_text(&card.title, (r.x + 14.0) as i32, (r.y + 14.0) as i32, 20, ink);
            d.draw_text(
                &card.blurb,
                (r.x + 14.0) as i32,
                (r.y + 44.0) as i32,
                16,
                Color::new(74, 85, 104, 255).fade(alpha),
            );
        }
    }
}

pub enum SectionKind {
    Hero { name: String, tagline: String },
    Carousel(CarouselPanel),
    Cards(CardGrid),
    Video(VideoPanel),
    Contact { email: String },
}

pub struct Section {
    pub id: &'static str,
    pub title: String,
    pub top: f32,
    pub height: f32,
    pub reveal: Reveal,
    pub kind: SectionKind,
}

impl Section {
    fn in_view(&self, scroll: &Scroll) -> bool {
        let view_top = scroll.offset();
        let view_bottom = scroll.offset() + scroll.viewport();
        self.top < view_bottom && self.top + self.height > view_top
    }

    fn content_rect(&self, scroll: &Scroll, screen_width: f32) -> Rectangle {
        let width = (screen_width - 80.0).min(CONTENT_MAX_WIDTH);
        Rectangle::new(
            (screen_width - width) / 2.0,
            NAVBAR_HEIGHT + self.top - scroll.offset() + self.reveal.offset_y() + 24.0,
            width,
            self.height - 48.0,
        )
    }
}

/// The whole page: an ordered stack of sections with precomputed
/// vertical extents. Everything the navbar links to lives here.
pub struct Page {
    pub sections: Vec<Section>,
    pub height: f32,
}

impl Page {
    pub fn build(
        assets: &std::path::Path,
        video: Option<VideoPanel>,
        auto_advance: bool,
    ) -> Result<Self> {
        let mut work = CardGrid::new(vec![
            Card::new("Research Assistant", "Data tooling for a vision lab"),
            Card::new("Teaching Assistant", "Intro programming labs"),
            Card::new("Web Intern", "Marketing site rebuild"),
        ]);
        work.attach_images(&assets.join("work"));
        let mut projects = CardGrid::new(vec![
            Card::new("Cube Timer", "Speedcubing session tracker"),
            Card::new("Trail Mapper", "GPX visualizer for runs"),
            Card::new("Shelf", "Reading list with notes"),
            Card::new("Clip Kit", "Small video editing helpers"),
        ]);
        projects.attach_images(&assets.join("projects"));

        let mut sections = Vec::new();
        let mut top = 0.0;
        let mut push = |sections: &mut Vec<Section>, id, title: &str, height: f32, kind| {
            sections.push(Section {
                id,
                title: title.to_string(),
                top,
                height,
                reveal: Reveal::new(),
                kind,
            });
            top += height;
        };

        push(
            &mut sections,
            "home",
            "Home",
            520.0,
            SectionKind::Hero {
                name: "Hi, I'm Sam.".to_string(),
                tagline: "I build small, careful software.".to_string(),
            },
        );
        push(
            &mut sections,
            "about",
            "About",
            560.0,
            SectionKind::Carousel(CarouselPanel::about(&assets.join("about"), auto_advance)?),
        );
        let work_height = work.grid_height() + 120.0;
        push(&mut sections, "work", "Work", work_height, SectionKind::Cards(work));
        let project_height = projects.grid_height() + 120.0;
        push(
            &mut sections,
            "projects",
            "Projects",
            project_height,
            SectionKind::Cards(projects),
        );
        push(
            &mut sections,
            "food",
            "Food",
            560.0,
            SectionKind::Carousel(CarouselPanel::food(&assets.join("food"), auto_advance)?),
        );
        if let Some(panel) = video {
            push(
                &mut sections,
                "video",
                "Video",
                480.0,
                SectionKind::Video(panel),
            );
        }
        push(
            &mut sections,
            "contact",
            "Contact",
            280.0,
            SectionKind::Contact {
                email: "sam@example.com".to_string(),
            },
        );

        Ok(Self {
            sections,
            height: top,
        })
    }

    pub fn nav_links(&self) -> Vec<crate::navbar::NavLink> {
        self.sections
            .iter()
            .map(|s| crate::navbar::NavLink {
                label: s.title.clone(),
                target_y: s.top,
            })
            .collect()
    }

    pub fn update(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        dt: f32,
        scroll: &Scroll,
    ) {
        let mouse = rl.get_mouse_position();
        let screen_width = rl.get_screen_width() as f32;
        for section in &mut self.sections {
            section.reveal.observe(
                section.top,
                section.top + section.height,
                scroll.offset(),
                scroll.viewport(),
            );
            section.reveal.update(dt);

            let in_view = section.in_view(scroll);
            let rect = section.content_rect(scroll, screen_width);
            match &mut section.kind {
                SectionKind::Carousel(panel) => {
                    if in_view {
                        // Lazy decode, deferred until first visibility.
                        panel.ensure_textures(rl, thread);
                    }
                    panel.carousel.update(dt);
                }
                SectionKind::Cards(grid) => {
                    if in_view {
                        grid.ensure_textures(rl, thread);
                        grid.update_hover(rect, mouse);
                    }
                }
                SectionKind::Video(panel) => panel.update(dt),
                _ => {}
            }
        }
    }

    /// A click below the navbar. Returns true once some widget took it.
    pub fn handle_click(&mut self, rl: &mut RaylibHandle, point: Vector2, scroll: &Scroll) -> bool {
        let screen_width = rl.get_screen_width() as f32;
        for section in &mut self.sections {
            if !section.in_view(scroll) {
                continue;
            }
            let rect = section.content_rect(scroll, screen_width);
            match &mut section.kind {
                SectionKind::Carousel(panel) => {
                    if panel.handle_click(rect, point) {
                        return true;
                    }
                }
                SectionKind::Video(panel) => {
                    let frame = video_frame_rect(rect);
                    if panel.handle_click(rl, frame, point) {
                        return true;
                    }
                }
                _ => {}
            }
        }
        false
    }

    /// Keyboard routing. Arrow keys drive the About carousel while its
    /// section is in view; space and F drive a visible video panel.
    pub fn handle_keys(&mut self, rl: &mut RaylibHandle, scroll: &Scroll) {
        let left = rl.is_key_pressed(KeyboardKey::KEY_LEFT);
        let right = rl.is_key_pressed(KeyboardKey::KEY_RIGHT);
        for section in &mut self.sections {
            if !section.in_view(scroll) {
                continue;
            }
            match &mut section.kind {
                SectionKind::Carousel(panel) if section.id == "about" => {
                    if left {
                        panel.carousel.prev();
                    }
                    if right {
                        panel.carousel.next();
                    }
                }
                SectionKind::Video(panel) => panel.handle_keys(rl),
                _ => {}
            }
        }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, scroll: &Scroll) {
        let screen_width = d.get_screen_width() as f32;
        for section in &self.sections {
            if !section.in_view(scroll) {
                continue;
            }
            let alpha = section.reveal.alpha();
            let rect = section.content_rect(scroll, screen_width);
            match &section.kind {
                SectionKind::Hero { name, tagline } => {
                    let ink = Color::new(26, 32, 44, 255).fade(alpha);
                    d.draw_text(name, rect.x as i32, (rect.y + 140.0) as i32, 48, ink);
                    d.draw_text(
                        tagline,
                        rect.x as i32,
                        (rect.y + 210.0) as i32,
                        24,
                        Color::new(74, 85, 104, 255).fade(alpha),
                    );
                }
                SectionKind::Carousel(panel) => panel.draw(d, rect, alpha),
                SectionKind::Cards(grid) => grid.draw(d, &section.title, rect, alpha),
                SectionKind::Video(panel) => {
                    let ink = Color::new(26, 32, 44, 255).fade(alpha);
                    d.draw_text(&section.title, rect.x as i32, (rect.y + 8.0) as i32, 28, ink);
                    panel.draw(d, video_frame_rect(rect), alpha);
                }
                SectionKind::Contact { email } => {
                    let ink = Color::new(26, 32, 44, 255).fade(alpha);
                    d.draw_text(&section.title, rect.x as i32, (rect.y + 8.0) as i32, 28, ink);
                    d.draw_text(
                        email,
                        rect.x as i32,
                        (rect.y + 60.0) as i32,
                        22,
                        Color::new(43, 108, 176, 255).fade(alpha),
                    );
                }
            }
        }
    }
}

// 16:9 frame centered in the section below its heading.
fn video_frame_rect(rect: Rectangle) -> Rectangle {
    let avail_h = rect.height - CAROUSEL_HEADING_SPACE;
    let width = rect.width.min(avail_h * 16.0 / 9.0);
    let height = width * 9.0 / 16.0;
    Rectangle::new(
        rect.x + (rect.width - width) / 2.0,
        rect.y + CAROUSEL_HEADING_SPACE,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_height_counts_full_rows() {
        let grid = CardGrid::new(vec![
            Card::new("a", ""),
            Card::new("b", ""),
            Card::new("c", ""),
            Card::new("d", ""),
        ]);
        // 4 cards over 3 columns -> 2 rows.
        assert_eq!(grid.grid_height(), 2.0 * (CARD_HEIGHT + CARD_GAP));
    }

    #[test]
    fn page_layout_is_cumulative_and_video_is_optional() {
        let root = std::env::temp_dir().join("folio-page-layout-test");
        let food = root.join("food");
        std::fs::create_dir_all(&food).unwrap();
        // Never decoded: texture loading is deferred past build.
        std::fs::write(food.join("pad_thai.jpg"), b"stub").unwrap();

        let page = Page::build(&root, None, false).unwrap();

        let mut expected_top = 0.0;
        for section in &page.sections {
            assert_eq!(section.top, expected_top);
            expected_top += section.height;
        }
        assert_eq!(page.height, expected_top);
        assert_eq!(page.nav_links().len(), page.sections.len());
        assert!(page.sections.iter().any(|s| s.id == "about"));
        assert!(page.sections.iter().all(|s| s.id != "video"));
    }

    #[test]
    fn cards_pick_up_artwork_paths_without_decoding() {
        let root = std::env::temp_dir().join("folio-card-art-test");
        let work = root.join("work");
        std::fs::create_dir_all(root.join("food")).unwrap();
        std::fs::create_dir_all(&work).unwrap();
        std::fs::write(root.join("food").join("ramen.jpg"), b"stub").unwrap();
        std::fs::write(work.join("a_lab.png"), b"stub").unwrap();
        std::fs::write(work.join("b_lab.png"), b"stub").unwrap();

        let page = Page::build(&root, None, false).unwrap();
        let section = page.sections.iter().find(|s| s.id == "work").unwrap();
        let SectionKind::Cards(grid) = &section.kind else {
            panic!("work section holds cards");
        };
        // Two images pair with the first two cards; the third stays
        // text-only. Nothing is decoded until the section is seen.
        assert!(grid.cards[0].art_path.is_some());
        assert!(grid.cards[1].art_path.is_some());
        assert!(grid.cards[2].art_path.is_none());
        assert!(!grid.textures_loaded);
        assert!(grid.cards.iter().all(|c| c.art.is_none()));
    }

    #[test]
    fn video_frame_keeps_sixteen_by_nine() {
        let rect = Rectangle::new(0.0, 0.0, 1000.0, 480.0);
        let frame = video_frame_rect(rect);
        let ratio = frame.width / frame.height;
        assert!((ratio - 16.0 / 9.0).abs() < 0.01);
        assert!(frame.width <= rect.width);
    }
}
