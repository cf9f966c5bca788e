use raylib::prelude::*;

use crate::constants::*;

const LINK_ROW_HEIGHT: f32 = 40.0;
const MENU_WIDTH: f32 = 220.0;

pub struct NavLink {
    pub label: String,
    pub target_y: f32,
}

pub enum NavResponse {
    Ignored,
    Consumed,
    /// An anchor link was activated: smooth-scroll to this page offset.
    Navigate(f32),
}

/// The pinned navbar: brand text, a hamburger-toggled link menu, and
/// the scroll progress bar. Activating a link always closes the menu.
pub struct Navbar {
    menu_open: bool,
    links: Vec<NavLink>,
}

impl Navbar {
    pub fn new(links: Vec<NavLink>) -> Self {
        Self {
            menu_open: false,
            links,
        }
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle(&mut self) {
        self.menu_open = !self.menu_open;
    }

    fn hamburger_rect(screen_width: f32) -> Rectangle {
        Rectangle::new(screen_width - 56.0, 16.0, 40.0, 32.0)
    }

    fn link_rect(&self, i: usize, screen_width: f32) -> Rectangle {
        Rectangle::new(
            screen_width - MENU_WIDTH,
            NAVBAR_HEIGHT + i as f32 * LINK_ROW_HEIGHT,
            MENU_WIDTH,
            LINK_ROW_HEIGHT,
        )
    }

    pub fn handle_click(&mut self, point: Vector2, screen_width: f32) -> NavResponse {
        if Self::hamburger_rect(screen_width).check_collision_point_rec(point) {
            self.toggle();
            return NavResponse::Consumed;
        }
        if self.menu_open {
            for (i, link) in self.links.iter().enumerate() {
                if self.link_rect(i, screen_width).check_collision_point_rec(point) {
                    self.menu_open = false;
                    return NavResponse::Navigate(link.target_y);
                }
            }
            // A stray click collapses the menu without navigating.
            self.menu_open = false;
            return NavResponse::Consumed;
        }
        NavResponse::Ignored
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, screen_width: f32, scrolled: bool, fraction: f32) {
        // Background variant swaps once the page is past the threshold.
        let bg = if scrolled {
            Color::new(255, 255, 255, 250)
        } else {
            Color::new(255, 255, 255, 242)
        };
        d.draw_rectangle_rec(
            Rectangle::new(0.0, 0.0, screen_width, NAVBAR_HEIGHT),
            bg,
        );
        if scrolled {
            // Soft shadow line under the scrolled variant.
            d.draw_rectangle_gradient_v(
                0,
                NAVBAR_HEIGHT as i32,
                screen_width as i32,
                6,
                Color::new(0, 0, 0, 26),
                Color::new(0, 0, 0, 0),
            );
        }

        d.draw_text("portfolio", 20, 20, 24, Color::new(43, 108, 176, 255));

        // Hamburger: three bars, crossed when the menu is open.
        let burger = Self::hamburger_rect(screen_width);
        let ink = Color::new(40, 40, 48, 255);
        if self.menu_open {
            d.draw_line_ex(
                Vector2::new(burger.x + 6.0, burger.y + 6.0),
                Vector2::new(burger.x + burger.width - 6.0, burger.y + burger.height - 6.0),
                3.0,
                ink,
            );
            d.draw_line_ex(
                Vector2::new(burger.x + burger.width - 6.0, burger.y + 6.0),
                Vector2::new(burger.x + 6.0, burger.y + burger.height - 6.0),
                3.0,
                ink,
            );
        } else {
            for row in 0..3 {
                d.draw_rectangle_rec(
                    Rectangle::new(burger.x + 4.0, burger.y + 6.0 + row as f32 * 9.0, 32.0, 3.0),
                    ink,
                );
            }
        }

        if self.menu_open {
            for (i, link) in self.links.iter().enumerate() {
                let rect = self.link_rect(i, screen_width);
                d.draw_rectangle_rec(rect, Color::new(255, 255, 255, 250));
                d.draw_text(
                    &link.label,
                    (rect.x + 16.0) as i32,
                    (rect.y + 10.0) as i32,
                    20,
                    ink,
                );
            }
        }

        // Scroll progress bar across the very top.
        d.draw_rectangle_gradient_h(
            0,
            0,
            (fraction * screen_width) as i32,
            PROGRESS_BAR_HEIGHT as i32,
            Color::new(43, 108, 176, 255),
            Color::new(49, 130, 206, 255),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navbar() -> Navbar {
        Navbar::new(vec![
            NavLink {
                label: "About".into(),
                target_y: 700.0,
            },
            NavLink {
                label: "Contact".into(),
                target_y: 2800.0,
            },
        ])
    }

    #[test]
    fn hamburger_click_toggles_the_menu() {
        let mut nav = navbar();
        let burger = Vector2::new(1280.0 - 40.0, 24.0);
        assert!(matches!(
            nav.handle_click(burger, 1280.0),
            NavResponse::Consumed
        ));
        assert!(nav.menu_open());
        nav.handle_click(burger, 1280.0);
        assert!(!nav.menu_open());
    }

    #[test]
    fn link_click_navigates_and_closes_the_menu() {
        let mut nav = navbar();
        nav.toggle();
        let second_link = Vector2::new(1280.0 - 100.0, NAVBAR_HEIGHT + LINK_ROW_HEIGHT + 10.0);
        match nav.handle_click(second_link, 1280.0) {
            NavResponse::Navigate(y) => assert_eq!(y, 2800.0),
            _ => panic!("expected navigation"),
        }
        assert!(!nav.menu_open());
    }

    #[test]
    fn stray_click_collapses_without_navigating() {
        let mut nav = navbar();
        nav.toggle();
        let outside = Vector2::new(100.0, 400.0);
        assert!(matches!(
            nav.handle_click(outside, 1280.0),
            NavResponse::Consumed
        ));
        assert!(!nav.menu_open());
    }

    #[test]
    fn clicks_fall_through_when_the_menu_is_closed() {
        let mut nav = navbar();
        let outside = Vector2::new(100.0, 400.0);
        assert!(matches!(
            nav.handle_click(outside, 1280.0),
            NavResponse::Ignored
        ));
    }
}
