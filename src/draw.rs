// Window + input handling.
// Visual effects provided here:
// 1) A window that shows the toonified camera image.
// 2) The window title names the active stylization.
// 3) Double-click (or Space) cycles to the next stylization.

use minifb::{Key, KeyRepeat, MouseButton, Window, WindowOptions};
use std::time::{Duration, Instant};
use toon_up::convert::frame_to_0rgb;
use toon_up::{Error, FrameBuffer};

/// Two presses closer than this count as a double-click.
const DOUBLE_CLICK: Duration = Duration::from_millis(400);

pub struct Drawer {
    window: Window,      // the on-screen window you see
    pixels: Vec<u32>,    // reused 0x00RRGGBB scratch for minifb
    clicks: ClickTracker,
}

impl Drawer {
    /// Create a window sized to the camera feed.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self {
            window,
            pixels: Vec::with_capacity(width * height),
            clicks: ClickTracker::default(),
        })
    }

    /// Push a processed frame to the screen.
    /// Visual: the window immediately displays the new image (live video).
    pub fn present(&mut self, frame: &FrameBuffer) -> Result<(), Error> {
        frame_to_0rgb(frame, &mut self.pixels);
        self.window
            .update_with_buffer(&self.pixels, frame.width(), frame.height())
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we’ll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Poll once per frame. True on a double-click or a Space press.
    pub fn rotate_requested(&mut self) -> bool {
        let space = self.window.is_key_pressed(Key::Space, KeyRepeat::No);
        let down = self.window.get_mouse_down(MouseButton::Left);
        let double = self.clicks.update(down, Instant::now());
        space || double
    }
}

/// Turns the polled left-button state into double-click events.
#[derive(Debug, Default)]
struct ClickTracker {
    was_down: bool,
    last_press: Option<Instant>,
}

impl ClickTracker {
    fn update(&mut self, down: bool, now: Instant) -> bool {
        let pressed = down && !self.was_down;
        self.was_down = down;
        if !pressed {
            return false;
        }
        match self.last_press {
            Some(prev) if now.duration_since(prev) <= DOUBLE_CLICK => {
                // A third click starts a new pair.
                self.last_press = None;
                true
            }
            _ => {
                self.last_press = Some(now);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_quick_presses_make_a_double_click() {
        let t0 = Instant::now();
        let mut c = ClickTracker::default();
        assert!(!c.update(true, t0));
        assert!(!c.update(true, t0 + Duration::from_millis(50))); // still held
        assert!(!c.update(false, t0 + Duration::from_millis(100)));
        assert!(c.update(true, t0 + Duration::from_millis(200)));
    }

    #[test]
    fn slow_presses_do_not() {
        let t0 = Instant::now();
        let mut c = ClickTracker::default();
        assert!(!c.update(true, t0));
        assert!(!c.update(false, t0 + Duration::from_millis(100)));
        assert!(!c.update(true, t0 + Duration::from_millis(900)));
        // ...but the late press can pair with the next one.
        assert!(!c.update(false, t0 + Duration::from_millis(950)));
        assert!(c.update(true, t0 + Duration::from_millis(1000)));
    }
}
