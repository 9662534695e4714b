//! Input state tracking
//!
//! Maps discrete key/button/cursor events from the windowing layer onto a
//! per-frame snapshot the scene core reads. The windowing layer itself is
//! not part of this crate; anything able to deliver [`KeyCode`] and
//! [`MouseButton`] events can drive the tracker.

/// Key codes the scene binds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// W key (move forward)
    W,
    /// A key (strafe left)
    A,
    /// S key (move backward)
    S,
    /// D key (strafe right)
    D,
    /// Q key (roll counter-clockwise)
    Q,
    /// E key (roll clockwise)
    E,
    /// P key (perspective projection)
    P,
    /// O key (orthographic projection)
    O,
    /// Space key (vertical thrust)
    Space,
    /// Left shift (inverts vertical thrust)
    LeftShift,
    /// Escape key (quit)
    Escape,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button (fire)
    Left,
    /// Right mouse button (orbit drag)
    Right,
    /// Middle mouse button (target-lock toggle)
    Middle,
}

/// Per-frame input snapshot consumed by the scene core.
///
/// Held flags stay set for as long as the key is down; the fire flag and the
/// pointer/scroll deltas are accumulated between frames and consumed with
/// the `take_*` methods.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Move along the view vector
    pub forward: bool,
    /// Move against the view vector
    pub backward: bool,
    /// Strafe against the right vector
    pub strafe_left: bool,
    /// Strafe along the right vector
    pub strafe_right: bool,
    /// Roll the up vector counter-clockwise about the view vector
    pub roll_ccw: bool,
    /// Roll the up vector clockwise about the view vector
    pub roll_cw: bool,
    /// Thrust along the up vector
    pub vertical: bool,
    /// Invert vertical thrust (held modifier)
    pub invert_vertical: bool,
    /// Target-lock toggle; the camera rig clears this when a lock cannot be
    /// acquired or the locked target is lost
    pub look_lock: bool,
    /// Perspective (true) or orthographic (false) projection
    pub perspective: bool,
    /// Orbit-drag button currently held
    pub orbit_drag: bool,
    /// Quit requested
    pub quit: bool,
    fire_pending: bool,
    pointer_delta: (f32, f32),
    scroll_delta: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            forward: false,
            backward: false,
            strafe_left: false,
            strafe_right: false,
            roll_ccw: false,
            roll_cw: false,
            vertical: false,
            invert_vertical: false,
            look_lock: false,
            perspective: true,
            orbit_drag: false,
            quit: false,
            fire_pending: false,
            pointer_delta: (0.0, 0.0),
            scroll_delta: 0.0,
        }
    }
}

impl InputState {
    /// Record a fire press edge
    pub fn press_fire(&mut self) {
        self.fire_pending = true;
    }

    /// Consume the pending fire edge, if any
    pub fn take_fire(&mut self) -> bool {
        std::mem::take(&mut self.fire_pending)
    }

    /// Accumulate a pointer-drag delta
    pub fn push_pointer_delta(&mut self, dx: f32, dy: f32) {
        self.pointer_delta.0 += dx;
        self.pointer_delta.1 += dy;
    }

    /// Consume the accumulated pointer delta
    pub fn take_pointer_delta(&mut self) -> (f32, f32) {
        std::mem::take(&mut self.pointer_delta)
    }

    /// Accumulate a scroll delta
    pub fn push_scroll_delta(&mut self, dy: f32) {
        self.scroll_delta += dy;
    }

    /// Consume the accumulated scroll delta
    pub fn take_scroll_delta(&mut self) -> f32 {
        std::mem::take(&mut self.scroll_delta)
    }
}

/// Maps windowing-layer events onto an [`InputState`]
#[derive(Debug, Default)]
pub struct InputTracker {
    state: InputState,
    last_cursor: Option<(f64, f64)>,
}

impl InputTracker {
    /// Create a tracker with default state
    pub fn new() -> Self {
        Self::default()
    }

    /// The tracked input snapshot
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Mutable access for the frame driver's `take_*` consumption
    pub fn state_mut(&mut self) -> &mut InputState {
        &mut self.state
    }

    /// Handle a key press/release event
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        match key {
            KeyCode::W => self.state.forward = pressed,
            KeyCode::S => self.state.backward = pressed,
            KeyCode::A => self.state.strafe_left = pressed,
            KeyCode::D => self.state.strafe_right = pressed,
            KeyCode::Q => self.state.roll_ccw = pressed,
            KeyCode::E => self.state.roll_cw = pressed,
            KeyCode::Space => self.state.vertical = pressed,
            KeyCode::LeftShift => self.state.invert_vertical = pressed,
            KeyCode::P if pressed => self.state.perspective = true,
            KeyCode::O if pressed => self.state.perspective = false,
            KeyCode::Escape if pressed => self.state.quit = true,
            _ => {}
        }
    }

    /// Handle a mouse button press/release event
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left if pressed => self.state.press_fire(),
            MouseButton::Right => {
                self.state.orbit_drag = pressed;
                if pressed {
                    // Deltas start from the next cursor position
                    self.last_cursor = None;
                }
            }
            MouseButton::Middle if pressed => {
                self.state.look_lock = !self.state.look_lock;
            }
            _ => {}
        }
    }

    /// Handle a cursor-position event.
    ///
    /// Deltas accumulate only while the orbit button is held and the camera
    /// is not target-locked, matching the drag gating of the viewer.
    pub fn handle_cursor(&mut self, x: f64, y: f64) {
        if self.state.orbit_drag && !self.state.look_lock {
            if let Some((last_x, last_y)) = self.last_cursor {
                self.state
                    .push_pointer_delta((x - last_x) as f32, (y - last_y) as f32);
            }
            self.last_cursor = Some((x, y));
        } else {
            self.last_cursor = Some((x, y));
        }
    }

    /// Handle a scroll-wheel event
    pub fn handle_scroll(&mut self, dy: f64) {
        self.state.push_scroll_delta(dy as f32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_is_edge_triggered_and_consumed_once() {
        let mut tracker = InputTracker::new();
        tracker.handle_mouse_button(MouseButton::Left, true);
        tracker.handle_mouse_button(MouseButton::Left, false);

        assert!(tracker.state_mut().take_fire());
        assert!(!tracker.state_mut().take_fire());
    }

    #[test]
    fn middle_button_toggles_look_lock() {
        let mut tracker = InputTracker::new();
        assert!(!tracker.state().look_lock);

        tracker.handle_mouse_button(MouseButton::Middle, true);
        assert!(tracker.state().look_lock);
        tracker.handle_mouse_button(MouseButton::Middle, false);
        assert!(tracker.state().look_lock);
        tracker.handle_mouse_button(MouseButton::Middle, true);
        assert!(!tracker.state().look_lock);
    }

    #[test]
    fn cursor_deltas_only_accumulate_while_dragging() {
        let mut tracker = InputTracker::new();
        tracker.handle_cursor(100.0, 100.0);
        assert_eq!(tracker.state_mut().take_pointer_delta(), (0.0, 0.0));

        tracker.handle_mouse_button(MouseButton::Right, true);
        tracker.handle_cursor(110.0, 95.0);
        tracker.handle_cursor(112.0, 97.0);
        assert_eq!(tracker.state_mut().take_pointer_delta(), (2.0, 2.0));

        tracker.handle_mouse_button(MouseButton::Right, false);
        tracker.handle_cursor(150.0, 150.0);
        assert_eq!(tracker.state_mut().take_pointer_delta(), (0.0, 0.0));
    }

    #[test]
    fn drag_gating_respects_look_lock() {
        let mut tracker = InputTracker::new();
        tracker.handle_mouse_button(MouseButton::Middle, true);
        tracker.handle_mouse_button(MouseButton::Right, true);
        tracker.handle_cursor(10.0, 10.0);
        tracker.handle_cursor(20.0, 20.0);
        assert_eq!(tracker.state_mut().take_pointer_delta(), (0.0, 0.0));
    }

    #[test]
    fn projection_keys_select_modes() {
        let mut tracker = InputTracker::new();
        assert!(tracker.state().perspective);
        tracker.handle_key(KeyCode::O, true);
        assert!(!tracker.state().perspective);
        tracker.handle_key(KeyCode::P, true);
        assert!(tracker.state().perspective);
    }
}
