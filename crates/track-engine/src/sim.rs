//! Synthetic closed-loop world.
//!
//! A small in-process world with one colored target and a pointer. The
//! capture window is anchored at the pointer, so actuator nudges shift
//! where subsequent frames are taken — exactly the feedback path a real
//! deployment has, with no devices involved. Used by the engine's
//! integration tests and the `simulate` CLI command.

use std::cell::RefCell;
use std::rc::Rc;

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

use huelock_common::error::{TrackError, TrackResult};
use huelock_track_model::Vec2;

use crate::{ActivationSource, Actuator, FrameSource};

/// Background color: dark, desaturated, outside every default band.
const BACKGROUND: Rgb<u8> = Rgb([40, 40, 50]);

/// Target color: saturated red inside the default low hue band.
const TARGET: Rgb<u8> = Rgb([220, 30, 30]);

/// World state shared by the simulated capabilities.
#[derive(Debug)]
pub struct SimWorld {
    /// Target position in world coordinates.
    pub target: Vec2,

    /// Target displacement per captured frame.
    pub target_velocity: Vec2,

    /// Pointer position in world coordinates. The capture region is
    /// centered here.
    pub pointer: Vec2,

    /// Target disc radius in pixels.
    pub radius: i32,

    /// Fail this many upcoming captures (exercises the skip path).
    pub fail_next: u32,

    frames_rendered: u64,
    nudges_applied: u64,
}

impl SimWorld {
    /// Create a shared world. `initial_error` is the target's starting
    /// offset from the pointer.
    pub fn shared(initial_error: Vec2, target_velocity: Vec2, radius: i32) -> Rc<RefCell<SimWorld>> {
        Rc::new(RefCell::new(SimWorld {
            target: initial_error,
            target_velocity,
            pointer: Vec2::ZERO,
            radius,
            fail_next: 0,
            frames_rendered: 0,
            nudges_applied: 0,
        }))
    }

    /// Distance from the pointer to the target, in world pixels.
    pub fn tracking_error(&self) -> f64 {
        Vec2::new(self.target.x - self.pointer.x, self.target.y - self.pointer.y).magnitude()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn nudges_applied(&self) -> u64 {
        self.nudges_applied
    }

    /// Render the capture-local view: the target disc drawn relative to
    /// the pointer-anchored window.
    fn render(&mut self, size: u32) -> RgbImage {
        let mut frame = RgbImage::from_pixel(size, size, BACKGROUND);

        let half = (size / 2) as f64;
        let local_x = (self.target.x - self.pointer.x + half).round() as i32;
        let local_y = (self.target.y - self.pointer.y + half).round() as i32;

        draw_filled_circle_mut(&mut frame, (local_x, local_y), self.radius, TARGET);

        self.frames_rendered += 1;
        frame
    }

    fn step(&mut self) {
        self.target = self.target + self.target_velocity;
    }
}

/// [`FrameSource`] over the shared world. Each capture advances the
/// target by one step, then renders.
pub struct SceneSource {
    world: Rc<RefCell<SimWorld>>,
}

impl SceneSource {
    pub fn new(world: Rc<RefCell<SimWorld>>) -> Self {
        Self { world }
    }
}

impl FrameSource for SceneSource {
    fn capture(&mut self, size: u32) -> TrackResult<RgbImage> {
        let mut world = self.world.borrow_mut();
        if world.fail_next > 0 {
            world.fail_next -= 1;
            return Err(TrackError::capture("simulated capture outage"));
        }
        world.step();
        Ok(world.render(size))
    }
}

/// [`Actuator`] over the shared world: nudges move the pointer, which
/// moves the capture anchor.
pub struct WorldActuator {
    world: Rc<RefCell<SimWorld>>,
}

impl WorldActuator {
    pub fn new(world: Rc<RefCell<SimWorld>>) -> Self {
        Self { world }
    }
}

impl Actuator for WorldActuator {
    fn nudge(&mut self, dx: i32, dy: i32) -> TrackResult<()> {
        let mut world = self.world.borrow_mut();
        world.pointer = world.pointer + Vec2::new(dx as f64, dy as f64);
        world.nudges_applied += 1;
        Ok(())
    }
}

/// [`ActivationSource`] that is always engaged.
pub struct AlwaysEngaged;

impl ActivationSource for AlwaysEngaged {
    fn engaged(&mut self) -> bool {
        true
    }
}
