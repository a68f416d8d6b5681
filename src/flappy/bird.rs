//! The player's bird: jump arc physics, tilt and wing animation.

use crate::assets::{AssetBundle, Mask};
use crate::constants::*;

/// Number of wing animation frames.
pub const BIRD_FRAMES: usize = 3;

/// Frame index shown while diving (wings held still).
pub const GLIDE_FRAME: usize = 1;

/// What the renderer needs to draw the bird this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirdPose {
    /// Index into the bird animation frames.
    pub frame: usize,
    /// Rotation in degrees about the sprite centre, counter-clockwise.
    pub rotation: f64,
}

/// Unshaped vertical displacement `ticks` ticks after a jump: the jump
/// velocity plus accumulated gravity plus the half-gravity term.
pub fn raw_displacement(ticks: u32) -> f64 {
    let t = ticks as f64;
    JUMP_VELOCITY + GRAVITY * t + 0.5 * GRAVITY * t
}

/// Cap the fall speed and sharpen the rise.
pub fn shape_displacement(raw: f64) -> f64 {
    let d = raw.min(MAX_DISPLACEMENT);
    if d < 0.0 {
        d - RISE_BIAS
    } else {
        d
    }
}

#[derive(Debug, Clone)]
pub struct Bird {
    /// Horizontal position, fixed for the whole run.
    pub x: f64,
    /// Vertical position of the sprite's top edge.
    pub y: f64,
    pub velocity: f64,
    /// Degrees, positive = nose up. Always within `[MIN_ROTATION, MAX_ROTATION]`.
    pub tilt: f64,
    /// Ticks since the last jump.
    pub tick_count: u32,
    /// Height the last jump started from.
    pub jump_origin: f64,
    /// Displacement applied on the most recent tick.
    pub displacement: f64,
    /// Animation counter advanced once per rendered frame.
    pub anim_count: u32,
    /// Currently selected animation frame; also picks the collision mask.
    pub frame: usize,
    /// False until the first jump; the bird hovers in place until then.
    pub started: bool,
}

impl Bird {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            velocity: 0.0,
            tilt: 0.0,
            tick_count: 0,
            jump_origin: y,
            displacement: 0.0,
            anim_count: 0,
            frame: 0,
            started: false,
        }
    }

    /// Restart the jump arc from the current height. Safe to call any time.
    pub fn jump(&mut self) {
        self.velocity = JUMP_VELOCITY;
        self.tick_count = 0;
        self.jump_origin = self.y;
        self.started = true;
    }

    /// One physics tick. Does nothing before the first jump.
    pub fn advance(&mut self) {
        if !self.started {
            return;
        }

        self.tick_count += 1;
        self.velocity += GRAVITY;
        let d = shape_displacement(self.velocity + 0.5 * GRAVITY * self.tick_count as f64);
        self.displacement = d;
        self.y += d;

        if d < 0.0 || self.y < self.jump_origin + TILT_HOLD_MARGIN {
            if self.tilt < MAX_ROTATION {
                self.tilt = MAX_ROTATION;
            }
        } else {
            self.tilt = (self.tilt - ROTATION_STEP).max(MIN_ROTATION);
        }
    }

    /// Advance the wing animation by one rendered frame and return the pose.
    ///
    /// Frames cycle 0, 1, 2, 1, 0 with `ANIMATION_TIME` frames each; a steep
    /// dive forces the glide frame and parks the counter mid-cycle.
    pub fn render_pose(&mut self) -> BirdPose {
        self.anim_count += 1;

        let t = ANIMATION_TIME;
        if self.anim_count < t {
            self.frame = 0;
        } else if self.anim_count < t * 2 {
            self.frame = 1;
        } else if self.anim_count < t * 3 {
            self.frame = 2;
        } else if self.anim_count < t * 4 {
            self.frame = 1;
        } else {
            self.frame = 0;
            self.anim_count = 0;
        }

        if self.tilt <= DIVE_FRAME_TILT {
            self.frame = GLIDE_FRAME;
            self.anim_count = t * 2;
        }

        self.pose()
    }

    /// Current pose without advancing the animation.
    pub fn pose(&self) -> BirdPose {
        BirdPose {
            frame: self.frame,
            rotation: self.tilt,
        }
    }

    /// Silhouette of the current (unrotated) frame.
    pub fn collision_silhouette<'a>(&self, assets: &'a AssetBundle) -> &'a Mask {
        assets.bird_mask(self.frame)
    }

    /// Sprite height of the current frame.
    pub fn height(&self, assets: &AssetBundle) -> u32 {
        assets.bird_frame(self.frame).height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jumped_bird() -> Bird {
        let mut bird = Bird::new(BIRD_START_X, BIRD_START_Y);
        bird.jump();
        bird
    }

    #[test]
    fn test_new_bird_defaults() {
        let bird = Bird::new(200.0, 200.0);
        assert!(!bird.started);
        assert_eq!(bird.tilt, 0.0);
        assert_eq!(bird.velocity, 0.0);
        assert_eq!(bird.frame, 0);
    }

    #[test]
    fn test_no_movement_before_first_jump() {
        let mut bird = Bird::new(200.0, 200.0);
        for _ in 0..50 {
            bird.advance();
        }
        assert_eq!(bird.y, 200.0);
        assert_eq!(bird.tick_count, 0);
        assert_eq!(bird.tilt, 0.0);
    }

    #[test]
    fn test_jump_resets_arc() {
        let mut bird = jumped_bird();
        for _ in 0..10 {
            bird.advance();
        }
        let y = bird.y;
        bird.jump();
        assert_eq!(bird.velocity, JUMP_VELOCITY);
        assert_eq!(bird.tick_count, 0);
        assert_eq!(bird.jump_origin, y);
        assert!(bird.started);
    }

    #[test]
    fn test_raw_displacement_table() {
        let table = [
            (0, -10.5),
            (1, -9.0),
            (4, -4.5),
            (7, 0.0),
            (10, 4.5),
            (17, 15.0),
            (18, 16.5),
        ];
        for (n, expected) in table {
            assert!(
                (raw_displacement(n) - expected).abs() < 1e-9,
                "n={n}: {} != {expected}",
                raw_displacement(n)
            );
        }
    }

    #[test]
    fn test_shape_displacement_caps_and_biases() {
        assert_eq!(shape_displacement(16.5), 16.0);
        assert_eq!(shape_displacement(40.0), 16.0);
        assert_eq!(shape_displacement(-9.0), -11.0);
        assert_eq!(shape_displacement(0.0), 0.0);
        assert_eq!(shape_displacement(4.5), 4.5);
    }

    #[test]
    fn test_advance_applies_shaped_displacement() {
        let mut bird = jumped_bird();
        let mut y = bird.y;
        for n in 1..=30 {
            bird.advance();
            let expected = shape_displacement(raw_displacement(n));
            assert!((bird.y - (y + expected)).abs() < 1e-9, "tick {n}");
            assert_eq!(bird.displacement, expected);
            y = bird.y;
        }
    }

    #[test]
    fn test_jump_arc_rises_then_falls() {
        let mut bird = jumped_bird();
        let start = bird.y;
        for _ in 0..6 {
            bird.advance();
        }
        // -11 - 9.5 - 8 - 6.5 - 5 - 3.5
        assert!((bird.y - (start - 43.5)).abs() < 1e-9);
        for _ in 0..20 {
            bird.advance();
        }
        assert!(bird.y > start);
    }

    #[test]
    fn test_fall_speed_capped() {
        let mut bird = jumped_bird();
        for _ in 0..100 {
            let before = bird.y;
            bird.advance();
            assert!(bird.y - before <= MAX_DISPLACEMENT + 1e-9);
        }
    }

    #[test]
    fn test_tilt_snaps_up_while_rising() {
        let mut bird = jumped_bird();
        bird.advance();
        assert_eq!(bird.tilt, MAX_ROTATION);
    }

    #[test]
    fn test_tilt_descends_in_steps_and_floors() {
        let mut bird = jumped_bird();
        let mut previous = bird.tilt;
        let mut descending = false;
        for _ in 0..60 {
            bird.advance();
            assert!(bird.tilt >= MIN_ROTATION && bird.tilt <= MAX_ROTATION);
            if descending {
                assert!(bird.tilt <= previous);
                if previous > MIN_ROTATION {
                    let step = previous - bird.tilt;
                    assert!(step == ROTATION_STEP || bird.tilt == MIN_ROTATION);
                }
            }
            if bird.tilt < MAX_ROTATION {
                descending = true;
            }
            previous = bird.tilt;
        }
        assert_eq!(bird.tilt, MIN_ROTATION);
    }

    #[test]
    fn test_tilt_held_near_jump_origin() {
        let mut bird = jumped_bird();
        // Past the apex but still within the hold margin of the origin.
        for _ in 0..10 {
            bird.advance();
        }
        assert!(bird.displacement >= 0.0);
        assert!(bird.y < bird.jump_origin + TILT_HOLD_MARGIN);
        assert_eq!(bird.tilt, MAX_ROTATION);
    }

    #[test]
    fn test_animation_cycle() {
        let mut bird = Bird::new(200.0, 200.0);
        let frames: Vec<usize> = (0..21).map(|_| bird.render_pose().frame).collect();
        let expected: Vec<usize> = [0; 4]
            .into_iter()
            .chain([1; 5])
            .chain([2; 5])
            .chain([1; 5])
            .chain([0; 2])
            .collect();
        assert_eq!(frames, expected);
        assert_eq!(bird.anim_count, 1);
    }

    #[test]
    fn test_dive_forces_glide_frame() {
        let mut bird = Bird::new(200.0, 200.0);
        bird.tilt = -80.0;
        for _ in 0..30 {
            let pose = bird.render_pose();
            assert_eq!(pose.frame, GLIDE_FRAME);
            assert_eq!(bird.anim_count, ANIMATION_TIME * 2);
        }
    }

    #[test]
    fn test_pose_rotation_is_tilt() {
        let mut bird = jumped_bird();
        bird.advance();
        assert_eq!(bird.render_pose().rotation, MAX_ROTATION);
        assert_eq!(bird.pose().rotation, bird.tilt);
    }

    #[test]
    fn test_collision_silhouette_follows_frame() {
        let assets = AssetBundle::builtin().unwrap();
        let mut bird = Bird::new(200.0, 200.0);
        bird.frame = 2;
        assert_eq!(bird.collision_silhouette(&assets), assets.bird_mask(2));
        assert_eq!(bird.height(&assets), 48);
    }
}
