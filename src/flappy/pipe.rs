//! Pipe obstacles: a top and bottom segment around a fixed-height gap.

use super::bird::Bird;
use crate::assets::AssetBundle;
use crate::constants::*;
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Left edge, decreasing every tick.
    pub x: f64,
    /// Lower edge of the top segment; the gap spans `gap_center..gap_center + PIPE_GAP`.
    pub gap_center: f64,
    /// Y of the top segment's sprite (negative: it hangs from above the screen).
    pub top: f64,
    /// Y of the bottom segment's sprite.
    pub bottom: f64,
    /// Set once the pipe has fallen behind the bird; never cleared.
    pub passed: bool,
}

impl Pipe {
    /// New pipe at `x` with a gap drawn uniformly from `[GAP_CENTER_MIN, GAP_CENTER_MAX)`.
    pub fn new<R: Rng>(x: f64, pipe_height: u32, rng: &mut R) -> Self {
        let gap_center = rng.gen_range(GAP_CENTER_MIN..GAP_CENTER_MAX);
        Self::with_gap(x, gap_center as f64, pipe_height)
    }

    /// New pipe with a chosen gap position.
    pub fn with_gap(x: f64, gap_center: f64, pipe_height: u32) -> Self {
        Self {
            x,
            gap_center,
            top: gap_center - pipe_height as f64,
            bottom: gap_center + PIPE_GAP,
            passed: false,
        }
    }

    /// Scroll left by one tick.
    pub fn advance(&mut self) {
        self.x -= PIPE_VELOCITY;
    }

    /// True once the trailing edge is left of the screen.
    pub fn has_scrolled_offscreen(&self, pipe_width: u32) -> bool {
        self.x + (pipe_width as f64) < 0.0
    }

    /// True while the pipe's left edge is behind the bird.
    pub fn is_passed_by(&self, bird_x: f64) -> bool {
        self.x < bird_x
    }

    /// Latch `passed` the first time the pipe falls behind the bird.
    /// Returns true only on that transition.
    pub fn mark_passed(&mut self, bird_x: f64) -> bool {
        if !self.passed && self.is_passed_by(bird_x) {
            self.passed = true;
            return true;
        }
        false
    }

    /// Pixel-exact test of the bird's current frame against both segments.
    pub fn collides_with(&self, bird: &Bird, assets: &AssetBundle) -> bool {
        let bird_mask = bird.collision_silhouette(assets);
        let bird_x = bird.x.round() as i32;
        let bird_y = bird.y.round() as i32;
        let dx = self.x.round() as i32 - bird_x;

        let top_offset = (dx, self.top.round() as i32 - bird_y);
        let bottom_offset = (dx, self.bottom.round() as i32 - bird_y);

        bird_mask.overlaps(assets.pipe_bottom_mask(), bottom_offset)
            || bird_mask.overlaps(assets.pipe_top_mask(), top_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Paint, Sprite};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn assets() -> AssetBundle {
        AssetBundle::builtin().unwrap()
    }

    /// Square bird and plain rectangular pipes.
    fn block_assets() -> AssetBundle {
        AssetBundle::from_sprites(
            [
                Sprite::solid(40, 40, Paint::BirdBody),
                Sprite::solid(40, 40, Paint::BirdBody),
                Sprite::solid(40, 40, Paint::BirdBody),
            ],
            Sprite::solid(100, 600, Paint::PipeMid),
            Sprite::solid(WIDTH, 20, Paint::Grass),
            Sprite::solid(WIDTH, HEIGHT, Paint::Sky),
        )
        .unwrap()
    }

    #[test]
    fn test_gap_center_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..2000 {
            let pipe = Pipe::new(PIPE_SPAWN_X, 640, &mut rng);
            assert!(pipe.gap_center >= GAP_CENTER_MIN as f64);
            assert!(pipe.gap_center < GAP_CENTER_MAX as f64);
            assert_eq!(pipe.gap_center.fract(), 0.0);
        }
    }

    #[test]
    fn test_segments_separated_by_gap() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let pipe = Pipe::new(PIPE_SPAWN_X, 640, &mut rng);
            // Top segment's lower edge to bottom segment's upper edge.
            assert_eq!(pipe.bottom - (pipe.top + 640.0), PIPE_GAP);
            assert!(!pipe.passed);
        }
    }

    #[test]
    fn test_advance_translates_only() {
        let mut pipe = Pipe::with_gap(700.0, 250.0, 640);
        let before = pipe.clone();
        pipe.advance();
        assert_eq!(pipe.x, 695.0);
        assert_eq!(pipe.gap_center, before.gap_center);
        assert_eq!(pipe.top, before.top);
        assert_eq!(pipe.bottom, before.bottom);
    }

    #[test]
    fn test_offscreen_after_expected_ticks() {
        let width = 104;
        let mut pipe = Pipe::with_gap(700.0, 250.0, 640);
        let expected = ((700.0 + width as f64) / PIPE_VELOCITY).ceil() as u32;
        let mut ticks = 0;
        while !pipe.has_scrolled_offscreen(width) {
            pipe.advance();
            ticks += 1;
        }
        assert_eq!(ticks, expected);
        assert_eq!(ticks, 161);
    }

    #[test]
    fn test_mark_passed_transitions_once() {
        let mut pipe = Pipe::with_gap(210.0, 250.0, 640);
        let mut transitions = 0;
        for _ in 0..20 {
            pipe.advance();
            if pipe.mark_passed(200.0) {
                transitions += 1;
            }
        }
        assert_eq!(transitions, 1);
        assert!(pipe.passed);
    }

    #[test]
    fn test_passed_flag_never_clears() {
        let mut pipe = Pipe::with_gap(150.0, 250.0, 640);
        assert!(pipe.mark_passed(200.0));
        pipe.x = 400.0;
        assert!(!pipe.mark_passed(200.0));
        assert!(pipe.passed);
    }

    #[test]
    fn test_no_collision_when_far_away() {
        let assets = assets();
        let bird = Bird::new(200.0, 200.0);
        let pipe = Pipe::with_gap(700.0, 50.0, assets.pipe_height());
        assert!(!pipe.collides_with(&bird, &assets));
    }

    #[test]
    fn test_collision_with_bottom_segment() {
        let assets = block_assets();
        let bird = Bird::new(200.0, 300.0);
        // Gap 50..250; bird spans 300..340.
        let pipe = Pipe::with_gap(190.0, 50.0, assets.pipe_height());
        assert!(pipe.collides_with(&bird, &assets));
    }

    #[test]
    fn test_collision_with_top_segment() {
        let assets = block_assets();
        let bird = Bird::new(200.0, 100.0);
        // Gap 300..500; bird spans 100..140.
        let pipe = Pipe::with_gap(190.0, 300.0, assets.pipe_height());
        assert!(pipe.collides_with(&bird, &assets));
    }

    #[test]
    fn test_bird_inside_gap_is_clear() {
        let assets = block_assets();
        let bird = Bird::new(200.0, 330.0);
        // Gap 300..500; bird spans 330..370.
        let pipe = Pipe::with_gap(190.0, 300.0, assets.pipe_height());
        assert!(!pipe.collides_with(&bird, &assets));
    }

    #[test]
    fn test_touching_edge_collides() {
        let assets = block_assets();
        // Bird's last row is 459; bottom segment starts at 460.
        let clear = Bird::new(200.0, 420.0);
        let pipe = Pipe::with_gap(190.0, 260.0, assets.pipe_height());
        assert!(!pipe.collides_with(&clear, &assets));
        let touching = Bird::new(200.0, 421.0);
        assert!(pipe.collides_with(&touching, &assets));
    }

    #[test]
    fn test_transparent_corners_avoid_false_positive() {
        let assets = assets();
        let (bird_w, _) = assets.bird_size();
        // The bird's top-left corner is transparent. Put the top segment's
        // lower-right corner two pixels into it: the boxes overlap, the
        // silhouettes don't.
        let mut bird = Bird::new(200.0, 200.0);
        bird.frame = 0;
        let pipe = Pipe::with_gap(200.0 - 104.0 + 2.0, 202.0, assets.pipe_height());
        let bbox_overlap = pipe.x + 104.0 > bird.x
            && pipe.x < bird.x + bird_w as f64
            && pipe.gap_center > bird.y;
        assert!(bbox_overlap);
        assert!(!pipe.collides_with(&bird, &assets));
    }

    #[test]
    fn test_collision_uses_rounded_position() {
        let assets = block_assets();
        let pipe = Pipe::with_gap(190.0, 260.0, assets.pipe_height());
        let mut bird = Bird::new(200.0, 420.4);
        assert!(!pipe.collides_with(&bird, &assets));
        bird.y = 420.6;
        assert!(pipe.collides_with(&bird, &assets));
    }
}
