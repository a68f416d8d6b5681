//! UI rendering for the Flappy Bird world.
//!
//! The play area is a pixel canvas drawn with half-block cells: each
//! terminal cell shows two stacked world samples (`▀` with the upper sample
//! as foreground and the lower as background), which keeps pixels roughly
//! square on a normal terminal font.

use super::game_common::{
    create_game_layout, render_game_over_banner, render_info_panel_frame, render_status_bar,
};
use flappy::assets::Paint;
use flappy::constants::{BASE_STRIP_HEIGHT, FPS, HEIGHT, PIPE_VELOCITY, WIDTH};
use flappy::{GameOverCause, World};
use rand::Rng;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const CONTROLS: &[(&str, &str)] = &[("[Space/Up]", "Flap"), ("[Esc/Q]", "Quit")];

/// Render the whole game screen.
pub fn render_flappy<R: Rng>(frame: &mut Frame, area: Rect, world: &World<R>) {
    let layout = create_game_layout(frame, area, " Flappy Bird ", Color::Cyan, 10, 22);

    render_play_area(frame, layout.content, world);
    render_status_bar_content(frame, layout.status_bar, world);
    render_info_panel(frame, layout.info_panel, world);

    if let Some(cause) = world.game_over_cause() {
        let message = match cause {
            GameOverCause::Collision => format!("Hit a pipe. Score: {}", world.score),
            GameOverCause::OutOfBounds => format!("Left the sky. Score: {}", world.score),
        };
        render_game_over_banner(
            frame,
            layout.content,
            "Game Over",
            &message,
            "Press Space to Play Again",
        );
    }
}

/// How the 500x800 world maps onto a block of terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// World pixels per canvas pixel (one canvas pixel = half a cell).
    pub scale: f64,
    /// Cells used horizontally.
    pub cols: u16,
    /// Cells used vertically.
    pub rows: u16,
    /// Left padding in cells, to centre the canvas.
    pub x_offset: u16,
}

impl Viewport {
    /// Largest aspect-preserving canvas that fits `width` x `height` cells.
    pub fn fit(width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let sx = WIDTH as f64 / width as f64;
        let sy = HEIGHT as f64 / (height as f64 * 2.0);
        let scale = sx.max(sy);
        let cols = ((WIDTH as f64 / scale).floor() as u16).clamp(1, width);
        let rows = ((HEIGHT as f64 / scale / 2.0).floor() as u16).clamp(1, height);
        Some(Self {
            scale,
            cols,
            rows,
            x_offset: (width - cols) / 2,
        })
    }

    /// World coordinates at the centre of canvas pixel (`col`, `pixel_row`).
    pub fn world_point(&self, col: u16, pixel_row: u32) -> (f64, f64) {
        (
            (col as f64 + 0.5) * self.scale,
            (pixel_row as f64 + 0.5) * self.scale,
        )
    }
}

/// Paint visible at a world point, front to back: bird, ground strip,
/// pipes, background.
pub fn scene_paint<R: Rng>(world: &World<R>, wx: f64, wy: f64) -> Paint {
    if let Some(paint) = bird_paint(world, wx, wy) {
        return paint;
    }

    let assets = world.assets();
    let strip_top = (HEIGHT - BASE_STRIP_HEIGHT) as f64;
    if wy >= strip_top {
        let base = assets.base();
        let scroll = world.tick_count as f64 * PIPE_VELOCITY;
        let lx = ((wx + scroll).floor() as i64).rem_euclid(base.width().max(1) as i64);
        if let Some(paint) = base.pixel(lx, (wy - strip_top).floor() as i64) {
            return paint;
        }
    }

    for pipe in &world.pipes {
        let lx = (wx - pipe.x.round()).floor() as i64;
        if lx < 0 || lx >= assets.pipe_width() as i64 {
            continue;
        }
        let top_y = (wy - pipe.top.round()).floor() as i64;
        if let Some(paint) = assets.pipe_top().pixel(lx, top_y) {
            return paint;
        }
        let bottom_y = (wy - pipe.bottom.round()).floor() as i64;
        if let Some(paint) = assets.pipe_bottom().pixel(lx, bottom_y) {
            return paint;
        }
    }

    assets
        .background()
        .pixel(wx.floor() as i64, wy.floor() as i64)
        .unwrap_or(Paint::Sky)
}

/// Sample the bird sprite rotated by its tilt about the sprite centre.
fn bird_paint<R: Rng>(world: &World<R>, wx: f64, wy: f64) -> Option<Paint> {
    let pose = world.bird.pose();
    let sprite = world.assets().bird_frame(pose.frame);
    let (w, h) = (sprite.width() as f64, sprite.height() as f64);
    let cx = world.bird.x + w / 2.0;
    let cy = world.bird.y + h / 2.0;
    let (dx, dy) = (wx - cx, wy - cy);

    // Cheap reject outside the rotated sprite's bounding circle.
    let radius = (w * w + h * h).sqrt() / 2.0;
    if dx * dx + dy * dy > radius * radius {
        return None;
    }

    // Inverse of a counter-clockwise screen rotation (y grows downward).
    let (sin, cos) = pose.rotation.to_radians().sin_cos();
    let sx = dx * cos - dy * sin + w / 2.0;
    let sy = dx * sin + dy * cos + h / 2.0;
    sprite.pixel(sx.floor() as i64, sy.floor() as i64)
}

pub fn paint_color(paint: Paint) -> Color {
    match paint {
        Paint::Sky => Color::Rgb(78, 192, 202),
        Paint::SkyHaze => Color::Rgb(110, 205, 210),
        Paint::Cloud => Color::Rgb(233, 252, 217),
        Paint::CloudShade => Color::Rgb(200, 235, 200),
        Paint::City => Color::Rgb(162, 214, 193),
        Paint::Window => Color::Rgb(130, 190, 170),
        Paint::Bush => Color::Rgb(94, 226, 112),
        Paint::Grass => Color::Rgb(115, 191, 46),
        Paint::GrassLight => Color::Rgb(156, 230, 89),
        Paint::Dirt => Color::Rgb(222, 216, 149),
        Paint::DirtDark => Color::Rgb(200, 190, 120),
        Paint::PipeLight => Color::Rgb(156, 230, 89),
        Paint::PipeMid => Color::Rgb(115, 191, 46),
        Paint::PipeDark => Color::Rgb(85, 128, 34),
        Paint::Outline => Color::Rgb(84, 56, 71),
        Paint::BirdBody => Color::Rgb(250, 200, 40),
        Paint::BirdShade => Color::Rgb(240, 140, 30),
        Paint::Wing => Color::Rgb(250, 250, 240),
        Paint::Eye => Color::Rgb(20, 20, 20),
        Paint::Beak => Color::Rgb(250, 90, 40),
    }
}

/// Build the half-block canvas for the play area.
pub fn play_area_lines<R: Rng>(world: &World<R>, viewport: &Viewport) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(viewport.rows as usize);
    for row in 0..viewport.rows {
        let mut spans = Vec::with_capacity(viewport.cols as usize + 1);
        if viewport.x_offset > 0 {
            spans.push(Span::raw(" ".repeat(viewport.x_offset as usize)));
        }
        for col in 0..viewport.cols {
            let (ux, uy) = viewport.world_point(col, row as u32 * 2);
            let (lx, ly) = viewport.world_point(col, row as u32 * 2 + 1);
            let upper = paint_color(scene_paint(world, ux, uy));
            let lower = paint_color(scene_paint(world, lx, ly));
            spans.push(Span::styled("▀", Style::default().fg(upper).bg(lower)));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn render_play_area<R: Rng>(frame: &mut Frame, area: Rect, world: &World<R>) {
    let Some(viewport) = Viewport::fit(area.width, area.height) else {
        return;
    };

    frame.render_widget(Paragraph::new(play_area_lines(world, &viewport)), area);

    // Score in the top-right corner of the canvas.
    let canvas = Rect {
        x: area.x + viewport.x_offset,
        y: area.y,
        width: viewport.cols,
        height: 1,
    };
    let score = Paragraph::new(Span::styled(
        format!("Score: {} ", world.score),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Right);
    frame.render_widget(score, canvas);
}

fn render_status_bar_content<R: Rng>(frame: &mut Frame, area: Rect, world: &World<R>) {
    if !world.is_running() {
        render_status_bar(frame, area, "Game Over", Color::Red, CONTROLS);
    } else if !world.bird.started {
        render_status_bar(
            frame,
            area,
            "Press Space to start!",
            Color::Yellow,
            CONTROLS,
        );
    } else {
        render_status_bar(
            frame,
            area,
            &format!("Score: {}", world.score),
            Color::Green,
            CONTROLS,
        );
    }
}

fn render_info_panel<R: Rng>(frame: &mut Frame, area: Rect, world: &World<R>) {
    let inner = render_info_panel_frame(frame, area);

    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let seconds = world.tick_count / FPS;
    let (state_text, state_color) = if !world.is_running() {
        ("Game Over", Color::Red)
    } else if !world.bird.started {
        ("Waiting", Color::Yellow)
    } else {
        ("Flying", Color::Green)
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(
                format!("{}", world.score),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Best: ", label),
            Span::styled(
                format!("{}", world.best_score.max(world.score)),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Run: ", label),
            Span::styled(format!("{}", world.runs), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled(" Time: ", label),
            Span::styled(
                format!("{}:{:02}", seconds / 60, seconds % 60),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Tick: ", label),
            Span::styled(
                format!("{}", world.tick_count),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" State: ", label),
            Span::styled(state_text, Style::default().fg(state_color)),
        ]),
        Line::from(vec![
            Span::styled(" Tilt: ", label),
            Span::styled(
                format!("{:+.0}°", world.bird.tilt),
                Style::default().fg(Color::Green),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
