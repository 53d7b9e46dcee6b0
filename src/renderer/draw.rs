//! Frame drawing against an abstract 2D surface

use crate::sim::{AssetId, Drawable, Maze, Sprite, SpriteSizes};

/// The drawing calls a frame needs. Mirrors the browser 2D context.
pub trait Surface {
    type Image: Drawable;

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn draw_image(&mut self, image: &Self::Image, x: f32, y: f32, w: f32, h: f32);
    fn stroke_text(&mut self, text: &str, x: f32, y: f32);
    fn fill_text(&mut self, text: &str, x: f32, y: f32);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
}

/// One loaded image per sprite kind
#[derive(Debug, Clone)]
pub struct Assets<I> {
    pub ball: I,
    pub goal: I,
    pub hole: I,
}

impl<I: Drawable> Assets<I> {
    pub fn get(&self, id: AssetId) -> &I {
        match id {
            AssetId::Ball => &self.ball,
            AssetId::Goal => &self.goal,
            AssetId::Hole => &self.hole,
        }
    }

    /// Sprite sizes taken from the images themselves
    pub fn sizes(&self) -> SpriteSizes {
        SpriteSizes {
            ball: self.ball.intrinsic_size(),
            goal: self.goal.intrinsic_size(),
            hole: self.hole.intrinsic_size(),
        }
    }
}

/// Draw a sprite centred on its position
fn draw_sprite<S: Surface>(surface: &mut S, assets: &Assets<S::Image>, sprite: &Sprite) {
    let size = sprite.draw_size();
    surface.save();
    surface.translate(-size.x / 2.0, -size.y / 2.0);
    surface.draw_image(assets.get(sprite.asset), sprite.pos.x, sprite.pos.y, size.x, size.y);
    surface.restore();
}

/// Render one frame: holes, goal, then the ball or the end-of-level banner
pub fn draw<S: Surface>(maze: &Maze, assets: &Assets<S::Image>, surface: &mut S) {
    let (w, h) = (maze.world.width(), maze.world.height());
    surface.clear_rect(0.0, 0.0, w, h);

    let banner = maze.outcome.message();
    for sprite in maze.sprites() {
        // The banner takes the ball's place
        if banner.is_some() && sprite.asset == AssetId::Ball {
            continue;
        }
        draw_sprite(surface, assets, sprite);
    }

    if let Some(text) = banner {
        surface.stroke_text(text, w / 2.0, h / 2.0);
        surface.fill_text(text, w / 2.0, h / 2.0);
    }
}
