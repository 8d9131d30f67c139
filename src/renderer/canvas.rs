//! Canvas 2D drawing of the world, HUD and menus

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::sprites::Sprites;
use crate::platform::AssetKind;
use crate::sim::{Aabb, Coin, CoinKind, Facing, GamePhase, GameState, Platform, SpriteFrame, Viewport};
use crate::ui::{self, Layout};

const BUTTON_COLOR: &str = "#4CAF50";
const PLATFORM_CORNER: f64 = 10.0;
const HUD_CORNER: f64 = 5.0;
/// Background scrolls at half the camera speed
const PARALLAX: f64 = 0.5;

/// Draws game state onto a 2D canvas context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    sprites: Sprites,
    layout: Layout,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, sprites: Sprites, viewport: Viewport) -> Self {
        Self {
            ctx,
            sprites,
            layout: Layout::new(viewport),
        }
    }

    /// Render one frame
    pub fn render(&self, state: &GameState) -> Result<(), JsValue> {
        let viewport = self.layout.viewport;
        self.ctx
            .clear_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);

        if state.phase == GamePhase::Start {
            return self.draw_start_screen();
        }

        self.draw_background(state)?;

        // World space
        let camera_x = state.camera.x as f64;
        self.ctx.save();
        self.ctx.translate(-camera_x, 0.0)?;
        let visible = camera_x..camera_x + viewport.width as f64;
        for platform in state
            .platforms
            .iter()
            .filter(|p| (p.right() as f64) >= visible.start && (p.pos.x as f64) <= visible.end)
        {
            self.draw_platform(platform);
        }
        self.draw_floor(state)?;
        for coin in &state.coins {
            self.draw_coin(coin)?;
        }
        self.draw_character(state)?;
        self.ctx.restore();

        self.draw_hud(state)?;

        if state.phase == GamePhase::GameOver {
            self.draw_game_over()?;
        }
        Ok(())
    }

    fn draw_background(&self, state: &GameState) -> Result<(), JsValue> {
        let Some(image) = self.sprites.get(AssetKind::Background) else {
            return Ok(());
        };
        let width = self.layout.viewport.width as f64;
        let height = self.layout.viewport.height as f64;
        let scaled_width = height * self.sprites.aspect(AssetKind::Background);
        if scaled_width <= 0.0 {
            return Ok(());
        }

        let count = (width / scaled_width).ceil() as usize + 1;
        let offset = (state.camera.x as f64 * PARALLAX) % scaled_width;
        for i in 0..count {
            self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                image,
                i as f64 * scaled_width - offset,
                0.0,
                scaled_width,
                height,
            )?;
        }
        Ok(())
    }

    fn draw_platform(&self, platform: &Platform) {
        let bounds = platform.aabb();
        self.rounded_rect(&bounds, PLATFORM_CORNER);
        self.ctx
            .set_fill_style_str(&format!("#{:06X}", platform.color & 0xFF_FFFF));
        self.ctx.fill();
        self.ctx.set_stroke_style_str("white");
        self.ctx.set_line_width(2.0);
        self.ctx.stroke();
    }

    /// Lava tiles under the visible part of the world
    fn draw_floor(&self, state: &GameState) -> Result<(), JsValue> {
        let Some(image) = self.sprites.get(AssetKind::Floor) else {
            return Ok(());
        };
        let tile_width = image.natural_width() as f64;
        let tile_height = image.natural_height() as f64;
        if tile_width <= 0.0 {
            return Ok(());
        }

        let width = self.layout.viewport.width as f64;
        let count = (width / tile_width).ceil() as usize + 1;
        let start_x = (state.camera.x as f64 / tile_width).floor() * tile_width;
        let top = state.floor_line() as f64;
        for i in 0..count {
            self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                image,
                start_x + i as f64 * tile_width,
                top,
                tile_width,
                tile_height,
            )?;
        }
        Ok(())
    }

    fn draw_coin(&self, coin: &Coin) -> Result<(), JsValue> {
        let color = match coin.kind {
            CoinKind::Limestone => "white",
            CoinKind::HeavyMetal => "gray",
        };
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        self.ctx.ellipse(
            coin.pos.x as f64,
            coin.pos.y as f64,
            coin.apparent_width() as f64,
            coin.radius as f64,
            0.0,
            0.0,
            std::f64::consts::TAU,
        )?;
        self.ctx.close_path();
        self.ctx.fill();
        Ok(())
    }

    fn draw_character(&self, state: &GameState) -> Result<(), JsValue> {
        let player = &state.player;
        let height = player.size.y as f64;
        let width = self.sprites.aspect(AssetKind::CharacterIdle) * height;
        let x = player.pos.x as f64;
        let y = player.pos.y as f64;

        if state.phase != GamePhase::GameOver {
            let kind = match player.sprite_frame() {
                SpriteFrame::Idle => AssetKind::CharacterIdle,
                SpriteFrame::Step => AssetKind::CharacterStep,
            };
            if let Some(image) = self.sprites.get(kind) {
                self.ctx.save();
                match player.facing() {
                    Facing::Right => self.ctx.translate(x, y)?,
                    Facing::Left => {
                        self.ctx.translate(x + width, y)?;
                        self.ctx.scale(-1.0, 1.0)?;
                    }
                }
                self.ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, width, height)?;
                self.ctx.restore();
            }
        }

        if state.explosion_visible() {
            if let Some(image) = self.sprites.get(AssetKind::Explosion) {
                let (blast_width, blast_height) = (width * 2.0, height * 2.0);
                self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    image,
                    x - (blast_width - width) / 2.0,
                    y - (blast_height - height) / 2.0,
                    blast_width,
                    blast_height,
                )?;
            }
        }
        Ok(())
    }

    fn draw_hud(&self, state: &GameState) -> Result<(), JsValue> {
        self.draw_hud_box(&self.layout.score_box, &format!("Score: {}", state.player.score))?;
        self.draw_hud_box(
            &self.layout.high_score_box,
            &format!("High Score: {}", state.high_score.best()),
        )?;
        self.draw_hud_box(&self.layout.ph_box, &format!("pH Level: {}", state.ph))
    }

    fn draw_hud_box(&self, bounds: &Aabb, text: &str) -> Result<(), JsValue> {
        self.rounded_rect(bounds, HUD_CORNER);
        self.ctx.set_fill_style_str("white");
        self.ctx.fill();
        self.ctx.set_line_width(3.0);
        self.ctx.set_stroke_style_str("black");
        self.ctx.stroke();

        self.ctx.set_fill_style_str("black");
        self.ctx.set_font("20px Arial");
        self.ctx.set_text_align("center");
        let center = bounds.center();
        self.ctx
            .fill_text(text, center.x as f64, bounds.top() as f64 + 25.0)
    }

    fn draw_start_screen(&self) -> Result<(), JsValue> {
        let layout = &self.layout;
        self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.8)");
        self.ctx.fill_rect(
            0.0,
            0.0,
            layout.viewport.width as f64,
            layout.viewport.height as f64,
        );

        self.ctx.set_fill_style_str("white");
        self.ctx.set_text_align("center");
        self.ctx.set_font("36px Arial");
        self.ctx
            .fill_text(ui::TITLE, layout.title.x as f64, layout.title.y as f64)?;
        self.ctx.set_font("24px Arial");
        self.ctx
            .fill_text(ui::SUBTITLE, layout.subtitle.x as f64, layout.subtitle.y as f64)?;

        self.ctx.set_font("20px Arial");
        self.ctx.set_text_align("left");
        for (line, pos) in layout.instruction_lines() {
            self.ctx.fill_text(line, pos.x as f64, pos.y as f64)?;
        }

        self.draw_button(&layout.start_button, "Start")
    }

    fn draw_game_over(&self) -> Result<(), JsValue> {
        let layout = &self.layout;
        self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.7)");
        self.ctx.fill_rect(
            0.0,
            0.0,
            layout.viewport.width as f64,
            layout.viewport.height as f64,
        );

        self.ctx.set_fill_style_str("red");
        self.ctx.set_font("40px Arial");
        self.ctx.set_text_align("center");
        self.ctx.fill_text(
            "Game Over",
            layout.game_over_text.x as f64,
            layout.game_over_text.y as f64,
        )?;

        self.draw_button(&layout.reset_button, "Reset")
    }

    fn draw_button(&self, bounds: &Aabb, label: &str) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(BUTTON_COLOR);
        self.ctx.fill_rect(
            bounds.left() as f64,
            bounds.top() as f64,
            bounds.size.x as f64,
            bounds.size.y as f64,
        );
        self.ctx.set_fill_style_str("white");
        self.ctx.set_font("24px Arial");
        self.ctx.set_text_align("center");
        let center = bounds.center();
        self.ctx
            .fill_text(label, center.x as f64, bounds.top() as f64 + 28.0)
    }

    /// Trace a rounded rectangle path (caller fills/strokes)
    fn rounded_rect(&self, bounds: &Aabb, radius: f64) {
        let (x, y) = (bounds.left() as f64, bounds.top() as f64);
        let (w, h) = (bounds.size.x as f64, bounds.size.y as f64);
        let ctx = &self.ctx;

        ctx.begin_path();
        ctx.move_to(x + radius, y);
        ctx.line_to(x + w - radius, y);
        ctx.quadratic_curve_to(x + w, y, x + w, y + radius);
        ctx.line_to(x + w, y + h - radius);
        ctx.quadratic_curve_to(x + w, y + h, x + w - radius, y + h);
        ctx.line_to(x + radius, y + h);
        ctx.quadratic_curve_to(x, y + h, x, y + h - radius);
        ctx.line_to(x, y + radius);
        ctx.quadratic_curve_to(x, y, x + radius, y);
        ctx.close_path();
    }
}
