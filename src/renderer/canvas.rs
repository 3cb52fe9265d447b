//! Canvas 2D render step
//!
//! Reads the game state and draws one frame; never mutates it.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{layout, shapes};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, MAGNET_RADIUS_BONUS};
use crate::sim::GameState;
use crate::theme::{Palette, Theme};

/// Draws frames onto the game canvas
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Wrap a canvas, sizing it to the play field.
    ///
    /// Fails when the 2D context is unavailable.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, wasm_bindgen::JsValue> {
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Draw the full scene at `time_ms`
    pub fn render(&self, state: &GameState, theme: Theme, time_ms: f64) {
        let palette = theme.palette();
        let ctx = &self.ctx;

        ctx.set_global_alpha(1.0);
        ctx.clear_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);

        self.draw_water(&palette);
        self.draw_floor(&palette, time_ms);

        for bubble in &state.bubbles {
            ctx.set_fill_style_str(palette.bubble_fill);
            ctx.set_stroke_style_str(palette.bubble_stroke);
            ctx.set_line_width(1.0);
            ctx.begin_path();
            ctx.arc(
                bubble.pos.x as f64,
                bubble.pos.y as f64,
                bubble.radius as f64,
                0.0,
                std::f64::consts::TAU,
            )
            .ok();
            ctx.fill();
            ctx.stroke();
        }

        for token in &state.tokens {
            shapes::token(ctx, token, &palette);
        }
        for powerup in &state.powerups {
            shapes::powerup(ctx, powerup, time_ms);
        }
        for hazard in &state.hazards {
            shapes::hazard(ctx, hazard);
        }

        let player = &state.player;
        if state.effects.magnet_active() {
            shapes::magnet_halo(ctx, player, player.radius + MAGNET_RADIUS_BONUS, time_ms);
        }
        shapes::fish(ctx, player, &state.config.character.palette());
        if state.effects.shields > 0 {
            shapes::shield_rings(ctx, player, state.effects.shields);
        }

        let flash = layout::flash_alpha(state.hit_flash);
        if flash > 0.0 {
            ctx.save();
            ctx.set_global_alpha(flash as f64);
            ctx.set_fill_style_str(palette.flash);
            ctx.fill_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);
            ctx.restore();
        }
    }

    /// Background gradient and slanted light beams
    fn draw_water(&self, palette: &Palette) {
        let ctx = &self.ctx;
        let (w, h) = (CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);

        let g = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        for (offset, color) in layout::WATER_STOPS.iter().zip(palette.water) {
            g.add_color_stop(*offset, color).ok();
        }
        ctx.set_fill_style_canvas_gradient(&g);
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.save();
        ctx.set_global_alpha(palette.beam_alpha);
        ctx.set_fill_style_str(palette.beam);
        let floor = layout::floor_y() as f64;
        for x in layout::beam_xs() {
            let x = x as f64;
            ctx.begin_path();
            ctx.move_to(x, 0.0);
            ctx.line_to(x + 60.0, 0.0);
            ctx.line_to(x + 10.0, floor);
            ctx.line_to(x - 40.0, floor);
            ctx.close_path();
            ctx.fill();
        }
        ctx.restore();
    }

    /// Seafloor band with swaying seaweed
    fn draw_floor(&self, palette: &Palette, time_ms: f64) {
        let ctx = &self.ctx;
        let floor = layout::floor_y() as f64;

        let g = ctx.create_linear_gradient(0.0, floor, 0.0, CANVAS_HEIGHT as f64);
        g.add_color_stop(0.0, palette.floor[0]).ok();
        g.add_color_stop(1.0, palette.floor[1]).ok();
        ctx.set_fill_style_canvas_gradient(&g);
        ctx.fill_rect(0.0, floor, CANVAS_WIDTH as f64, layout::FLOOR_HEIGHT as f64);

        ctx.set_stroke_style_str(palette.seaweed);
        ctx.set_line_width(4.0);
        ctx.set_line_cap("round");
        for x in layout::seaweed_xs() {
            let height = layout::seaweed_height(x, time_ms) as f64;
            let x = x as f64;
            let sway = ((time_ms / 700.0) + x * 0.05).sin() * 8.0;
            ctx.begin_path();
            ctx.move_to(x, floor + 6.0);
            ctx.quadratic_curve_to(x + sway, floor - height / 2.0, x + sway * 0.5, floor - height);
            ctx.stroke();
        }
    }
}
