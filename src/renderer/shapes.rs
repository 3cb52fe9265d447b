//! Canvas paths for every sprite
//!
//! Each function leaves the context state as it found it.

use std::f64::consts::{PI, TAU};

use web_sys::CanvasRenderingContext2d;

use crate::sim::{Hazard, HazardKind, Player, PowerUp, PowerUpKind, Token};
use crate::theme::Palette;
use crate::tuning::CharacterPalette;

fn circle(ctx: &CanvasRenderingContext2d, x: f64, y: f64, r: f64) {
    ctx.begin_path();
    ctx.arc(x, y, r.max(0.0), 0.0, TAU).ok();
}

/// Glowing token with a rim
pub fn token(ctx: &CanvasRenderingContext2d, token: &Token, palette: &Palette) {
    let (x, y, r) = (token.pos.x as f64, token.pos.y as f64, token.radius as f64);

    if let Ok(g) = ctx.create_radial_gradient(x, y, 2.0, x, y, r + 4.0) {
        g.add_color_stop(0.0, palette.token[0]).ok();
        g.add_color_stop(0.4, palette.token[1]).ok();
        g.add_color_stop(1.0, palette.token[2]).ok();
        ctx.set_fill_style_canvas_gradient(&g);
    }
    circle(ctx, x, y, r);
    ctx.fill();

    ctx.set_stroke_style_str(palette.token_rim);
    ctx.set_line_width(2.0);
    circle(ctx, x, y, r - 4.0);
    ctx.stroke();
}

/// Power-up orb with a letter badge
pub fn powerup(ctx: &CanvasRenderingContext2d, powerup: &PowerUp, time_ms: f64) {
    let (x, y, r) = (powerup.pos.x as f64, powerup.pos.y as f64, powerup.radius as f64);
    let (color, glyph) = match powerup.kind {
        PowerUpKind::Magnet => ("#ff5a5a", "M"),
        PowerUpKind::Shield => ("#5ad1ff", "S"),
        PowerUpKind::ComboBoost => ("#ffd23f", "x2"),
    };
    let pulse = 1.0 + (time_ms / 180.0).sin() * 0.08;

    ctx.save();
    ctx.set_global_alpha(0.35);
    ctx.set_fill_style_str(color);
    circle(ctx, x, y, r * 1.4 * pulse);
    ctx.fill();
    ctx.restore();

    ctx.set_fill_style_str(color);
    circle(ctx, x, y, r);
    ctx.fill();
    ctx.set_stroke_style_str("rgba(255,255,255,0.85)");
    ctx.set_line_width(2.0);
    ctx.stroke();

    ctx.set_fill_style_str("#02010a");
    ctx.set_font("bold 14px sans-serif");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text(glyph, x, y).ok();
}

pub fn hazard(ctx: &CanvasRenderingContext2d, hazard: &Hazard) {
    match hazard.kind {
        HazardKind::Jellyfish => jellyfish(ctx, hazard),
        HazardKind::Shark => shark(ctx, hazard),
    }
}

/// Dome, skirt and four wavy tentacles
fn jellyfish(ctx: &CanvasRenderingContext2d, h: &Hazard) {
    let r = h.radius as f64;
    ctx.save();
    ctx.translate(h.pos.x as f64, h.pos.y as f64).ok();

    let dome = r * 0.9;
    if let Ok(g) = ctx.create_radial_gradient(0.0, -dome * 0.2, 4.0, 0.0, 0.0, r * 1.2) {
        g.add_color_stop(0.0, "rgba(220,255,255,0.95)").ok();
        g.add_color_stop(0.4, "rgba(170,240,255,0.9)").ok();
        g.add_color_stop(1.0, "rgba(120,80,255,0.18)").ok();
        ctx.set_fill_style_canvas_gradient(&g);
    }

    ctx.begin_path();
    ctx.move_to(-r, 0.0);
    ctx.quadratic_curve_to(0.0, -dome, r, 0.0);
    ctx.quadratic_curve_to(r * 0.7, dome * 0.35, 0.0, dome * 0.45);
    ctx.quadratic_curve_to(-r * 0.7, dome * 0.35, -r, 0.0);
    ctx.close_path();
    ctx.fill();
    ctx.set_stroke_style_str("rgba(190,240,255,0.9)");
    ctx.set_line_width(1.6);
    ctx.stroke();

    ctx.set_stroke_style_str("rgba(200,240,255,0.95)");
    ctx.set_line_width(2.0);
    let tentacles = 4;
    let base_y = dome * 0.45;
    for t in 0..tentacles {
        let offset = -r * 0.6 + (t as f64 * r * 1.2) / (tentacles - 1) as f64;
        let sway = if t % 2 == 0 { -1.0 } else { 1.0 };
        ctx.begin_path();
        ctx.move_to(offset, base_y);
        ctx.quadratic_curve_to(
            offset + sway * 6.0,
            base_y + dome * 0.7,
            offset + sway * 2.0,
            base_y + dome * 1.2,
        );
        ctx.stroke();
    }

    ctx.restore();
}

/// Body, tail, dorsal fin, eye and gill, facing left
fn shark(ctx: &CanvasRenderingContext2d, h: &Hazard) {
    let r = h.radius as f64;
    ctx.save();
    ctx.translate(h.pos.x as f64, h.pos.y as f64).ok();
    ctx.scale(-1.0, 1.0).ok();

    let body = r + 22.0;
    let g = ctx.create_linear_gradient(-body, 0.0, body, 0.0);
    g.add_color_stop(0.0, "#0b1724").ok();
    g.add_color_stop(0.5, "#1a293f").ok();
    g.add_color_stop(1.0, "#4a6b8a").ok();
    ctx.set_fill_style_canvas_gradient(&g);
    ctx.set_stroke_style_str("rgba(255,255,255,0.2)");
    ctx.set_line_width(1.4);

    ctx.begin_path();
    ctx.move_to(-body, 0.0);
    ctx.quadratic_curve_to(-r * 0.2, -r * 0.9, body, -2.0);
    ctx.quadratic_curve_to(body + 8.0, 0.0, body, 2.0);
    ctx.quadratic_curve_to(-r * 0.2, r * 0.9, -body, 0.0);
    ctx.close_path();
    ctx.fill();
    ctx.stroke();

    // Tail
    ctx.begin_path();
    ctx.move_to(-body, 0.0);
    ctx.line_to(-body - 18.0, -12.0);
    ctx.line_to(-body - 18.0, 12.0);
    ctx.close_path();
    ctx.fill();

    // Dorsal fin
    ctx.begin_path();
    ctx.move_to(-r * 0.2, -r * 0.6);
    ctx.line_to(-r * 0.65, -r * 1.1);
    ctx.line_to(0.0, -r * 0.5);
    ctx.close_path();
    ctx.fill();

    ctx.set_fill_style_str("#ffdde5");
    circle(ctx, r * 0.6, -r * 0.18, 3.0);
    ctx.fill();

    ctx.set_stroke_style_str("rgba(255,255,255,0.4)");
    ctx.set_line_width(1.0);
    ctx.begin_path();
    ctx.move_to(r * 0.25, -r * 0.05);
    ctx.line_to(r * 0.25, r * 0.15);
    ctx.stroke();

    ctx.restore();
}

/// The player's fish in its character colours
pub fn fish(ctx: &CanvasRenderingContext2d, player: &Player, colors: &CharacterPalette) {
    let r = player.radius as f64;
    ctx.save();
    ctx.translate(player.pos.x as f64, player.pos.y as f64).ok();

    // Tail
    ctx.save();
    ctx.set_fill_style_str(colors.tail);
    ctx.set_global_alpha(0.9);
    ctx.begin_path();
    ctx.move_to(-r - 10.0, 0.0);
    ctx.line_to(-r - 26.0, -16.0);
    ctx.line_to(-r - 26.0, 16.0);
    ctx.close_path();
    ctx.fill();
    ctx.restore();

    // Body
    let g = ctx.create_linear_gradient(-r, -r, r, r);
    g.add_color_stop(0.0, colors.body_stops[0]).ok();
    g.add_color_stop(0.5, colors.body_stops[1]).ok();
    g.add_color_stop(1.0, colors.body_stops[2]).ok();
    ctx.set_fill_style_canvas_gradient(&g);
    ctx.begin_path();
    ctx.ellipse(0.0, 0.0, r + 10.0, r, 0.0, 0.0, TAU).ok();
    ctx.fill();

    ctx.set_stroke_style_str("rgba(0,0,0,0.5)");
    ctx.set_line_width(2.0);
    ctx.stroke();

    // Eye
    ctx.set_fill_style_str("#ffffff");
    circle(ctx, r * 0.9, -6.0, 7.0);
    ctx.fill();
    ctx.set_fill_style_str("#02010a");
    circle(ctx, r * 0.9 + 1.0, -6.0, 4.9);
    ctx.fill();

    // Smile
    ctx.set_stroke_style_str("rgba(0,0,0,0.6)");
    ctx.set_line_width(1.8);
    ctx.begin_path();
    ctx.arc(r, 4.0, 6.0, 0.15 * PI, 0.85 * PI).ok();
    ctx.stroke();

    ctx.restore();
}

/// Bubble ring around the fish, one ring per shield charge
pub fn shield_rings(ctx: &CanvasRenderingContext2d, player: &Player, shields: u8) {
    ctx.save();
    ctx.set_stroke_style_str("rgba(90,209,255,0.7)");
    ctx.set_line_width(2.0);
    for i in 0..shields {
        circle(
            ctx,
            player.pos.x as f64,
            player.pos.y as f64,
            player.radius as f64 + 16.0 + i as f64 * 6.0,
        );
        ctx.stroke();
    }
    ctx.restore();
}

/// Faint halo showing the magnet's reach
pub fn magnet_halo(ctx: &CanvasRenderingContext2d, player: &Player, reach: f32, time_ms: f64) {
    ctx.save();
    ctx.set_global_alpha(0.15 + (time_ms / 250.0).sin().abs() * 0.1);
    ctx.set_fill_style_str("#ff5a5a");
    circle(ctx, player.pos.x as f64, player.pos.y as f64, reach as f64);
    ctx.fill();
    ctx.restore();
}
