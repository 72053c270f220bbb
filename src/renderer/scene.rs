//! Scene rendering
//!
//! A read-only pass over the game state. Draw order (back to front):
//! background, rain, ground, player, obstacles, HUD, winter banner, then the
//! idle prompt or game-over overlay.

use glam::Vec2;

use super::surface::{
    Color, Font, FontFamily, LinearGradient, Paint, Stroke, Surface, TextAlign, TextStyle,
};
use crate::assets::{AssetReadiness, AssetRole};
use crate::consts::*;
use crate::format_thousands;
use crate::sim::{
    GameOverSummary, GamePhase, GameState, Obstacle, ObstacleKind, PitLabel, Player, Rect,
};

// Palette
const SKY: (Color, Color) = (Color::rgb(0xe0, 0xf2, 0xfe), Color::rgb(0xdb, 0xea, 0xfe));
const WINTER_SKY: (Color, Color) = (Color::rgb(0x47, 0x55, 0x69), Color::rgb(0x64, 0x74, 0x8b));
const RAIN: Color = Color::rgba(200, 220, 255, 0.6);
const GROUND: (Color, Color) = (Color::rgb(0x94, 0xa3, 0xb8), Color::rgb(0x64, 0x74, 0x8b));
const GROUND_EDGE: Color = Color::rgb(0x47, 0x55, 0x69);
const PLAYER_BLUE: Color = Color::rgb(0x20, 0x55, 0xff);
const PIT_FILL: Color = Color::rgb(0x1e, 0x29, 0x3b);
const RESIGNATION_RED: Color = Color::rgb(0xef, 0x44, 0x44);
const INK: Color = Color::rgb(0x1e, 0x29, 0x3b);
const MUTED: Color = Color::rgb(0x64, 0x74, 0x8b);
const BANNER: (Color, Color) = (Color::rgba(30, 64, 175, 0.95), Color::rgba(37, 99, 235, 0.95));
const OVERLAY: (Color, Color) = (Color::rgba(30, 41, 59, 0.9), Color::rgba(51, 65, 85, 0.9));
const LINK_LIGHT: Color = Color::rgb(0x60, 0xa5, 0xfa);
const LINK: Color = Color::rgb(0x3b, 0x82, 0xf6);
const HINT: Color = Color::rgb(0x94, 0xa3, 0xb8);

pub const CALL_TO_ACTION: &str = "Learn better rostering at";
pub const CALL_TO_ACTION_URL: &str = "www.rosterlab.com";
pub const RESTART_PROMPT: &str = "Press SPACE to restart";
pub const START_PROMPT: &str = "Press SPACE or click to start";
pub const WINTER_TITLE: &str = "WINTER SEASON";
pub const RESIGNATION_TEXT: &str = "I QUIT";

/// Draw one frame
pub fn render(state: &GameState, assets: &AssetReadiness, surface: &mut impl Surface) {
    draw_background(state.winter, surface);
    if state.winter {
        draw_rain(state, surface);
    }
    draw_ground(surface);
    draw_player(&state.player, assets, surface);
    for obstacle in &state.obstacles {
        draw_obstacle(obstacle, assets, surface);
    }
    draw_hud(state, surface);
    if state.winter {
        draw_banner(state.banner_y, surface);
    }

    match state.phase {
        GamePhase::Idle => draw_start_prompt(surface),
        GamePhase::Running => {}
        GamePhase::GameOver => {
            let summary = state.summary.unwrap_or_else(|| {
                GameOverSummary::from_score(state.display_score(), state.high_score)
            });
            draw_game_over(&summary, surface);
        }
    }
}

fn vertical_gradient(top: f32, bottom: f32, colors: (Color, Color)) -> Paint {
    Paint::Linear(LinearGradient {
        from: Vec2::new(0.0, top),
        to: Vec2::new(0.0, bottom),
        start: colors.0,
        end: colors.1,
    })
}

fn text(font: Font, color: Color, align: TextAlign) -> TextStyle {
    TextStyle { font, color, align }
}

fn draw_background(winter: bool, surface: &mut impl Surface) {
    let colors = if winter { WINTER_SKY } else { SKY };
    // Diagonal sweep across the whole canvas
    let paint = Paint::Linear(LinearGradient {
        from: Vec2::ZERO,
        to: Vec2::new(GAME_WIDTH, GAME_HEIGHT),
        start: colors.0,
        end: colors.1,
    });
    surface.fill_rect(Rect::new(0.0, 0.0, GAME_WIDTH, GAME_HEIGHT), &paint);
}

fn draw_rain(state: &GameState, surface: &mut impl Surface) {
    let stroke = Stroke {
        color: RAIN,
        width: 2.0,
    };
    for drop in &state.raindrops {
        let tail = drop.pos + Vec2::new(-RAIN_DRIFT_X, drop.length);
        surface.stroke_line(drop.pos, tail, &stroke);
    }
}

fn draw_ground(surface: &mut impl Surface) {
    let top = GAME_HEIGHT - GROUND_HEIGHT;
    surface.fill_rect(
        Rect::new(0.0, top, GAME_WIDTH, GROUND_HEIGHT),
        &vertical_gradient(top, GAME_HEIGHT, GROUND),
    );
    surface.stroke_line(
        Vec2::new(0.0, top),
        Vec2::new(GAME_WIDTH, top),
        &Stroke {
            color: GROUND_EDGE,
            width: 2.0,
        },
    );
}

fn draw_player(player: &Player, assets: &AssetReadiness, surface: &mut impl Surface) {
    let Vec2 { x, y } = player.pos;

    if assets.is_ready(AssetRole::Player) {
        // The scooter sticks out a little behind the hitbox
        surface.draw_image(AssetRole::Player, Rect::new(x - 10.0, y, 80.0, 100.0));
        return;
    }

    surface.fill_round_rect(player.rect(), 10.0, &PLAYER_BLUE.into());
    // Clipboard badge
    surface.fill_round_rect(Rect::new(x + 10.0, y + 10.0, 30.0, 20.0), 5.0, &Color::WHITE.into());
    let badge = Font {
        px: 16,
        bold: true,
        family: FontFamily::Arial,
    };
    surface.fill_text(
        "\u{1f4cb}",
        Vec2::new(x + 15.0, y + 26.0),
        &text(badge, PLAYER_BLUE, TextAlign::Left),
    );
}

fn draw_obstacle(obstacle: &Obstacle, assets: &AssetReadiness, surface: &mut impl Surface) {
    let rect = obstacle.rect();
    let center_x = rect.left() + rect.size.x / 2.0;
    let center_y = rect.top() + rect.size.y / 2.0;

    match obstacle.kind {
        ObstacleKind::Pit { label } => {
            if label == PitLabel::SickLeave && assets.is_ready(AssetRole::SickLeave) {
                // The illustration stands on the pit rather than inside it
                surface.draw_image(
                    AssetRole::SickLeave,
                    Rect::new(rect.left() - 10.0, rect.top() - 60.0, 80.0, 93.0),
                );
                return;
            }
            surface.fill_round_rect(rect, 8.0, &PIT_FILL.into());
            surface.fill_text(
                label.as_str(),
                Vec2::new(center_x, center_y + 4.0),
                &text(Font::bold(13), Color::WHITE, TextAlign::Center),
            );
        }
        ObstacleKind::Resignation => {
            if assets.is_ready(AssetRole::Resignation) {
                surface.draw_image(AssetRole::Resignation, rect);
                return;
            }
            surface.fill_round_rect(rect, 8.0, &RESIGNATION_RED.into());
            surface.fill_text(
                RESIGNATION_TEXT,
                Vec2::new(center_x, center_y + 5.0),
                &text(Font::bold(15), Color::WHITE, TextAlign::Center),
            );
        }
    }
}

fn draw_hud(state: &GameState, surface: &mut impl Surface) {
    surface.fill_text(
        &format!("Score: {}", state.display_score()),
        Vec2::new(20.0, 35.0),
        &text(Font::bold(22), INK, TextAlign::Left),
    );
    surface.fill_text(
        &format!("High Score: {}", state.high_score),
        Vec2::new(20.0, 65.0),
        &text(Font::system(18), MUTED, TextAlign::Left),
    );
}

fn draw_banner(banner_y: f32, surface: &mut impl Surface) {
    surface.fill_rect(
        Rect::new(0.0, banner_y, GAME_WIDTH, BANNER_HEIGHT),
        &vertical_gradient(banner_y, banner_y + BANNER_HEIGHT, BANNER),
    );

    let mid_x = GAME_WIDTH / 2.0;
    let mid_y = banner_y + BANNER_HEIGHT / 2.0;
    surface.fill_text(
        WINTER_TITLE,
        Vec2::new(mid_x, mid_y + 10.0),
        &text(Font::bold(36), Color::WHITE, TextAlign::Center),
    );

    let flake = text(Font::system(24), Color::WHITE, TextAlign::Center);
    for dx in [-150.0, 150.0] {
        surface.fill_text("\u{2744}\u{fe0f}", Vec2::new(mid_x + dx, mid_y + 8.0), &flake);
    }
}

fn draw_start_prompt(surface: &mut impl Surface) {
    surface.fill_text(
        START_PROMPT,
        Vec2::new(GAME_WIDTH / 2.0, GAME_HEIGHT / 2.0 - 20.0),
        &text(Font::bold(28), INK, TextAlign::Center),
    );
}

fn draw_game_over(summary: &GameOverSummary, surface: &mut impl Surface) {
    surface.fill_rect(
        Rect::new(0.0, 0.0, GAME_WIDTH, GAME_HEIGHT),
        &vertical_gradient(0.0, GAME_HEIGHT, OVERLAY),
    );

    let mid_x = GAME_WIDTH / 2.0;
    let mid_y = GAME_HEIGHT / 2.0;
    let headline = text(Font::bold(32), Color::WHITE, TextAlign::Center);

    surface.fill_text(
        &format!("Your roster was published {} days late.", summary.days_late),
        Vec2::new(mid_x, mid_y - 60.0),
        &headline,
    );
    surface.fill_text(
        &format!(
            "It cost the hospital ${} extra in penalties.",
            format_thousands(summary.penalty)
        ),
        Vec2::new(mid_x, mid_y - 20.0),
        &headline,
    );
    surface.fill_text(
        CALL_TO_ACTION,
        Vec2::new(mid_x, mid_y + 30.0),
        &text(Font::system(24), LINK_LIGHT, TextAlign::Center),
    );
    surface.fill_text(
        CALL_TO_ACTION_URL,
        Vec2::new(mid_x, mid_y + 65.0),
        &text(Font::bold(28), LINK, TextAlign::Center),
    );
    surface.fill_text(
        RESTART_PROMPT,
        Vec2::new(mid_x, mid_y + 110.0),
        &text(Font::system(18), HINT, TextAlign::Center),
    );
}
