//! # User Interface Elements
//!
//! Overlays drawn above the first-person view: the encounter dialogue with
//! its two buttons, the tactical battle panel, and the HUD with light sliders
//! and exploration progress.

use crate::game::{Battle, FrameSnapshot, GameStatistics, MonsterInstance};
use crate::input::PlayerInput;
use crate::rendering::LightSettings;
use macroquad::prelude::*;

const PANEL: Color = Color::new(0.05, 0.05, 0.08, 0.88);
const BUTTON: Color = Color::new(0.22, 0.24, 0.32, 1.0);
const TACTICAL_CELL: f32 = 26.0;

/// A clickable button.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub label: &'static str,
    pub input: PlayerInput,
}

/// Where the dialogue box and its buttons sit for a given screen size.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueLayout {
    pub panel: Rect,
    pub buttons: [Button; 2],
}

impl DialogueLayout {
    /// Centers a fixed-size dialogue on the screen.
    pub fn centered(screen_width: f32, screen_height: f32) -> Self {
        let (width, height) = (360.0, 140.0);
        let panel = Rect::new(
            (screen_width - width) / 2.0,
            (screen_height - height) / 2.0,
            width,
            height,
        );
        let button_y = panel.y + height - 48.0;
        Self {
            panel,
            buttons: [
                Button {
                    rect: Rect::new(panel.x + 30.0, button_y, 130.0, 32.0),
                    label: "Negotiate (N)",
                    input: PlayerInput::Negotiate,
                },
                Button {
                    rect: Rect::new(panel.x + width - 160.0, button_y, 130.0, 32.0),
                    label: "Fight (F)",
                    input: PlayerInput::Fight,
                },
            ],
        }
    }

    /// The input bound to the button under `point`, if any.
    pub fn hit_test(&self, point: Vec2) -> Option<PlayerInput> {
        self.buttons
            .iter()
            .find(|button| button.rect.contains(point))
            .map(|button| button.input)
    }
}

/// Overlay renderer.
#[derive(Debug, Default)]
pub struct UI;

impl UI {
    /// Creates a new UI instance.
    pub fn new() -> Self {
        Self
    }

    /// Draws the encounter dialogue and returns the clicked button's input.
    pub fn render_dialogue(&self, monster: &MonsterInstance) -> Option<PlayerInput> {
        let layout = DialogueLayout::centered(screen_width(), screen_height());
        let panel = layout.panel;
        draw_rectangle(panel.x, panel.y, panel.w, panel.h, PANEL);
        draw_rectangle_lines(panel.x, panel.y, panel.w, panel.h, 2.0, GOLD);
        draw_text(
            &format!("A {} blocks the way!", monster.name),
            panel.x + 20.0,
            panel.y + 34.0,
            24.0,
            WHITE,
        );
        draw_text(
            &format!(
                "HP {}  AC {}  CR {}",
                monster.hp, monster.armor_class, monster.challenge_rating
            ),
            panel.x + 20.0,
            panel.y + 60.0,
            18.0,
            LIGHTGRAY,
        );

        for button in &layout.buttons {
            let rect = button.rect;
            draw_rectangle(rect.x, rect.y, rect.w, rect.h, BUTTON);
            draw_text(button.label, rect.x + 10.0, rect.y + 22.0, 18.0, WHITE);
        }

        if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            return layout.hit_test(vec2(x, y));
        }
        None
    }

    /// Draws the tactical grid, hit points and the tail of the battle log.
    pub fn render_battle(&self, battle: &Battle) {
        let size = battle.grid_size().max(1) as f32;
        let grid_px = size * TACTICAL_CELL;
        let width = grid_px + 300.0;
        let height = grid_px + 40.0;
        let x0 = (screen_width() - width) / 2.0;
        let y0 = (screen_height() - height) / 2.0;

        draw_rectangle(x0, y0, width, height, PANEL);
        let (gx, gy) = (x0 + 20.0, y0 + 20.0);
        for row in 0..battle.grid_size() {
            for col in 0..battle.grid_size() {
                draw_rectangle_lines(
                    gx + col as f32 * TACTICAL_CELL,
                    gy + row as f32 * TACTICAL_CELL,
                    TACTICAL_CELL,
                    TACTICAL_CELL,
                    1.0,
                    DARKGRAY,
                );
            }
        }

        let half = TACTICAL_CELL / 2.0;
        let enemy = battle.enemy_position();
        draw_circle(
            gx + enemy.x as f32 * TACTICAL_CELL + half,
            gy + enemy.y as f32 * TACTICAL_CELL + half,
            half - 4.0,
            RED,
        );
        let player = battle.player_position();
        draw_circle(
            gx + player.x as f32 * TACTICAL_CELL + half,
            gy + player.y as f32 * TACTICAL_CELL + half,
            half - 6.0,
            SKYBLUE,
        );

        let tx = gx + grid_px + 20.0;
        let mut line_y = gy + 16.0;
        draw_text(
            &format!("Party {}/{}", battle.player_hp(), battle.player_max_hp()),
            tx,
            line_y,
            20.0,
            SKYBLUE,
        );
        line_y += 22.0;
        draw_text(
            &format!(
                "{} {}/{}",
                battle.monster().name,
                battle.enemy_hp().max(0),
                battle.enemy_max_hp()
            ),
            tx,
            line_y,
            20.0,
            RED,
        );
        line_y += 30.0;

        let reach = if battle.in_melee_range() {
            "In reach: Space to attack"
        } else {
            "Close in with WASD"
        };
        draw_text(reach, tx, line_y, 16.0, LIGHTGRAY);
        line_y += 26.0;

        let log = battle.log();
        for entry in &log[log.len().saturating_sub(5)..] {
            draw_text(&entry.to_string(), tx, line_y, 16.0, WHITE);
            line_y += 18.0;
        }
    }

    /// Draws slider values, exploration progress and session counters.
    pub fn render_hud(&self, snapshot: &FrameSnapshot<'_>) {
        let mut line_y = 24.0;
        draw_text(&slider_label("Ambient", snapshot.lights.ambient), 12.0, line_y, 18.0, WHITE);
        line_y += 20.0;
        draw_text(&slider_label("Torch  ", snapshot.lights.torch), 12.0, line_y, 18.0, ORANGE);
        line_y += 20.0;
        draw_text(
            &format!("Explored {:.0}%", snapshot.explored_percent),
            12.0,
            line_y,
            18.0,
            LIGHTGRAY,
        );
        line_y += 20.0;
        draw_text(&stats_line(snapshot.statistics), 12.0, line_y, 16.0, GRAY);
    }
}

/// Text slider, e.g. `Torch [#######---]`.
pub fn slider_label(name: &str, value: f32) -> String {
    let filled = (LightSettings::new(value, 0.0).ambient * 10.0).round() as usize;
    format!("{name} [{}{}]", "#".repeat(filled), "-".repeat(10 - filled))
}

fn stats_line(statistics: &GameStatistics) -> String {
    format!(
        "Steps {}  Fights won {}  XP {}",
        statistics.steps_taken, statistics.victories, statistics.xp_awarded
    )
}
