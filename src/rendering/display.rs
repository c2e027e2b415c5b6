//! # Display Management
//!
//! The macroquad surface: tracks window size and DPI, paints column buffers
//! and minimap frames, and keeps the message history.

use crate::config::MINIMAP_SIZE;
use crate::game::{FrameSnapshot, Overlay};
use crate::input::PlayerInput;
use crate::rendering::{
    ColumnBuffer, MiniMapFrame, MiniMapProjector, ProjectionRenderer, Rgba, Viewport, MINIMAP_PLAYER, UI,
};
use crate::{DelveError, DelveResult};
use log::debug;
use macroquad::prelude::*;
use std::collections::VecDeque;

/// Height reserved at the bottom of the window for messages.
const MESSAGE_AREA: f32 = 70.0;
const MESSAGE_LINES: usize = 3;

/// Bounded message history, oldest first.
#[derive(Debug, Clone)]
pub struct MessageLog {
    lines: VecDeque<String>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Adds a message, dropping the oldest past capacity.
    pub fn push(&mut self, message: impl Into<String>) {
        self.lines.push_back(message.into());
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }

    /// The last `count` messages, oldest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .skip(self.lines.len().saturating_sub(count))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Macroquad display manager for the game.
pub struct MacroquadDisplay {
    /// Screen width in logical pixels
    pub screen_width: f32,
    /// Screen height in logical pixels
    pub screen_height: f32,
    /// Device pixels per logical pixel
    pub dpi_scale: f32,
    pub renderer: ProjectionRenderer,
    pub minimap: MiniMapProjector,
    pub messages: MessageLog,
    pub ui: UI,
}

impl MacroquadDisplay {
    /// Creates a display for the current window.
    ///
    /// Fails if the window reports no drawable area.
    pub fn new(renderer: ProjectionRenderer) -> DelveResult<Self> {
        let mut display = Self {
            screen_width: 0.0,
            screen_height: 0.0,
            dpi_scale: 1.0,
            renderer,
            minimap: MiniMapProjector::default(),
            messages: MessageLog::new(100),
            ui: UI::new(),
        };
        display.refresh_size();
        if display.viewport().is_empty() {
            return Err(DelveError::Display(format!(
                "window too small: {}x{}",
                display.screen_width, display.screen_height
            )));
        }
        Ok(display)
    }

    /// Picks up window resizes and DPI changes.
    pub fn refresh_size(&mut self) {
        let (width, height, dpi) = (screen_width(), screen_height(), screen_dpi_scale());
        if (width, height, dpi) != (self.screen_width, self.screen_height, self.dpi_scale) {
            debug!("Surface resized to {width}x{height} at {dpi}x");
            self.screen_width = width;
            self.screen_height = height;
            self.dpi_scale = dpi;
        }
    }

    /// Area used by the first-person view.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.screen_width, (self.screen_height - MESSAGE_AREA).max(0.0))
            .with_dpi_scale(self.dpi_scale)
    }

    /// Adds a message to the message history.
    pub fn add_message(&mut self, message: impl Into<String>) {
        self.messages.push(message);
    }

    /// Paints one frame and returns any input produced by clicking overlay
    /// buttons.
    pub fn render_frame(&mut self, snapshot: &FrameSnapshot<'_>) -> DelveResult<Option<PlayerInput>> {
        self.refresh_size();
        clear_background(BLACK);

        let buffer = self
            .renderer
            .render(snapshot.grid, &snapshot.pose, self.viewport(), snapshot.lights);
        paint_columns(&buffer);

        let frame = self.minimap.project(snapshot.grid, &snapshot.pose);
        paint_minimap(&frame, self.screen_width - MINIMAP_SIZE - 10.0, 10.0);

        self.ui.render_hud(snapshot);
        let clicked = match snapshot.overlay {
            Overlay::None => None,
            Overlay::Dialogue(monster) => self.ui.render_dialogue(monster),
            Overlay::Battle(battle) => {
                self.ui.render_battle(battle);
                None
            }
        };

        self.render_messages();
        Ok(clicked)
    }

    /// Renders the message area.
    fn render_messages(&self) {
        let top = self.screen_height - MESSAGE_AREA;
        draw_rectangle(0.0, top, self.screen_width, MESSAGE_AREA, Color::new(0.0, 0.0, 0.0, 0.8));
        for (i, message) in self.messages.recent(MESSAGE_LINES).enumerate() {
            draw_text(message, 10.0, top + 20.0 + i as f32 * 18.0, 16.0, WHITE);
        }
    }
}

fn color(rgba: Rgba) -> Color {
    Color::from_rgba(rgba.r, rgba.g, rgba.b, rgba.a)
}

/// Paints sky, floor, wall strips and the crosshair.
pub fn paint_columns(buffer: &ColumnBuffer) {
    let (width, height) = (buffer.width, buffer.height);
    draw_rectangle(0.0, 0.0, width, height / 4.0, color(buffer.sky_upper));
    draw_rectangle(0.0, height / 4.0, width, height / 4.0, color(buffer.sky_lower));
    draw_rectangle(0.0, height / 2.0, width, height / 2.0, color(buffer.floor));

    for column in &buffer.columns {
        for band in &column.bands {
            draw_rectangle(column.x, band.y, column.width, band.height, color(band.color));
        }
        draw_rectangle(column.x, column.top, column.width.min(1.0), column.height, color(buffer.rim));
        if column.highlight {
            draw_rectangle(column.x, column.top, column.width, 1.0, color(buffer.highlight));
        }
    }

    let crosshair = buffer.crosshair;
    let tint = color(crosshair.color);
    draw_line(
        crosshair.x - crosshair.half_size,
        crosshair.y,
        crosshair.x + crosshair.half_size,
        crosshair.y,
        1.0,
        tint,
    );
    draw_line(
        crosshair.x,
        crosshair.y - crosshair.half_size,
        crosshair.x,
        crosshair.y + crosshair.half_size,
        1.0,
        tint,
    );
}

/// Paints a minimap frame with its top-left corner at `(x, y)`.
pub fn paint_minimap(frame: &MiniMapFrame, x: f32, y: f32) {
    for cell in &frame.cells {
        draw_rectangle(x + cell.x, y + cell.y, cell.width, cell.height, color(cell.color));
    }
    let marker = color(MINIMAP_PLAYER);
    draw_circle(x + frame.player.0, y + frame.player.1, frame.player_radius, marker);
    let [tip, left, right] = frame.arrow;
    draw_triangle(
        vec2(x + tip.0, y + tip.1),
        vec2(x + left.0, y + left.1),
        vec2(x + right.0, y + right.1),
        marker,
    );
}
