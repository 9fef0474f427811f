//! Display and output formatting utilities

use crate::config::DisplayConfig;
use crate::game_of_life::Grid;

/// ANSI sequence that clears the terminal and homes the cursor
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Renders grids as text, one line per row and one character per column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRenderer {
    pub alive: char,
    pub dead: char,
}

impl Default for GridRenderer {
    fn default() -> Self {
        Self { alive: '#', dead: ' ' }
    }
}

impl From<&DisplayConfig> for GridRenderer {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            alive: config.alive_char,
            dead: config.dead_char,
        }
    }
}

impl GridRenderer {
    fn symbol(&self, alive: bool) -> char {
        if alive { self.alive } else { self.dead }
    }

    /// Render the grid's current generation
    pub fn render(&self, grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.height() * (grid.width() + 1));
        for row in grid.cells().chunks(grid.width()) {
            output.extend(row.iter().map(|cell| self.symbol(cell.is_alive())));
            output.push('\n');
        }
        output
    }

    /// Render the grid with column and row indices
    pub fn render_with_coords(&self, grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for (y, row) in grid.cells().chunks(grid.width()).enumerate() {
            output.push_str(&format!("{:2} ", y));
            for cell in row {
                let symbol = self.symbol(cell.is_alive());
                output.push(symbol);
                output.push(symbol);
            }
            output.push('\n');
        }

        output
    }
}

/// Kind of status line, each printed in its own ANSI color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Error,
    Info,
}

impl Tone {
    fn code(self) -> u8 {
        match self {
            Tone::Error => 31,
            Tone::Success => 32,
            Tone::Warning => 33,
            Tone::Info => 34,
        }
    }

    /// Wrap `text` in this tone's color, or return it unchanged when
    /// `NO_COLOR` is set or the terminal is dumb
    pub fn paint(self, text: &str) -> String {
        let enabled = std::env::var_os("NO_COLOR").is_none()
            && std::env::var("TERM").map_or(true, |term| term != "dumb");
        self.paint_if(text, enabled)
    }

    fn paint_if(self, text: &str, enabled: bool) -> String {
        if enabled {
            format!("\x1b[{}m{}\x1b[0m", self.code(), text)
        } else {
            text.to_string()
        }
    }
}
