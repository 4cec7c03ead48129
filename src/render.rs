use colored::Colorize as _;
use gridmaze_core::{dims::Dims, OccupancyGrid, Path};
use hashbrown::HashSet;

const WALL: &str = "██";
const OPEN: &str = "  ";
const ON_PATH: &str = "··";
const START: &str = "S ";
const END: &str = "E ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Wall,
    Open,
    Path,
    Start,
    End,
}

impl Tile {
    fn text(self) -> &'static str {
        match self {
            Tile::Wall => WALL,
            Tile::Open => OPEN,
            Tile::Path => ON_PATH,
            Tile::Start => START,
            Tile::End => END,
        }
    }

    fn paint(self) -> String {
        let text = self.text();
        match self {
            Tile::Wall => text.white().to_string(),
            Tile::Open => text.to_string(),
            Tile::Path => text.green().to_string(),
            Tile::Start => text.black().on_green().to_string(),
            Tile::End => text.black().on_red().to_string(),
        }
    }
}

/// Draws the maze two characters per cell, with the path and both endpoints on top.
pub fn render(grid: &OccupancyGrid, path: &Path, start: Dims, end: Dims, color: bool) -> String {
    let on_path: HashSet<Dims> = path.iter().copied().collect();
    let mut out = String::with_capacity((grid.width() * 2 + 1) * grid.height());

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let pos = Dims::from((x, y));
            let tile = if pos == start {
                Tile::Start
            } else if pos == end {
                Tile::End
            } else if on_path.contains(&pos) {
                Tile::Path
            } else if grid.is_open(pos) {
                Tile::Open
            } else {
                Tile::Wall
            };

            if color {
                out.push_str(&tile.paint());
            } else {
                out.push_str(tile.text());
            }
        }
        out.push('\n');
    }

    out
}
