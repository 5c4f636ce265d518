//! Tile collaborators
//!
//! The layout core only asks two questions of a level (is this cell
//! passable, is it a wall) and only ever draws lines on it. [`TileQuery`]
//! and [`Painter`] are those contracts; [`TileGrid`] is a plain in-memory
//! implementation.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::rect::{Point, Rect};

/// Read-only predicates over level cells
pub trait TileQuery {
    fn is_passable(&self, x: i32, y: i32) -> bool;
    fn is_wall(&self, x: i32, y: i32) -> bool;
}

/// Drawing surface used for tunnels
pub trait Painter {
    type Material;

    /// Fill every cell of `rect`
    fn fill_rect(&mut self, rect: &Rect, material: &Self::Material);

    /// Draw a straight line from `from` to `to`, both ends included.
    /// A bold line also covers the four orthogonal neighbours of each cell.
    fn draw_line(&mut self, from: Point, to: Point, material: &Self::Material, bold: bool);
}

bitflags! {
    /// Tile behaviour flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TileFlags: u8 {
        const PASSABLE = 0x01;
        const WALL = 0x02;
        const HOLE = 0x04;
        const SOLID = 0x08;
    }
}

/// Tile type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Tile {
    #[default]
    Empty = 0,
    WallA = 1,
    WallB = 2,
    FloorA = 3,
    FloorB = 4,
    FloorC = 5,
    FloorD = 6,
    Chasm = 7,
    Door = 8,
}

impl Tile {
    pub const fn flags(self) -> TileFlags {
        match self {
            Tile::Empty => TileFlags::SOLID,
            Tile::WallA | Tile::WallB => TileFlags::WALL.union(TileFlags::SOLID),
            Tile::FloorA | Tile::FloorB | Tile::FloorC | Tile::FloorD | Tile::Door => {
                TileFlags::PASSABLE
            }
            Tile::Chasm => TileFlags::HOLE,
        }
    }

    pub const fn is_wall(self) -> bool {
        self.flags().contains(TileFlags::WALL)
    }

    pub const fn is_passable(self) -> bool {
        self.flags().contains(TileFlags::PASSABLE)
    }

    /// ASCII symbol for debug dumps
    pub const fn symbol(self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::WallA | Tile::WallB => '#',
            Tile::FloorA => '.',
            Tile::FloorB => ',',
            Tile::FloorC => ':',
            Tile::FloorD => ';',
            Tile::Chasm => '~',
            Tile::Door => '+',
        }
    }
}

/// Rectangular tile map with origin at `(0, 0)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            tiles: vec![Tile::Empty; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y).then(|| (y * self.width + x) as usize)
    }

    /// Tile at `(x, y)`; out of bounds reads as [`Tile::Empty`]
    pub fn get(&self, x: i32, y: i32) -> Tile {
        self.index(x, y).map_or(Tile::Empty, |i| self.tiles[i])
    }

    /// Set a tile; writes out of bounds are dropped
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = tile;
        }
    }

    /// Fill `rect` shrunk by `inset` cells on each side
    pub fn fill_inset(&mut self, rect: &Rect, inset: i32, tile: Tile) {
        self.fill_rect(&rect.shrink(inset), &tile);
    }

    /// Paint a room shell: walls on the border, floor inside
    pub fn paint_room(&mut self, rect: &Rect, wall: Tile, floor: Tile) {
        self.fill_rect(rect, &wall);
        self.fill_inset(rect, 1, floor);
    }

    /// Count cells holding `tile`
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// Render the grid as ASCII, one row per line
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(((self.width + 1) * self.height) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.get(x, y).symbol());
            }
            out.push('\n');
        }
        out
    }
}

impl TileQuery for TileGrid {
    fn is_passable(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_passable()
    }

    fn is_wall(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_wall()
    }
}

impl Painter for TileGrid {
    type Material = Tile;

    fn fill_rect(&mut self, rect: &Rect, material: &Tile) {
        for p in rect.points() {
            self.set(p.x, p.y, *material);
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, material: &Tile, bold: bool) {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let steps = dx.abs().max(dy.abs());

        for i in 0..=steps {
            // Orthogonal lines step exactly; diagonals fall back to rounding
            let (x, y) = if steps == 0 {
                (from.x, from.y)
            } else {
                (
                    from.x + (dx * i + dx.signum() * steps / 2) / steps,
                    from.y + (dy * i + dy.signum() * steps / 2) / steps,
                )
            };

            self.set(x, y, *material);
            if bold {
                self.set(x + 1, y, *material);
                self.set(x - 1, y, *material);
                self.set(x, y + 1, *material);
                self.set(x, y - 1, *material);
            }
        }
    }
}
