use crate::Color;

pub const MIN_GRID_DIM: i32 = 8;
pub const MAX_GRID_DIM: i32 = 64;
pub const DEFAULT_GRID_DIM: i32 = 16;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(x: {}, y: {})", self.x, self.y)
    }
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

impl From<(i32, i32)> for Position {
    fn from(value: (i32, i32)) -> Self {
        Position { x: value.0, y: value.1 }
    }
}

/// Grid dimensions. `width` is the column count, `height` the row count.
/// Cells are addressed by linear index `y * width + x`, row-major.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(width: {}, height: {})", self.width, self.height)
    }
}

impl Default for Size {
    fn default() -> Self {
        Size {
            width: DEFAULT_GRID_DIM,
            height: DEFAULT_GRID_DIM,
        }
    }
}

fn clamp_dimension(value: Option<i32>) -> i32 {
    value.unwrap_or(DEFAULT_GRID_DIM).clamp(MIN_GRID_DIM, MAX_GRID_DIM)
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Size { width, height }
    }

    /// Validated grid dimensions: missing values default to 16, out of
    /// range values are clamped to `[8, 64]`.
    pub fn clamped(rows: Option<i32>, cols: Option<i32>) -> Self {
        Size {
            width: clamp_dimension(cols),
            height: clamp_dimension(rows),
        }
    }

    pub fn is_valid(&self) -> bool {
        (MIN_GRID_DIM..=MAX_GRID_DIM).contains(&self.width) && (MIN_GRID_DIM..=MAX_GRID_DIM).contains(&self.height)
    }

    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    pub fn to_index(&self, pos: Position) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    pub fn to_position(&self, index: usize) -> Position {
        Position::new(index as i32 % self.width, index as i32 / self.width)
    }

    /// Valid orthogonal neighbors of `index`. Never yields an
    /// out-of-range index.
    pub fn neighbors4(&self, index: usize) -> Vec<usize> {
        let pos = self.to_position(index);
        let mut result = Vec::with_capacity(4);
        if pos.x > 0 {
            result.push(index - 1);
        }
        if pos.x < self.width - 1 {
            result.push(index + 1);
        }
        if pos.y > 0 {
            result.push(index - self.width as usize);
        }
        if pos.y < self.height - 1 {
            result.push(index + self.width as usize);
        }
        result
    }

    /// Reflection targets of `index` under the given mirror axis.
    ///
    /// Diagonal yields both reflections and may contain `index` itself on
    /// center rows/columns; duplicates are not filtered, the caller
    /// applies effects idempotently.
    pub fn mirror_indices(&self, index: usize, axis: MirrorAxis) -> Vec<usize> {
        let pos = self.to_position(index);
        let vertical = (pos.y * self.width + (self.width - 1 - pos.x)) as usize;
        let horizontal = ((self.height - 1 - pos.y) * self.width + pos.x) as usize;
        match axis {
            MirrorAxis::Vertical => vec![vertical],
            MirrorAxis::Horizontal => vec![horizontal],
            MirrorAxis::Diagonal => vec![vertical, horizontal],
        }
    }
}

/// Fixed-axis point reflection used by the symmetric grid toggle,
/// independent of [`MirrorMode`]. `index` must be below `total`.
pub fn symmetric_mirror_index(index: usize, total: usize) -> usize {
    total - 1 - index
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MirrorAxis {
    #[default]
    Vertical,
    Horizontal,
    Diagonal,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MirrorMode {
    pub active: bool,
    pub axis: MirrorAxis,
}

/// Accessor for a grid of cell colors. Out-of-range reads resolve to
/// "no cell" (`None`), out-of-range writes are ignored.
pub trait PixelPane {
    fn get_color(&self, index: usize) -> Option<Color>;
    fn set_color(&mut self, index: usize, color: Color);
    fn cell_count(&self) -> usize;
}

/// Concrete cell store. Fresh cells are white.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    size: Size,
    cells: Vec<Color>,
}

impl PixelBuffer {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            cells: vec![Color::WHITE; size.cell_count()],
        }
    }

    pub fn get_size(&self) -> Size {
        self.size
    }

    /// Resets every cell to white.
    pub fn clear(&mut self) {
        self.cells.fill(Color::WHITE);
    }

    /// Read-only raster-order color sequence, for export.
    pub fn colors(&self) -> &[Color] {
        &self.cells
    }
}

impl PixelPane for PixelBuffer {
    fn get_color(&self, index: usize) -> Option<Color> {
        self.cells.get(index).copied()
    }

    fn set_color(&mut self, index: usize, color: Color) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = color;
        }
    }

    fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        PixelBuffer::new(Size::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{symmetric_mirror_index, Color, MirrorAxis, PixelBuffer, PixelPane, Position, Size};

    #[test]
    fn test_dimension_clamp() {
        assert_eq!(Size::new(16, 8), Size::clamped(Some(4), Some(16)));
        assert_eq!(Size::new(16, 64), Size::clamped(Some(100), Some(16)));
        assert_eq!(Size::new(16, 16), Size::clamped(None, None));
        assert_eq!(Size::new(8, 64), Size::clamped(Some(1000), Some(-3)));
    }

    #[test]
    fn test_index_round_trip() {
        let size = Size::new(16, 16);
        assert_eq!(Position::new(5, 0), size.to_position(5));
        assert_eq!(Position::new(5, 15), size.to_position(245));
        assert_eq!(5, size.to_index(Position::new(5, 0)));
        assert_eq!(245, size.to_index(Position::new(5, 15)));
    }

    #[test]
    fn test_neighbors_interior() {
        let size = Size::new(16, 16);
        assert_eq!(vec![16 + 4, 16 + 6, 5, 2 * 16 + 5], size.neighbors4(16 + 5));
    }

    #[test]
    fn test_neighbors_corners() {
        let size = Size::new(8, 8);
        assert_eq!(vec![1, 8], size.neighbors4(0));
        assert_eq!(vec![62, 55], size.neighbors4(63));
        assert_eq!(vec![6, 15], size.neighbors4(7));
        assert_eq!(vec![57, 48], size.neighbors4(56));
    }

    #[test]
    fn test_mirror_indices() {
        let size = Size::new(16, 16);
        assert_eq!(vec![10], size.mirror_indices(5, MirrorAxis::Vertical));
        assert_eq!(vec![245], size.mirror_indices(5, MirrorAxis::Horizontal));
        assert_eq!(vec![10, 245], size.mirror_indices(5, MirrorAxis::Diagonal));
    }

    #[test]
    fn test_mirror_center_maps_to_itself() {
        // odd width: the center column is its own vertical reflection
        let size = Size::new(9, 9);
        assert_eq!(vec![4], size.mirror_indices(4, MirrorAxis::Vertical));
    }

    #[test]
    fn test_symmetric_mirror_index() {
        assert_eq!(255, symmetric_mirror_index(0, 256));
        assert_eq!(0, symmetric_mirror_index(255, 256));
        assert_eq!(127, symmetric_mirror_index(128, 256));
    }

    #[test]
    fn test_buffer_defaults_to_white() {
        let buffer = PixelBuffer::new(Size::new(8, 8));
        assert_eq!(64, buffer.cell_count());
        assert_eq!(Some(Color::WHITE), buffer.get_color(63));
        assert_eq!(None, buffer.get_color(64));
    }

    #[test]
    fn test_out_of_range_write_is_ignored() {
        let mut buffer = PixelBuffer::new(Size::new(8, 8));
        buffer.set_color(64, Color::BLACK);
        assert!(buffer.colors().iter().all(|c| *c == Color::WHITE));
    }
}
