//! Drawing session state and tool dispatch.
//!
//! A [`DrawSession`] owns the pixel buffer and the level-triggered
//! drawing state: press starts a stroke, drag re-applies the active tool,
//! release ends it. Mutating tool effects are replicated to mirror and
//! symmetry targets after the primary cell.

use crate::{paint, symmetric_mirror_index, Color, EngineResult, MirrorAxis, MirrorMode, PixelBuffer, PixelPane, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
    Fill,
    Picker,
}

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 3.0;

pub struct DrawSession {
    size: Size,
    buffer: PixelBuffer,

    tool: Tool,
    current_color: Color,
    is_drawing: bool,

    mirror_mode: MirrorMode,
    symmetric_grid: bool,

    grid_visible: bool,
    zoom: f32,

    last_valid_size: Size,
}

impl Default for DrawSession {
    fn default() -> Self {
        let size = Size::default();
        Self {
            size,
            buffer: PixelBuffer::new(size),
            tool: Tool::default(),
            current_color: Color::RED,
            is_drawing: false,
            mirror_mode: MirrorMode::default(),
            symmetric_grid: false,
            grid_visible: true,
            zoom: 1.0,
            last_valid_size: size,
        }
    }
}

impl DrawSession {
    pub fn new(rows: Option<i32>, cols: Option<i32>) -> Self {
        let size = Size::clamped(rows, cols);
        Self {
            size,
            buffer: PixelBuffer::new(size),
            last_valid_size: size,
            ..Self::default()
        }
    }

    pub fn get_size(&self) -> Size {
        self.size
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn current_color(&self) -> Color {
        self.current_color
    }

    pub fn set_current_color(&mut self, color: Color) {
        self.current_color = color;
    }

    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    pub fn mirror_mode(&self) -> MirrorMode {
        self.mirror_mode
    }

    pub fn toggle_mirror(&mut self) {
        self.mirror_mode.active = !self.mirror_mode.active;
    }

    pub fn set_mirror_axis(&mut self, axis: MirrorAxis) {
        self.mirror_mode.axis = axis;
    }

    pub fn symmetric_grid(&self) -> bool {
        self.symmetric_grid
    }

    pub fn toggle_symmetry(&mut self) {
        self.symmetric_grid = !self.symmetric_grid;
    }

    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    pub fn toggle_grid(&mut self) {
        self.grid_visible = !self.grid_visible;
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn adjust_zoom(&mut self, amount: f32) {
        self.zoom = (self.zoom + amount).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Begins a stroke at `index` and applies the active tool there.
    pub fn start_drawing(&mut self, index: usize) {
        self.is_drawing = true;
        self.apply_tool(index);
    }

    /// Re-applies the active tool at `index` while a stroke is in
    /// progress (drag paint). Ignored otherwise.
    pub fn continue_drawing(&mut self, index: usize) {
        if self.is_drawing {
            self.apply_tool(index);
        }
    }

    pub fn stop_drawing(&mut self) {
        self.is_drawing = false;
    }

    fn apply_tool(&mut self, index: usize) {
        self.apply_effect(index);

        if self.tool == Tool::Picker {
            // a read has nothing to replicate
            return;
        }
        if self.mirror_mode.active {
            for target in self.size.mirror_indices(index, self.mirror_mode.axis) {
                self.apply_effect(target);
            }
        }
        // an activation outside the grid has no symmetric counterpart
        if self.symmetric_grid && index < self.buffer.cell_count() {
            self.apply_effect(symmetric_mirror_index(index, self.buffer.cell_count()));
        }
    }

    fn apply_effect(&mut self, index: usize) {
        match self.tool {
            Tool::Brush => self.buffer.set_color(index, self.current_color),
            Tool::Eraser => self.buffer.set_color(index, Color::WHITE),
            Tool::Fill => paint::flood_fill(&mut self.buffer, self.size, index, self.current_color),
            Tool::Picker => {
                if let Some(color) = self.buffer.get_color(index) {
                    self.current_color = color;
                }
            }
        }
    }

    /// Rebuilds the grid with validated dimensions. Cells reset to white
    /// and any in-progress stroke ends. A size that survives clamping in
    /// an invalid state falls back to the last known-good size once.
    pub fn resize_grid(&mut self, rows: Option<i32>, cols: Option<i32>) {
        let mut size = Size::clamped(rows, cols);
        if !size.is_valid() {
            log::warn!("grid rebuild rejected {size}, reverting to {}", self.last_valid_size);
            size = self.last_valid_size;
        }
        self.size = size;
        self.buffer = PixelBuffer::new(size);
        self.is_drawing = false;
        self.last_valid_size = size;
    }

    /// Resets every cell to white.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Rasterizes the current grid, `scale` PNG pixels per cell.
    pub fn export_png(&self, scale: u32) -> EngineResult<Vec<u8>> {
        crate::export_png(self.buffer.colors(), self.size, scale)
    }
}
