use std::collections::{HashSet, VecDeque};

use crate::{Color, PixelPane, Size};

/// Breadth-first region fill.
///
/// Repaints the 4-connected region of cells sharing the start cell's
/// color with `new_color`. The target color is captured before any
/// mutation; each dequeued cell is re-checked against it, so a cell
/// enqueued twice is painted only once. No-op when the start cell is
/// missing or already has `new_color`.
pub fn flood_fill(pane: &mut dyn PixelPane, size: Size, start: usize, new_color: Color) {
    let Some(target_color) = pane.get_color(start) else {
        return;
    };
    if target_color == new_color {
        return;
    }

    let mut queue = VecDeque::new();
    let mut visited = HashSet::new();
    queue.push_back(start);

    while let Some(index) = queue.pop_front() {
        if visited.contains(&index) || pane.get_color(index) != Some(target_color) {
            continue;
        }
        pane.set_color(index, new_color);
        visited.insert(index);

        for neighbor in size.neighbors4(index) {
            if !visited.contains(&neighbor) {
                queue.push_back(neighbor);
            }
        }
    }
}
