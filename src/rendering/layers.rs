//! Push/pop layer stack with a pool of reusable grids.
//!
//! Pushing a layer buries the live grid on the draw stack and hands out a fresh, empty grid
//! in its place. Popping composites the live grid onto the most recently buried one. Grids
//! released by `pop` go to a free list and are reused by the next `push`, so a render loop
//! that pushes and pops every frame stops allocating after its first frame.
//!
//! Grids are only ever moved between the live slot, the draw stack and the free list.

use crate::geometry::Size;
use crate::rendering::block::TerminalOp;
use crate::rendering::grid::PixelGrid;
use log::{debug, trace};

#[derive(Debug)]
pub struct LayerStack {
    /// Buried grids, top of stack last.
    stack: Vec<PixelGrid>,
    /// Empty grids of the current size, ready to be reused.
    available: Vec<PixelGrid>,
}

impl LayerStack {
    /// Creates a stack for grids of `size` cells, with one pooled grid ready.
    pub fn new(size: Size) -> Self {
        Self {
            stack: Vec::new(),
            available: vec![PixelGrid::new(size)],
        }
    }

    /// Number of buried layers.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Number of grids waiting on the free list.
    pub fn pooled(&self) -> usize {
        self.available.len()
    }

    /// Buries `live` and replaces it with an empty grid of the same size.
    pub fn push(&mut self, live: &mut PixelGrid) {
        let mut layer = match self.available.pop() {
            Some(layer) => layer,
            None => {
                trace!("layer pool empty, allocating a {:?} grid", live.size());
                PixelGrid::new(live.size())
            }
        };
        std::mem::swap(live, &mut layer);
        live.clear();
        self.stack.push(layer);
    }

    /// Composites `live` onto the top buried grid with `op`, which then becomes the live grid.
    ///
    /// Returns `false` and leaves `live` untouched if nothing was pushed.
    pub fn pop(&mut self, live: &mut PixelGrid, op: TerminalOp) -> bool {
        let Some(mut merged) = self.stack.pop() else {
            debug!("pop on an empty layer stack ignored");
            return false;
        };
        merged.paint(live, op);
        std::mem::swap(live, &mut merged);
        self.available.push(merged);
        true
    }

    /// Resizes every buried grid and replaces the pool with a single grid of the new size.
    pub fn resize(&mut self, size: Size) {
        for layer in self.stack.iter_mut() {
            layer.resize(size);
        }
        debug!(
            "dropping {} pooled layers, reseeding pool at {:?}",
            self.available.len(),
            size
        );
        self.available.clear();
        self.available.push(PixelGrid::new(size));
    }
}
