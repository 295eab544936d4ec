//! Fixed-size text blocks.
//!
//! Layout code places canvases next to borders and other text. It only needs their size in
//! terminal cells and a way to render them one line at a time, which is what [`Block`]
//! provides.

use crate::canvas::BrailleCanvas;
use crate::real::RealCanvas;
use std::fmt;

/// Anything that renders as `height` lines of `width` terminal columns.
pub trait Block {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Writes line `row`, which must be less than [`Block::height`].
    fn write_line(&self, row: usize, out: &mut dyn fmt::Write) -> fmt::Result;

    fn lines(&self) -> Vec<String> {
        (0..self.height())
            .map(|row| {
                let mut line = String::new();
                // writing to a String cannot fail
                let _ = self.write_line(row, &mut line);
                line
            })
            .collect()
    }
}

impl Block for BrailleCanvas {
    fn width(&self) -> usize {
        self.term_size().x as usize
    }

    fn height(&self) -> usize {
        self.term_size().y as usize
    }

    fn write_line(&self, row: usize, mut out: &mut dyn fmt::Write) -> fmt::Result {
        BrailleCanvas::write_line(self, row, &mut out)
    }
}

impl Block for RealCanvas {
    fn width(&self) -> usize {
        self.canvas().width()
    }

    fn height(&self) -> usize {
        self.canvas().height()
    }

    fn write_line(&self, row: usize, out: &mut dyn fmt::Write) -> fmt::Result {
        Block::write_line(self.canvas(), row, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};
    use crate::rendering::block::TerminalOp;
    use crate::rendering::color::palette;

    /// Frames a block with box drawing characters.
    fn framed(block: &dyn Block) -> Vec<String> {
        let border = "─".repeat(block.width());
        let mut out = vec![format!("┌{border}┐")];
        out.extend(block.lines().into_iter().map(|line| format!("│{line}│")));
        out.push(format!("└{border}┘"));
        out
    }

    #[test]
    fn test_canvas_block() {
        let mut canvas = BrailleCanvas::new(Size::new(3, 2));
        canvas.line(palette::RED, Point::new(0, 0), Point::new(5, 0), TerminalOp::Over);

        assert_eq!(Block::width(&canvas), 3);
        assert_eq!(Block::height(&canvas), 2);
        assert_eq!(Block::lines(&canvas), vec!["\u{2809}\u{2809}\u{2809}", "   "]);
        assert_eq!(
            framed(&canvas),
            vec!["┌───┐", "│\u{2809}\u{2809}\u{2809}│", "│   │", "└───┘"]
        );
    }

    #[test]
    fn test_real_canvas_block() {
        let real = RealCanvas::new(BrailleCanvas::new(Size::new(4, 1)));
        assert_eq!(Block::width(&real), 4);
        assert_eq!(Block::lines(&real), vec!["    "]);
    }
}
