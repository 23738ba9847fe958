use super::{DrawCmd, FillCmd, MeshId, RasterState, StockShader, StrokeCmd};

use glam::Mat4;

use crate::paint::Color;

/// A single draw item: insertion order + command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub order: u32,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for a frame.
///
/// Items are painted in insertion order; depth testing resolves overlap, and
/// blended draws rely on being recorded after the opaque geometry behind them.
///
/// `push()` is O(1) and `clear()` keeps capacity for reuse across frames.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
    }

    /// Returns items in paint order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem { order, cmd });
    }

    /// Records a filled draw of `mesh`.
    pub fn fill(&mut self, mesh: MeshId, shader: StockShader, state: RasterState) {
        self.push(DrawCmd::Fill(FillCmd { mesh, shader, state }));
    }

    /// Records a stroked draw of `mesh` (points, lines or triangle outline).
    pub fn stroke(&mut self, mesh: MeshId, mvp: Mat4, color: Color, width: f32, depth_offset: f32) {
        self.push(DrawCmd::Stroke(StrokeCmd { mesh, mvp, color, width, depth_offset }));
    }

    pub fn fills(&self) -> impl Iterator<Item = &FillCmd> {
        self.items.iter().filter_map(|i| match &i.cmd {
            DrawCmd::Fill(f) => Some(f),
            DrawCmd::Stroke(_) => None,
        })
    }

    pub fn strokes(&self) -> impl Iterator<Item = &StrokeCmd> {
        self.items.iter().filter_map(|i| match &i.cmd {
            DrawCmd::Stroke(s) => Some(s),
            DrawCmd::Fill(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat() -> StockShader {
        StockShader::Flat { mvp: Mat4::IDENTITY, color: Color::BLACK }
    }

    #[test]
    fn items_keep_insertion_order() {
        let mut list = DrawList::new();
        list.fill(MeshId(1), flat(), RasterState::default());
        list.stroke(MeshId(1), Mat4::IDENTITY, Color::BLACK, 2.0, 0.0);
        list.fill(MeshId(2), flat(), RasterState::default());

        let orders: Vec<u32> = list.items().iter().map(|i| i.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(list.fills().count(), 2);
        assert_eq!(list.strokes().count(), 1);
    }

    #[test]
    fn clear_resets_order() {
        let mut list = DrawList::new();
        list.fill(MeshId(0), flat(), RasterState::default());
        list.clear();
        assert!(list.is_empty());
        list.fill(MeshId(0), flat(), RasterState::default());
        assert_eq!(list.items()[0].order, 0);
    }
}
