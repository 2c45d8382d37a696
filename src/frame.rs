use crate::canvas::Canvas;
use crate::flowable::Flowable;
use crate::style::ReportStyle;
use crate::types::Pt;

/// Position of the layout cursor: the page it writes to and the next free
/// y coordinate on that page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub page_index: usize,
    pub y: Pt,
}

/// Vertical content band of every page. Blocks flow from `top` down and a
/// page break happens when a block would cross `bottom`.
pub struct Frame {
    x: Pt,
    width: Pt,
    top: Pt,
    bottom: Pt,
    cursor: LayoutCursor,
}

impl Frame {
    pub fn new(x: Pt, width: Pt, top: Pt, bottom: Pt) -> Self {
        Self {
            x,
            width,
            top,
            bottom,
            cursor: LayoutCursor {
                page_index: 0,
                y: top,
            },
        }
    }

    /// Content band for a canvas laid out with `style`.
    pub fn for_canvas(canvas: &Canvas, style: &ReportStyle) -> Self {
        let mut frame = Self::new(
            style.margin_x,
            style.content_width(canvas.page_width()),
            style.content_top,
            canvas.page_height() - style.footer_reserve,
        );
        frame.cursor.page_index = canvas.active_page();
        frame
    }

    pub fn x(&self) -> Pt {
        self.x
    }

    pub fn width(&self) -> Pt {
        self.width
    }

    pub fn top(&self) -> Pt {
        self.top
    }

    pub fn bottom(&self) -> Pt {
        self.bottom
    }

    pub fn cursor(&self) -> LayoutCursor {
        self.cursor
    }

    pub fn remaining_height(&self) -> Pt {
        (self.bottom - self.cursor.y).max(Pt::ZERO)
    }

    pub fn is_empty(&self) -> bool {
        self.cursor.y <= self.top
    }

    pub fn fits(&self, current_y: Pt, needed: Pt) -> bool {
        current_y + needed <= self.bottom
    }

    /// Returns the y at which a block of height `needed` may start. When the
    /// block would cross the bottom boundary a new page is appended and the
    /// frame top is returned; otherwise `current_y` comes back unchanged.
    pub fn ensure_space(
        &mut self,
        canvas: &mut Canvas,
        current_y: Pt,
        needed: Pt,
        block: &str,
    ) -> Pt {
        self.cursor.y = current_y;
        if self.fits(current_y, needed) {
            return current_y;
        }
        let from_page = canvas.active_page() + 1;
        let index = canvas.add_page();
        tracing::debug!(
            from_page,
            to_page = index + 1,
            block,
            needed = needed.to_f32(),
            current_y = current_y.to_f32(),
            bottom = self.bottom.to_f32(),
            "page break"
        );
        self.cursor = LayoutCursor {
            page_index: index,
            y: self.top,
        };
        self.top
    }

    /// Reserves space for `flowable`, draws it and advances the cursor.
    ///
    /// Blocks taller than the whole band are split across pages. One that
    /// cannot be split is drawn at the top of a fresh page and left to
    /// overflow it.
    pub fn place(&mut self, flowable: &dyn Flowable, canvas: &mut Canvas, style: &ReportStyle) {
        let needed = flowable.wrap(canvas, style, self.width);
        if needed > self.bottom - self.top {
            self.place_oversized(flowable, needed, canvas, style);
            return;
        }
        let y = self.ensure_space(canvas, self.cursor.y, needed, flowable.debug_name());
        self.draw_at(flowable, y, canvas, style);
    }

    fn place_oversized(
        &mut self,
        flowable: &dyn Flowable,
        needed: Pt,
        canvas: &mut Canvas,
        style: &ReportStyle,
    ) {
        let available = self.remaining_height();
        if let Some((head, tail)) = flowable.split(canvas, style, self.width, available) {
            tracing::debug!(
                page = canvas.active_page() + 1,
                block = flowable.debug_name(),
                needed = needed.to_f32(),
                available = available.to_f32(),
                "splitting block"
            );
            self.place(head.as_ref(), canvas, style);
            self.place(tail.as_ref(), canvas, style);
            return;
        }
        if !self.is_empty() {
            self.ensure_space(canvas, self.cursor.y, needed, flowable.debug_name());
            self.place_oversized(flowable, needed, canvas, style);
            return;
        }
        tracing::warn!(
            page = canvas.active_page() + 1,
            block = flowable.debug_name(),
            needed = needed.to_f32(),
            available = available.to_f32(),
            "block cannot be split and overflows the page"
        );
        let y = self.cursor.y;
        self.draw_at(flowable, y, canvas, style);
    }

    fn draw_at(
        &mut self,
        flowable: &dyn Flowable,
        y: Pt,
        canvas: &mut Canvas,
        style: &ReportStyle,
    ) {
        flowable.draw(canvas, style, self.x, y, self.width);
        self.cursor.y = y + flowable.advance(canvas, style, self.width);
    }
}
