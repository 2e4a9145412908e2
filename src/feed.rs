use scrollfeed_config::FeedLayout;

/// Vertical feed of equally sized video items, scrolled as one column past
/// a fixed viewport.
#[derive(Debug, Clone, Copy)]
pub struct Feed {
    layout: FeedLayout,
}

impl Feed {
    pub fn new(layout: FeedLayout) -> Self {
        Self { layout }
    }

    /// Top edge of the item at `index`, in feed coordinates.
    fn item_top(&self, index: usize) -> f64 {
        index as f64 * (self.layout.item_height + self.layout.item_gap)
    }

    /// Fraction of the item at `index` that sits inside the viewport when
    /// the feed is scrolled to `offset`.
    pub fn intersection_ratio(&self, index: usize, offset: f64) -> f64 {
        let top = self.item_top(index);
        let bottom = top + self.layout.item_height;
        let viewport_bottom = offset + self.layout.viewport_height;

        let visible = (bottom.min(viewport_bottom) - top.max(offset)).max(0.0);
        visible / self.layout.item_height
    }
}
