use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle, half-open on `right`/`bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        debug_assert!(left < right && top < bottom);
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The whole `width` x `height` image; empty when either side is 0.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            top: 0,
            right: width,
            bottom: height,
        }
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// Grow by `padding` on every side, clamped to a `width` x `height` image.
    pub fn padded(&self, padding: u32, width: u32, height: u32) -> Self {
        Self {
            left: self.left.saturating_sub(padding),
            top: self.top.saturating_sub(padding),
            right: self.right.saturating_add(padding).min(width),
            bottom: self.bottom.saturating_add(padding).min(height),
        }
    }

    /// True when the box spans at least 98% of both image dimensions.
    pub fn is_near_whole(&self, width: u32, height: u32) -> bool {
        let w = self.width() as u64 * 100 >= width as u64 * 98;
        let h = self.height() as u64 * 100 >= height as u64 * 98;
        w && h
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Running min/max over foreground pixel coordinates.
#[derive(Debug, Clone, Copy)]
pub struct BoundsAccumulator {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
    seen: bool,
}

impl BoundsAccumulator {
    pub fn new() -> Self {
        Self {
            min_x: u32::MAX,
            min_y: u32::MAX,
            max_x: 0,
            max_y: 0,
            seen: false,
        }
    }

    #[inline]
    pub fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        self.seen = true;
    }

    pub fn finish(self) -> Option<BoundingBox> {
        self.seen.then(|| {
            BoundingBox::new(self.min_x, self.min_y, self.max_x + 1, self.max_y + 1)
        })
    }
}

impl Default for BoundsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
