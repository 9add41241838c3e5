use super::Coordinate;

/// Largest board edge in pixels. Bigger images are scaled down to fit.
pub const MAX_BOARD_EDGE: f64 = 500.0;

/// Pixel layout of the board for a loaded image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardGeometry {
    pub width: f64,
    pub height: f64,
    pub grid_size: usize,
}

impl BoardGeometry {
    /// Fit an image into a [`MAX_BOARD_EDGE`] square, keeping its aspect
    /// ratio. Returns `None` for empty images or an empty grid.
    pub fn fit(image_width: u32, image_height: u32, grid_size: usize) -> Option<Self> {
        if image_width == 0 || image_height == 0 || grid_size == 0 {
            return None;
        }
        let (w, h) = (f64::from(image_width), f64::from(image_height));
        let (width, height) = if w > h {
            if w > MAX_BOARD_EDGE {
                (MAX_BOARD_EDGE, h / w * MAX_BOARD_EDGE)
            } else {
                (w, h)
            }
        } else if h > MAX_BOARD_EDGE {
            (w / h * MAX_BOARD_EDGE, MAX_BOARD_EDGE)
        } else {
            (w, h)
        };
        Some(Self {
            width,
            height,
            grid_size,
        })
    }

    pub fn tile_width(&self) -> f64 {
        self.width / self.grid_size as f64
    }

    pub fn tile_height(&self) -> f64 {
        self.height / self.grid_size as f64
    }

    /// Top-left corner of the cell at `coord`, as `(x, y)`.
    pub fn tile_offset(&self, coord: Coordinate) -> (f64, f64) {
        (
            coord.col as f64 * self.tile_width(),
            coord.row as f64 * self.tile_height(),
        )
    }

    /// Background offset that shows the slice of the image belonging to a
    /// tile whose home is `correct`.
    pub fn background_offset(&self, correct: Coordinate) -> (f64, f64) {
        let (x, y) = self.tile_offset(correct);
        (-x, -y)
    }
}
