use crate::error::CoreError;

/// Relative window scanned around the source dimensions when searching for a
/// piece grid. A 5% stretch is visually indistinguishable but usually enough
/// to find a pair of dimensions with a large common divisor.
pub const GRID_SEARCH_TOLERANCE: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn piece_count(self) -> u32 {
        self.width * self.height
    }
}

/// The derived piece grid for one source image: how many pieces fit along
/// each axis and how many source pixels one (square) piece covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSpec {
    pub dimensions: Dimensions,
    pub piece_size_px: u32,
}

pub fn gcd(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 {
        return a | b;
    }
    let (mut min, mut max) = if a < b { (a, b) } else { (b, a) };
    while min != 0 {
        let rem = max % min;
        max = min;
        min = rem;
    }
    max
}

pub fn lcd(a: u64, b: u64) -> u64 {
    a * b / gcd(a, b)
}

/// Brute-force search for the piece grid best matching an image.
///
/// Scans integer dimension pairs within the tolerance window, downward from
/// the source size first and then upward, keeping the pair that minimizes
/// `lcd(w, h)`. Minimizing the least common multiple maximizes `gcd(w, h)`,
/// which is the pixel size of one piece: fewer, larger, undistorted pieces
/// at nearly the original aspect ratio. Ties keep the earlier (closer to
/// original) candidate.
///
/// Quadratic in the window size; callers on an interactive thread should go
/// through [`crate::task::spawn_grid_search`] instead.
pub fn best_grid(width: u32, height: u32) -> Result<GridSpec, CoreError> {
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidImageDimensions { width, height });
    }

    let width = width as u64;
    let height = height as u64;
    let width_lo = ((width as f64) * (1.0 - GRID_SEARCH_TOLERANCE)).ceil() as u64;
    let height_lo = ((height as f64) * (1.0 - GRID_SEARCH_TOLERANCE)).ceil() as u64;
    let width_hi = ((width as f64) * (1.0 + GRID_SEARCH_TOLERANCE)).floor() as u64;
    let height_hi = ((height as f64) * (1.0 + GRID_SEARCH_TOLERANCE)).floor() as u64;

    let mut eventual = (width, height);
    let mut best = lcd(width, height);
    for w in (width_lo..=width).rev() {
        for h in (height_lo..=height).rev() {
            let candidate = lcd(w, h);
            if candidate < best {
                best = candidate;
                eventual = (w, h);
            }
        }
    }
    for w in width..=width_hi {
        for h in height..=height_hi {
            let candidate = lcd(w, h);
            if candidate < best {
                best = candidate;
                eventual = (w, h);
            }
        }
    }

    let (eventual_width, eventual_height) = eventual;
    let piece_size = gcd(eventual_width, eventual_height);
    Ok(GridSpec {
        dimensions: Dimensions {
            width: (eventual_width / piece_size) as u32,
            height: (eventual_height / piece_size) as u32,
        },
        piece_size_px: piece_size as u32,
    })
}
