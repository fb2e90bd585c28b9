//! Row-major pixel grids
//!
//! A [`Grid`] holds one value per pixel. Float grids use [`NO_DATA`]
//! to mark undefined pixels; categorical grids use `Option<T>`.

use super::errors::{RiskError, RiskResult};

/// Marker for a pixel with no defined value
pub const NO_DATA: f32 = f32::NAN;

/// Check whether a float pixel value is the no-data marker
#[inline]
pub fn is_no_data(value: f32) -> bool {
    value.is_nan()
}

/// A two-dimensional grid of pixel values
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    /// Width of the grid (columns)
    width: u32,
    /// Height of the grid (rows)
    height: u32,
    /// Values in row-major order
    data: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Create a grid with every pixel set to `value`
    pub fn filled(width: u32, height: u32, value: T) -> Self {
        Grid {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    /// Create a grid from row-major data
    ///
    /// # Returns
    /// The grid, or an error if `data` does not hold `width * height` values
    pub fn from_vec(width: u32, height: u32, data: Vec<T>) -> RiskResult<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(RiskError::GenericError(format!(
                "Grid data holds {} values, expected {} for {}x{}",
                data.len(), expected, width, height
            )));
        }
        Ok(Grid { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of pixels
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the value at column `x`, row `y`, or None if out of bounds
    pub fn get(&self, x: u32, y: u32) -> Option<T> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let idx = y as usize * self.width as usize + x as usize;
        self.data.get(idx).copied()
    }

    /// Values in row-major order
    pub fn values(&self) -> &[T] {
        &self.data
    }

    /// Apply `f` to every pixel, producing a new grid of the same size
    pub fn map<U: Copy, F: Fn(T) -> U>(&self, f: F) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Fail unless `other` has the same dimensions as this grid
    pub fn check_same_size<U>(&self, other: &Grid<U>) -> RiskResult<()> {
        if self.width != other.width || self.height != other.height {
            return Err(RiskError::DimensionMismatch {
                expected: (self.width, self.height),
                found: (other.width, other.height),
            });
        }
        Ok(())
    }

    /// Copy out a rectangular window
    ///
    /// The window is clipped to the grid bounds.
    pub fn window(&self, x: u32, y: u32, width: u32, height: u32) -> Grid<T> {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        let x = x.min(x_end);
        let y = y.min(y_end);

        let mut data = Vec::with_capacity(((x_end - x) * (y_end - y)) as usize);
        for row in y..y_end {
            let start = row as usize * self.width as usize;
            data.extend_from_slice(&self.data[start + x as usize..start + x_end as usize]);
        }

        Grid {
            width: x_end - x,
            height: y_end - y,
            data,
        }
    }
}

impl Grid<f32> {
    /// Number of pixels holding a defined value
    pub fn valid_count(&self) -> usize {
        self.data.iter().filter(|v| !is_no_data(**v)).count()
    }

    /// Iterate over defined values only
    pub fn valid_values(&self) -> impl Iterator<Item = f32> + '_ {
        self.data.iter().copied().filter(|v| !is_no_data(*v))
    }
}
