//! Row-major 2D grid used for images and per-pixel maps.

use std::ops::{Deref, DerefMut, Index, IndexMut};

/// `width * height` cells stored row by row.
///
/// Indexable by `(x, y)` or by flat row-major index, and derefs to the
/// underlying slice for whole-grid iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer2<T> {
    pixels: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Buffer2<T> {
    pub fn new(width: usize, height: usize, pixels: Vec<T>) -> Self {
        assert_eq!(
            pixels.len(),
            width * height,
            "pixels length must equal width * height"
        );
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Builds a grid by evaluating `f(x, y)` for every cell in row-major order.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self::new(width, height, pixels)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn same_size<U>(&self, other: &Buffer2<U>) -> bool {
        self.size() == other.size()
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    #[inline]
    pub fn pixels(&self) -> &[T] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [T] {
        &mut self.pixels
    }

    /// Applies `f` to every cell, producing a grid of the same size.
    pub fn map<U, F>(&self, f: F) -> Buffer2<U>
    where
        F: FnMut(&T) -> U,
    {
        Buffer2::new(self.width, self.height, self.pixels.iter().map(f).collect())
    }
}

impl<T: Clone> Buffer2<T> {
    pub fn new_filled(width: usize, height: usize, value: T) -> Self {
        Self::new(width, height, vec![value; width * height])
    }
}

impl<T> Index<(usize, usize)> for Buffer2<T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &T {
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        &self.pixels[y * self.width + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Buffer2<T> {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        debug_assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        &mut self.pixels[y * self.width + x]
    }
}

impl<T> Index<usize> for Buffer2<T> {
    type Output = T;

    #[inline]
    fn index(&self, idx: usize) -> &T {
        &self.pixels[idx]
    }
}

impl<T> IndexMut<usize> for Buffer2<T> {
    #[inline]
    fn index_mut(&mut self, idx: usize) -> &mut T {
        &mut self.pixels[idx]
    }
}

impl<T> Deref for Buffer2<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.pixels
    }
}

impl<T> DerefMut for Buffer2<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stores_dimensions() {
        let buf = Buffer2::new(3, 2, vec![10, 20, 30, 40, 50, 60]);
        assert_eq!(buf.size(), (3, 2));
        assert_eq!(buf.len(), 6);
        assert!(!buf.is_empty());
    }

    #[test]
    #[should_panic(expected = "pixels length must equal width * height")]
    fn test_new_panics_on_size_mismatch() {
        Buffer2::new(3, 2, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_grid() {
        let buf = Buffer2::new_filled(0, 4, 0.0f32);
        assert!(buf.is_empty());
        assert_eq!(buf.height(), 4);
    }

    #[test]
    fn test_from_fn_is_row_major() {
        let buf = Buffer2::from_fn(3, 2, |x, y| y * 10 + x);
        assert_eq!(buf.pixels(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(buf[(2, 1)], 12);
        assert_eq!(buf[4], 11);
    }

    #[test]
    fn test_rows() {
        let mut buf = Buffer2::from_fn(2, 3, |x, y| (x + y * 2) as f32);
        assert_eq!(buf.row(1), &[2.0, 3.0]);
        buf[(0, 2)] = -1.0;
        assert_eq!(buf.row(2), &[-1.0, 5.0]);
    }

    #[test]
    fn test_map_keeps_size() {
        let buf = Buffer2::new(2, 2, vec![1u8, 2, 3, 4]);
        let mapped = buf.map(|&v| v as f32 * 0.5);
        assert!(mapped.same_size(&buf));
        assert_eq!(mapped.pixels(), &[0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_same_size() {
        let a = Buffer2::new_filled(4, 3, 0u8);
        let b = Buffer2::new_filled(4, 3, 0.0f32);
        let c = Buffer2::new_filled(3, 4, 0.0f32);
        assert!(a.same_size(&b));
        assert!(!a.same_size(&c));
    }

    #[test]
    fn test_channel_write_through_index() {
        let mut buf = Buffer2::new_filled(2, 2, [0.0f32; 3]);
        buf[(1, 0)][2] = 0.75;
        buf.pixels_mut()[3][0] = 0.25;
        assert_eq!(buf[1], [0.0, 0.0, 0.75]);
        assert_eq!(buf[(1, 1)], [0.25, 0.0, 0.0]);
    }
}
