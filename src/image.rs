// Copyright (c) Radzivon Bartoshyk. All rights reserved.
//
// Redistribution and use in source and binary forms, with or without modification,
// are permitted provided that the following conditions are met:
//
// 1.  Redistributions of source code must retain the above copyright notice, this
// list of conditions and the following disclaimer.
//
// 2.  Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3.  Neither the name of the copyright holder nor the names of its
// contributors may be used to endorse or promote products derived from
// this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
use crate::{ConvolveError, MismatchedSize};
use std::borrow::Cow;

/// Count of interleaved channels, images are always R, G, B, A 8-bit.
pub const RGBA_CHANNELS: usize = 4;

/// Half-open pixel rectangle `[min_x, max_x) x [min_y, max_y)`, origin need not be zero.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Bounds {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl Bounds {
    pub fn new(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Bounds {
        Bounds {
            min_x,
            min_y,
            max_x: max_x.max(min_x),
            max_y: max_y.max(min_y),
        }
    }

    /// Rectangle anchored at zero, sizes above `i64::MAX` saturate.
    pub fn from_size(width: usize, height: usize) -> Bounds {
        Bounds::new(
            0,
            0,
            i64::try_from(width).unwrap_or(i64::MAX),
            i64::try_from(height).unwrap_or(i64::MAX),
        )
    }

    /// Horizontal extent or `None` when it does not fit `usize`.
    #[inline]
    pub fn checked_width(&self) -> Option<usize> {
        usize::try_from(self.max_x.abs_diff(self.min_x)).ok()
    }

    /// Vertical extent or `None` when it does not fit `usize`.
    #[inline]
    pub fn checked_height(&self) -> Option<usize> {
        usize::try_from(self.max_y.abs_diff(self.min_y)).ok()
    }

    /// Horizontal extent, saturates at `usize::MAX`.
    #[inline]
    pub fn width(&self) -> usize {
        self.checked_width().unwrap_or(usize::MAX)
    }

    /// Vertical extent, saturates at `usize::MAX`.
    #[inline]
    pub fn height(&self) -> usize {
        self.checked_height().unwrap_or(usize::MAX)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }
}

/// Canonical RGBA 8-bit image store
pub struct ImageRgba8<'a> {
    pub data: Cow<'a, [u8]>,
    pub bounds: Bounds,
    /// Image stride, items per row, might be 0
    pub stride: usize,
}

impl<'a> ImageRgba8<'a> {
    /// Allocates transparent black image covering `bounds`
    pub fn alloc(bounds: Bounds) -> Result<ImageRgba8<'static>, ConvolveError> {
        let row_stride = bounds
            .checked_width()
            .and_then(|width| width.checked_mul(RGBA_CHANNELS))
            .ok_or(ConvolveError::ExceedingPointerSize)?;
        let length = bounds
            .checked_height()
            .and_then(|height| height.checked_mul(row_stride))
            .ok_or(ConvolveError::ExceedingPointerSize)?;
        Ok(ImageRgba8 {
            data: Cow::Owned(vec![0u8; length]),
            bounds,
            stride: row_stride,
        })
    }

    /// Borrows existing data
    /// Stride will be default `width * 4`
    pub fn borrow(arr: &'a [u8], bounds: Bounds) -> Self {
        Self {
            data: Cow::Borrowed(arr),
            bounds,
            stride: bounds.width().saturating_mul(RGBA_CHANNELS),
        }
    }

    /// Takes ownership of pixel data
    pub fn from_vec(vec: Vec<u8>, bounds: Bounds) -> ImageRgba8<'static> {
        ImageRgba8 {
            data: Cow::Owned(vec),
            bounds,
            stride: bounds.width().saturating_mul(RGBA_CHANNELS),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.bounds.height()
    }

    /// Returns row stride
    #[inline]
    pub fn row_stride(&self) -> usize {
        if self.stride == 0 {
            self.width().saturating_mul(RGBA_CHANNELS)
        } else {
            self.stride
        }
    }

    /// Checks that the buffer really covers the declared bounds.
    ///
    /// Empty bounds are a valid layout.
    pub fn check_layout(&self) -> Result<(), ConvolveError> {
        if self.bounds.is_empty() {
            return Ok(());
        }
        let row_width = self
            .bounds
            .checked_width()
            .and_then(|width| width.checked_mul(RGBA_CHANNELS))
            .ok_or(ConvolveError::ExceedingPointerSize)?;
        let height = self
            .bounds
            .checked_height()
            .ok_or(ConvolveError::ExceedingPointerSize)?;
        let row_stride = self.row_stride();
        if row_stride < row_width {
            return Err(ConvolveError::MinimumStrideSizeMismatch(MismatchedSize {
                expected: row_width,
                received: row_stride,
            }));
        }
        let required = row_stride
            .checked_mul(height - 1)
            .and_then(|x| x.checked_add(row_width))
            .ok_or(ConvolveError::ExceedingPointerSize)?;
        if self.data.len() < required {
            return Err(ConvolveError::MinimumSliceSizeMismatch(MismatchedSize {
                expected: required,
                received: self.data.len(),
            }));
        }
        Ok(())
    }

    /// Reads pixel at absolute coordinate, caller keeps `(x, y)` inside bounds.
    #[inline(always)]
    pub fn pixel(&self, x: i64, y: i64) -> [u8; 4] {
        debug_assert!(self.bounds.contains(x, y));
        let offset = y.abs_diff(self.bounds.min_y) as usize * self.row_stride()
            + x.abs_diff(self.bounds.min_x) as usize * RGBA_CHANNELS;
        let px = &self.data[offset..offset + RGBA_CHANNELS];
        [px[0], px[1], px[2], px[3]]
    }

    /// Pixel at absolute coordinate or `None` when outside of bounds.
    pub fn get_pixel(&self, x: i64, y: i64) -> Option<[u8; 4]> {
        if self.bounds.contains(x, y) {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Writes pixel at absolute coordinate, does nothing outside of bounds.
    pub fn put_pixel(&mut self, x: i64, y: i64, value: [u8; 4]) {
        if !self.bounds.contains(x, y) {
            return;
        }
        let offset = y.abs_diff(self.bounds.min_y) as usize * self.row_stride()
            + x.abs_diff(self.bounds.min_x) as usize * RGBA_CHANNELS;
        self.data.to_mut()[offset..offset + RGBA_CHANNELS].copy_from_slice(&value);
    }

    /// Tightly packed copy of pixel rows, padding of the stride dropped.
    pub fn to_packed_vec(&self) -> Vec<u8> {
        let row_width = self.width() * RGBA_CHANNELS;
        if row_width == 0 {
            return Vec::new();
        }
        self.data
            .chunks(self.row_stride())
            .take(self.height())
            .flat_map(|row| row[..row_width].iter().copied())
            .collect()
    }

    /// Deep clone that owns its pixels, stride is kept
    pub fn to_owned_image(&self) -> ImageRgba8<'static> {
        ImageRgba8 {
            data: Cow::Owned(self.data.to_vec()),
            bounds: self.bounds,
            stride: self.row_stride(),
        }
    }
}
