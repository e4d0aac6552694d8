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
use crate::util::check_weights_count;
use crate::{Bounds, ConvolveError, WeightVector};

/// Amount of kernel rows/columns that fall outside of image bounds on each side.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct KernelClip {
    pub left: usize,
    pub right: usize,
    pub top: usize,
    pub bottom: usize,
}

/// Square grid of per channel weights centred on the output pixel.
///
/// Side length is always `2 * radius + 1`, weights are stored row major.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    radius: usize,
    side_length: usize,
    weights: Vec<WeightVector>,
}

impl Kernel {
    /// Kernel of the given radius with every weight zero.
    pub fn with_radius(radius: usize) -> Kernel {
        let side_length = radius * 2 + 1;
        Kernel {
            radius,
            side_length,
            weights: vec![WeightVector::ZERO; side_length * side_length],
        }
    }

    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    #[inline]
    pub fn side_length(&self) -> usize {
        self.side_length
    }

    #[inline]
    pub fn weights(&self) -> &[WeightVector] {
        &self.weights
    }

    /// Weight at column `x`, row `y`.
    pub fn weight(&self, x: usize, y: usize) -> Option<WeightVector> {
        if x >= self.side_length || y >= self.side_length {
            return None;
        }
        Some(self.weights[y * self.side_length + x])
    }

    pub fn set_weight_rgba(
        &mut self,
        x: usize,
        y: usize,
        r: f32,
        g: f32,
        b: f32,
        a: f32,
    ) -> Result<(), ConvolveError> {
        if x >= self.side_length || y >= self.side_length {
            return Err(ConvolveError::CellOutOfKernel {
                x,
                y,
                side_length: self.side_length,
            });
        }
        self.weights[y * self.side_length + x] = WeightVector::new(r, g, b, a);
        Ok(())
    }

    /// Sets the same weight on all four channels of one cell.
    pub fn set_weight_uniform(&mut self, x: usize, y: usize, weight: f32) -> Result<(), ConvolveError> {
        self.set_weight_rgba(x, y, weight, weight, weight, weight)
    }

    /// Replaces every cell, `weights` must hold exactly `side_length²` entries.
    pub fn set_weights_rgba(&mut self, weights: &[[f32; 4]]) -> Result<(), ConvolveError> {
        check_weights_count(self.weights.len(), weights.len())?;
        for (dst, src) in self.weights.iter_mut().zip(weights.iter()) {
            *dst = WeightVector::from_array(*src);
        }
        Ok(())
    }

    /// Replaces every cell broadcasting each entry to all channels, `weights` must hold
    /// exactly `side_length²` entries.
    pub fn set_weights_uniform(&mut self, weights: &[f32]) -> Result<(), ConvolveError> {
        check_weights_count(self.weights.len(), weights.len())?;
        for (dst, &src) in self.weights.iter_mut().zip(weights.iter()) {
            *dst = WeightVector::splat(src);
        }
        Ok(())
    }

    /// Computes how much of the kernel footprint centred at `(x, y)` lies outside `bounds`.
    ///
    /// Each side is independent, a centre outside of bounds clips more than `radius`.
    pub fn clip_to_bounds(&self, bounds: Bounds, x: i64, y: i64) -> KernelClip {
        let radius = self.radius as i64;
        let clip_side = |edge_dist: i64| -> usize {
            if edge_dist < radius {
                (radius - edge_dist) as usize
            } else {
                0
            }
        };
        KernelClip {
            left: clip_side(x - bounds.min_x),
            right: clip_side(bounds.max_x - x - 1),
            top: clip_side(y - bounds.min_y),
            bottom: clip_side(bounds.max_y - y - 1),
        }
    }
}
