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
use crate::aggregation::Aggregator;
use crate::{
    Bounds, ChannelSpace, ConvolveError, ImageRgba8, Kernel, MismatchedSize, ThreadingPolicy,
    RGBA_CHANNELS,
};
use image::{DynamicImage, RgbaImage};

/// Convolves an image crate image with `kernel`
///
/// Any pixel format is first converted to RGBA 8-bit, result is always RGBA 8-bit.
///
/// # Arguments
///
/// * `kernel`: Weights and radius
/// * `image`: Dynamic image provided by image crate
/// * `threading_policy` - Threads usage policy
///
pub fn apply_to_dynamic_image<A: Aggregator, S: ChannelSpace>(
    kernel: &Kernel,
    image: &DynamicImage,
    threading_policy: ThreadingPolicy,
) -> Result<RgbaImage, ConvolveError> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let source = ImageRgba8::borrow(
        rgba.as_raw(),
        Bounds::from_size(width as usize, height as usize),
    );
    let result = kernel.apply::<A, S>(&source, threading_policy)?;
    let data = result.data.into_owned();
    let received = data.len();
    RgbaImage::from_raw(width, height, data).ok_or(ConvolveError::MinimumSliceSizeMismatch(
        MismatchedSize {
            expected: width as usize * height as usize * RGBA_CHANNELS,
            received,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LinearLight, RawChannels, WeightedAverage, WeightedSum};
    use image::{GrayImage, Luma, Rgba};

    #[test]
    fn test_gray_input_is_expanded() {
        let gray = GrayImage::from_fn(4, 3, |x, y| Luma([(x * 40 + y * 10) as u8]));
        let mut kernel = Kernel::with_radius(0);
        kernel.set_weight_uniform(0, 0, 1.).unwrap();
        let result = apply_to_dynamic_image::<WeightedSum, RawChannels>(
            &kernel,
            &DynamicImage::ImageLuma8(gray),
            ThreadingPolicy::Single,
        )
        .unwrap();
        assert_eq!(result.dimensions(), (4, 3));
        assert_eq!(*result.get_pixel(2, 1), Rgba([90, 90, 90, 255]));
    }

    #[test]
    fn test_flat_image_average_is_stable() {
        let flat = RgbaImage::from_pixel(9, 5, Rgba([30, 60, 200, 128]));
        let mut kernel = Kernel::with_radius(2);
        kernel.set_weights_uniform(&[1.; 25]).unwrap();
        let result = apply_to_dynamic_image::<WeightedAverage, LinearLight>(
            &kernel,
            &DynamicImage::ImageRgba8(flat.clone()),
            ThreadingPolicy::fixed(3),
        )
        .unwrap();
        for (a, b) in result.pixels().zip(flat.pixels()) {
            for (x, y) in a.0.iter().zip(b.0.iter()) {
                assert!((*x as i32 - *y as i32).abs() <= 1);
            }
        }
    }
}
