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
use crate::gamma_curves::SrgbConverter;
use crate::srgb_lut::SrgbLut;
use crate::WeightVector;
use num_traits::AsPrimitive;

/// Channel representation the aggregation arithmetic runs in.
///
/// Chosen statically by the aggregation call, never by a runtime flag.
pub trait ChannelSpace: Copy + Send + Sync {
    /// Full scale channel value, the fallback of an empty min window.
    const SATURATION: f32;

    fn new() -> Self;

    fn decode(&self, pixel: [u8; 4]) -> WeightVector;

    fn encode(&self, value: WeightVector) -> [u8; 4];
}

/// Rounds and saturates to `[0, 255]`, never wraps.
#[inline(always)]
pub(crate) fn to_storage_u8(value: f32) -> u8 {
    num_traits::clamp(value.round(), 0f32, 255f32).as_()
}

/// Gamma decoded sRGB, colour channels in `[0, 1]`.
///
/// Alpha is already linear, it is only normalized to `[0, 1]`.
#[derive(Debug, Copy, Clone)]
pub struct LinearLight {
    lut: SrgbLut,
}

impl ChannelSpace for LinearLight {
    const SATURATION: f32 = 1.;

    fn new() -> Self {
        LinearLight {
            lut: SrgbLut::get(),
        }
    }

    #[inline(always)]
    fn decode(&self, pixel: [u8; 4]) -> WeightVector {
        WeightVector::new(
            self.lut.decode(pixel[0]),
            self.lut.decode(pixel[1]),
            self.lut.decode(pixel[2]),
            pixel[3] as f32 * (1. / 255.),
        )
    }

    #[inline(always)]
    fn encode(&self, value: WeightVector) -> [u8; 4] {
        [
            self.lut.encode(value.r),
            self.lut.encode(value.g),
            self.lut.encode(value.b),
            to_storage_u8(value.a * 255.),
        ]
    }
}

/// Stored 8-bit values taken as is, channels in `[0, 255]`.
#[derive(Debug, Copy, Clone, Default)]
pub struct RawChannels;

impl ChannelSpace for RawChannels {
    const SATURATION: f32 = 255.;

    fn new() -> Self {
        RawChannels
    }

    #[inline(always)]
    fn decode(&self, pixel: [u8; 4]) -> WeightVector {
        WeightVector::new(
            pixel[0] as f32,
            pixel[1] as f32,
            pixel[2] as f32,
            pixel[3] as f32,
        )
    }

    #[inline(always)]
    fn encode(&self, value: WeightVector) -> [u8; 4] {
        [
            to_storage_u8(value.r),
            to_storage_u8(value.g),
            to_storage_u8(value.b),
            to_storage_u8(value.a),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_saturates() {
        let raw = RawChannels::new();
        assert_eq!(
            raw.encode(WeightVector::new(-20., 255.4, 300., 127.5)),
            [0, 255, 255, 128]
        );
        assert_eq!(raw.encode(WeightVector::splat(f32::NAN)), [0, 0, 0, 0]);
        assert_eq!(
            raw.decode([1, 2, 3, 4]),
            WeightVector::new(1., 2., 3., 4.)
        );
    }

    #[test]
    fn test_linear_keeps_alpha_linear() {
        let linear = LinearLight::new();
        let decoded = linear.decode([255, 0, 188, 51]);
        assert_eq!(decoded.r, 1.);
        assert_eq!(decoded.g, 0.);
        assert!((decoded.a - 0.2).abs() < 1e-6);
        assert_eq!(linear.encode(decoded), [255, 0, 188, 51]);
        assert_eq!(
            linear.encode(WeightVector::new(2., -1., 0., 1.5)),
            [255, 0, 0, 255]
        );
    }
}
