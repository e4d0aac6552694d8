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
#![allow(clippy::excessive_precision)]

const SRGB_DECODE_THRESHOLD: f32 = 0.04045;
const SRGB_ENCODE_THRESHOLD: f32 = 0.0031308;

#[inline]
/// Linear transfer function for sRGB, domain and range are `[0, 1]`
pub fn srgb_to_linear(gamma: f32) -> f32 {
    if gamma <= 0f32 {
        0f32
    } else if gamma < SRGB_DECODE_THRESHOLD {
        gamma * (1f32 / 12.92f32)
    } else if gamma < 1.0f32 {
        ((gamma + 0.055f32) / 1.055f32).powf(2.4f32)
    } else {
        1.0f32
    }
}

#[inline]
/// Gamma transfer function for sRGB, domain and range are `[0, 1]`
pub fn srgb_from_linear(linear: f32) -> f32 {
    if linear <= 0.0f32 || linear.is_nan() {
        0.0f32
    } else if linear < SRGB_ENCODE_THRESHOLD {
        linear * 12.92f32
    } else if linear < 1.0f32 {
        1.055f32 * linear.powf(1.0f32 / 2.4f32) - 0.055f32
    } else {
        1.0f32
    }
}

/// Bidirectional mapping between 8-bit sRGB and linear light in `[0, 1]`.
pub trait SrgbConverter {
    fn decode(&self, value: u8) -> f32;

    /// Out of range input saturates to 0 or 255.
    fn encode(&self, linear: f32) -> u8;
}

/// Closed form sRGB transfer, evaluated on every call.
#[derive(Debug, Copy, Clone, Default)]
pub struct SrgbFormula;

impl SrgbConverter for SrgbFormula {
    #[inline]
    fn decode(&self, value: u8) -> f32 {
        srgb_to_linear(value as f32 / 255.)
    }

    #[inline]
    fn encode(&self, linear: f32) -> u8 {
        (srgb_from_linear(linear) * 255.).round().clamp(0., 255.) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(srgb_to_linear(0.), 0.);
        assert_eq!(srgb_to_linear(1.), 1.);
        assert!((srgb_to_linear(0.5) - 0.214).abs() < 1e-3);
        assert!((srgb_to_linear(0.04) - 0.04 / 12.92).abs() < 1e-7);
        assert!((srgb_from_linear(0.214041) - 0.5).abs() < 1e-3);
        assert_eq!(SrgbFormula.encode(-3.), 0);
        assert_eq!(SrgbFormula.encode(7.), 255);
        assert_eq!(SrgbFormula.encode(f32::NAN), 0);
    }

    #[test]
    fn test_formula_round_trip() {
        for value in 0..=255u8 {
            let restored = SrgbFormula.encode(SrgbFormula.decode(value));
            assert!(
                (restored as i32 - value as i32).abs() <= 1,
                "Round trip of {value} produced {restored}"
            );
        }
        for step in 0..=1000 {
            let linear = step as f32 / 1000.;
            let restored = SrgbFormula.decode(SrgbFormula.encode(linear));
            let encoded_again = SrgbFormula.encode(restored);
            assert!(
                (encoded_again as i32 - SrgbFormula.encode(linear) as i32).abs() <= 1,
                "Linear {linear} drifted after round trip"
            );
        }
    }
}
