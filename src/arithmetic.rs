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
#[cfg(all(target_arch = "aarch64", feature = "neon"))]
pub(crate) use crate::neon::NeonArithmetic;
#[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
pub(crate) use crate::sse::SseArithmetic;
use crate::WeightVector;
use std::sync::OnceLock;

/// Four lane arithmetic used by aggregation inner loops.
///
/// Every implementation must match [PortableArithmetic] bit for bit: `max` and
/// `min` return the second operand on ties and whenever a NaN is involved,
/// which is what `maxps`/`minps` do.
pub trait WeightArithmetic {
    fn add(a: WeightVector, b: WeightVector) -> WeightVector;
    fn mul(a: WeightVector, b: WeightVector) -> WeightVector;
    fn max(a: WeightVector, b: WeightVector) -> WeightVector;
    fn min(a: WeightVector, b: WeightVector) -> WeightVector;
}

/// Plain per channel scalar implementation, available everywhere.
#[derive(Debug, Copy, Clone, Default)]
pub struct PortableArithmetic;

#[inline(always)]
pub(crate) fn max_one(a: f32, b: f32) -> f32 {
    if a > b {
        a
    } else {
        b
    }
}

#[inline(always)]
pub(crate) fn min_one(a: f32, b: f32) -> f32 {
    if a < b {
        a
    } else {
        b
    }
}

impl WeightArithmetic for PortableArithmetic {
    #[inline(always)]
    fn add(a: WeightVector, b: WeightVector) -> WeightVector {
        a.zip_with(b, |x, y| x + y)
    }

    #[inline(always)]
    fn mul(a: WeightVector, b: WeightVector) -> WeightVector {
        a.zip_with(b, |x, y| x * y)
    }

    #[inline(always)]
    fn max(a: WeightVector, b: WeightVector) -> WeightVector {
        a.zip_with(b, max_one)
    }

    #[inline(always)]
    fn min(a: WeightVector, b: WeightVector) -> WeightVector {
        a.zip_with(b, min_one)
    }
}

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
/// Declares which [WeightArithmetic] implementation drives the aggregation loops
pub enum ArithmeticPath {
    /// Scalar fallback
    Portable,
    /// x86 SSE, requires `sse` feature
    Sse,
    /// aarch64 NEON, requires `neon` feature
    Neon,
}

impl ArithmeticPath {
    /// Best available path for the running CPU, probed once per process.
    pub fn detect() -> ArithmeticPath {
        static DETECTED: OnceLock<ArithmeticPath> = OnceLock::new();
        *DETECTED.get_or_init(|| {
            let path = ArithmeticPath::probe();
            log::debug!("weight arithmetic resolved to {path:?}");
            path
        })
    }

    fn probe() -> ArithmeticPath {
        #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
        {
            if std::arch::is_x86_feature_detected!("sse") {
                return ArithmeticPath::Sse;
            }
        }
        #[cfg(all(target_arch = "aarch64", feature = "neon"))]
        {
            if std::arch::is_aarch64_feature_detected!("neon") {
                return ArithmeticPath::Neon;
            }
        }
        ArithmeticPath::Portable
    }

    /// Whether this path was compiled in and is supported by the running CPU.
    pub fn is_available(&self) -> bool {
        match self {
            ArithmeticPath::Portable => true,
            ArithmeticPath::Sse => {
                #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
                {
                    std::arch::is_x86_feature_detected!("sse")
                }
                #[cfg(not(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse")))]
                {
                    false
                }
            }
            ArithmeticPath::Neon => {
                #[cfg(all(target_arch = "aarch64", feature = "neon"))]
                {
                    std::arch::is_aarch64_feature_detected!("neon")
                }
                #[cfg(not(all(target_arch = "aarch64", feature = "neon")))]
                {
                    false
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<WeightVector> {
        vec![
            WeightVector::new(0., -0., 1., -1.),
            WeightVector::new(-0., 0., 1., -1.),
            WeightVector::new(0.5, 0.25, 255., 1e-7),
            WeightVector::new(f32::INFINITY, f32::NEG_INFINITY, 3.5, -2.25),
            WeightVector::new(f32::NAN, 1., f32::NAN, -8.),
            WeightVector::new(1., f32::NAN, 0.1, 0.2),
            WeightVector::new(f32::MAX, f32::MIN_POSITIVE, -f32::MAX, 42.),
        ]
    }

    fn bits(v: WeightVector) -> [u32; 4] {
        v.to_array().map(|x| x.to_bits())
    }

    fn same(a: WeightVector, b: WeightVector) -> bool {
        a.to_array()
            .iter()
            .zip(b.to_array().iter())
            .all(|(x, y)| (x.is_nan() && y.is_nan()) || x.to_bits() == y.to_bits())
    }

    fn check_against_portable<O: WeightArithmetic>() {
        for &a in samples().iter() {
            for &b in samples().iter() {
                assert!(same(O::add(a, b), PortableArithmetic::add(a, b)));
                assert!(same(O::mul(a, b), PortableArithmetic::mul(a, b)));
                assert_eq!(bits(O::max(a, b)), bits(PortableArithmetic::max(a, b)));
                assert_eq!(bits(O::min(a, b)), bits(PortableArithmetic::min(a, b)));
            }
        }
    }

    #[test]
    fn test_portable_semantics() {
        let a = WeightVector::new(1., 5., -0., 2.);
        let b = WeightVector::new(3., 4., 0., 2.);
        assert_eq!(
            PortableArithmetic::add(a, b),
            WeightVector::new(4., 9., 0., 4.)
        );
        assert_eq!(
            PortableArithmetic::mul(a, b),
            WeightVector::new(3., 20., -0., 4.)
        );
        let max = PortableArithmetic::max(a, b);
        assert_eq!(max.to_array()[..2], [3., 5.]);
        // ties resolve to the second operand
        assert_eq!(max.b.to_bits(), 0f32.to_bits());
        let min = PortableArithmetic::min(b, a);
        assert_eq!(min.b.to_bits(), (-0f32).to_bits());
        assert_eq!(min.to_array()[..2], [1., 4.]);
    }

    #[test]
    fn test_detected_path_is_stable_and_available() {
        let path = ArithmeticPath::detect();
        assert_eq!(path, ArithmeticPath::detect());
        assert!(path.is_available());
        assert!(ArithmeticPath::Portable.is_available());
    }

    #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
    #[test]
    fn test_sse_matches_portable() {
        if ArithmeticPath::Sse.is_available() {
            check_against_portable::<SseArithmetic>();
        }
    }

    #[cfg(all(target_arch = "aarch64", feature = "neon"))]
    #[test]
    fn test_neon_matches_portable() {
        if ArithmeticPath::Neon.is_available() {
            check_against_portable::<NeonArithmetic>();
        }
    }

    #[test]
    fn test_portable_matches_itself() {
        check_against_portable::<PortableArithmetic>();
    }
}
