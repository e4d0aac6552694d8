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
use crate::{WeightArithmetic, WeightVector};
use std::arch::aarch64::*;

/// NEON implementation.
///
/// `vmaxq_f32`/`vminq_f32` follow IEEE maxNum rules and disagree with the
/// portable path on signed zeros and NaN, so max/min are compare and select.
#[derive(Debug, Copy, Clone, Default)]
pub(crate) struct NeonArithmetic;

#[inline(always)]
unsafe fn load_weight(v: &WeightVector) -> float32x4_t {
    vld1q_f32(v.as_ptr())
}

#[inline(always)]
unsafe fn store_weight(v: float32x4_t) -> WeightVector {
    let mut dst = WeightVector::ZERO;
    vst1q_f32(dst.as_mut_ptr(), v);
    dst
}

impl WeightArithmetic for NeonArithmetic {
    #[inline(always)]
    fn add(a: WeightVector, b: WeightVector) -> WeightVector {
        unsafe { store_weight(vaddq_f32(load_weight(&a), load_weight(&b))) }
    }

    #[inline(always)]
    fn mul(a: WeightVector, b: WeightVector) -> WeightVector {
        unsafe { store_weight(vmulq_f32(load_weight(&a), load_weight(&b))) }
    }

    #[inline(always)]
    fn max(a: WeightVector, b: WeightVector) -> WeightVector {
        unsafe {
            let va = load_weight(&a);
            let vb = load_weight(&b);
            store_weight(vbslq_f32(vcgtq_f32(va, vb), va, vb))
        }
    }

    #[inline(always)]
    fn min(a: WeightVector, b: WeightVector) -> WeightVector {
        unsafe {
            let va = load_weight(&a);
            let vb = load_weight(&b);
            store_weight(vbslq_f32(vcltq_f32(va, vb), va, vb))
        }
    }
}
