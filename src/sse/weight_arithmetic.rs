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
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// SSE implementation, selected only after `sse` was detected.
#[derive(Debug, Copy, Clone, Default)]
pub(crate) struct SseArithmetic;

#[inline(always)]
unsafe fn load_weight(v: &WeightVector) -> __m128 {
    _mm_load_ps(v.as_ptr())
}

#[inline(always)]
unsafe fn store_weight(v: __m128) -> WeightVector {
    let mut dst = WeightVector::ZERO;
    _mm_store_ps(dst.as_mut_ptr(), v);
    dst
}

#[inline]
#[target_feature(enable = "sse")]
unsafe fn add_sse(a: WeightVector, b: WeightVector) -> WeightVector {
    store_weight(_mm_add_ps(load_weight(&a), load_weight(&b)))
}

#[inline]
#[target_feature(enable = "sse")]
unsafe fn mul_sse(a: WeightVector, b: WeightVector) -> WeightVector {
    store_weight(_mm_mul_ps(load_weight(&a), load_weight(&b)))
}

#[inline]
#[target_feature(enable = "sse")]
unsafe fn max_sse(a: WeightVector, b: WeightVector) -> WeightVector {
    store_weight(_mm_max_ps(load_weight(&a), load_weight(&b)))
}

#[inline]
#[target_feature(enable = "sse")]
unsafe fn min_sse(a: WeightVector, b: WeightVector) -> WeightVector {
    store_weight(_mm_min_ps(load_weight(&a), load_weight(&b)))
}

impl WeightArithmetic for SseArithmetic {
    #[inline(always)]
    fn add(a: WeightVector, b: WeightVector) -> WeightVector {
        unsafe { add_sse(a, b) }
    }

    #[inline(always)]
    fn mul(a: WeightVector, b: WeightVector) -> WeightVector {
        unsafe { mul_sse(a, b) }
    }

    #[inline(always)]
    fn max(a: WeightVector, b: WeightVector) -> WeightVector {
        unsafe { max_sse(a, b) }
    }

    #[inline(always)]
    fn min(a: WeightVector, b: WeightVector) -> WeightVector {
        unsafe { min_sse(a, b) }
    }
}
