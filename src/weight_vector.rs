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
/// Per channel kernel coefficient, also used as per channel accumulator.
///
/// Layout is four packed `f32` in R, G, B, A order so it loads directly into one
/// 128-bit register.
#[repr(C, align(16))]
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct WeightVector {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl WeightVector {
    pub const ZERO: WeightVector = WeightVector::splat(0.);

    #[inline(always)]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> WeightVector {
        WeightVector { r, g, b, a }
    }

    /// Same value on every channel
    #[inline(always)]
    pub const fn splat(v: f32) -> WeightVector {
        WeightVector::new(v, v, v, v)
    }

    #[inline(always)]
    pub const fn from_array(v: [f32; 4]) -> WeightVector {
        WeightVector::new(v[0], v[1], v[2], v[3])
    }

    #[inline(always)]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Applies `f` channel by channel.
    #[inline(always)]
    pub(crate) fn zip_with(
        self,
        other: WeightVector,
        f: impl Fn(f32, f32) -> f32,
    ) -> WeightVector {
        WeightVector::new(
            f(self.r, other.r),
            f(self.g, other.g),
            f(self.b, other.b),
            f(self.a, other.a),
        )
    }

    #[inline(always)]
    pub(crate) fn as_ptr(&self) -> *const f32 {
        self as *const WeightVector as *const f32
    }

    #[inline(always)]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut f32 {
        self as *mut WeightVector as *mut f32
    }
}

impl From<[f32; 4]> for WeightVector {
    #[inline]
    fn from(value: [f32; 4]) -> Self {
        WeightVector::from_array(value)
    }
}

impl From<WeightVector> for [f32; 4] {
    #[inline]
    fn from(value: WeightVector) -> Self {
        value.to_array()
    }
}
