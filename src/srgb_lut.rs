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
use crate::gamma_curves::{srgb_from_linear, srgb_to_linear, SrgbConverter};
use std::sync::OnceLock;

const GAMMA_DEPTH: usize = 1 << 16;
const MAX_GAMMA_INDEX: f32 = (GAMMA_DEPTH - 1) as f32;

struct Linearization {
    linearization: Box<[f32; 256]>,
}

struct Gamma8 {
    gamma: Box<[u8; GAMMA_DEPTH]>,
}

fn make_linearization() -> Linearization {
    let mut linearizing = Box::new([0f32; 256]);

    for (i, dst) in linearizing.iter_mut().enumerate() {
        *dst = srgb_to_linear(i as f32 / 255.);
    }

    Linearization {
        linearization: linearizing,
    }
}

fn make_gamma() -> Gamma8 {
    let mut gamma = Box::new([0u8; GAMMA_DEPTH]);

    for (i, dst) in gamma.iter_mut().enumerate() {
        *dst = (srgb_from_linear(i as f32 / MAX_GAMMA_INDEX) * 255.)
            .round()
            .min(255.) as u8;
    }

    Gamma8 { gamma }
}

/// Table backed sRGB converter.
///
/// Decoding is a 256 entry table, encoding quantizes linear light to 16 bits
/// before the lookup. Tables are process wide and built on first use.
#[derive(Copy, Clone)]
pub struct SrgbLut {
    linearization: &'static Linearization,
    gamma: &'static Gamma8,
}

impl std::fmt::Debug for SrgbLut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SrgbLut")
            .field("decode_entries", &self.linearization.linearization.len())
            .field("encode_entries", &self.gamma.gamma.len())
            .finish()
    }
}

impl SrgbLut {
    pub fn get() -> SrgbLut {
        static LINEARIZATION: OnceLock<Linearization> = OnceLock::new();
        static GAMMA: OnceLock<Gamma8> = OnceLock::new();
        SrgbLut {
            linearization: LINEARIZATION.get_or_init(|| {
                log::debug!("building sRGB linearization table");
                make_linearization()
            }),
            gamma: GAMMA.get_or_init(|| {
                log::debug!("building sRGB gamma table with {GAMMA_DEPTH} entries");
                make_gamma()
            }),
        }
    }
}

impl SrgbConverter for SrgbLut {
    #[inline(always)]
    fn decode(&self, value: u8) -> f32 {
        self.linearization.linearization[value as usize]
    }

    #[inline(always)]
    fn encode(&self, linear: f32) -> u8 {
        // NaN collapses to 0 in the cast
        let index = (linear.clamp(0., 1.) * MAX_GAMMA_INDEX).round() as usize;
        self.gamma.gamma[index.min(GAMMA_DEPTH - 1)]
    }
}
