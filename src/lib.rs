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
#![allow(clippy::too_many_arguments)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! Windowed convolution of RGBA 8-bit images.
//!
//! A [Kernel] holds a square grid of per channel weights. Every output pixel is
//! aggregated from the input neighbourhood under the kernel, clipped at image
//! edges, by one of [WeightedSum], [WeightedAverage], [WeightedMax] or [WeightedMin].
//! Arithmetic runs either in linear light ([LinearLight]) or directly on stored
//! values ([RawChannels]), rows are spread across workers per [ThreadingPolicy].

mod aggregation;
mod arithmetic;
mod channel_space;
mod dispatch;
mod gamma_curves;
mod image;
mod kernel;
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
mod kernel_image;
#[cfg(all(target_arch = "aarch64", feature = "neon"))]
mod neon;
mod srgb_lut;
#[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
mod sse;
mod threading_policy;
mod unsafe_slice;
mod util;
mod weight_vector;

pub use aggregation::{Aggregator, WeightedAverage, WeightedMax, WeightedMin, WeightedSum};
pub use arithmetic::{ArithmeticPath, PortableArithmetic, WeightArithmetic};
pub use channel_space::{ChannelSpace, LinearLight, RawChannels};
pub use gamma_curves::{srgb_from_linear, srgb_to_linear, SrgbConverter, SrgbFormula};
pub use image::{Bounds, ImageRgba8, RGBA_CHANNELS};
pub use kernel::{Kernel, KernelClip};
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
pub use kernel_image::apply_to_dynamic_image;
pub use srgb_lut::SrgbLut;
pub use threading_policy::ThreadingPolicy;
pub use util::{ConvolveError, MismatchedSize};
pub use weight_vector::WeightVector;
