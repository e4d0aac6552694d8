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
use std::{num::NonZeroUsize, thread::available_parallelism};

#[repr(C)]
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Default, Hash)]
/// Set threading policy.
///
/// Workers own interleaved row stripes, so the resolved count is the
/// `parallelism` of an apply call.
pub enum ThreadingPolicy {
    /// Use only one worker, the calling thread.
    Single,
    /// Compute adaptive worker count between 1..available CPUs.
    #[default]
    Adaptive,
    /// Like `Adaptive`, but reserve given amount of threads (i.e. those will not be
    /// used).
    AdaptiveReserve(NonZeroUsize),
    /// Use exactly the specified number of workers, even if some of them end up
    /// without rows.
    Fixed(NonZeroUsize),
}

impl ThreadingPolicy {
    /// Policy with exact worker count.
    ///
    /// A worker count must be at least one, `0` and `1` both resolve to
    /// [ThreadingPolicy::Single] rather than failing.
    pub fn fixed(parallelism: usize) -> ThreadingPolicy {
        match NonZeroUsize::new(parallelism) {
            Some(count) if count.get() > 1 => ThreadingPolicy::Fixed(count),
            _ => ThreadingPolicy::Single,
        }
    }

    /// Returns the number of workers to use for the given image dimensions under the
    /// selected policy variant.
    ///
    /// Must return at least 1. Adaptive variants never exceed the row count.
    pub fn thread_count(&self, width: usize, height: usize) -> usize {
        let area_hint = width.saturating_mul(height) / (256 * 256);
        let rows = height.max(1);
        match self {
            ThreadingPolicy::Single => 1,
            ThreadingPolicy::Adaptive => area_hint
                .clamp(1, Self::available_parallelism(2))
                .min(rows),
            ThreadingPolicy::AdaptiveReserve(reserve) => {
                let reserve = reserve.get();

                let max_threads = Self::available_parallelism(1);
                let max_threads = if max_threads <= reserve {
                    1
                } else {
                    max_threads - reserve
                };

                area_hint.clamp(1, max_threads).min(rows)
            }
            ThreadingPolicy::Fixed(fixed) => fixed.get(),
        }
    }

    // At least on single core CPU have 2 threads is beneficial
    fn available_parallelism(min: usize) -> usize {
        available_parallelism()
            .map(|x| x.get())
            .unwrap_or(1)
            .max(min)
    }
}
