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
use crate::aggregation::{Aggregator, WeightedAverage, WeightedMax, WeightedMin, WeightedSum};
use crate::unsafe_slice::UnsafeSlice;
use crate::{
    ArithmeticPath, ChannelSpace, ConvolveError, ImageRgba8, Kernel, LinearLight,
    PortableArithmetic, ThreadingPolicy, RGBA_CHANNELS,
};

/// Binds `$arith` to the concrete [crate::WeightArithmetic] of `$path` and evaluates `$body`,
/// paths not compiled into this build evaluate `$fallback`.
macro_rules! with_arithmetic {
    ($path:expr, $arith:ident => $body:expr, $fallback:expr) => {
        match $path {
            ArithmeticPath::Portable => {
                type $arith = PortableArithmetic;
                $body
            }
            #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
            ArithmeticPath::Sse => {
                type $arith = crate::arithmetic::SseArithmetic;
                $body
            }
            #[cfg(all(target_arch = "aarch64", feature = "neon"))]
            ArithmeticPath::Neon => {
                type $arith = crate::arithmetic::NeonArithmetic;
                $body
            }
            #[allow(unreachable_patterns)]
            _ => $fallback,
        }
    };
}

impl Kernel {
    /// Convolves every pixel of `image` with this kernel.
    ///
    /// Output has the same bounds as the input and a tightly packed stride.
    /// Arithmetic path is the best one detected for the running CPU.
    ///
    /// # Arguments
    ///
    /// * `A`: Aggregation, one of [WeightedSum], [WeightedAverage], [WeightedMax], [WeightedMin].
    /// * `S`: Channel space the arithmetic runs in, see [LinearLight] and [crate::RawChannels].
    /// * `threading_policy`: Threading policy according to [ThreadingPolicy].
    pub fn apply<A: Aggregator, S: ChannelSpace>(
        &self,
        image: &ImageRgba8,
        threading_policy: ThreadingPolicy,
    ) -> Result<ImageRgba8<'static>, ConvolveError> {
        self.apply_with_arithmetic::<A, S>(image, threading_policy, ArithmeticPath::detect())
    }

    /// Same as [Kernel::apply] with an explicitly chosen arithmetic path.
    ///
    /// Returns [ConvolveError::ArithmeticUnavailable] when `path` is not compiled in
    /// or not supported by the running CPU.
    pub fn apply_with_arithmetic<A: Aggregator, S: ChannelSpace>(
        &self,
        image: &ImageRgba8,
        threading_policy: ThreadingPolicy,
        path: ArithmeticPath,
    ) -> Result<ImageRgba8<'static>, ConvolveError> {
        if !path.is_available() {
            return Err(ConvolveError::ArithmeticUnavailable(path));
        }
        log::trace!("kernel of radius {} with {path:?} arithmetic", self.radius());
        let space = S::new();
        with_arithmetic!(
            path,
            Arith => apply_rows(image, threading_policy, |image, x, y| {
                A::aggregate::<S, Arith>(&space, self, image, x, y)
            }),
            Err(ConvolveError::ArithmeticUnavailable(path))
        )
    }

    /// Aggregates a single output pixel at `(x, y)`.
    ///
    /// `(x, y)` may lie outside image bounds, then only the overlapping part of the
    /// window contributes.
    pub fn aggregate_at<A: Aggregator, S: ChannelSpace>(
        &self,
        image: &ImageRgba8,
        x: i64,
        y: i64,
    ) -> [u8; 4] {
        let space = S::new();
        with_arithmetic!(
            ArithmeticPath::detect(),
            Arith => A::aggregate::<S, Arith>(&space, self, image, x, y),
            A::aggregate::<S, PortableArithmetic>(&space, self, image, x, y)
        )
    }

    /// Weighted sum in linear light.
    pub fn apply_sum(
        &self,
        image: &ImageRgba8,
        threading_policy: ThreadingPolicy,
    ) -> Result<ImageRgba8<'static>, ConvolveError> {
        self.apply::<WeightedSum, LinearLight>(image, threading_policy)
    }

    /// Weighted average in linear light.
    pub fn apply_avg(
        &self,
        image: &ImageRgba8,
        threading_policy: ThreadingPolicy,
    ) -> Result<ImageRgba8<'static>, ConvolveError> {
        self.apply::<WeightedAverage, LinearLight>(image, threading_policy)
    }

    /// Weighted maximum in linear light, a dilation for positive weights.
    pub fn apply_max(
        &self,
        image: &ImageRgba8,
        threading_policy: ThreadingPolicy,
    ) -> Result<ImageRgba8<'static>, ConvolveError> {
        self.apply::<WeightedMax, LinearLight>(image, threading_policy)
    }

    /// Weighted minimum in linear light, an erosion for positive weights.
    pub fn apply_min(
        &self,
        image: &ImageRgba8,
        threading_policy: ThreadingPolicy,
    ) -> Result<ImageRgba8<'static>, ConvolveError> {
        self.apply::<WeightedMin, LinearLight>(image, threading_policy)
    }
}

/// Runs `op` for every pixel of `image` and collects results into a new image.
///
/// Worker `k` of `n` owns rows `k, k + n, k + 2n, ...`, so every output row is
/// written by exactly one worker.
pub(crate) fn apply_rows<F>(
    image: &ImageRgba8,
    threading_policy: ThreadingPolicy,
    op: F,
) -> Result<ImageRgba8<'static>, ConvolveError>
where
    F: Fn(&ImageRgba8, i64, i64) -> [u8; 4] + Send + Sync,
{
    image.check_layout()?;
    let bounds = image.bounds;
    let mut dst = ImageRgba8::alloc(bounds)?;
    if bounds.is_empty() {
        return Ok(dst);
    }

    let thread_count = threading_policy.thread_count(bounds.width(), bounds.height());
    log::trace!(
        "convolving {}x{} image at ({}, {}) with {thread_count} workers",
        bounds.width(),
        bounds.height(),
        bounds.min_x,
        bounds.min_y
    );

    let dst_stride = dst.row_stride();
    let unsafe_slice = UnsafeSlice::new(dst.data.to_mut());
    debug_assert_eq!(unsafe_slice.len(), dst_stride * bounds.height());

    if thread_count == 1 {
        apply_worker(&unsafe_slice, image, dst_stride, &op, 0, 1);
        return Ok(dst);
    }

    // workers past the last row never get work, they do not need a thread
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(thread_count.min(bounds.height()))
        .build()
        .map_err(|e| ConvolveError::ThreadPool(e.to_string()))?;

    pool.scope(|scope| {
        for worker in 0..thread_count {
            let op = &op;
            let unsafe_slice = &unsafe_slice;
            scope.spawn(move |_| {
                apply_worker(unsafe_slice, image, dst_stride, op, worker, thread_count);
            });
        }
    });

    Ok(dst)
}

fn apply_worker<F>(
    dst: &UnsafeSlice<u8>,
    image: &ImageRgba8,
    dst_stride: usize,
    op: &F,
    worker: usize,
    workers: usize,
) where
    F: Fn(&ImageRgba8, i64, i64) -> [u8; 4],
{
    let bounds = image.bounds;
    for (row, y) in (bounds.min_y..bounds.max_y)
        .enumerate()
        .skip(worker)
        .step_by(workers)
    {
        let row_offset = row * dst_stride;
        for (column, x) in (bounds.min_x..bounds.max_x).enumerate() {
            let pixel = op(image, x, y);
            unsafe {
                // rows are disjoint between workers
                dst.write_chunk(row_offset + column * RGBA_CHANNELS, pixel);
            }
        }
    }
}
