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
use crate::{ChannelSpace, ImageRgba8, Kernel, WeightArithmetic, WeightVector};

/// Combines the clipped neighbourhood of one pixel into one output pixel.
pub trait Aggregator {
    fn aggregate<S: ChannelSpace, O: WeightArithmetic>(
        space: &S,
        kernel: &Kernel,
        image: &ImageRgba8,
        x: i64,
        y: i64,
    ) -> [u8; 4];
}

/// `Σ weight * value` over the window, no normalization.
#[derive(Debug, Copy, Clone, Default)]
pub struct WeightedSum;

/// Weighted sum divided per channel by the sum of weights.
///
/// A channel whose total weight is not positive keeps its plain sum, so an
/// all-zero window yields zero.
#[derive(Debug, Copy, Clone, Default)]
pub struct WeightedAverage;

/// Per channel value whose `weight * value` is greatest, zero weights ignored.
///
/// Ties keep the first candidate in row major order, an all-zero window yields 0.
#[derive(Debug, Copy, Clone, Default)]
pub struct WeightedMax;

/// Per channel value whose `weight * value` is least, zero weights ignored.
///
/// Ties keep the first candidate in row major order, an all-zero window yields
/// full scale.
#[derive(Debug, Copy, Clone, Default)]
pub struct WeightedMin;

/// Visits every kernel cell whose source pixel lies inside the image, in row major order.
#[inline(always)]
fn scan_window(
    kernel: &Kernel,
    image: &ImageRgba8,
    x: i64,
    y: i64,
    mut f: impl FnMut(WeightVector, [u8; 4]),
) {
    let clip = kernel.clip_to_bounds(image.bounds, x, y);
    let side_length = kernel.side_length();
    let radius = kernel.radius() as i64;
    let weights = kernel.weights();

    for s in clip.top..side_length.saturating_sub(clip.bottom) {
        let weights_row = &weights[s * side_length..(s + 1) * side_length];
        let src_y = y + s as i64 - radius;
        for t in clip.left..side_length.saturating_sub(clip.right) {
            f(weights_row[t], image.pixel(x + t as i64 - radius, src_y));
        }
    }
}

/// Replaces score of channels with zero weight by `fill`.
#[inline(always)]
fn mask_unweighted(score: WeightVector, weight: WeightVector, fill: f32) -> WeightVector {
    score.zip_with(weight, |s, w| if w == 0. { fill } else { s })
}

/// Takes channel from `candidate` wherever the running score moved.
#[inline(always)]
fn select_moved(
    previous_score: WeightVector,
    next_score: WeightVector,
    candidate: WeightVector,
    current: WeightVector,
) -> WeightVector {
    let moved = |p: f32, n: f32| p.to_bits() != n.to_bits();
    WeightVector::new(
        if moved(previous_score.r, next_score.r) { candidate.r } else { current.r },
        if moved(previous_score.g, next_score.g) { candidate.g } else { current.g },
        if moved(previous_score.b, next_score.b) { candidate.b } else { current.b },
        if moved(previous_score.a, next_score.a) { candidate.a } else { current.a },
    )
}

impl Aggregator for WeightedSum {
    #[inline]
    fn aggregate<S: ChannelSpace, O: WeightArithmetic>(
        space: &S,
        kernel: &Kernel,
        image: &ImageRgba8,
        x: i64,
        y: i64,
    ) -> [u8; 4] {
        let mut sum = WeightVector::ZERO;
        scan_window(kernel, image, x, y, |weight, pixel| {
            sum = O::add(sum, O::mul(space.decode(pixel), weight));
        });
        space.encode(sum)
    }
}

impl Aggregator for WeightedAverage {
    #[inline]
    fn aggregate<S: ChannelSpace, O: WeightArithmetic>(
        space: &S,
        kernel: &Kernel,
        image: &ImageRgba8,
        x: i64,
        y: i64,
    ) -> [u8; 4] {
        let mut sum = WeightVector::ZERO;
        let mut total_weight = WeightVector::ZERO;
        scan_window(kernel, image, x, y, |weight, pixel| {
            total_weight = O::add(total_weight, weight);
            sum = O::add(sum, O::mul(space.decode(pixel), weight));
        });
        let average = sum.zip_with(total_weight, |s, total| {
            if total > 0. {
                s / total
            } else {
                s
            }
        });
        space.encode(average)
    }
}

impl Aggregator for WeightedMax {
    #[inline]
    fn aggregate<S: ChannelSpace, O: WeightArithmetic>(
        space: &S,
        kernel: &Kernel,
        image: &ImageRgba8,
        x: i64,
        y: i64,
    ) -> [u8; 4] {
        let mut best_score = WeightVector::splat(f32::NEG_INFINITY);
        let mut best = WeightVector::ZERO;
        scan_window(kernel, image, x, y, |weight, pixel| {
            let value = space.decode(pixel);
            let score = mask_unweighted(O::mul(value, weight), weight, f32::NEG_INFINITY);
            // strictly greater candidate wins, ties return the running score
            let next_score = O::max(score, best_score);
            best = select_moved(best_score, next_score, value, best);
            best_score = next_score;
        });
        space.encode(best)
    }
}

impl Aggregator for WeightedMin {
    #[inline]
    fn aggregate<S: ChannelSpace, O: WeightArithmetic>(
        space: &S,
        kernel: &Kernel,
        image: &ImageRgba8,
        x: i64,
        y: i64,
    ) -> [u8; 4] {
        let mut best_score = WeightVector::splat(f32::INFINITY);
        let mut best = WeightVector::splat(S::SATURATION);
        scan_window(kernel, image, x, y, |weight, pixel| {
            let value = space.decode(pixel);
            let score = mask_unweighted(O::mul(value, weight), weight, f32::INFINITY);
            let next_score = O::min(score, best_score);
            best = select_moved(best_score, next_score, value, best);
            best_score = next_score;
        });
        space.encode(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Bounds, LinearLight, PortableArithmetic, RawChannels, SrgbConverter, SrgbLut,
    };

    /// Deterministic image with well spread channel values.
    fn patterned_image(width: usize, height: usize, seed: u32) -> ImageRgba8<'static> {
        let mut state = seed.wrapping_mul(2654435761).wrapping_add(1);
        let data = (0..width * height * 4)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state >> 24) as u8
            })
            .collect::<Vec<u8>>();
        ImageRgba8::from_vec(data, Bounds::from_size(width, height))
    }

    fn uniform_kernel(radius: usize, weight: f32) -> Kernel {
        let mut kernel = Kernel::with_radius(radius);
        let n = kernel.side_length() * kernel.side_length();
        kernel.set_weights_uniform(&vec![weight; n]).unwrap();
        kernel
    }

    fn linear_at<A: Aggregator>(kernel: &Kernel, image: &ImageRgba8, x: i64, y: i64) -> [u8; 4] {
        A::aggregate::<LinearLight, PortableArithmetic>(&LinearLight::new(), kernel, image, x, y)
    }

    fn raw_at<A: Aggregator>(kernel: &Kernel, image: &ImageRgba8, x: i64, y: i64) -> [u8; 4] {
        A::aggregate::<RawChannels, PortableArithmetic>(&RawChannels, kernel, image, x, y)
    }

    /// Linear values of every pixel in row major order, weight applied.
    fn linear_pixels(image: &ImageRgba8, weights: &[f32]) -> Vec<(f32, [f32; 4])> {
        let space = LinearLight::new();
        let mut out = vec![];
        for y in image.bounds.min_y..image.bounds.max_y {
            for x in image.bounds.min_x..image.bounds.max_x {
                let i = (y - image.bounds.min_y) as usize * image.width()
                    + (x - image.bounds.min_x) as usize;
                out.push((weights[i], space.decode(image.pixel(x, y)).to_array()));
            }
        }
        out
    }

    fn encode_linear(v: [f32; 4]) -> [u8; 4] {
        LinearLight::new().encode(WeightVector::from_array(v))
    }

    #[test]
    fn test_average_uniform_weights() {
        let image = patterned_image(3, 3, 7);
        let pixels = linear_pixels(&image, &[1.; 9]);
        let mut expected = [0f32; 4];
        for (_, px) in pixels.iter() {
            for (e, v) in expected.iter_mut().zip(px.iter()) {
                *e += *v;
            }
        }
        let expected = encode_linear(expected.map(|x| x / 9.));

        // includes all pixels covered by kernel
        assert_eq!(
            linear_at::<WeightedAverage>(&uniform_kernel(1, 1.), &image, 1, 1),
            expected
        );
        // clips kernel against edges of image
        assert_eq!(
            linear_at::<WeightedAverage>(&uniform_kernel(2, 1.), &image, 1, 1),
            expected
        );
    }

    #[test]
    fn test_average_scales_by_weights() {
        let image = patterned_image(3, 3, 11);
        let mut kernel = Kernel::with_radius(1);
        let mut total_weight = 0f32;
        let mut weights = vec![];
        for i in 0..3 {
            for j in 0..3 {
                let weight = (i + j) as f32;
                total_weight += weight;
                weights.push(weight);
                kernel.set_weight_uniform(j, i, weight).unwrap();
            }
        }
        let mut expected = [0f32; 4];
        for (w, px) in linear_pixels(&image, &weights) {
            for (e, v) in expected.iter_mut().zip(px.iter()) {
                *e += *v * w;
            }
        }
        let expected = encode_linear(expected.map(|x| x / total_weight));
        assert_eq!(linear_at::<WeightedAverage>(&kernel, &image, 1, 1), expected);
    }

    #[test]
    fn test_average_zero_total_weight() {
        let image = patterned_image(4, 4, 3);
        let kernel = Kernel::with_radius(1);
        assert_eq!(linear_at::<WeightedAverage>(&kernel, &image, 2, 2), [0, 0, 0, 0]);

        // channel extraction, red and green suppressed
        let mut kernel = Kernel::with_radius(0);
        kernel.set_weight_rgba(0, 0, 0., 0., 1., 1.).unwrap();
        let px = image.pixel(1, 2);
        assert_eq!(
            linear_at::<WeightedAverage>(&kernel, &image, 1, 2),
            [0, 0, px[2], px[3]]
        );
    }

    #[test]
    fn test_average_negative_total_keeps_sum() {
        let data = vec![10u8, 20, 30, 40].repeat(9);
        let image = ImageRgba8::from_vec(data, Bounds::from_size(3, 3));
        // zero sum edge detector on flat image gives nothing
        let mut kernel = Kernel::with_radius(1);
        kernel
            .set_weights_uniform(&[-1., -1., -1., -1., 8., -1., -1., -1., -1.])
            .unwrap();
        assert_eq!(raw_at::<WeightedAverage>(&kernel, &image, 1, 1), [0, 0, 0, 0]);
        // negative total weight is not normalized and saturates at zero
        kernel.set_weight_uniform(1, 1, 1.).unwrap();
        assert_eq!(raw_at::<WeightedAverage>(&kernel, &image, 1, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn test_raw_sum_clamps() {
        let data = vec![200u8, 100, 1, 255].repeat(4);
        let image = ImageRgba8::from_vec(data, Bounds::from_size(2, 2));
        let kernel = uniform_kernel(1, 1.);
        // corner sees the 2x2 image, 4 * 200 saturates
        assert_eq!(raw_at::<WeightedSum>(&kernel, &image, 0, 0), [255, 255, 4, 255]);
        let kernel = uniform_kernel(1, -1.);
        assert_eq!(raw_at::<WeightedSum>(&kernel, &image, 1, 1), [0, 0, 0, 0]);
        let kernel = uniform_kernel(1, 0.1);
        assert_eq!(raw_at::<WeightedSum>(&kernel, &image, 1, 0), [80, 40, 0, 102]);
    }

    #[test]
    fn test_linear_sum_matches_reference() {
        let image = patterned_image(3, 3, 5);
        let kernel = uniform_kernel(1, 1. / 9.);
        let pixels = linear_pixels(&image, &[1. / 9.; 9]);
        let mut expected = [0f32; 4];
        for (w, px) in pixels {
            for (e, v) in expected.iter_mut().zip(px.iter()) {
                *e += *v * w;
            }
        }
        assert_eq!(
            linear_at::<WeightedSum>(&kernel, &image, 1, 1),
            encode_linear(expected)
        );
    }

    fn reference_extremum(
        image: &ImageRgba8,
        weights: &[f32],
        better: impl Fn(f32, f32) -> bool,
        init: f32,
    ) -> [u8; 4] {
        let mut best = [init; 4];
        for (w, px) in linear_pixels(image, weights) {
            if w == 0. {
                continue;
            }
            for (b, v) in best.iter_mut().zip(px.iter()) {
                if better(*v, *b) {
                    *b = *v;
                }
            }
        }
        encode_linear(best)
    }

    #[test]
    fn test_max_uniform_and_clipped() {
        let image = patterned_image(3, 3, 21);
        let expected = reference_extremum(&image, &[1.; 9], |v, b| v > b, 0.);
        assert_eq!(linear_at::<WeightedMax>(&uniform_kernel(1, 1.), &image, 1, 1), expected);

        let mut kernel = Kernel::with_radius(2);
        #[rustfmt::skip]
        let weights = [
            -1., -1., -1., -1., -1.,
            -1., 1., 1., 1., -1.,
            -1., 1., 1., 1., -1.,
            -1., 1., 1., 1., -1.,
            -1., -1., -1., -1., -1.,
        ];
        kernel.set_weights_uniform(&weights).unwrap();
        assert_eq!(linear_at::<WeightedMax>(&kernel, &image, 1, 1), expected);
    }

    #[test]
    fn test_min_uniform_and_clipped() {
        let image = patterned_image(3, 3, 23);
        let expected = reference_extremum(&image, &[1.; 9], |v, b| v < b, 1.);
        assert_eq!(linear_at::<WeightedMin>(&uniform_kernel(1, 1.), &image, 1, 1), expected);
        assert_eq!(linear_at::<WeightedMin>(&uniform_kernel(2, 1.), &image, 1, 1), expected);
    }

    #[test]
    fn test_extremum_ignores_zero_weights() {
        #[rustfmt::skip]
        let weights = [
            0., 1., 0.,
            1., 0., 1.,
            0., 1., 0.,
        ];
        let mut kernel = Kernel::with_radius(1);
        kernel.set_weights_uniform(&weights).unwrap();
        for seed in 0..16 {
            let image = patterned_image(3, 3, seed);
            assert_eq!(
                linear_at::<WeightedMax>(&kernel, &image, 1, 1),
                reference_extremum(&image, &weights, |v, b| v > b, 0.)
            );
            assert_eq!(
                linear_at::<WeightedMin>(&kernel, &image, 1, 1),
                reference_extremum(&image, &weights, |v, b| v < b, 1.)
            );
        }
    }

    #[test]
    fn test_extremum_zero_weight_excluded_per_channel() {
        let mut data = vec![0u8; 2 * 4];
        data[..4].copy_from_slice(&[250, 250, 10, 10]);
        data[4..].copy_from_slice(&[20, 20, 200, 200]);
        let image = ImageRgba8::from_vec(data, Bounds::from_size(2, 1));
        let mut kernel = Kernel::with_radius(1);
        // left neighbour only counts on red and alpha
        kernel.set_weight_rgba(0, 1, 1., 0., 0., 1.).unwrap();
        kernel.set_weight_rgba(1, 1, 1., 1., 1., 1.).unwrap();
        assert_eq!(raw_at::<WeightedMax>(&kernel, &image, 1, 0), [250, 20, 200, 200]);
        assert_eq!(raw_at::<WeightedMin>(&kernel, &image, 1, 0), [20, 20, 200, 10]);
    }

    #[test]
    fn test_extremum_all_zero_window_saturates() {
        let image = patterned_image(3, 3, 1);
        let kernel = Kernel::with_radius(1);
        assert_eq!(linear_at::<WeightedMax>(&kernel, &image, 1, 1), [0, 0, 0, 0]);
        assert_eq!(linear_at::<WeightedMin>(&kernel, &image, 1, 1), [255, 255, 255, 255]);
        assert_eq!(raw_at::<WeightedMin>(&kernel, &image, 1, 1), [255, 255, 255, 255]);
    }

    #[test]
    fn test_extremum_compares_weighted_scores() {
        let data = vec![100u8, 100, 100, 100, 60, 60, 60, 60];
        let image = ImageRgba8::from_vec(data, Bounds::from_size(2, 1));
        let mut kernel = Kernel::with_radius(1);
        kernel.set_weight_uniform(1, 1, 1.).unwrap();
        kernel.set_weight_uniform(2, 1, 2.).unwrap();
        // 60 * 2 beats 100 * 1
        assert_eq!(raw_at::<WeightedMax>(&kernel, &image, 0, 0), [60, 60, 60, 60]);
        assert_eq!(raw_at::<WeightedMin>(&kernel, &image, 0, 0), [100, 100, 100, 100]);
    }

    #[test]
    fn test_extremum_tie_keeps_first() {
        // equal scores 100 * 1 and 50 * 2, first in scan order wins
        let data = vec![100u8, 100, 100, 100, 50, 50, 50, 50];
        let image = ImageRgba8::from_vec(data, Bounds::from_size(2, 1));
        let mut kernel = Kernel::with_radius(1);
        kernel.set_weight_uniform(1, 1, 1.).unwrap();
        kernel.set_weight_uniform(2, 1, 2.).unwrap();
        assert_eq!(raw_at::<WeightedMax>(&kernel, &image, 0, 0), [100, 100, 100, 100]);
        assert_eq!(raw_at::<WeightedMin>(&kernel, &image, 0, 0), [100, 100, 100, 100]);
    }

    #[test]
    fn test_radius_zero_identity() {
        let image = patterned_image(5, 4, 9);
        let kernel = uniform_kernel(0, 1.);
        for y in 0..4 {
            for x in 0..5 {
                let px = image.pixel(x, y);
                let lut = SrgbLut::get();
                let linear_identity = [
                    lut.encode(lut.decode(px[0])),
                    lut.encode(lut.decode(px[1])),
                    lut.encode(lut.decode(px[2])),
                    px[3],
                ];
                assert_eq!(linear_identity, px);
                assert_eq!(linear_at::<WeightedAverage>(&kernel, &image, x, y), px);
                assert_eq!(linear_at::<WeightedSum>(&kernel, &image, x, y), px);
                assert_eq!(linear_at::<WeightedMax>(&kernel, &image, x, y), px);
                assert_eq!(linear_at::<WeightedMin>(&kernel, &image, x, y), px);
                assert_eq!(raw_at::<WeightedSum>(&kernel, &image, x, y), px);
            }
        }
    }
}
