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
#![no_main]

use arbitrary::Arbitrary;
use libconvolve::{
    ArithmeticPath, Bounds, ImageRgba8, Kernel, LinearLight, RawChannels, ThreadingPolicy,
    WeightedAverage, WeightedMax, WeightedMin, WeightedSum,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct ApplyInput {
    min_x: i8,
    min_y: i8,
    width: u8,
    height: u8,
    radius: u8,
    op: u8,
    threads: u8,
    weights: Vec<f32>,
    fill: u8,
}

fuzz_target!(|data: ApplyInput| {
    let width = data.width as i64 % 48;
    let height = data.height as i64 % 48;
    let radius = data.radius as usize % 6;
    let bounds = Bounds::new(
        data.min_x as i64,
        data.min_y as i64,
        data.min_x as i64 + width,
        data.min_y as i64 + height,
    );
    let src = vec![data.fill; bounds.width() * bounds.height() * 4];
    let image = ImageRgba8::borrow(&src, bounds);

    let mut kernel = Kernel::with_radius(radius);
    let side = kernel.side_length();
    for (i, &weight) in data.weights.iter().take(side * side).enumerate() {
        kernel.set_weight_uniform(i % side, i / side, weight).unwrap();
    }

    let policy = ThreadingPolicy::fixed(data.threads as usize % 5);
    let linear = data.op & 4 == 0;
    let result = match (data.op % 4, linear) {
        (0, true) => kernel.apply::<WeightedSum, LinearLight>(&image, policy),
        (1, true) => kernel.apply::<WeightedAverage, LinearLight>(&image, policy),
        (2, true) => kernel.apply::<WeightedMax, LinearLight>(&image, policy),
        (3, true) => kernel.apply::<WeightedMin, LinearLight>(&image, policy),
        (0, false) => kernel.apply::<WeightedSum, RawChannels>(&image, policy),
        (1, false) => kernel.apply::<WeightedAverage, RawChannels>(&image, policy),
        (2, false) => kernel.apply::<WeightedMax, RawChannels>(&image, policy),
        _ => kernel.apply::<WeightedMin, RawChannels>(&image, policy),
    }
    .unwrap();
    assert_eq!(result.bounds, bounds);
    assert_eq!(result.data.len(), src.len());

    let portable = kernel
        .apply_with_arithmetic::<WeightedMax, RawChannels>(
            &image,
            ThreadingPolicy::Single,
            ArithmeticPath::Portable,
        )
        .unwrap();
    let detected = kernel
        .apply::<WeightedMax, RawChannels>(&image, ThreadingPolicy::Single)
        .unwrap();
    assert_eq!(portable.data, detected.data);
});
