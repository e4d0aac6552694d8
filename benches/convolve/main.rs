use criterion::{criterion_group, criterion_main, Criterion};
use libconvolve::{
    ArithmeticPath, Bounds, ImageRgba8, Kernel, RawChannels, ThreadingPolicy, WeightedAverage,
};

fn make_image(width: usize, height: usize) -> ImageRgba8<'static> {
    let mut state = 0x9E3779B9u32;
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

fn make_kernel(radius: usize) -> Kernel {
    let mut kernel = Kernel::with_radius(radius);
    let side = kernel.side_length();
    let weights = (0..side * side)
        .map(|i| 1. + (i % 3) as f32)
        .collect::<Vec<f32>>();
    kernel.set_weights_uniform(&weights).unwrap();
    kernel
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let image = make_image(512, 512);
    let kernel = make_kernel(3);

    c.bench_function("RGBA weighted sum", |b| {
        b.iter(|| kernel.apply_sum(&image, ThreadingPolicy::Adaptive).unwrap())
    });

    c.bench_function("RGBA weighted average", |b| {
        b.iter(|| kernel.apply_avg(&image, ThreadingPolicy::Adaptive).unwrap())
    });

    c.bench_function("RGBA weighted max", |b| {
        b.iter(|| kernel.apply_max(&image, ThreadingPolicy::Adaptive).unwrap())
    });

    c.bench_function("RGBA weighted min", |b| {
        b.iter(|| kernel.apply_min(&image, ThreadingPolicy::Adaptive).unwrap())
    });

    c.bench_function("RGBA raw average", |b| {
        b.iter(|| {
            kernel
                .apply::<WeightedAverage, RawChannels>(&image, ThreadingPolicy::Adaptive)
                .unwrap()
        })
    });

    c.bench_function("RGBA weighted average portable arithmetic (Single Thread)", |b| {
        b.iter(|| {
            kernel
                .apply_with_arithmetic::<WeightedAverage, RawChannels>(
                    &image,
                    ThreadingPolicy::Single,
                    ArithmeticPath::Portable,
                )
                .unwrap()
        })
    });

    c.bench_function("RGBA weighted average detected arithmetic (Single Thread)", |b| {
        b.iter(|| {
            kernel
                .apply_with_arithmetic::<WeightedAverage, RawChannels>(
                    &image,
                    ThreadingPolicy::Single,
                    ArithmeticPath::detect(),
                )
                .unwrap()
        })
    });

    for threads in [1usize, 2, 4, 8, 16] {
        c.bench_function(&format!("RGBA weighted average ({threads} workers)"), |b| {
            b.iter(|| {
                kernel
                    .apply_avg(&image, ThreadingPolicy::fixed(threads))
                    .unwrap()
            })
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
