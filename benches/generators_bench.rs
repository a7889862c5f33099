use std::path::PathBuf;
use std::sync::Arc;

use congrats_dash::charts::{ChartTheme, render_frame, render_time_series};
use congrats_dash::generators::{
    BlockGlyphRasterizer, CongratsImageGenerator, DEFAULT_POINT_COUNT, ImageParameters,
    ScatterGenerator,
};
use congrats_dash::render::{Renderer, SvgRenderer};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_congrats_image(c: &mut Criterion) {
    let generator = CongratsImageGenerator::new(Arc::new(BlockGlyphRasterizer));
    let params = ImageParameters::default();

    c.bench_function("congrats_image_render", |b| {
        b.iter(|| {
            let grid = generator.render(black_box(params)).expect("render");
            black_box(grid.lit_pixel_count());
        })
    });

    let grid = generator.render(params).expect("render");
    c.bench_function("congrats_image_png_encode", |b| {
        b.iter(|| black_box(grid.to_png().expect("png")))
    });
}

fn bench_scatter_svg(c: &mut Criterion) {
    let mut generator = ScatterGenerator::seeded(1);
    let theme = ChartTheme::default();
    let mut renderer = SvgRenderer::default();

    c.bench_function("scatter_frame_to_svg", |b| {
        b.iter(|| {
            let frame = render_frame(&mut generator, DEFAULT_POINT_COUNT)
                .to_frame(&theme)
                .expect("frame");
            black_box(renderer.render(&frame).expect("svg"));
        })
    });
}

fn bench_line_svg(c: &mut Criterion) {
    let chart = render_time_series(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/data.json"))
        .expect("bundled data");
    let theme = ChartTheme::default();
    let mut renderer = SvgRenderer::default();

    c.bench_function("line_chart_to_svg", |b| {
        b.iter(|| {
            let frame = chart.to_frame(black_box(&theme)).expect("frame");
            black_box(renderer.render(&frame).expect("svg"));
        })
    });
}

criterion_group!(benches, bench_congrats_image, bench_scatter_svg, bench_line_svg);
criterion_main!(benches);
