#[cfg(feature = "cairo-backend")]
use congrats_dash::charts::{ChartTheme, ImageChart, render_frame, render_time_series};
#[cfg(feature = "cairo-backend")]
use congrats_dash::config::{DEFAULT_DATA_PATH, DEFAULT_FONT_PATH};
#[cfg(feature = "cairo-backend")]
use congrats_dash::generators::{CongratsImageGenerator, ImageParameters, ScatterGenerator};
#[cfg(feature = "cairo-backend")]
use congrats_dash::render::RenderFrame;
#[cfg(feature = "cairo-backend")]
use std::fs::{self, File};
#[cfg(feature = "cairo-backend")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cairo-backend")]
const DEFAULT_OUTPUT_ROOT: &str = "target/snapshots";

#[cfg(feature = "cairo-backend")]
#[derive(Debug)]
struct CliArgs {
    data_path: PathBuf,
    font_path: PathBuf,
    output_root: PathBuf,
    seed: u64,
    params: ImageParameters,
}

#[cfg(feature = "cairo-backend")]
fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("this tool requires feature `cairo-backend`");
    std::process::exit(1);
}

#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), String> {
    let args = parse_args()?;
    fs::create_dir_all(&args.output_root).map_err(|err| {
        format!(
            "failed to create output dir `{}`: {err}",
            args.output_root.display()
        )
    })?;

    let theme = ChartTheme::default();

    let mut scatter = ScatterGenerator::seeded(args.seed);
    let scatter_frame = render_frame(&mut scatter, congrats_dash::generators::DEFAULT_POINT_COUNT)
        .to_frame(&theme)
        .map_err(|err| format!("scatter frame build failed: {err}"))?;
    write_frame_png(&scatter_frame, &args.output_root.join("scatter.png"))?;

    let line_frame = render_time_series(&args.data_path)
        .and_then(|chart| chart.to_frame(&theme))
        .map_err(|err| format!("line frame build failed: {err}"))?;
    write_frame_png(&line_frame, &args.output_root.join("line.png"))?;

    let generator = CongratsImageGenerator::load(&args.font_path)
        .map_err(|err| format!("image generator init failed: {err}"))?;
    let png = ImageChart::render(&generator, args.params)
        .and_then(|chart| chart.to_png())
        .map_err(|err| format!("image render failed: {err}"))?;
    let image_path = args.output_root.join("image.png");
    fs::write(&image_path, png)
        .map_err(|err| format!("failed to write png `{}`: {err}", image_path.display()))?;
    println!("generated image -> {}", image_path.display());

    println!("done: snapshots in {}", args.output_root.display());
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn write_frame_png(frame: &RenderFrame, output_path: &Path) -> Result<(), String> {
    use congrats_dash::render::{CairoRenderer, Renderer};

    let width = i32::try_from(frame.viewport.width)
        .map_err(|_| "viewport width overflows i32".to_owned())?;
    let height = i32::try_from(frame.viewport.height)
        .map_err(|_| "viewport height overflows i32".to_owned())?;

    let mut renderer =
        CairoRenderer::new(width, height).map_err(|err| format!("renderer init failed: {err}"))?;
    renderer
        .render(frame)
        .map_err(|err| format!("render failed: {err}"))?;

    let mut file = File::create(output_path)
        .map_err(|err| format!("failed to create png `{}`: {err}", output_path.display()))?;
    renderer
        .write_png(&mut file)
        .map_err(|err| format!("failed to write png `{}`: {err}", output_path.display()))?;

    let stats = renderer.last_stats();
    println!(
        "generated {} ({} lines, {} markers, {} labels)",
        output_path.display(),
        stats.lines_drawn,
        stats.circles_drawn,
        stats.texts_drawn
    );
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn parse_args() -> Result<CliArgs, String> {
    let mut args_out = CliArgs {
        data_path: PathBuf::from(DEFAULT_DATA_PATH),
        font_path: PathBuf::from(DEFAULT_FONT_PATH),
        output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
        seed: 10,
        params: ImageParameters::default(),
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match arg.as_str() {
            "--data" => args_out.data_path = PathBuf::from(value("--data")?),
            "--font" => args_out.font_path = PathBuf::from(value("--font")?),
            "--output-root" => args_out.output_root = PathBuf::from(value("--output-root")?),
            "--seed" => {
                args_out.seed = value("--seed")?
                    .parse()
                    .map_err(|err| format!("invalid --seed: {err}"))?;
            }
            "--big" => {
                args_out.params.big_font_size = value("--big")?
                    .parse()
                    .map_err(|err| format!("invalid --big: {err}"))?;
            }
            "--small" => {
                args_out.params.small_font_size = value("--small")?
                    .parse()
                    .map_err(|err| format!("invalid --small: {err}"))?;
            }
            "--help" | "-h" => {
                println!("{}", usage_message());
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(args_out)
}

#[cfg(feature = "cairo-backend")]
fn usage_message() -> String {
    format!(
        "Usage: cargo run --features cairo-backend --bin render_chart_snapshots -- [options]\n\nOptions:\n  --data <path>          Double-encoded downloads file (default: {DEFAULT_DATA_PATH})\n  --font <path>          TrueType font for the image card (default: {DEFAULT_FONT_PATH})\n  --output-root <path>   Output directory (default: {DEFAULT_OUTPUT_ROOT})\n  --seed <u64>           Confetti seed (default: 10)\n  --big <px>             Big font size (default: 600)\n  --small <px>           Small font size (default: 80)\n  -h, --help             Show this message"
    )
}
