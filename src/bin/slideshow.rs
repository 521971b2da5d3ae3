use std::io::BufRead as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use slideshow::{
    AnimatedShapeInfo, AnimationEngine, Bitmap, InMemoryFetchSink, LayerContent, LayerMessage,
    Millis, Navigator, PixelSize, PresentationInfo, ReadyTicket, ShapeContentKind, SlideCompositor,
    SlideReady, SlideShowOpts, SlideShowResult, SlideSource,
};

#[derive(Parser, Debug)]
#[command(name = "slideshow", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a recorded layer log and write the composited slide as a PNG.
    Compose(ComposeArgs),
    /// Replay a key sequence against a deck and print the playback trace.
    Navigate(NavigateArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input presentation JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Layer log: one JSON record per line, image paths relative to the log.
    #[arg(long)]
    layers: PathBuf,

    /// Slide index (0-based).
    #[arg(long, default_value_t = 0)]
    slide: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Options JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,
}

#[derive(Parser, Debug)]
struct NavigateArgs {
    /// Input presentation JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Comma-separated key codes, e.g. `Space,ArrowLeft,End`.
    #[arg(long, value_delimiter = ',')]
    keys: Vec<String>,

    /// Slide shown first.
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Host time advanced after every key.
    #[arg(long, default_value_t = 1000)]
    step_ms: u64,

    /// Options JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// One line of a layer log.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayerRecord {
    layer: LayerMessage,
    /// PNG or SVG payload file.
    #[serde(default)]
    image: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Navigate(args) => cmd_navigate(args),
    }
}

fn load_presentation(path: &Path) -> anyhow::Result<PresentationInfo> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read presentation '{}'", path.display()))?;
    Ok(PresentationInfo::from_json_str(&s)?)
}

fn load_opts(path: Option<&Path>) -> anyhow::Result<SlideShowOpts> {
    let Some(path) = path else {
        return Ok(SlideShowOpts::default());
    };
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    Ok(SlideShowOpts::from_json_str(&s)?)
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let info = load_presentation(&args.in_path)?;
    let opts = load_opts(args.config.as_deref())?;
    let slide_hash = info
        .slide(args.slide)
        .map(|s| s.hash.clone())
        .with_context(|| format!("slide {} out of range", args.slide))?;
    let slide_size = info.slide_size();

    let view = PixelSize::new(args.width, args.height)?;
    let mut compositor = SlideCompositor::new(
        std::sync::Arc::new(info),
        view,
        opts.compositor,
        InMemoryFetchSink::new(),
    )?;
    compositor.request_slide(args.slide, ReadyTicket(0))?;
    for req in compositor.sink_mut().drain() {
        eprintln!("{req}");
    }

    let canvas = compositor.canvas_size();
    let scale = f64::from(canvas.width) / slide_size.width;
    let log_root = args.layers.parent().unwrap_or_else(|| Path::new("."));
    let f = std::fs::File::open(&args.layers)
        .with_context(|| format!("open layer log '{}'", args.layers.display()))?;

    for (lineno, line) in std::io::BufReader::new(f).lines().enumerate() {
        let line = line.with_context(|| format!("read layer log line {}", lineno + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let record: LayerRecord = serde_json::from_str(&line)
            .with_context(|| format!("parse layer log line {}", lineno + 1))?;
        let payload = match &record.image {
            Some(rel) => Some(load_image(&log_root.join(rel), &record.layer, scale)?),
            None => None,
        };
        compositor.on_layer(&record.layer, payload)?;
    }
    compositor.on_rendering_complete(&slide_hash)?;

    let ready = compositor.take_ready();
    anyhow::ensure!(
        ready.iter().any(|r| r.ticket == ReadyTicket(0)),
        "slide {} was not composed",
        args.slide
    );
    let composed = compositor
        .slide_image(args.slide)
        .with_context(|| format!("slide {} missing from cache", args.slide))?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let straight = unpremultiply(&composed.bitmap);
    image::save_buffer_with_format(
        &args.out,
        &straight,
        composed.bitmap.width,
        composed.bitmap.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

/// Decode a payload file. SVG shapes are rasterized at their bounds scaled to the canvas.
fn load_image(path: &Path, layer: &LayerMessage, scale: f64) -> anyhow::Result<Bitmap> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read layer image '{}'", path.display()))?;
    if let LayerContent::Animated(shape) = layer.decode_content()?
        && shape.kind == ShapeContentKind::Svg
    {
        let width = (shape.bounds.width * scale).round().max(1.0) as u32;
        let height = (shape.bounds.height * scale).round().max(1.0) as u32;
        return Ok(slideshow::rasterize_svg(&bytes, width, height)?);
    }
    Ok(slideshow::decode_png(&bytes)?)
}

fn unpremultiply(bitmap: &Bitmap) -> Vec<u8> {
    let mut out = (*bitmap.data).clone();
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}

/// Source for trace replays: every slide is ready as soon as it is asked for.
#[derive(Debug)]
struct InstantSource {
    info: PresentationInfo,
    ready: Vec<SlideReady>,
}

impl SlideSource for InstantSource {
    fn presentation(&self) -> &PresentationInfo {
        &self.info
    }

    fn request_slide(&mut self, index: usize, ticket: ReadyTicket) -> SlideShowResult<()> {
        if let Some(slide) = self.info.slide(index) {
            self.ready.push(SlideReady {
                ticket,
                identity: slide.identity(),
            });
        }
        Ok(())
    }

    fn take_ready(&mut self) -> Vec<SlideReady> {
        std::mem::take(&mut self.ready)
    }

    fn animated_shapes(&self, _index: usize) -> Vec<AnimatedShapeInfo> {
        Vec::new()
    }
}

fn cmd_navigate(args: NavigateArgs) -> anyhow::Result<()> {
    let info = load_presentation(&args.in_path)?;
    let opts = load_opts(args.config.as_deref())?;

    let source = InstantSource {
        info,
        ready: Vec::new(),
    };
    let mut nav = Navigator::new(source, AnimationEngine::new(opts.engine), opts.navigator);
    let mut now = Millis::ZERO;

    nav.start(args.start)?;
    nav.tick(now)?;
    print_trace(&mut nav, "start");

    for key in &args.keys {
        let handled = nav.on_key_down(key)?;
        now = now.after(args.step_ms);
        nav.tick(now)?;
        let label = if handled {
            key.clone()
        } else {
            format!("{key} (ignored)")
        };
        print_trace(&mut nav, &label);
    }
    Ok(())
}

fn print_trace(nav: &mut Navigator<InstantSource, AnimationEngine>, label: &str) {
    let engine = nav.sequencer();
    println!(
        "{label}: {:?} effect {}/{}",
        nav.state(),
        engine.effect_cursor(),
        engine.effect_count()
    );
    for event in nav.take_events() {
        println!("  {event:?}");
    }
}
