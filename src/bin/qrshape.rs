use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "qrshape", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a styled QR symbol as an SVG document.
    Svg(SvgArgs),
    /// Print the built geometry as JSON.
    Geometry(GeometryArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Payload to encode.
    #[arg(long)]
    data: String,

    /// Style JSON (defaults apply to missing keys).
    #[arg(long)]
    style: Option<PathBuf>,

    /// Error-correction level: lowest, medium, quality or highest. Overrides the style file.
    #[arg(long)]
    ecc: Option<String>,
}

#[derive(Parser, Debug)]
struct SvgArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Raster image drawn in the middle of the symbol.
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Square canvas size. Overrides the style file.
    #[arg(long)]
    size: Option<f64>,

    /// Module color.
    #[arg(long, default_value = "#000000")]
    fg: String,

    /// Surface color.
    #[arg(long, default_value = "#ffffff")]
    bg: String,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct GeometryArgs {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(serde::Serialize)]
struct FigureDump {
    role: qrshape::FigureRole,
    winding: qrshape::Winding,
    bounds: [f64; 4],
    d: String,
}

#[derive(serde::Serialize)]
struct GeometryDump {
    dimension: usize,
    fill_rule: qrshape::FillRule,
    data_bounds: Option<[f64; 4]>,
    image_rect: Option<[f64; 4]>,
    figures: Vec<FigureDump>,
}

fn rect_array(r: qrshape::Rect) -> [f64; 4] {
    [r.x0, r.y0, r.x1, r.y1]
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Svg(args) => cmd_svg(args),
        Command::Geometry(args) => cmd_geometry(args),
    }
}

fn load_style(input: &InputArgs) -> anyhow::Result<qrshape::StyleConfig> {
    let mut style = match &input.style {
        Some(path) => qrshape::StyleConfig::from_path(path)?,
        None => qrshape::StyleConfig::default(),
    };
    if let Some(ecc) = &input.ecc {
        style.ecc_level = qrshape::EccLevel::parse(ecc)?;
    }
    Ok(style)
}

fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    let mut style = load_style(&args.input)?;
    if let Some(size) = args.size {
        style = style.with_canvas(size, size);
    }
    let module_color =
        qrshape::Rgba8::parse_hex(&args.fg).with_context(|| format!("parse --fg '{}'", args.fg))?;
    let surface_color =
        qrshape::Rgba8::parse_hex(&args.bg).with_context(|| format!("parse --bg '{}'", args.bg))?;
    let image = args
        .logo
        .as_ref()
        .map(|p| std::fs::read(p).with_context(|| format!("read logo '{}'", p.display())))
        .transpose()?;

    let transitions =
        qrshape::TransitionController::manual(qrshape::RampOpts::default(), Arc::new(|_| {}));
    let mut sess = qrshape::QrSession::new(Box::new(qrshape::QrcodeEncoder), style, transitions);
    sess.set_image(image.is_some());
    sess.set_data(&args.input.data)
        .with_context(|| format!("encode {} bytes", args.input.data.len()))?;
    // A one-shot export shows the final frame, not the fade.
    sess.transitions_mut().cancel();

    let opts = qrshape::SvgExportOpts {
        module_color,
        surface_color,
        image,
    };
    let svg = qrshape::write_svg(&sess.snapshot(), &opts)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, svg).with_context(|| format!("write svg '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_geometry(args: GeometryArgs) -> anyhow::Result<()> {
    let style = load_style(&args.input)?;
    let matrix = qrshape::Encoder::encode(&qrshape::QrcodeEncoder, &args.input.data, style.ecc_level)
        .with_context(|| format!("encode {} bytes", args.input.data.len()))?;
    let dimension = matrix.dimension();

    let mut builder = qrshape::GeometryBuilder::new(Arc::new(matrix));
    let out = builder.build(&style, false);

    let dump = GeometryDump {
        dimension,
        fill_rule: out.geometry.fill_rule(),
        data_bounds: out.layout.map(|l| rect_array(l.data_bounds)),
        image_rect: out.image_rect().map(rect_array),
        figures: out
            .geometry
            .figures()
            .iter()
            .map(|f| FigureDump {
                role: f.role,
                winding: f.winding,
                bounds: rect_array(f.bounds()),
                d: f.path.to_svg(),
            })
            .collect(),
    };

    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &dump).context("write geometry JSON")?;
    println!();
    Ok(())
}
