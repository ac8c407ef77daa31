use std::path::PathBuf;

use clap::{Args, Parser};
use kurbo::BezPath;
use tracing_subscriber::EnvFilter;

use polyclip_sweep::{boolean_op, generators, BinaryOp, ContourPolygon};

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
enum Op {
    Union,
    Intersection,
    Xor,
    Difference,
    ReverseDifference,
}

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
enum Example {
    Checkerboard,
    SlantedCheckerboard,
    Slanties,
    NestedSquares,
}

#[derive(Parser)]
struct Cli {
    /// Where to write the SVG.
    #[arg(long)]
    output: PathBuf,

    #[command(flatten)]
    input: Input,

    #[arg(long, value_enum, default_value = "union")]
    op: Op,

    /// Tolerance for flattening curves in the input paths.
    #[arg(long, default_value_t = 0.1)]
    tolerance: f64,

    /// Also print the result as TikZ.
    #[arg(long)]
    tikz: bool,

    /// Also write the result as GeoJSON.
    #[arg(long)]
    geojson: Option<PathBuf>,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Input {
    /// Two files, each holding the data of an SVG path.
    #[arg(num_args = 2)]
    paths: Option<Vec<PathBuf>>,

    #[arg(long)]
    example: Option<Example>,
}

fn get_polygons(input: &Input, tolerance: f64) -> anyhow::Result<(ContourPolygon, ContourPolygon)> {
    match (&input.paths, &input.example) {
        (Some(paths), None) => {
            let mut polys = Vec::new();
            for path in paths {
                let data = std::fs::read_to_string(path)?;
                let bez = BezPath::from_svg(data.trim())?;
                polys.push(ContourPolygon::from_bez_path(&bez, tolerance));
            }
            let clipping = polys.pop().unwrap_or_default();
            let subject = polys.pop().unwrap_or_default();
            Ok((subject, clipping))
        }
        (None, Some(example)) => Ok(match example {
            Example::Checkerboard => generators::checkerboard(10),
            Example::SlantedCheckerboard => generators::slanted_checkerboard(10),
            Example::Slanties => generators::slanties(10),
            Example::NestedSquares => (
                generators::nested_squares(5),
                ContourPolygon::from_simple([(-1.0, 9.0), (21.0, 9.0), (21.0, 11.0), (-1.0, 11.0)]),
            ),
        }),
        _ => unreachable!(),
    }
}

pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Cli::parse();
    let (subject, clipping) = get_polygons(&args.input, args.tolerance)?;

    let result = match args.op {
        Op::Union => boolean_op(&subject, &clipping, BinaryOp::Union)?,
        Op::Intersection => boolean_op(&subject, &clipping, BinaryOp::Intersection)?,
        Op::Xor => boolean_op(&subject, &clipping, BinaryOp::Xor)?,
        Op::Difference => boolean_op(&subject, &clipping, BinaryOp::Difference)?,
        Op::ReverseDifference => boolean_op(&clipping, &subject, BinaryOp::Difference)?,
    };
    tracing::info!(
        contours = result.contour_count(),
        vertices = result.vertex_count(),
        area = result.area(),
        "done"
    );

    if args.tikz {
        print!("{}", result.tikz());
    }
    if let Some(path) = &args.geojson {
        std::fs::write(path, result.to_geojson().to_string())?;
    }
    svg::save(&args.output, &result.to_svg())?;

    Ok(())
}
