use kurbo::BezPath;
use libtest_mimic::{Arguments, Failed, Trial};
use polyclip_sweep::{boolean_op, BinaryOp, Contour, ContourPolygon};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One input polygon: either an SVG path, or explicit contours.
#[derive(Serialize, Deserialize, Debug)]
#[serde(untagged)]
enum Input {
    SvgPath(String),
    Contours(Vec<Vec<[f64; 2]>>),
}

impl Input {
    fn to_polygon(&self) -> Result<ContourPolygon, Failed> {
        match self {
            Input::SvgPath(s) => {
                let path = BezPath::from_svg(s).map_err(|e| format!("bad svg path: {e}"))?;
                Ok(ContourPolygon::from_bez_path(&path, 0.01))
            }
            Input::Contours(contours) => {
                let mut ret = ContourPolygon::new();
                for c in contours {
                    ret.push(Contour::new(c.iter().map(|&[x, y]| (x, y))));
                }
                Ok(ret)
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
enum Assertion {
    NoPanic,
    Area {
        area: f64,
        #[serde(default)]
        contours: Option<usize>,
    },
    Error,
}

#[derive(Serialize, Deserialize, Debug)]
struct RegressionCaseDeclaration {
    subject: Input,
    clipping: Input,
    op: BinaryOp,
    assert: Option<Assertion>,
}

fn main() {
    let args = Arguments::from_args();
    let tests = regression_tests();

    libtest_mimic::run(&args, tests).exit();
}

fn regression_tests() -> Vec<Trial> {
    let ws = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let file_paths = glob::glob(&format!("{ws}/tests/regression/**/*.yml")).unwrap();

    file_paths
        .into_iter()
        .map(|p| {
            let p = p.unwrap();
            let name = input_path_base(&p).display().to_string();
            Trial::test(name, || generate_regression_test(p))
        })
        .collect()
}

fn input_path_base(input_path: &Path) -> &Path {
    let ws = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let base = format!("{ws}/tests/regression");
    input_path.strip_prefix(base).unwrap()
}

fn generate_regression_test(path: PathBuf) -> Result<(), Failed> {
    let input = std::fs::read_to_string(&path).unwrap();
    let case: RegressionCaseDeclaration = serde_yaml::from_str(&input).unwrap();
    let subject = case.subject.to_polygon()?;
    let clipping = case.clipping.to_polygon()?;
    let result = boolean_op(&subject, &clipping, case.op);

    match (case.assert.unwrap_or(Assertion::NoPanic), result) {
        (Assertion::NoPanic, _) => Ok(()),
        (Assertion::Error, Err(_)) => Ok(()),
        (Assertion::Error, Ok(_)) => Err("expected an error".into()),
        (Assertion::Area { .. }, Err(e)) => Err(format!("unexpected error: {e}").into()),
        (Assertion::Area { area, contours }, Ok(poly)) => {
            let actual = poly.area();
            if (actual - area).abs() > 1e-6 * area.abs().max(1.0) {
                return Err(format!("expected area {area}, got {actual}").into());
            }
            if let Some(contours) = contours {
                if poly.contour_count() != contours {
                    return Err(format!(
                        "expected {contours} contours, got {}:\n{}",
                        poly.contour_count(),
                        poly.tikz()
                    )
                    .into());
                }
            }
            Ok(())
        }
    }
}
