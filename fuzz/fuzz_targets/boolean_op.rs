#![no_main]

use arbitrary::Unstructured;

use libfuzzer_sys::fuzz_target;
use polyclip_sweep::{arbitrary::polygon, boolean_op, BinaryOp};

fn run(mut u: Unstructured) -> Result<(), arbitrary::Error> {
    let subject = polygon(&mut u)?;
    let clipping = polygon(&mut u)?;
    let op = *u.choose(&[
        BinaryOp::Intersection,
        BinaryOp::Union,
        BinaryOp::Difference,
        BinaryOp::Xor,
    ])?;

    // Garbage in is fine, but it has to come out as an error and not a panic.
    let Ok(result) = boolean_op(&subject, &clipping, op) else {
        return Ok(());
    };
    for contour in &result.contours {
        assert!(contour.points.iter().all(|p| p.is_finite()));
        for &h in &contour.holes {
            assert!(h.0 < result.contour_count());
        }
    }
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    let _ = run(Unstructured::new(data));
});
