#![no_main]

use arbitrary::{Arbitrary, Unstructured};

use libfuzzer_sys::fuzz_target;
use polyclip_sweep::chunked::ChunkedVec;

/// The things the sweep line does to its status: insert in sorted position,
/// remove by index, and look at neighbors.
#[derive(Arbitrary, Debug)]
enum Op {
    InsertSorted { val: i16 },
    Remove { idx: usize },
    Bump { idx: usize },
}

fn check<const B: usize>(ops: &[Op]) {
    let mut vec: Vec<i16> = Vec::new();
    let mut chunked = ChunkedVec::<i16, B>::new();

    for op in ops {
        match *op {
            Op::InsertSorted { val } => {
                let pos = vec.partition_point(|x| *x <= val);
                assert_eq!(chunked.partition_point(|x| *x <= val), pos);
                vec.insert(pos, val);
                chunked.insert(pos, val);
            }
            Op::Remove { idx } => {
                if !vec.is_empty() {
                    let idx = idx % vec.len();
                    assert_eq!(vec.remove(idx), chunked.remove(idx));
                }
            }
            Op::Bump { idx } => {
                // Stays sorted as long as we only touch the last element.
                if let Some(last) = vec.len().checked_sub(1) {
                    let idx = idx % vec.len();
                    assert_eq!(chunked.get(idx), vec.get(idx));
                    if let (Some(x), Some(y)) = (vec.get_mut(last), chunked.get_mut(last)) {
                        *x = x.saturating_add(1);
                        *y = y.saturating_add(1);
                    }
                }
            }
        }
        chunked.check_invariants();
        assert_eq!(chunked.len(), vec.len());
    }
    assert!(chunked.iter().eq(vec.iter()));
}

fn arbitrary_ops(mut u: Unstructured) -> Result<(), arbitrary::Error> {
    let ops: Vec<Op> = u.arbitrary()?;
    check::<4>(&ops);
    check::<5>(&ops);
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    let u = Unstructured::new(data);
    let _ = arbitrary_ops(u);
});
