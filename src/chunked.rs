//! A vector that's cheap to insert into and remove from in the middle.
//!
//! The sweep-line status is a sorted list that sees an insertion and a
//! removal for every input segment, usually somewhere in the middle. With a
//! plain `Vec` that costs a shift of the whole tail each time. Here we store
//! the elements in a list of bounded chunks, so that an insertion or removal
//! only shifts the elements of one chunk (plus, occasionally, the list of
//! chunks itself).

use arrayvec::ArrayVec;
use serde::ser::SerializeSeq;

/// A sequence stored as a list of chunks, each holding at most `B` elements.
///
/// Chunks are never empty, and we try to keep them at least half full so
/// that the number of chunks stays proportional to `len / B`.
#[derive(Clone, Debug)]
pub struct ChunkedVec<T, const B: usize> {
    chunks: Vec<ArrayVec<T, B>>,
    len: usize,
}

impl<T: serde::Serialize, const B: usize> serde::Serialize for ChunkedVec<T, B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for x in self.iter() {
            seq.serialize_element(x)?;
        }
        seq.end()
    }
}

impl<T, const B: usize> Default for ChunkedVec<T, B> {
    fn default() -> Self {
        Self {
            chunks: Vec::new(),
            len: 0,
        }
    }
}

impl<T, const B: usize> ChunkedVec<T, B> {
    /// Creates a new, empty, vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Are we empty?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    // Finds the chunk containing `index`, and the offset within that chunk.
    //
    // If `index` is one-past-the-end, this points one-past-the-end of the last
    // chunk.
    fn locate(&self, mut index: usize) -> Option<(usize, usize)> {
        let last = self.chunks.len().checked_sub(1)?;
        for (chunk_idx, chunk) in self.chunks.iter().enumerate() {
            if index < chunk.len() || (chunk_idx == last && index == chunk.len()) {
                return Some((chunk_idx, index));
            }
            index -= chunk.len();
        }
        None
    }

    /// Returns the element at `index`, if there is one.
    pub fn get(&self, index: usize) -> Option<&T> {
        let (chunk_idx, offset) = self.locate(index)?;
        self.chunks[chunk_idx].get(offset)
    }

    /// Returns the element at `index` mutably, if there is one.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let (chunk_idx, offset) = self.locate(index)?;
        self.chunks[chunk_idx].get_mut(offset)
    }

    /// Inserts an element at position `index`, shifting everything after it.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, element: T) {
        assert!(index <= self.len, "insertion index out of bounds");

        if self.chunks.is_empty() {
            self.chunks.push(ArrayVec::new());
        }
        // unwrap: we checked the bounds, and there's at least one chunk
        let (chunk_idx, offset) = self.locate(index).unwrap();
        let chunk = &mut self.chunks[chunk_idx];

        if chunk.is_full() {
            let mut second_half: ArrayVec<T, B> = chunk.drain(B / 2..).collect();
            if offset <= B / 2 {
                chunk.insert(offset, element);
            } else {
                second_half.insert(offset - B / 2, element);
            }
            self.chunks.insert(chunk_idx + 1, second_half);
        } else {
            chunk.insert(offset, element);
        }
        self.len += 1;
    }

    /// Removes and returns the element at position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(index < self.len, "removal index out of bounds");

        // unwrap: we checked the bounds
        let (chunk_idx, offset) = self.locate(index).unwrap();
        let ret = self.chunks[chunk_idx].remove(offset);
        self.len -= 1;

        if self.chunks[chunk_idx].is_empty() {
            self.chunks.remove(chunk_idx);
        } else if self.chunks[chunk_idx].len() < B / 2 && chunk_idx + 1 < self.chunks.len() {
            let (a, b) = self.chunks.split_at_mut(chunk_idx + 1);
            let cur = &mut a[chunk_idx];
            let next = &mut b[0];
            if cur.len() + next.len() <= B {
                cur.extend(next.drain(..));
                self.chunks.remove(chunk_idx + 1);
            } else {
                // Borrow enough from the next chunk to even the two out.
                let count = (next.len() - cur.len()) / 2;
                cur.extend(next.drain(..count));
            }
        }
        ret
    }

    /// Iterates over all elements, in order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.chunks.iter().flat_map(|chunk| chunk.iter())
    }

    /// Returns the index of the first element for which `pred` is false,
    /// assuming that `pred` is true on some prefix and false afterwards.
    pub fn partition_point<P>(&self, mut pred: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        // The first chunk that isn't entirely true. (Chunks are non-empty,
        // so the `last` is always there.)
        let chunk_idx = self
            .chunks
            .partition_point(|chunk| chunk.last().is_some_and(&mut pred));
        let before: usize = self.chunks[..chunk_idx].iter().map(|c| c.len()).sum();
        match self.chunks.get(chunk_idx) {
            Some(chunk) => before + chunk.partition_point(pred),
            None => before,
        }
    }

    /// Asserts that our internal invariants hold.
    pub fn check_invariants(&self) {
        assert_eq!(self.len, self.chunks.iter().map(|c| c.len()).sum::<usize>());
        for chunk in &self.chunks {
            assert!(!chunk.is_empty());
        }
    }
}

impl<T, const B: usize> FromIterator<T> for ChunkedVec<T, B> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut chunks = Vec::new();
        let mut cur = ArrayVec::new();
        let mut len = 0;
        for x in iter {
            if cur.is_full() {
                chunks.push(std::mem::take(&mut cur));
            }
            cur.push(x);
            len += 1;
        }
        if !cur.is_empty() {
            chunks.push(cur);
        }
        ChunkedVec { chunks, len }
    }
}

impl<T, const B: usize> std::ops::Index<usize> for ChunkedVec<T, B> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index).expect("index out of bounds")
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn insert_get() {
        let mut vec = ChunkedVec::<i32, 4>::new();
        for i in 0..4 {
            vec.insert(0, i);
        }
        vec.check_invariants();
        assert_eq!(vec.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1, 0]);

        // This one splits the chunk.
        vec.insert(2, 10);
        vec.check_invariants();
        assert_eq!(vec.iter().copied().collect::<Vec<_>>(), vec![3, 2, 10, 1, 0]);
        assert_eq!(vec[2], 10);
        assert_eq!(vec.get(5), None);

        vec.insert(5, 11);
        assert_eq!(vec[5], 11);
        assert_eq!(vec.len(), 6);
    }

    #[test]
    fn insert_remove() {
        let mut vec = (0..12).collect::<ChunkedVec<i32, 4>>();
        vec.check_invariants();
        assert_eq!(vec.remove(5), 5);
        assert_eq!(vec.remove(4), 4);
        assert_eq!(vec.remove(4), 6);
        vec.check_invariants();
        assert_eq!(
            vec.iter().copied().collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 7, 8, 9, 10, 11]
        );

        while !vec.is_empty() {
            vec.remove(0);
            vec.check_invariants();
        }
        assert_eq!(vec.iter().next(), None);
    }

    #[test]
    fn partition_point() {
        let vec = (0..20).map(|x| x * 2).collect::<ChunkedVec<i32, 4>>();
        assert_eq!(vec.partition_point(|&x| x < 0), 0);
        assert_eq!(vec.partition_point(|&x| x < 7), 4);
        assert_eq!(vec.partition_point(|&x| x <= 8), 5);
        assert_eq!(vec.partition_point(|&x| x < 100), 20);

        let empty = ChunkedVec::<i32, 4>::new();
        assert_eq!(empty.partition_point(|_| true), 0);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(usize, i32),
        Remove(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (any::<usize>(), any::<i32>()).prop_map(|(i, x)| Op::Insert(i, x)),
            any::<usize>().prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn agrees_with_vec(ops in proptest::collection::vec(op(), 0..200)) {
            let mut vec = Vec::new();
            let mut chunked = ChunkedVec::<i32, 6>::new();
            for op in ops {
                match op {
                    Op::Insert(idx, x) => {
                        let idx = idx % (vec.len() + 1);
                        vec.insert(idx, x);
                        chunked.insert(idx, x);
                    }
                    Op::Remove(idx) => {
                        if !vec.is_empty() {
                            let idx = idx % vec.len();
                            prop_assert_eq!(vec.remove(idx), chunked.remove(idx));
                        }
                    }
                }
                chunked.check_invariants();
                prop_assert_eq!(chunked.len(), vec.len());
                prop_assert_eq!(chunked.iter().copied().collect::<Vec<_>>(), vec.clone());
            }
        }
    }
}
