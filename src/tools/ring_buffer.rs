//! Ring buffer for LZ type compression windows
use num_traits::PrimInt;

/// Fixed-size cyclic buffer addressed by absolute wrapped index.
/// The compression window and lookahead both ride on this; the codec
/// keeps its own cursors and hands over indices that may have wrapped
/// any number of times.
pub struct RingBuffer<T: PrimInt> {
    buf: Vec<T>,
    n: usize
}

impl <T: PrimInt> RingBuffer<T> {
    pub fn create(fill: T,n: usize) -> Self {
        Self {
            buf: vec![fill;n],
            n
        }
    }
    /// get value at wrapped index
    pub fn get(&self,idx: usize) -> T {
        self.buf[idx % self.n]
    }
    /// set value at wrapped index
    pub fn set(&mut self,idx: usize,val: T) {
        self.buf[idx % self.n] = val;
    }
}

#[test]
fn wrapped_indexing() {
    let mut ring: RingBuffer<u8> = RingBuffer::create(0,4);
    ring.set(5,7);
    assert_eq!(ring.get(1),7);
    assert_eq!(ring.get(9),7);
    ring.set(2,3);
    assert_eq!(ring.get(6),3);
}

#[test]
fn prefilled() {
    let ring: RingBuffer<u8> = RingBuffer::create(b' ',4);
    for i in 0..4 {
        assert_eq!(ring.get(i),b' ');
    }
}
