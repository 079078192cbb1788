//! Pluggable search over the LZSS sliding window.
//!
//! The encoder drives any `MatchFinder` through three hooks: `initialize`
//! before the first query, `find_match` once per emitted record, and
//! `replace_char` for every byte that moves from the lookahead into the
//! window.  Routing the window store through `replace_char` lets an
//! index-maintaining implementation (hash chains, trees, an external
//! pattern matcher) update its auxiliary structures in the same motion as
//! the window mutation.

use crate::lzss::{Window,WINDOW_SIZE,MAX_CODED};
use crate::Error;

/// A candidate back-reference.  `length == 0` means no usable match;
/// `offset` is the window index where the matched run begins.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub struct Match {
    pub offset: usize,
    pub length: usize
}

pub trait MatchFinder {
    /// Build any index over the freshly initialized window.
    fn initialize(&mut self,_window: &Window) -> Result<(),Error> {
        Ok(())
    }
    /// Longest substring of the window (read cyclically from any start)
    /// that is a prefix of the lookahead at `uncoded_head`.  Ties may be
    /// broken arbitrarily; `length` never exceeds `MAX_CODED`.
    fn find_match(&mut self,window: &Window,window_head: usize,uncoded_head: usize) -> Match;
    /// Store `replacement` at `window[index]` and bring any auxiliary
    /// index up to date.  Overriding implementations must keep the store.
    fn replace_char(&mut self,window: &mut Window,index: usize,replacement: u8) {
        window.set_window_byte(index,replacement);
    }
}

/// Stateless reference implementation: scan every window start position,
/// matching forward with both buffers read cyclically.
pub struct BruteForce;

impl MatchFinder for BruteForce {
    fn find_match(&mut self,window: &Window,window_head: usize,uncoded_head: usize) -> Match {
        let mut best = Match { offset: 0, length: 0 };
        let mut i = window_head;
        loop {
            if window.window_byte(i) == window.lookahead_byte(uncoded_head) {
                let mut j = 1;
                while j < MAX_CODED
                    && window.window_byte(i + j) == window.lookahead_byte(uncoded_head + j) {
                    j += 1;
                }
                if j > best.length {
                    best.length = j;
                    best.offset = i;
                }
                if j >= MAX_CODED {
                    break;
                }
            }
            i = (i + 1) % WINDOW_SIZE;
            if i == window_head {
                break;
            }
        }
        best
    }
}

#[test]
fn finds_longest_run() {
    let mut window = Window::new();
    // plant "abcab" right at the head of the window
    for (i,c) in b"abcab".iter().enumerate() {
        window.set_window_byte(i,*c);
    }
    for (i,c) in b"abc".iter().enumerate() {
        window.set_lookahead_byte(i,*c);
    }
    let m = BruteForce.find_match(&window,5,0);
    assert_eq!(m,Match { offset: 0, length: 3 });
}

#[test]
fn reports_no_match() {
    let mut window = Window::new();
    for (i,c) in b"xyz".iter().enumerate() {
        window.set_lookahead_byte(i,*c);
    }
    let m = BruteForce.find_match(&window,0,0);
    assert_eq!(m.length,0);
}

#[test]
fn caps_at_max_coded() {
    let mut window = Window::new();
    for i in 0..WINDOW_SIZE {
        window.set_window_byte(i,b'a');
    }
    for i in 0..MAX_CODED {
        window.set_lookahead_byte(i,b'a');
    }
    let m = BruteForce.find_match(&window,0,0);
    assert_eq!(m.length,MAX_CODED);
}
