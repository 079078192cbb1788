//! LZSS sliding-window compression.
//!
//! The wire is a raw sequence of tagged records with no header or trailer.
//! Each record opens with one flag bit: `1` introduces a literal byte,
//! `0` introduces a back-reference of `OFFSET_BITS` offset and
//! `LENGTH_BITS` stored length against the most recent `WINDOW_SIZE`
//! bytes of output.  The stored length is biased by the shortest run worth
//! tokenizing, and the final byte of a stream is zero padded, which the
//! decoder absorbs by treating EOF on any bit read as the end of data.
//!
//! The window is prefilled with spaces so offsets are valid from the first
//! record; both sides maintain identical window state, which is what makes
//! the references resolvable.  Changing any parameter below changes the
//! wire format.

use std::io::{Cursor,Read,Write};
use crate::bitstream::{BitReader,BitWriter};
use crate::match_finder::{MatchFinder,BruteForce};
use crate::tools::ring_buffer::RingBuffer;
use crate::Error;

/// sliding window, also the reach of an offset field
pub const WINDOW_SIZE: usize = 4096;
/// longest run one back-reference can cover
pub const MAX_CODED: usize = 18;
/// runs this short stay literal
pub const MAX_UNCODED: usize = 2;
/// bits in the offset field
pub const OFFSET_BITS: usize = 12;
/// bits in the stored length field
pub const LENGTH_BITS: usize = 4;

/// dictionary backfill, gives offsets something valid to point at
const PRECURSOR: u8 = b' ';

/// The two cyclic buffers every codec pass owns: the dictionary of recent
/// output and the lookahead of pending input.  The match finder borrows
/// this; only one codec operation owns it at a time.
pub struct Window {
    sliding: RingBuffer<u8>,
    lookahead: RingBuffer<u8>
}

impl Window {
    pub fn new() -> Self {
        Self {
            sliding: RingBuffer::create(PRECURSOR,WINDOW_SIZE),
            lookahead: RingBuffer::create(0,MAX_CODED)
        }
    }
    pub fn window_byte(&self,idx: usize) -> u8 {
        self.sliding.get(idx)
    }
    pub fn set_window_byte(&mut self,idx: usize,val: u8) {
        self.sliding.set(idx,val);
    }
    pub fn lookahead_byte(&self,idx: usize) -> u8 {
        self.lookahead.get(idx)
    }
    pub fn set_lookahead_byte(&mut self,idx: usize,val: u8) {
        self.lookahead.set(idx,val);
    }
}

fn read_byte<R: Read>(input: &mut R) -> Result<Option<u8>,Error> {
    let mut b = [0u8;1];
    loop {
        match input.read(&mut b) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(b[0])),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::Io(e))
        }
    }
}

/// Compress with a caller-supplied match finder.  Returns
/// `(bytes_in,bytes_out)`.
pub fn compress_with<R,W,M>(input: &mut R,output: &mut W,finder: &mut M) -> Result<(u64,u64),Error>
where R: Read, W: Write, M: MatchFinder {
    let mut writer = BitWriter::new(&mut *output);
    let mut window = Window::new();
    let mut window_head: usize = 0;
    let mut uncoded_head: usize = 0;
    let mut bytes_in: u64 = 0;
    // prime the lookahead
    let mut len = 0;
    while len < MAX_CODED {
        match read_byte(input)? {
            Some(c) => {
                window.set_lookahead_byte(len,c);
                len += 1;
                bytes_in += 1;
            },
            None => break
        }
    }
    if len == 0 {
        // empty in, empty out
        return Ok((0,0));
    }
    finder.initialize(&window)?;
    let mut m = finder.find_match(&window,window_head,uncoded_head);
    while len > 0 {
        if m.length > len {
            // never let a match run into stale lookahead past real input
            m.length = len;
        }
        if m.length <= MAX_UNCODED {
            writer.put_bit(1)?;
            writer.put_byte(window.lookahead_byte(uncoded_head))?;
            m.length = 1;
        } else {
            let offset = m.offset as u16;
            let stored = (m.length - (MAX_UNCODED + 1)) as u16;
            writer.put_bit(0)?;
            writer.put_bits_num(&offset.to_ne_bytes(),OFFSET_BITS)?;
            writer.put_bits_num(&stored.to_ne_bytes(),LENGTH_BITS)?;
        }
        // slide the emitted run from the lookahead into the window,
        // refilling the lookahead while input lasts
        let mut i = 0;
        while i < m.length {
            let c = match read_byte(input)? {
                Some(c) => c,
                None => break
            };
            let retired = window.lookahead_byte(uncoded_head);
            finder.replace_char(&mut window,window_head,retired);
            window.set_lookahead_byte(uncoded_head,c);
            window_head = (window_head + 1) % WINDOW_SIZE;
            uncoded_head = (uncoded_head + 1) % MAX_CODED;
            bytes_in += 1;
            i += 1;
        }
        while i < m.length {
            // input is gone, keep draining the lookahead
            let retired = window.lookahead_byte(uncoded_head);
            finder.replace_char(&mut window,window_head,retired);
            window_head = (window_head + 1) % WINDOW_SIZE;
            uncoded_head = (uncoded_head + 1) % MAX_CODED;
            len -= 1;
            i += 1;
        }
        if len > 0 {
            m = finder.find_match(&window,window_head,uncoded_head);
        }
    }
    writer.flush_bits(false)?;
    let bytes_out = writer.bytes_written();
    log::debug!("lzss packed {} bytes into {}",bytes_in,bytes_out);
    Ok((bytes_in,bytes_out))
}

/// Compress using the brute force reference finder.  Returns
/// `(bytes_in,bytes_out)`.
pub fn compress<R,W>(input: &mut R,output: &mut W) -> Result<(u64,u64),Error>
where R: Read, W: Write {
    compress_with(input,output,&mut BruteForce)
}

/// Expand a compressed stream.  Returns `(bytes_in,bytes_out)`.
pub fn expand<R,W>(input: &mut R,output: &mut W) -> Result<(u64,u64),Error>
where R: Read, W: Write {
    let mut reader = BitReader::new(&mut *input);
    let mut window = Window::new();
    let mut next_char: usize = 0;
    let mut bytes_out: u64 = 0;
    loop {
        let flag = match reader.get_bit() {
            Ok(bit) => bit,
            Err(Error::EndOfFile) => break,
            Err(e) => return Err(e)
        };
        if flag == 1 {
            let c = match reader.get_byte() {
                Ok(c) => c,
                Err(Error::EndOfFile) => break,
                Err(e) => return Err(e)
            };
            output.write_all(&[c])?;
            bytes_out += 1;
            window.set_window_byte(next_char,c);
            next_char = (next_char + 1) % WINDOW_SIZE;
        } else {
            let mut offset_repr = [0u8;2];
            match reader.get_bits_num(&mut offset_repr,OFFSET_BITS) {
                Ok(()) => {},
                Err(Error::EndOfFile) => break,
                Err(e) => return Err(e)
            }
            let mut length_repr = [0u8;2];
            match reader.get_bits_num(&mut length_repr,LENGTH_BITS) {
                Ok(()) => {},
                Err(Error::EndOfFile) => break,
                Err(e) => return Err(e)
            }
            let offset = u16::from_ne_bytes(offset_repr) as usize;
            let length = u16::from_ne_bytes(length_repr) as usize + MAX_UNCODED + 1;
            // stage the run in the lookahead before touching the window,
            // the source and destination ranges may overlap
            for i in 0..length {
                let c = window.window_byte(offset + i);
                output.write_all(&[c])?;
                window.set_lookahead_byte(i,c);
                bytes_out += 1;
            }
            for i in 0..length {
                let c = window.lookahead_byte(i);
                window.set_window_byte(next_char + i,c);
            }
            next_char = (next_char + length) % WINDOW_SIZE;
        }
    }
    let bytes_in = reader.bytes_read();
    log::debug!("lzss expanded {} bytes into {}",bytes_in,bytes_out);
    Ok((bytes_in,bytes_out))
}

/// Convenience function, calls `compress` with a slice returning a Vec
pub fn compress_slice(slice: &[u8]) -> Result<Vec<u8>,Error> {
    let mut src = Cursor::new(slice);
    let mut ans: Cursor<Vec<u8>> = Cursor::new(Vec::new());
    compress(&mut src,&mut ans)?;
    Ok(ans.into_inner())
}

/// Convenience function, calls `expand` with a slice returning a Vec
pub fn expand_slice(slice: &[u8]) -> Result<Vec<u8>,Error> {
    let mut src = Cursor::new(slice);
    let mut ans: Cursor<Vec<u8>> = Cursor::new(Vec::new());
    expand(&mut src,&mut ans)?;
    Ok(ans.into_inner())
}

#[cfg(test)]
fn round_trip(data: &[u8]) {
    let compressed = compress_slice(data).expect("compression failed");
    let expanded = expand_slice(&compressed).expect("expansion failed");
    assert_eq!(data.to_vec(),expanded);
}

#[test]
fn compression_works() {
    // one literal: flag 1, byte 0x41, zero padding
    let compressed = compress_slice(&[0x41]).expect("compression failed");
    assert_eq!(compressed,hex::decode("a080").unwrap());

    // five literals bracketing one offset 0 length 3 reference
    let compressed = compress_slice("AAAAAAAA".as_bytes()).expect("compression failed");
    assert_eq!(compressed,hex::decode("a0d06820000a0d04").unwrap());
}

#[test]
fn empty_stream() {
    assert_eq!(compress_slice(&[]).expect("compression failed"),Vec::<u8>::new());
    assert_eq!(expand_slice(&[]).expect("expansion failed"),Vec::<u8>::new());
}

#[test]
fn invertibility() {
    let test_data = "I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes();
    round_trip(test_data);
    round_trip(&[0x41]);
    round_trip("1234567".as_bytes());
}

#[test]
fn long_runs() {
    // the window warms up with literals, then maximum length references
    round_trip(&[0u8;100]);
    round_trip(&vec![0u8;8192]);
    let alternating: Vec<u8> = (0..4096).map(|i| if i % 2 == 0 { 0xaa } else { 0x55 }).collect();
    round_trip(&alternating);
}

#[test]
fn space_runs_match_the_precursor() {
    // runs of 0x20 can reference the virgin dictionary immediately
    round_trip(&[b' ';64]);
    let compressed = compress_slice(&[b' ';64]).expect("compression failed");
    // far smaller than one record per byte
    assert!(compressed.len() < 16);
}

#[test]
fn tail_shorter_than_lookahead() {
    let mut data = vec![b'x';40];
    data.extend_from_slice("abcdefg".as_bytes());
    round_trip(&data);
    round_trip(&data[0..MAX_CODED-1]);
}

#[test]
fn binary_soup() {
    // xorshift keeps the fixture deterministic
    let mut state: u32 = 0x2545_f491;
    let mut data = Vec::new();
    for _i in 0..4096 {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        data.push(state as u8);
    }
    round_trip(&data);
}

#[test]
fn custom_finder_still_decodes() {
    // a finder that never matches forces an all-literal stream, which the
    // decoder must accept like any other
    struct NoMatch;
    impl MatchFinder for NoMatch {
        fn find_match(&mut self,_w: &Window,_wh: usize,_uh: usize) -> crate::match_finder::Match {
            crate::match_finder::Match { offset: 0, length: 0 }
        }
    }
    let data = "the quick brown fox jumps over the lazy dog".as_bytes();
    let mut src = Cursor::new(data);
    let mut dst: Cursor<Vec<u8>> = Cursor::new(Vec::new());
    let (bytes_in,bytes_out) = compress_with(&mut src,&mut dst,&mut NoMatch).expect("compression failed");
    assert_eq!(bytes_in as usize,data.len());
    // 9 bits per record
    assert_eq!(bytes_out as usize,(data.len() * 9 + 7) / 8);
    let expanded = expand_slice(&dst.into_inner()).expect("expansion failed");
    assert_eq!(data.to_vec(),expanded);
}
