//! # Bitpress Library
//!
//! Lossless compression built from two classical stages sharing one
//! bit-granular stream layer:
//! * `lzss` replaces repeated byte runs with (offset,length) references
//!   against a 4K sliding window
//! * `huffman` builds a minimum-redundancy prefix code from symbol counts
//! * `bitstream` packs and unpacks the sub-byte fields both stages emit
//!
//! The codec entry points are generics over `Read` and `Write`, with
//! convenience functions for working directly with buffers.
//!
//! ## File Example
//!
//! ```rs
//! use bitpress::*;
//! let mut in_file = std::fs::File::open("some_input_path").expect("open failed");
//! let mut out_file = std::fs::File::create("some_output_path").expect("create failed");
//! let (in_size,out_size) = lzss::compress(&mut in_file,&mut out_file)
//!     .expect("compression failed");
//! eprintln!("compressed {} into {}",in_size,out_size);
//! ```
//!
//! ## Buffer Example
//!
//! ```rs
//! use bitpress::*;
//! let test_data = "This is the chaunt of the priests.  The chaunt of the priests of Mung.".as_bytes();
//! let compressed = lzss::compress_slice(test_data).expect("compression failed");
//! ```

mod tools;
pub mod bitstream;
pub mod lzss;
pub mod match_finder;
pub mod huffman;

/// Stream and codec errors
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("i/o failed")]
    Io(#[from] std::io::Error),
    #[error("end of file")]
    EndOfFile,
    #[error("host byte order could not be determined")]
    UnsupportedByteOrder,
    #[error("bit count exceeds the destination size")]
    TooManyBits
}
