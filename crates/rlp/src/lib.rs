#![doc = include_str!("../README.md")]
#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod decode;
pub use decode::{decode_exact, Decodable};

mod encode;
pub use encode::{
    encode, encode_list, encode_signature_vrs, list_length, signature_vrs_length, Encodable,
};

mod error;
pub use error::{Error, Result};

mod header;
pub use header::{length_of_length, Header, EMPTY_LIST_CODE, EMPTY_STRING_CODE};

pub use bytes::BufMut;
