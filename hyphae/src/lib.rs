#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg, doc_cfg_hide))]
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs, missing_debug_implementations, rustdoc::broken_intra_doc_links)]

extern crate alloc;

#[macro_use]
pub(crate) mod util;

pub mod error;
pub mod heap;
pub mod list;
pub mod queue;
pub mod stack;

#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use heap::MinHeap;
#[doc(inline)]
pub use list::LinkedList;
#[doc(inline)]
pub use queue::Queue;
#[doc(inline)]
pub use stack::Stack;
