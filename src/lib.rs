//! Unmarshal Heap
//!
//! Attributes heap profile memory to the `Unmarshal` methods of
//! data-model types, so the cost of deserializing each type can be
//! ranked.
//!
//! This crate provides the core implementation for the
//! `unmarshal-heap` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! curl -s http://localhost:6060/debug/pprof/heap > heap.pb.gz
//! unmarshal-heap heap.pb.gz
//! ```
//!
//! Output is one line per type, most memory-consuming first:
//!
//! ```text
//! (*Pod) 2.00 KB: alloc obj 10 alloc space 2048 / inuse obj 5 inuse space 1024
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
