//! coverdb-cli
//! ===========
//!
//! Command-line interface for the `coverdb-core` coverage-area database.
//!
//! This crate primarily provides a binary (`coverdb-cli`). We include a
//! small library target so that docs.rs renders a documentation page and
//! shows this overview. See the README for full usage examples.
//!
//! Quick start
//! -----------
//!
//! Install the CLI from crates.io:
//!
//! ```text
//! cargo install coverdb-cli
//! ```
//!
//! Basic usage:
//!
//! ```text
//! coverdb-cli --help
//! coverdb-cli stats
//! coverdb-cli search gulshan
//! coverdb-cli resolve "House 5, Road 11, Gulshan 1, Dhaka"
//! ```
//!
//! For programmatic access to the data structures and the resolver API,
//! use the [`coverdb-core`] crate directly.
//!
//! [`coverdb-core`]: https://docs.rs/coverdb-core
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the
// primary deliverable. The presence of this file enables a rendered page
// on docs.rs.
