//! # Savepoint
//!
//! Savepoint is a small HTTP backend for a personal website. It reads
//! guestbook entries and project records out of Notion databases, flattens
//! Notion's typed properties into plain JSON for the frontend, and writes
//! new guestbook entries back.
//!
//! ## About the name
//!
//! The guestbook is signed at the site's "save point", where visitors
//! leave a note before moving on.

// =========================================================================
//                  Canonical lints for whole crate
// =========================================================================
// Lint reference: https://rust-lang.github.io/rust-clippy/master/index.html
//
// Everything pedantic is on, as warnings. CI is where warnings become errors.
#![warn(
    clippy::all,
    missing_docs,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(
    clippy::blanket_clippy_restriction_lints,
    reason = "Restriction lints are opted into as a group and allowed individually below"
)]
#![warn(clippy::restriction)]
//
// =========================================================================
//   Individually blanket-allow single lints relevant to this whole crate
// =========================================================================
#![allow(clippy::implicit_return, reason = "This is idiomatic Rust")]
#![allow(
    clippy::multiple_crate_versions,
    reason = "actix and reqwest pull in overlapping versions of several transitive deps"
)]
#![allow(
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    reason = "We're not interested in becoming no-std compatible"
)]
#![allow(
    clippy::mod_module_files,
    reason = "mod.rs is the more conventional layout for nested modules"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Request handling is dominated by the Notion round-trip, not call overhead"
)]
#![allow(
    clippy::exhaustive_structs,
    clippy::exhaustive_enums,
    reason = "`#[non_exhaustive]` is for types consumed by other crates"
)]
#![allow(
    clippy::question_mark_used,
    reason = "We rely on propagating errors with question mark extensively"
)]
#![allow(
    clippy::single_call_fn,
    reason = "We tend to break up long functions into smaller ones, so this lint is not useful"
)]
#![allow(
    clippy::arbitrary_source_item_ordering,
    reason = "Items are ordered by reading flow, not alphabetically"
)]

pub mod config;
pub mod notion;
pub mod records;
pub mod server;
pub mod utils;
