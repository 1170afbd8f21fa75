//! bga-fanout: automatic escape routing for BGA footprints
//!
//! This library adds a short track and a via to every electrical pad of a
//! ball-grid-array footprint, pointing each one away from the pad towards
//! the gap between balls, so inner rows can be routed on other layers.
//!
//! # Architecture
//!
//! The engine works against a small host abstraction rather than a specific
//! PCB editor:
//!
//! - **Host model**: [`board::FootprintModel`] and [`board::BoardModel`]
//! - **Geometry**: pitch inference, rotation buckets and endpoint rules
//! - **Emission**: tracks and vias with bulk undo
//!
//! [`board::Board`] is a JSON-backed host used by the `bga-fanout` binary.
//!
//! # Modules
//!
//! - [`board`]: Host traits and the in-memory board
//! - [`config`]: Configuration loading and validation
//! - [`error`]: Configuration error types
//! - [`fanout`]: Pad classification, pitch analysis, strategies and emission

pub mod board;
pub mod config;
pub mod error;
pub mod fanout;
