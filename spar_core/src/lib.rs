//! # spar_core - Wing Spar Rib Sizing Engine
//!
//! `spar_core` sizes the ribs of an aircraft wing's front spar: webs,
//! stiffeners, flanges, and the rivets joining them. For each rib station
//! it computes section properties, the spar loads from the spanwise lift
//! distribution, allowable stresses from empirical handbook curves, and
//! margins of safety against eight failure modes, composed into a single
//! pass/fail verdict per rib.
//!
//! ## Design Philosophy
//!
//! - **Immutable components**: every cross-section object is validated at
//!   construction and never mutated afterward
//! - **JSON-First**: inputs, evaluations, and projects all serialize
//! - **Explicit domain boundaries**: handbook curves evaluated off their
//!   charts return a tagged out-of-domain value, never a silent NaN
//! - **Collected diagnostics**: non-fatal conditions travel with the
//!   result instead of going to a console
//!
//! ## Quick Start
//!
//! ```rust
//! use spar_core::loads::{standard_wing_loads, StationTable};
//! use spar_core::rib::RibBuilder;
//!
//! let stations = StationTable::standard_wing();
//! let rib = RibBuilder::new(&stations, 0).unwrap()
//!     .web(2.03, 3).unwrap()
//!     .stiffener(2.03, 20.0, 25.0).unwrap()
//!     .compression_flange(6.0, 34.5, 34.5).unwrap()
//!     .tension_flange(8.0, 34.5, 34.5).unwrap()
//!     .stiffener_rivets(3.175).unwrap()
//!     .flange_rivets(6.35, 4.0, 2).unwrap()
//!     .build().unwrap();
//!
//! let result = rib.evaluate_with(standard_wing_loads());
//! println!("mass {:.2} kg, pass: {}", result.mass_kg, result.margins.passes());
//! ```
//!
//! ## Modules
//!
//! - [`components`] - web, stiffener, flanges, rivet joints
//! - [`rib`] - the rib aggregate, margin set, and verdict
//! - [`materials`] - empirical allowables, buckling curves, fatigue data
//! - [`loads`] - spanwise shear/moment providers and the station table
//! - [`sizing`] - brute-force mass minimization
//! - [`report`] - CSV report rows and writer
//! - [`stiffness`] - spanwise EI report
//! - [`project`] / [`file_io`] - persistence with atomic saves and locking
//! - [`curves`] / [`units`] / [`errors`] - shared infrastructure

pub mod components;
pub mod curves;
pub mod errors;
pub mod file_io;
pub mod loads;
pub mod materials;
pub mod project;
pub mod report;
pub mod rib;
pub mod sizing;
pub mod stiffness;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{SparError, SparResult};
pub use file_io::{load_project, save_project, FileLock};
pub use project::{GlobalSettings, ProjectMeta, SparProject};
pub use rib::{MarginSet, MarginValue, Rib, RibBuilder, RibEvaluation};
