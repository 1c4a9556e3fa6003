//! # Cross-Section Components
//!
//! The four component families of the spar cross-section and their
//! governing failure modes:
//!
//! - [`Web`](web::Web) - shear buckling, ultimate shear, hole loss
//! - [`Stiffener`](stiffener::Stiffener) - column stability, crippling
//! - [`CompressionFlange`](flange::CompressionFlange) /
//!   [`TensionFlange`](flange::TensionFlange) - crippling / ultimate
//!   tension under the bending couple
//! - [`WebFlangeRivets`](rivet::WebFlangeRivets) /
//!   [`WebStiffenerRivets`](rivet::WebStiffenerRivets) - rivet shear and
//!   web hole loss
//!
//! Components are immutable value objects validated at construction.
//! Methods that need web geometry borrow the [`Web`](web::Web) at call
//! time; nothing holds a long-lived reference and nothing is mutated
//! after the rib is built.

pub mod flange;
pub mod rivet;
pub mod stiffener;
pub mod web;

pub use flange::{CompressionFlange, FlangeSection, TensionFlange};
pub use rivet::{shear_allowable_n, WebFlangeRivets, WebStiffenerRivets};
pub use stiffener::Stiffener;
pub use web::Web;
