//! Application ports (traits) for external collaborators.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `masthead-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by the transform, implemented by
//!   infrastructure
//!   - `TemplateRenderer`: header rendering
//!   - `ContentJoiner`: byte concatenation + source-map combination
//!   - `PathProbe`: the eligibility existence check

pub mod output;

pub use output::{ContentJoiner, JoinPiece, Joined, PathProbe, TemplateRenderer};
