//! # Spatial Games
//!
//! Spatial Prisoner's Dilemma on a 2-D lattice.
//!
//! Every cell plays either Cooperate or Defect. Each generation, a cell
//! plays one round against every cell of its 3x3 Moore neighborhood
//! (itself included, no wraparound) and then adopts the strategy of the
//! best-scoring cell in that neighborhood, keeping its own on ties.
//!
//! ## Quick Start
//!
//! ```rust
//! use spatial_games::{loader, evolution, Payoff, Strategy};
//!
//! let field = loader::parse_field("3 3\nCCC\nCDC\nCCC\n")?;
//! let b = Payoff::new(3.0)?;
//!
//! let last = evolution::evolve(field, 1, b);
//! assert_eq!(last.count(Strategy::Defect), 9);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Rendering the last two generations
//!
//! ```rust,no_run
//! use spatial_games::{loader, Payoff, Simulation};
//! use spatial_games::render::{PngRenderer, Renderer};
//! use std::path::Path;
//!
//! let field = loader::load_field("field.txt")?;
//! let mut sim = Simulation::new(field, Payoff::new(1.85)?);
//! sim.run(100);
//!
//! let pair = sim.into_generations();
//! PngRenderer::default().render(&pair.penultimate, &pair.last, Path::new("Prisoners.png"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod evolution;
pub mod grid;
pub mod loader;
pub mod payoff;
pub mod render;
pub mod simulation;
pub mod stats;
pub mod strategy;

// Re-export main types
pub use config::Config;
pub use evolution::{evolve, last_two_generations, GenerationPair, Transition};
pub use grid::{Cell, Field};
pub use simulation::Simulation;
pub use strategy::{Payoff, Strategy};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
