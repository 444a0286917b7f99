//! Model space for nuclear many-body calculations: single-particle orbits,
//! two- and three-body kets, symmetry channels, and cached recoupling
//! coefficients.
extern crate conv;
extern crate fnv;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate num;
#[macro_use]
extern crate quick_error;
extern crate regex;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate wigner_symbols;

#[macro_use]
mod macros;

pub mod cache;
pub mod channel;
pub mod half;
pub mod isqrt;
pub mod ket;
pub mod mat;
pub mod model_space;
pub mod orbit;
pub mod parity;
pub mod recoupling;
pub mod utils;

pub use model_space::{Conf, Error, ModelSpace, ModelSpaceBuilder};
