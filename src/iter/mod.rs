mod ref_iter;
mod stab;

pub(crate) use ref_iter::*;
pub use stab::*;
