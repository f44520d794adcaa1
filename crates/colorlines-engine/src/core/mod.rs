pub use self::{board::*, cell_set::*, lines::*, moves::*, snapshot::*};

pub(crate) mod board;
pub(crate) mod cell_set;
pub(crate) mod lines;
pub(crate) mod moves;
pub(crate) mod snapshot;
