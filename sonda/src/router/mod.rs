pub mod chain;
pub mod lookup;
pub mod probe;

pub mod util;
