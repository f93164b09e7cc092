pub mod prelude;

pub mod submissions;
