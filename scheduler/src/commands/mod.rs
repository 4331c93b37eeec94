mod evaluate;
mod sample;
mod validate;

pub use evaluate::evaluate;
pub use sample::sample;
pub use validate::validate;
