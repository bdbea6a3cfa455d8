use crate::*;
pub use shuffle::*;

mod shuffle;

/// Source of fresh mine layouts.
///
/// Takes `&mut self` so one generator instance can serve a whole session:
/// every call draws an independent layout, which is what a board reset
/// needs. Implementations assume the config passed in has been validated
/// with [`BoardConfig::validate`].
pub trait MineGenerator {
    fn generate(&mut self, config: BoardConfig) -> MineLayout;
}
