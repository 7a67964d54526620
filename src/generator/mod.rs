pub mod acceptance;
pub mod planner;
pub mod structure;
pub mod synthesizer;

pub use acceptance::{AcceptedSet, accepts, check};
pub use planner::{Placement, PlacementPlanner};
pub use structure::{Generation, StructureGenerator};
pub use synthesizer::synthesize;

#[cfg(test)]
pub(crate) mod testing {
    use crate::random::UniformSource;

    /// Replays a fixed list of values, wrapping around at the end
    pub struct ScriptedSource {
        values: Vec<f64>,
        drawn: usize,
    }

    impl ScriptedSource {
        pub fn new(values: Vec<f64>) -> Self {
            assert!(!values.is_empty());
            Self { values, drawn: 0 }
        }

        pub fn drawn(&self) -> usize {
            self.drawn
        }
    }

    impl UniformSource for ScriptedSource {
        fn next_uniform(&mut self) -> f64 {
            let value = self.values[self.drawn % self.values.len()];
            self.drawn += 1;
            value
        }
    }
}
