// crates/core/src/data.rs
//
// Input construction for one benchmark run.

use tracing::debug;

/// The buffers one run works over. Built once per run; the two input
/// sequences stay untouched for its whole duration, `filtered` is scratch
/// for the filter benchmark.
#[derive(Debug)]
pub struct Inputs {
    /// Every element 0.5.
    pub uniform: Vec<f64>,
    /// 1.0, 2.0, ... up to the configured length.
    pub ramp: Vec<f64>,
    /// Same length as the inputs; overwritten by `copy_if`.
    pub filtered: Vec<f64>,
}

impl Inputs {
    /// Allocate all three sequences. Allocation failure is the one fatal,
    /// unhandled condition of the whole program.
    pub fn build(len: usize) -> Self {
        debug!("allocating input sequences, {} elements each", len);
        Self {
            uniform: uniform_sequence(len, 0.5),
            ramp: ramp_sequence(len),
            filtered: vec![0.0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.uniform.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uniform.is_empty()
    }
}

pub fn uniform_sequence(len: usize, value: f64) -> Vec<f64> {
    vec![value; len]
}

/// Monotonically increasing values starting at 1.0.
pub fn ramp_sequence(len: usize) -> Vec<f64> {
    (1..=len).map(|i| i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_constant() {
        let v = uniform_sequence(100, 0.5);
        assert_eq!(v.len(), 100);
        assert!(v.iter().all(|&x| x == 0.5));
    }

    #[test]
    fn ramp_counts_from_one() {
        let v = ramp_sequence(5);
        assert_eq!(v, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn inputs_share_one_length() {
        let inputs = Inputs::build(64);
        assert_eq!(inputs.len(), 64);
        assert_eq!(inputs.uniform.len(), inputs.ramp.len());
        assert_eq!(inputs.uniform.len(), inputs.filtered.len());
        assert!(!inputs.is_empty());
    }
}
