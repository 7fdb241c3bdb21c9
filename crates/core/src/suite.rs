use tracing::{debug, info};

use crate::data::{self, Inputs};
use crate::measure::{measure, Measurement};
use crate::ops;
use crate::policy::ExecPolicy;

/// Elements per sequence for a real run. Large enough that the parallel
/// policies have work to split; change it here, there is no runtime knob.
pub const DEFAULT_LEN: usize = 10_000_000;

/// Needle for the find benchmark; absent from the uniform input so the
/// traversal always covers the whole sequence.
const FIND_NEEDLE: f64 = 0.6;
/// Filter threshold every uniform element survives.
const FILTER_THRESHOLD: f64 = 0.4;
/// Probe value shared by the ordered searches.
const SEARCH_TARGET: f64 = 0.5;

/// Drives one benchmark run: builds the inputs, then issues each measured
/// call in fixed order, printing every result row as it completes. The
/// runner itself is strictly sequential; concurrency lives inside the
/// policy-aware calls and is opaque here.
pub struct SuiteRunner {
    policy: ExecPolicy,
    len: usize,
}

impl SuiteRunner {
    pub fn new(policy: ExecPolicy) -> Self {
        Self {
            policy,
            len: DEFAULT_LEN,
        }
    }

    /// Override the sequence length; tests use this to keep runs small.
    pub fn with_len(mut self, len: usize) -> Self {
        self.len = len;
        self
    }

    /// Run the full suite, returning the rows in emission order.
    pub fn run(&self) -> Vec<Measurement> {
        let policy = self.policy;
        info!("building input sequences, {} elements each", self.len);
        let Inputs {
            uniform,
            ramp,
            mut filtered,
        } = Inputs::build(self.len);
        // The comparison sequence is built outside the timed region so the
        // lexicographic row measures the comparison, not an allocation.
        let equal = data::uniform_sequence(self.len, 0.5);

        info!("running suite with {} policy", policy);
        let mut rows = Vec::with_capacity(13);
        let mut record = |m: Measurement| {
            println!("{m}");
            rows.push(m);
        };

        record(measure("accumulate", || ops::accumulate(&uniform)));
        record(measure("reduce", || ops::reduce(policy, &uniform)));
        record(measure("find", || {
            as_scalar(ops::find(policy, &uniform, FIND_NEEDLE))
        }));
        record(measure("copy_if", || {
            ops::copy_if(policy, &uniform, &mut filtered, |x| x > FILTER_THRESHOLD) as f64
        }));
        record(measure("inclusive_scan", || {
            let mut scan_out = vec![0.0; uniform.len()];
            ops::inclusive_scan(policy, &uniform, &mut scan_out)
        }));
        record(measure("min_element", || ops::min_element(policy, &ramp)));
        record(measure("max_element", || ops::max_element(policy, &ramp)));
        record(measure("minmax_element", || {
            let (lo, hi) = ops::minmax_element(policy, &ramp);
            lo + hi
        }));
        record(measure("is_partitioned", || {
            as_scalar(ops::is_partitioned(policy, &uniform, |x| x < 1.0))
        }));
        record(measure("lexicographical_compare", || {
            as_scalar(ops::lexicographical_compare(policy, &uniform, &equal))
        }));
        record(measure("binary_search", || {
            as_scalar(ops::binary_search(&uniform, SEARCH_TARGET))
        }));
        record(measure("lower_bound", || ops::lower_bound(&ramp, SEARCH_TARGET)));
        record(measure("upper_bound", || ops::upper_bound(&ramp, SEARCH_TARGET)));

        debug!("suite complete, {} rows", rows.len());
        rows
    }
}

/// Booleans render as 0/1 in the result column.
fn as_scalar(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_rendering_of_booleans() {
        assert_eq!(as_scalar(true), 1.0);
        assert_eq!(as_scalar(false), 0.0);
    }
}
