use std::fmt;
use std::time::Instant;

/// One benchmarked call: what ran, what it cost, what it returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub label: &'static str,
    pub elapsed_ms: f64,
    pub result: f64,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ms, res {}", self.label, self.elapsed_ms, self.result)
    }
}

/// Time one synchronous call and capture its scalar result. The wrapped
/// call always runs to completion before this returns; every benchmarked
/// algorithm goes through this one wrapper.
pub fn measure<F>(label: &'static str, op: F) -> Measurement
where
    F: FnOnce() -> f64,
{
    let start = Instant::now();
    let result = op();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    Measurement {
        label,
        elapsed_ms,
        result,
    }
}
