// crates/core/src/ops.rs
//
// The benchmarked sequence algorithms. Every policy-aware operation takes
// the run's ExecPolicy and dispatches by match; reported values must not
// depend on the policy, only the work-splitting does.

use rayon::prelude::*;

use crate::policy::ExecPolicy;

/// Chunk width for the unsequenced variants: wide enough that the scalar
/// inner loops dominate and stay open to vectorization.
const UNSEQ_CHUNK: usize = 4096;

/// Left-fold sum in element order. Policy-ignoring on purpose: this is the
/// single-threaded baseline the policy-aware `reduce` row is read against.
pub fn accumulate(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, &x| acc + x)
}

/// Policy-aware sum.
pub fn reduce(policy: ExecPolicy, values: &[f64]) -> f64 {
    match policy {
        ExecPolicy::Sequential => values.iter().sum(),
        ExecPolicy::Parallel => values.par_iter().sum(),
        ExecPolicy::ParallelUnseq => values
            .par_chunks(UNSEQ_CHUNK)
            .map(|chunk| chunk.iter().sum::<f64>())
            .sum(),
    }
}

/// Whether `needle` occurs anywhere in `values`. A missing needle forces a
/// full traversal, which is what the benchmark wants to time.
pub fn find(policy: ExecPolicy, values: &[f64], needle: f64) -> bool {
    match policy {
        ExecPolicy::Sequential => values.iter().any(|&x| x == needle),
        ExecPolicy::Parallel => values
            .par_iter()
            .position_first(|&x| x == needle)
            .is_some(),
        ExecPolicy::ParallelUnseq => values.par_iter().any(|&x| x == needle),
    }
}

/// Copy the elements satisfying `pred` into the front of `out`, preserving
/// their relative order. Returns the survivor count. `out` must be at
/// least as long as `values`.
pub fn copy_if<F>(policy: ExecPolicy, values: &[f64], out: &mut [f64], pred: F) -> usize
where
    F: Fn(f64) -> bool + Sync + Send,
{
    debug_assert!(out.len() >= values.len());
    match policy {
        ExecPolicy::Sequential => {
            let mut kept = 0;
            for &x in values {
                if pred(x) {
                    out[kept] = x;
                    kept += 1;
                }
            }
            kept
        }
        ExecPolicy::Parallel => {
            let survivors: Vec<f64> = values.par_iter().copied().filter(|&x| pred(x)).collect();
            out[..survivors.len()].copy_from_slice(&survivors);
            survivors.len()
        }
        ExecPolicy::ParallelUnseq => {
            let survivors: Vec<f64> = values
                .par_chunks(UNSEQ_CHUNK)
                .flat_map_iter(|chunk| chunk.iter().copied().filter(|&x| pred(x)))
                .collect();
            out[..survivors.len()].copy_from_slice(&survivors);
            survivors.len()
        }
    }
}

/// Inclusive prefix sum of `values` into `out`; returns the final prefix,
/// or 0.0 for empty input. `out` must be at least as long as `values`.
pub fn inclusive_scan(policy: ExecPolicy, values: &[f64], out: &mut [f64]) -> f64 {
    debug_assert!(out.len() >= values.len());
    if values.is_empty() {
        return 0.0;
    }
    match policy {
        ExecPolicy::Sequential => {
            let mut acc = 0.0;
            for (slot, &x) in out.iter_mut().zip(values) {
                acc += x;
                *slot = acc;
            }
            acc
        }
        ExecPolicy::Parallel => {
            // Chunk so each worker sees a few pieces and stealing stays cheap.
            let chunk = (values.len() / (rayon::current_num_threads() * 4)).max(1);
            blocked_scan(values, out, chunk)
        }
        ExecPolicy::ParallelUnseq => blocked_scan(values, out, UNSEQ_CHUNK),
    }
}

/// Two-pass blocked scan: per-chunk totals, an exclusive prefix over those
/// totals in chunk order, then every chunk rescans itself from its offset.
/// Chunk boundaries are deterministic, so the output matches the
/// sequential scan exactly whenever the partial sums are exact.
fn blocked_scan(values: &[f64], out: &mut [f64], chunk: usize) -> f64 {
    let totals: Vec<f64> = values
        .par_chunks(chunk)
        .map(|c| c.iter().sum::<f64>())
        .collect();

    let mut offsets = Vec::with_capacity(totals.len());
    let mut running = 0.0;
    for &total in &totals {
        offsets.push(running);
        running += total;
    }

    out[..values.len()]
        .par_chunks_mut(chunk)
        .zip(values.par_chunks(chunk))
        .zip(offsets.par_iter())
        .for_each(|((dst, src), &offset)| {
            let mut acc = offset;
            for (slot, &x) in dst.iter_mut().zip(src) {
                acc += x;
                *slot = acc;
            }
        });

    out[values.len() - 1]
}

/// Smallest element; positive infinity for an empty slice.
pub fn min_element(policy: ExecPolicy, values: &[f64]) -> f64 {
    fold_extreme(policy, values, f64::INFINITY, f64::min)
}

/// Largest element; negative infinity for an empty slice.
pub fn max_element(policy: ExecPolicy, values: &[f64]) -> f64 {
    fold_extreme(policy, values, f64::NEG_INFINITY, f64::max)
}

fn fold_extreme(
    policy: ExecPolicy,
    values: &[f64],
    identity: f64,
    pick: fn(f64, f64) -> f64,
) -> f64 {
    match policy {
        ExecPolicy::Sequential => values.iter().copied().fold(identity, pick),
        ExecPolicy::Parallel => values.par_iter().copied().reduce(|| identity, pick),
        ExecPolicy::ParallelUnseq => values
            .par_chunks(UNSEQ_CHUNK)
            .map(|c| c.iter().copied().fold(identity, pick))
            .reduce(|| identity, pick),
    }
}

/// Both extremes in one pass, as `(min, max)`.
pub fn minmax_element(policy: ExecPolicy, values: &[f64]) -> (f64, f64) {
    let identity = (f64::INFINITY, f64::NEG_INFINITY);
    let widen = |(lo, hi): (f64, f64), x: f64| (lo.min(x), hi.max(x));
    let merge = |a: (f64, f64), b: (f64, f64)| (a.0.min(b.0), a.1.max(b.1));
    match policy {
        ExecPolicy::Sequential => values.iter().fold(identity, |acc, &x| widen(acc, x)),
        ExecPolicy::Parallel => values
            .par_iter()
            .fold(|| identity, |acc, &x| widen(acc, x))
            .reduce(|| identity, merge),
        ExecPolicy::ParallelUnseq => values
            .par_chunks(UNSEQ_CHUNK)
            .map(|c| c.iter().fold(identity, |acc, &x| widen(acc, x)))
            .reduce(|| identity, merge),
    }
}

/// True when every element satisfying `pred` precedes every element that
/// does not. A violation is exactly a (non-satisfying, satisfying)
/// adjacency, which is what the parallel arm scans windows for.
pub fn is_partitioned<F>(policy: ExecPolicy, values: &[f64], pred: F) -> bool
where
    F: Fn(f64) -> bool + Sync + Send,
{
    match policy {
        ExecPolicy::Sequential => values
            .iter()
            .skip_while(|&&x| pred(x))
            .all(|&x| !pred(x)),
        ExecPolicy::Parallel | ExecPolicy::ParallelUnseq => values
            .par_windows(2)
            .all(|w| !(!pred(w[0]) && pred(w[1]))),
    }
}

/// Strict lexicographic less-than over two float slices. The parallel arm
/// locates the first differing position, so element order is preserved
/// exactly as the sequential walk observes it.
pub fn lexicographical_compare(policy: ExecPolicy, a: &[f64], b: &[f64]) -> bool {
    match policy {
        ExecPolicy::Sequential => {
            for (x, y) in a.iter().zip(b) {
                if x < y {
                    return true;
                }
                if y < x {
                    return false;
                }
            }
            a.len() < b.len()
        }
        ExecPolicy::Parallel | ExecPolicy::ParallelUnseq => {
            let common = a.len().min(b.len());
            let diverged = a[..common]
                .par_iter()
                .zip(b[..common].par_iter())
                .position_first(|(x, y)| x != y);
            match diverged {
                Some(i) => a[i] < b[i],
                None => a.len() < b.len(),
            }
        }
    }
}

/// Membership of `target` in a sorted slice. No parallel form exists, so
/// no policy is taken.
pub fn binary_search(values: &[f64], target: f64) -> bool {
    let i = lower_bound_index(values, target);
    i < values.len() && values[i] == target
}

/// Index of the first element not less than `target` in a sorted slice.
pub fn lower_bound_index(values: &[f64], target: f64) -> usize {
    values.partition_point(|&x| x < target)
}

/// Index of the first element strictly greater than `target`.
pub fn upper_bound_index(values: &[f64], target: f64) -> usize {
    values.partition_point(|&x| x <= target)
}

/// Value at the lower bound; NaN when the boundary is past the end.
pub fn lower_bound(values: &[f64], target: f64) -> f64 {
    values
        .get(lower_bound_index(values, target))
        .copied()
        .unwrap_or(f64::NAN)
}

/// Value at the upper bound; NaN when the boundary is past the end.
pub fn upper_bound(values: &[f64], target: f64) -> f64 {
    values
        .get(upper_bound_index(values, target))
        .copied()
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ramp_sequence, uniform_sequence};

    const POLICIES: [ExecPolicy; 3] = [
        ExecPolicy::Sequential,
        ExecPolicy::Parallel,
        ExecPolicy::ParallelUnseq,
    ];

    #[test]
    fn sums_of_halves_are_exact() {
        let uniform = uniform_sequence(10_000, 0.5);
        assert_eq!(accumulate(&uniform), 5_000.0);
        for policy in POLICIES {
            assert_eq!(reduce(policy, &uniform), 5_000.0, "policy {policy}");
        }
    }

    #[test]
    fn find_misses_an_absent_needle() {
        let uniform = uniform_sequence(10_000, 0.5);
        for policy in POLICIES {
            assert!(!find(policy, &uniform, 0.6), "policy {policy}");
        }
    }

    #[test]
    fn find_locates_a_present_needle() {
        let mut values = uniform_sequence(10_000, 0.5);
        values[7_321] = 0.6;
        for policy in POLICIES {
            assert!(find(policy, &values, 0.6), "policy {policy}");
        }
    }

    #[test]
    fn copy_if_keeps_every_half() {
        let uniform = uniform_sequence(10_000, 0.5);
        for policy in POLICIES {
            let mut out = vec![0.0; uniform.len()];
            let kept = copy_if(policy, &uniform, &mut out, |x| x > 0.4);
            assert_eq!(kept, uniform.len(), "policy {policy}");
            assert!(out.iter().all(|&x| x == 0.5));
        }
    }

    #[test]
    fn copy_if_preserves_relative_order() {
        let values: Vec<f64> = (0..10_000).map(|i| i as f64).collect();
        let expected: Vec<f64> = values.iter().copied().filter(|&x| x % 3.0 == 0.0).collect();
        for policy in POLICIES {
            let mut out = vec![0.0; values.len()];
            let kept = copy_if(policy, &values, &mut out, |x| x % 3.0 == 0.0);
            assert_eq!(kept, expected.len(), "policy {policy}");
            assert_eq!(&out[..kept], &expected[..], "policy {policy}");
        }
    }

    #[test]
    fn inclusive_scan_matches_the_running_total() {
        let ramp = ramp_sequence(10_000);
        let mut expected = vec![0.0; ramp.len()];
        let mut acc = 0.0;
        for (slot, &x) in expected.iter_mut().zip(&ramp) {
            acc += x;
            *slot = acc;
        }
        for policy in POLICIES {
            let mut out = vec![0.0; ramp.len()];
            let last = inclusive_scan(policy, &ramp, &mut out);
            assert_eq!(out, expected, "policy {policy}");
            assert_eq!(last, *expected.last().unwrap(), "policy {policy}");
        }
    }

    #[test]
    fn inclusive_scan_of_nothing_is_zero() {
        for policy in POLICIES {
            let mut out: Vec<f64> = Vec::new();
            assert_eq!(inclusive_scan(policy, &[], &mut out), 0.0);
        }
    }

    #[test]
    fn extremes_of_the_ramp() {
        let ramp = ramp_sequence(10_000);
        for policy in POLICIES {
            assert_eq!(min_element(policy, &ramp), 1.0, "policy {policy}");
            assert_eq!(max_element(policy, &ramp), 10_000.0, "policy {policy}");
            assert_eq!(
                minmax_element(policy, &ramp),
                (1.0, 10_000.0),
                "policy {policy}"
            );
        }
    }

    #[test]
    fn partition_check_accepts_and_rejects() {
        // All elements satisfy `< 1.0`, so the uniform input is partitioned.
        let uniform = uniform_sequence(10_000, 0.5);
        // 2.0 ahead of a 0.5 breaks the partition for `< 1.0`.
        let mut broken = uniform_sequence(10_000, 0.5);
        broken[123] = 2.0;
        for policy in POLICIES {
            assert!(is_partitioned(policy, &uniform, |x| x < 1.0), "policy {policy}");
            assert!(!is_partitioned(policy, &broken, |x| x < 1.0), "policy {policy}");
            // Satisfying prefix then non-satisfying tail is still partitioned.
            let split: Vec<f64> = (0..100).map(|i| if i < 40 { 0.5 } else { 3.0 }).collect();
            assert!(is_partitioned(policy, &split, |x| x < 1.0), "policy {policy}");
        }
    }

    #[test]
    fn lexicographic_orderings() {
        let a = uniform_sequence(1_000, 0.5);
        let equal = uniform_sequence(1_000, 0.5);
        let mut bigger = uniform_sequence(1_000, 0.5);
        bigger[500] = 0.75;
        let prefix = &a[..400];
        for policy in POLICIES {
            assert!(!lexicographical_compare(policy, &a, &equal), "policy {policy}");
            assert!(lexicographical_compare(policy, &a, &bigger), "policy {policy}");
            assert!(!lexicographical_compare(policy, &bigger, &a), "policy {policy}");
            // A proper prefix compares less than the full sequence.
            assert!(lexicographical_compare(policy, prefix, &a), "policy {policy}");
            assert!(!lexicographical_compare(policy, &a, prefix), "policy {policy}");
        }
    }

    #[test]
    fn binary_search_membership() {
        let uniform = uniform_sequence(1_000, 0.5);
        let ramp = ramp_sequence(1_000);
        assert!(binary_search(&uniform, 0.5));
        assert!(!binary_search(&uniform, 0.6));
        assert!(binary_search(&ramp, 42.0));
        assert!(!binary_search(&ramp, 42.5));
    }

    #[test]
    fn bounds_follow_ordered_search_semantics() {
        let ramp = ramp_sequence(1_000);
        // 0.5 precedes everything, so both bounds land on the first element.
        assert_eq!(lower_bound(&ramp, 0.5), 1.0);
        assert_eq!(upper_bound(&ramp, 0.5), 1.0);
        // A present value: lower bound is the value, upper bound follows it.
        assert_eq!(lower_bound(&ramp, 42.0), 42.0);
        assert_eq!(upper_bound(&ramp, 42.0), 43.0);
        // Past the end, the boundary has no element to report.
        assert!(lower_bound(&ramp, 5_000.0).is_nan());
        assert!(upper_bound(&ramp, 1_000.0).is_nan());
        assert_eq!(lower_bound_index(&ramp, 5_000.0), ramp.len());
    }

    #[test]
    fn bounds_with_duplicates() {
        let values = [1.0, 2.0, 2.0, 2.0, 5.0];
        assert_eq!(lower_bound_index(&values, 2.0), 1);
        assert_eq!(upper_bound_index(&values, 2.0), 4);
        assert_eq!(lower_bound(&values, 2.0), 2.0);
        assert_eq!(upper_bound(&values, 2.0), 5.0);
    }
}
