// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt;

/// Execution policy applied uniformly to every policy-aware benchmark in a
/// run. Fixed once chosen; the searches over sorted input ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecPolicy {
    /// One thread, elements visited in order wherever order is observable.
    Sequential,
    /// Work split across rayon's pool; order-sensitive operations keep
    /// every element at its original position.
    Parallel,
    /// Threads plus chunk-granular inner loops that the compiler is free
    /// to vectorize. Requires pure predicates, which all suppliers are.
    ParallelUnseq,
}

impl ExecPolicy {
    /// Map a menu character to a policy. Anything outside '1'..'3' is the
    /// clean-exit path, not an error.
    pub fn from_menu_choice(choice: char) -> Option<Self> {
        match choice {
            '1' => Some(ExecPolicy::Sequential),
            '2' => Some(ExecPolicy::Parallel),
            '3' => Some(ExecPolicy::ParallelUnseq),
            _ => None,
        }
    }

    /// The `<policy-name>` string of the console contract.
    pub fn name(&self) -> &'static str {
        match self {
            ExecPolicy::Sequential => "sequential",
            ExecPolicy::Parallel => "parallel",
            ExecPolicy::ParallelUnseq => "parallel-unsequenced",
        }
    }
}

impl fmt::Display for ExecPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
