use std::ops::AddAssign;

/// Counters for outcomes of the constraint search.
///
/// Rejections are expected and frequent, so they are tallied here instead of
/// being logged one by one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnumerationStats {
    /// (metal, charge, parity) work units searched.
    pub units: usize,
    /// Candidates that passed every acceptance check.
    pub accepted: usize,
    /// Accepted candidates whose canonical key had already been recorded.
    pub duplicates: usize,
    /// Distinct candidates dropped by the result limit.
    pub truncated: usize,
    /// Bare-metal candidates whose charge is not a counter-charge key.
    pub rejected_charge: usize,
    /// Ligand counts that did not divide evenly.
    pub rejected_non_integer: usize,
    /// Ligand counts that were zero or negative.
    pub rejected_non_positive: usize,
    /// Ligand charges of zero, for which no count can balance the charge.
    pub rejected_neutral_ligand: usize,
    /// Ligand counts with no template of that slot count.
    pub rejected_no_template: usize,
    /// Search states expanded by the mixed-mode search.
    pub states_explored: usize,
    /// Subtrees skipped because they were already known to be infeasible.
    pub states_pruned: usize,
}

impl EnumerationStats {
    pub fn rejected(&self) -> usize {
        self.rejected_charge
            + self.rejected_non_integer
            + self.rejected_non_positive
            + self.rejected_neutral_ligand
            + self.rejected_no_template
    }
}

impl AddAssign for EnumerationStats {
    fn add_assign(&mut self, rhs: Self) {
        self.units += rhs.units;
        self.accepted += rhs.accepted;
        self.duplicates += rhs.duplicates;
        self.truncated += rhs.truncated;
        self.rejected_charge += rhs.rejected_charge;
        self.rejected_non_integer += rhs.rejected_non_integer;
        self.rejected_non_positive += rhs.rejected_non_positive;
        self.rejected_neutral_ligand += rhs.rejected_neutral_ligand;
        self.rejected_no_template += rhs.rejected_no_template;
        self.states_explored += rhs.states_explored;
        self.states_pruned += rhs.states_pruned;
    }
}
