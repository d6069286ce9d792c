//! Select a minimal subset of prime implicants covering all minterms (Petrick's method).

use crate::primes::{CoverageTable, PrimeKey};
use crate::{BoolminError, Implicants, Pattern};

use bit_set::BitSet;
use itertools::Itertools;
use log::{debug, trace};

/// The result of the cover selection.
///
/// The function lists the essential prime implicants followed by the prime implicants
/// chosen to cover the remaining minterms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    essentials: Implicants,
    chosen: Implicants,
    function: Implicants,
}

impl Solution {
    /// Prime implicants which are the only ones covering at least one minterm
    pub fn essentials(&self) -> &Implicants {
        &self.essentials
    }

    /// Prime implicants selected by Petrick's method
    pub fn chosen(&self) -> &Implicants {
        &self.chosen
    }

    /// The minimized function
    pub fn function(&self) -> &Implicants {
        &self.function
    }

    pub fn into_function(self) -> Implicants {
        self.function
    }
}

/// Solve the cover problem defined by a coverage table.
///
/// A selection of prime implicants is a set of keys in the table. Each remaining minterm
/// requires one of its covering primes: the product of these requirements is expanded
/// into a sum of selections, simplified by absorption at each step.
pub struct CoverSolver<'a> {
    table: &'a CoverageTable,
    essentials: BitSet,
}

impl<'a> CoverSolver<'a> {
    /// Prepare the solver and identify the essential prime implicants
    pub fn new(table: &'a CoverageTable) -> Self {
        let essentials = table
            .rows()
            .filter(|(_, keys)| keys.len() == 1)
            .map(|(_, keys)| keys[0])
            .collect();
        Self { table, essentials }
    }

    /// Keys of the essential prime implicants
    pub fn essentials(&self) -> impl Iterator<Item = PrimeKey> + '_ {
        self.essentials.iter()
    }

    /// Minterms which are not covered by any essential prime implicant, with their covering primes
    pub fn remaining(&self) -> Vec<(u64, &'a [PrimeKey])> {
        self.table
            .rows()
            .filter(|(_, keys)| !keys.iter().any(|k| self.essentials.contains(*k)))
            .collect()
    }

    /// Select the prime implicants covering all minterms with the fewest literals.
    ///
    /// Ties are broken on the number of prime implicants, then on the lexicographic order
    /// of their rendering.
    pub fn solve(&self) -> Result<Solution, BoolminError> {
        if self.table.is_empty() {
            return Err(BoolminError::NoSatisfyingAssignment);
        }

        let essentials = self.implicants(&self.essentials);
        debug!("{} essential prime implicants: {}", essentials.len(), essentials);

        let remaining = self.remaining();
        let chosen = match remaining.is_empty() {
            true => Implicants::default(),
            false => {
                debug!("{} minterms left for Petrick's method", remaining.len());
                let selections = petrick(remaining.iter().map(|(_, keys)| *keys));
                trace!("{} candidate selections", selections.len());
                let best = selections
                    .into_iter()
                    .min_by_key(|selection| self.selection_cost(selection))
                    .ok_or(BoolminError::NoSatisfyingAssignment)?;
                self.implicants(&best)
            }
        };
        debug!("chosen prime implicants: {}", chosen);

        let function: Implicants = essentials.iter().chain(chosen.iter()).cloned().collect();
        if function.is_empty() {
            return Err(BoolminError::NoSatisfyingAssignment);
        }
        Ok(Solution {
            essentials,
            chosen,
            function,
        })
    }

    fn patterns<'s>(&'s self, selection: &'s BitSet) -> impl Iterator<Item = &'a Pattern> + 's {
        selection.iter().filter_map(|key| self.table.prime(key))
    }

    fn implicants(&self, selection: &BitSet) -> Implicants {
        self.patterns(selection).cloned().collect()
    }

    fn selection_cost(&self, selection: &BitSet) -> (usize, usize, String) {
        let width = self.table.width();
        let literals = self.patterns(selection).map(Pattern::literal_count).sum();
        let rendered = self
            .patterns(selection)
            .map(|p| p.with_width(width).to_string())
            .sorted()
            .join(",");
        (literals, selection.len(), rendered)
    }
}

/// Solve the cover problem of a coverage table
pub fn solve(table: &CoverageTable) -> Result<Solution, BoolminError> {
    CoverSolver::new(table).solve()
}

/// Expand a product of sums of prime implicants into the minimal sum of selections.
///
/// Each item lists the prime implicants covering one minterm.
fn petrick<'a, I: IntoIterator<Item = &'a [PrimeKey]>>(requirements: I) -> Vec<BitSet> {
    requirements
        .into_iter()
        .fold(vec![BitSet::new()], |selections, keys| distribute(&selections, keys))
}

/// Compute the product (A + B) * (X + Y) = AX + AY + BX + BY and simplify it.
///
/// Selections are sets of keys (XX = X). The sum is simplified by absorption (X + XY = X),
/// which also removes duplicates.
fn distribute(selections: &[BitSet], keys: &[PrimeKey]) -> Vec<BitSet> {
    let products = selections
        .iter()
        .cartesian_product(keys)
        .map(|(selection, key)| {
            let mut product = selection.clone();
            product.insert(*key);
            product
        })
        .sorted_by_key(BitSet::len);

    let mut result: Vec<BitSet> = Vec::new();
    for product in products {
        // Products are sorted by size: absorbing products are already in the result
        if !result.iter().any(|kept| kept.is_subset(&product)) {
            result.push(product);
        }
    }
    result
}
