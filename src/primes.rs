//! Extract prime implicants with the Quine-McCluskey method.

use crate::truth_table::MAX_VARIABLES;
use crate::{BoolminError, Pattern, TruthTable};

use itertools::Itertools;
use log::{debug, trace};
use slab::Slab;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Key of a prime implicant in a [CoverageTable]
pub type PrimeKey = usize;

/// The list of all prime implicants of a Boolean function.
///
/// An implicant of a function is a pattern such that the function is true for all covered states.
/// It is "prime" if it is not contained in any other implicant.
///
/// The list is computed from the minterms of the function (the rows of its truth table where it is true).
/// Minterms are grouped by number of active variables and the patterns of adjacent groups
/// which differ on a single variable are merged until a fixed point is reached.
/// The patterns which could not be merged during a round are the prime implicants.
///
/// ```
/// use boolmin::Primes;
/// # use boolmin::BoolminError;
/// # fn main() -> Result<(), BoolminError> {
///
/// // The minterms of (A . B) + C over 3 variables
/// let primes = Primes::from_minterms([1, 3, 5, 6, 7], 3)?;
/// assert_eq!(primes.len(), 2);
/// assert_eq!(format!("{}", primes), "11-\n--1\n");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Primes {
    width: usize,
    minterms: Vec<u64>,
    patterns: Vec<Pattern>,
}

/// Groups of patterns indexed by the number of variables fixed at ```true```.
///
/// Patterns are stored once in the arena and the groups refer to them by key.
#[derive(Default)]
struct Groups {
    arena: Slab<Pattern>,
    groups: BTreeMap<usize, Vec<usize>>,
}

impl Groups {
    /// Add a pattern in its group, unless it is already there
    fn push_new_pattern(&mut self, p: Pattern) {
        let group = self.groups.entry(p.count_ones()).or_default();
        if !group.iter().any(|key| self.arena[*key] == p) {
            group.push(self.arena.insert(p));
        }
    }

    fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Merge the adjacent patterns of consecutive groups.
    ///
    /// Returns the groups of merged patterns and the keys of the patterns which
    /// took part in at least one merge.
    fn merge_round(&self) -> (Groups, HashSet<usize>) {
        let mut merged = Groups::default();
        let mut marked = HashSet::new();

        for ((k1, g1), (k2, g2)) in self.groups.iter().tuple_windows() {
            if *k2 != k1 + 1 {
                continue;
            }
            for (key1, key2) in g1.iter().cartesian_product(g2.iter()) {
                if let Some(p) = self.arena[*key1].merge_adjacent(&self.arena[*key2]) {
                    merged.push_new_pattern(p);
                    marked.insert(*key1);
                    marked.insert(*key2);
                }
            }
        }
        (merged, marked)
    }

    fn describe(&self, width: usize) -> String {
        self.groups
            .iter()
            .map(|(k, g)| {
                let patterns = g.iter().map(|key| self.arena[*key].with_width(width)).join(" ");
                format!("{}: [{}]", k, patterns)
            })
            .join(", ")
    }
}

impl Primes {
    /// Compute the prime implicants of the function defined by a truth table
    pub fn from_table(table: &TruthTable) -> Result<Self, BoolminError> {
        Self::from_minterms(table.minterms(), table.variable_count())
    }

    /// Compute the prime implicants of the function which is true exactly on the given minterms.
    ///
    /// Fails if the list of minterms is empty or if a minterm does not fit in ```width``` variables.
    pub fn from_minterms<T: IntoIterator<Item = u64>>(
        minterms: T,
        width: usize,
    ) -> Result<Self, BoolminError> {
        if width > MAX_VARIABLES {
            return Err(BoolminError::TooManyVariables {
                count: width,
                max: MAX_VARIABLES,
            });
        }

        let mut minterms: Vec<u64> = minterms.into_iter().collect();
        minterms.sort_unstable();
        minterms.dedup();
        if let Some(m) = minterms.iter().find(|m| **m >> width != 0) {
            return Err(BoolminError::InvalidPattern(format!(
                "minterm {} does not fit in {} variables",
                m, width
            )));
        }
        if minterms.is_empty() {
            return Err(BoolminError::NoSatisfyingAssignment);
        }
        debug!("minterms: {:?}", minterms);

        let mut groups = Groups::default();
        for m in &minterms {
            groups.push_new_pattern(Pattern::from_minterm(*m, width));
        }

        let mut patterns: Vec<Pattern> = Vec::new();
        let mut round = 0;
        while !groups.is_empty() {
            trace!("round {}: {}", round, groups.describe(width));
            let (merged, marked) = groups.merge_round();

            let unmarked: Vec<&Pattern> = groups
                .groups
                .values()
                .flatten()
                .filter(|key| !marked.contains(*key))
                .map(|key| &groups.arena[*key])
                .collect();
            if !unmarked.is_empty() {
                trace!(
                    "round {}: unmerged {}",
                    round,
                    unmarked.iter().map(|p| p.with_width(width)).join(", ")
                );
            }
            for p in unmarked {
                if !patterns.contains(p) {
                    patterns.push(p.clone());
                }
            }

            groups = merged;
            round += 1;
        }

        debug!("{} prime implicants after {} rounds", patterns.len(), round);
        Ok(Self {
            width,
            minterms,
            patterns,
        })
    }

    /// Get the number of patterns in this list of prime implicants
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Return whether there are no prime implicant (the function is always false)
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of variables of the patterns
    pub fn width(&self) -> usize {
        self.width
    }

    /// The sorted list of minterms covered by these prime implicants
    pub fn minterms(&self) -> &[u64] {
        &self.minterms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    /// Check if a pattern is one of the prime implicants
    pub fn contains(&self, p: &Pattern) -> bool {
        self.patterns.contains(p)
    }

    /// Associate each minterm to the list of prime implicants covering it
    pub fn coverage(&self) -> CoverageTable {
        // Patterns built from valid minterms always fit
        let mut table = CoverageTable::new(self.width);
        for p in &self.patterns {
            table.insert_prime(p.clone());
        }
        table
    }
}

impl<'a> IntoIterator for &'a Primes {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}

impl fmt::Display for Primes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.patterns {
            writeln!(f, "{}", p.with_width(self.width))?;
        }
        Ok(())
    }
}

/// Map each minterm to the prime implicants which cover it.
///
/// Prime implicants are stored in an arena and identified by a [PrimeKey].
#[derive(Clone, Debug, Default)]
pub struct CoverageTable {
    width: usize,
    primes: Slab<Pattern>,
    rows: BTreeMap<u64, Vec<PrimeKey>>,
}

impl CoverageTable {
    /// Create an empty table over ```width``` variables
    pub fn new(width: usize) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Build the table by expanding the minterms of each pattern.
    ///
    /// Fails if a pattern fixes a variable outside of the ```width``` first variables.
    pub fn from_patterns<T: IntoIterator<Item = Pattern>>(
        width: usize,
        patterns: T,
    ) -> Result<Self, BoolminError> {
        let mut table = Self::new(width);
        for p in patterns {
            table.add_prime(p)?;
        }
        Ok(table)
    }

    /// Add a prime implicant and register it for all the minterms it covers.
    ///
    /// Fails if the pattern does not fit in the width of the table.
    pub fn add_prime(&mut self, p: Pattern) -> Result<PrimeKey, BoolminError> {
        if self.width > MAX_VARIABLES {
            return Err(BoolminError::TooManyVariables {
                count: self.width,
                max: MAX_VARIABLES,
            });
        }
        if !p.fits_width(self.width) {
            return Err(BoolminError::InvalidPattern(format!(
                "{} does not fit in {} variables",
                p, self.width
            )));
        }
        Ok(self.insert_prime(p))
    }

    /// Register a pattern already known to fit in the table
    fn insert_prime(&mut self, p: Pattern) -> PrimeKey {
        let minterms = p.minterms(self.width);
        let key = self.primes.insert(p);
        for m in minterms {
            self.rows.entry(m).or_default().push(key);
        }
        key
    }

    /// Number of variables of the patterns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Retrieve a prime implicant from its key
    pub fn prime(&self, key: PrimeKey) -> Option<&Pattern> {
        self.primes.get(key)
    }

    /// Iterate over all prime implicants
    pub fn primes(&self) -> impl Iterator<Item = (PrimeKey, &Pattern)> {
        self.primes.iter()
    }

    /// The keys of the prime implicants covering a minterm
    pub fn covering(&self, minterm: u64) -> &[PrimeKey] {
        self.rows.get(&minterm).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over the minterms and their covering prime implicants, by increasing minterm
    pub fn rows(&self) -> impl Iterator<Item = (u64, &[PrimeKey])> {
        self.rows.iter().map(|(m, keys)| (*m, keys.as_slice()))
    }

    /// Number of covered minterms
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    fn rendered(primes: &Primes) -> Vec<String> {
        let mut result: Vec<String> = primes
            .iter()
            .map(|p| format!("{}", p.with_width(primes.width())))
            .collect();
        result.sort();
        result
    }

    #[test]
    fn simple_primes() -> Result<(), BoolminError> {
        let parsed = parse_expression("(A.B)+C")?;
        let table = TruthTable::generate(parsed.expr(), parsed.variables())?;
        let primes = Primes::from_table(&table)?;

        assert_eq!(rendered(&primes), ["--1", "11-"]);
        assert_eq!(primes.minterms(), [1, 3, 5, 6, 7]);
        Ok(())
    }

    #[test]
    fn count_primes() -> Result<(), BoolminError> {
        // classic example: f = sum(0, 1, 2, 5, 6, 7)
        let primes = Primes::from_minterms([0, 1, 2, 5, 6, 7], 3)?;
        assert_eq!(
            rendered(&primes),
            ["-01", "-10", "0-0", "00-", "1-1", "11-"]
        );

        // f = sum(4, 8, 10, 11, 12, 15) over 4 variables
        let primes = Primes::from_minterms([4, 8, 10, 11, 12, 15], 4)?;
        assert_eq!(rendered(&primes), ["-100", "1-00", "1-11", "10-0", "101-"]);

        // tautology over two variables
        let primes = Primes::from_minterms(0..4, 2)?;
        assert_eq!(rendered(&primes), ["--"]);
        Ok(())
    }

    #[test]
    fn single_minterm() -> Result<(), BoolminError> {
        let primes = Primes::from_minterms([5], 3)?;
        assert_eq!(rendered(&primes), ["101"]);

        let primes = Primes::from_minterms([0], 0)?;
        assert_eq!(primes.len(), 1);
        assert!(primes.iter().all(Pattern::is_free_pattern));
        Ok(())
    }

    #[test]
    fn invalid_minterms() {
        assert_eq!(
            Primes::from_minterms(Vec::new(), 3).unwrap_err(),
            BoolminError::NoSatisfyingAssignment
        );
        assert!(matches!(
            Primes::from_minterms([8], 3),
            Err(BoolminError::InvalidPattern(_))
        ));
        assert!(matches!(
            Primes::from_minterms([0], 64),
            Err(BoolminError::TooManyVariables { .. })
        ));
    }

    #[test]
    fn coverage() -> Result<(), BoolminError> {
        let primes = Primes::from_minterms([1, 3, 5, 6, 7], 3)?;
        let table = primes.coverage();
        assert_eq!(table.len(), 5);
        assert_eq!(table.rows().map(|(m, _)| m).collect::<Vec<_>>(), primes.minterms());

        let c: Pattern = "--1".parse()?;
        let ab: Pattern = "11-".parse()?;
        let names = |m: u64| -> Vec<Pattern> {
            let mut found: Vec<Pattern> = table
                .covering(m)
                .iter()
                .filter_map(|k| table.prime(*k))
                .cloned()
                .collect();
            found.sort_by_key(|p| format!("{}", p.with_width(3)));
            found
        };
        assert_eq!(names(1), vec![c.clone()]);
        assert_eq!(names(6), vec![ab.clone()]);
        assert_eq!(names(7), vec![c, ab]);
        assert!(table.covering(0).is_empty());
        Ok(())
    }

    #[test]
    fn build_coverage_table() -> Result<(), BoolminError> {
        let patterns: [Pattern; 2] = ["0-1".parse()?, "11-".parse()?];
        let table = CoverageTable::from_patterns(3, patterns.clone())?;
        assert_eq!(table.rows().map(|(m, _)| m).collect::<Vec<_>>(), [1, 3, 6, 7]);

        // a pattern fixing the third variable does not fit in two variables
        assert!(matches!(
            CoverageTable::from_patterns(2, patterns),
            Err(BoolminError::InvalidPattern(_))
        ));

        let mut table = CoverageTable::new(2);
        assert!(table.add_prime("--1".parse()?).is_err());
        assert!(table.is_empty());
        let key = table.add_prime("-1".parse()?)?;
        assert_eq!(table.covering(3), [key]);

        let mut table = CoverageTable::new(64);
        assert!(matches!(
            table.add_prime(Pattern::default()),
            Err(BoolminError::TooManyVariables { count: 64, .. })
        ));
        Ok(())
    }
}
