//! Clonal-selection population engine.

use super::config::AisConfig;
use super::operators::{invert_segment, mutation_probability};
use super::types::Cell;
use crate::error::Result;
use crate::problem::PricingProblem;
use rand::Rng;
use tracing::{debug, trace};

/// Population of [`Cell`]s evolved by clonal selection.
///
/// Each call to [`update`](Self::update) runs one generation:
///
/// 1. **Clonal expansion**: every cell is copied
///    `population_size * clone_factor` times.
/// 2. **Hypermutation**: each clone is inverted between two random cut
///    points with probability `exp(-revenue / best_fitness_constant)`.
/// 3. **Meta-dynamics**: originals and clones are stably sorted by
///    revenue (descending), cut back to `population_size`, and the
///    bottom `replacement` cells plus the boundary cell above them are
///    replaced by random ones. The top cell is never replaced.
/// 4. The best cell and normalised revenue are recomputed.
///
/// # Usage
///
/// ```
/// use u_pricing::ais::{AisConfig, ImmuneSystem};
/// use u_pricing::problem::PricingProblem;
/// use u_pricing::random::create_rng;
///
/// let mut rng = create_rng(42);
/// let problem = PricingProblem::generate(10, &mut rng).unwrap();
/// let config = AisConfig::default()
///     .with_population_size(8)
///     .with_replacement(2)
///     .with_clone_factor(2);
/// let mut ais = ImmuneSystem::new(&problem, config, &mut rng).unwrap();
/// ais.update(&mut rng).unwrap();
/// assert_eq!(ais.cells().len(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct ImmuneSystem<'p> {
    problem: &'p PricingProblem,
    config: AisConfig,
    cells: Vec<Cell>,
    best: Cell,
    normalised_revenue: f64,
    generation: usize,
}

impl<'p> ImmuneSystem<'p> {
    /// Builds a population of random valid cells.
    ///
    /// # Errors
    /// [`crate::PricingError::InvalidConfiguration`] if `config` fails
    /// validation.
    pub fn new<R: Rng>(
        problem: &'p PricingProblem,
        config: AisConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;

        let cells = (0..config.population_size)
            .map(|_| random_cell(problem, rng))
            .collect::<Result<Vec<_>>>()?;

        let (best, normalised_revenue) = summarize(&cells);
        debug!(
            population = cells.len(),
            best_revenue = best.revenue(),
            "immune system initialised"
        );

        Ok(Self {
            problem,
            config,
            cells,
            best,
            normalised_revenue,
            generation: 0,
        })
    }

    /// Runs one generation.
    pub fn update<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        let clones = self.clonal_expansion(rng)?;
        let next = self.meta_dynamics(clones, rng)?;

        let (best, normalised_revenue) = summarize(&next);
        self.cells = next;
        self.best = best;
        self.normalised_revenue = normalised_revenue;
        self.generation += 1;

        trace!(
            generation = self.generation,
            best_revenue = self.best.revenue(),
            normalised = self.normalised_revenue,
            "ais generation"
        );
        Ok(())
    }

    /// Current population: ranked survivors first, refreshed cells last.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Highest-revenue cell of the current population.
    pub fn best_cell(&self) -> &Cell {
        &self.best
    }

    /// Best revenue divided by the population's total revenue.
    ///
    /// Diagnostic only; `0.0` when every cell scores zero.
    pub fn normalised_revenue(&self) -> f64 {
        self.normalised_revenue
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn config(&self) -> &AisConfig {
        &self.config
    }

    /// Clones every cell and hypermutates the clones, grouped by origin.
    fn clonal_expansion<R: Rng>(&self, rng: &mut R) -> Result<Vec<Cell>> {
        let per_cell = self.config.clones_per_cell();
        let mut clones = Vec::with_capacity(self.cells.len() * per_cell);

        for cell in &self.cells {
            let rate = mutation_probability(cell.revenue(), self.config.best_fitness_constant);
            for _ in 0..per_cell {
                if rng.random::<f64>() <= rate {
                    clones.push(self.hypermutate(cell, rng)?);
                } else {
                    clones.push(cell.clone());
                }
            }
        }
        Ok(clones)
    }

    /// Contiguous inversion of a copy of `cell`'s prices.
    ///
    /// An inverted vector is a permutation of in-bounds prices, so only
    /// the revenue is recomputed.
    fn hypermutate<R: Rng>(&self, cell: &Cell, rng: &mut R) -> Result<Cell> {
        let mut prices = cell.prices().to_vec();
        match invert_segment(&mut prices, rng) {
            Some(_) => Cell::evaluate(prices, self.problem),
            None => Ok(cell.clone()),
        }
    }

    /// Elitist cut of originals plus clones, then random refresh of the tail.
    fn meta_dynamics<R: Rng>(&self, clones: Vec<Cell>, rng: &mut R) -> Result<Vec<Cell>> {
        let n = self.cells.len();

        let mut merged = Vec::with_capacity(n + clones.len());
        merged.extend(self.cells.iter().cloned());
        merged.extend(clones);
        // `sort_by` is stable: equal revenues keep insertion order.
        merged.sort_by(|a, b| b.revenue().total_cmp(&a.revenue()));
        merged.truncate(n);

        for slot in merged.iter_mut().skip(self.replacement_start()) {
            *slot = random_cell(self.problem, rng)?;
        }
        Ok(merged)
    }

    /// First index refreshed by meta-dynamics.
    ///
    /// Covers the bottom `replacement` cells and the boundary cell above
    /// them, but never index 0, so the best cell always survives.
    fn replacement_start(&self) -> usize {
        (self.cells.len() - self.config.replacement - 1).max(1)
    }
}

fn random_cell<R: Rng>(problem: &PricingProblem, rng: &mut R) -> Result<Cell> {
    let prices = problem.random_prices(rng)?;
    Cell::evaluate(prices, problem)
}

/// First maximum-revenue cell and the normalised revenue of `cells`.
fn summarize(cells: &[Cell]) -> (Cell, f64) {
    let mut best = &cells[0];
    let mut total = 0.0;
    for cell in cells {
        if cell.revenue() > best.revenue() {
            best = cell;
        }
        total += cell.revenue();
    }
    let normalised = if total > 0.0 {
        best.revenue() / total
    } else {
        0.0
    };
    (best.clone(), normalised)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricingError;
    use crate::problem::ResponseCurve;
    use crate::random::create_rng;

    fn small_config() -> AisConfig {
        AisConfig::default()
            .with_population_size(10)
            .with_replacement(3)
            .with_clone_factor(2)
    }

    #[test]
    fn test_new_population_valid() {
        let mut rng = create_rng(42);
        let problem = PricingProblem::generate(10, &mut rng).unwrap();
        let ais = ImmuneSystem::new(&problem, small_config(), &mut rng).unwrap();

        assert_eq!(ais.cells().len(), 10);
        assert_eq!(ais.generation(), 0);
        for cell in ais.cells() {
            assert!(problem.is_valid(cell.prices()));
            assert_eq!(cell.revenue(), problem.evaluate(cell.prices()).unwrap());
        }
        let max = ais
            .cells()
            .iter()
            .map(Cell::revenue)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(ais.best_cell().revenue(), max);
    }

    #[test]
    fn test_population_size_invariant() {
        let mut rng = create_rng(42);
        let problem = PricingProblem::generate(10, &mut rng).unwrap();
        let mut ais = ImmuneSystem::new(&problem, small_config(), &mut rng).unwrap();

        for step in 1..=25 {
            ais.update(&mut rng).unwrap();
            assert_eq!(ais.cells().len(), 10, "size changed at step {step}");
            assert_eq!(ais.generation(), step);
        }
    }

    #[test]
    fn test_best_is_non_decreasing() {
        let mut rng = create_rng(7);
        let problem = PricingProblem::generate(12, &mut rng).unwrap();
        let mut ais = ImmuneSystem::new(&problem, small_config(), &mut rng).unwrap();

        let mut previous = ais.best_cell().revenue();
        for _ in 0..40 {
            ais.update(&mut rng).unwrap();
            let current = ais.best_cell().revenue();
            assert!(
                current >= previous,
                "best revenue decreased: {current} < {previous}"
            );
            previous = current;
        }
    }

    #[test]
    fn test_cells_stay_consistent() {
        let mut rng = create_rng(11);
        let problem = PricingProblem::generate(6, &mut rng).unwrap();
        let mut ais = ImmuneSystem::new(&problem, small_config(), &mut rng).unwrap();

        for _ in 0..10 {
            ais.update(&mut rng).unwrap();
        }
        for cell in ais.cells() {
            assert!(problem.is_valid(cell.prices()));
            assert_eq!(cell.revenue(), problem.evaluate(cell.prices()).unwrap());
        }
        let best = ais.best_cell();
        assert_eq!(best.revenue(), problem.evaluate(best.prices()).unwrap());
    }

    #[test]
    fn test_survivors_sorted_descending() {
        let mut rng = create_rng(5);
        let problem = PricingProblem::generate(8, &mut rng).unwrap();
        let config = small_config();
        let mut ais = ImmuneSystem::new(&problem, config.clone(), &mut rng).unwrap();
        ais.update(&mut rng).unwrap();

        let survivors = config.population_size - config.replacement - 1;
        for pair in ais.cells()[..survivors].windows(2) {
            assert!(pair[0].revenue() >= pair[1].revenue());
        }
        assert!(ais.best_cell().revenue() >= ais.cells()[0].revenue());
    }

    #[test]
    fn test_single_cell_population() {
        let mut rng = create_rng(42);
        let problem = PricingProblem::generate(4, &mut rng).unwrap();
        let config = AisConfig::default()
            .with_population_size(1)
            .with_replacement(0)
            .with_clone_factor(3);
        let mut ais = ImmuneSystem::new(&problem, config, &mut rng).unwrap();

        let before = ais.best_cell().revenue();
        for _ in 0..5 {
            ais.update(&mut rng).unwrap();
        }
        assert_eq!(ais.cells().len(), 1);
        assert!(ais.best_cell().revenue() >= before);
    }

    #[test]
    fn test_replacement_equal_population_rejected() {
        let mut rng = create_rng(42);
        let problem = PricingProblem::generate(4, &mut rng).unwrap();
        let config = AisConfig::default()
            .with_population_size(4)
            .with_replacement(4);
        let err = ImmuneSystem::new(&problem, config, &mut rng).unwrap_err();
        assert!(matches!(err, PricingError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_maximal_replacement_keeps_elite() {
        let mut rng = create_rng(3);
        let problem = PricingProblem::generate(6, &mut rng).unwrap();
        let config = AisConfig::default()
            .with_population_size(5)
            .with_replacement(4)
            .with_clone_factor(1);
        let mut ais = ImmuneSystem::new(&problem, config, &mut rng).unwrap();

        let mut previous = ais.best_cell().revenue();
        for _ in 0..15 {
            ais.update(&mut rng).unwrap();
            assert!(ais.best_cell().revenue() >= previous);
            previous = ais.best_cell().revenue();
        }
    }

    #[test]
    fn test_single_good_never_mutates() {
        let fixed = ResponseCurve::FixedDemand { total_demand: 5.0 };
        let problem = PricingProblem::from_parts(vec![fixed], vec![vec![0.0]]).unwrap();
        let mut rng = create_rng(1);
        let config = AisConfig::default()
            .with_population_size(3)
            .with_replacement(1)
            .with_clone_factor(2);
        let mut ais = ImmuneSystem::new(&problem, config, &mut rng).unwrap();
        ais.update(&mut rng).unwrap();
        assert_eq!(ais.cells().len(), 3);
    }

    #[test]
    fn test_normalised_revenue_in_unit_range() {
        let mut rng = create_rng(9);
        let problem = PricingProblem::generate(10, &mut rng).unwrap();
        let mut ais = ImmuneSystem::new(&problem, small_config(), &mut rng).unwrap();
        ais.update(&mut rng).unwrap();
        let n = ais.normalised_revenue();
        assert!((0.0..=1.0).contains(&n), "normalised revenue {n}");
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = |seed: u64| {
            let mut rng = create_rng(seed);
            let problem = PricingProblem::generate(8, &mut rng).unwrap();
            let mut ais = ImmuneSystem::new(&problem, small_config(), &mut rng).unwrap();
            for _ in 0..5 {
                ais.update(&mut rng).unwrap();
            }
            ais.best_cell().clone()
        };
        assert_eq!(run(21), run(21));
    }

    #[test]
    fn test_meta_dynamics_keeps_tie_order() {
        // Fixed demand with no cross impact prices every permutation of
        // the same vector identically, so all cells tie.
        let fixed = ResponseCurve::FixedDemand { total_demand: 10.0 };
        let problem = PricingProblem::from_parts(vec![fixed; 3], vec![vec![0.0; 3]; 3]).unwrap();
        let cell = |prices: [f64; 3]| Cell::evaluate(prices.to_vec(), &problem).unwrap();

        let originals = vec![
            cell([1.0, 2.0, 3.0]),
            cell([2.0, 3.0, 1.0]),
            cell([3.0, 1.0, 2.0]),
            cell([1.0, 3.0, 2.0]),
        ];
        let clones = vec![cell([2.0, 1.0, 3.0]), cell([3.0, 2.0, 1.0])];
        assert!(originals.iter().chain(&clones).all(|c| c.revenue() == 60.0));

        let (best, normalised_revenue) = summarize(&originals);
        let ais = ImmuneSystem {
            problem: &problem,
            config: AisConfig::default()
                .with_population_size(4)
                .with_replacement(0),
            cells: originals.clone(),
            best,
            normalised_revenue,
            generation: 0,
        };

        let mut rng = create_rng(42);
        let next = ais.meta_dynamics(clones, &mut rng).unwrap();

        // Only the last slot is refreshed; the three survivors are the
        // first originals in their original order.
        assert_eq!(ais.replacement_start(), 3);
        assert_eq!(next.len(), 4);
        assert_eq!(&next[..3], &originals[..3]);
    }
}
