//! The pool of dead biomass at a site.
//!
//! Dead mass accumulates from mortality and litterfall, decays
//! exponentially once a year, and carries a single blended decay rate:
//! merging in new dead mass re-weights the rate by mass, so the pool
//! behaves as if every contribution decayed at its own rate in
//! aggregate.

use sylva_core::PoolError;

/// Accumulated dead biomass with a mass-weighted decay rate.
///
/// `mass` is always the physically remaining dead biomass after every
/// merge, extraction, and decay step to date. `initial_mass` is
/// informational: set by the creator, never updated by decay.
///
/// # Examples
///
/// ```
/// use sylva_site::DeadMassPool;
///
/// let mut pool = DeadMassPool::new();
/// pool.add_mass(100.0, 0.1).unwrap();
/// let decomposed = pool.decompose();
/// assert_eq!(decomposed, 10.0);
/// assert_eq!(pool.mass(), 90.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeadMassPool {
    mass: f64,
    decay_rate: f64,
    initial_mass: f64,
}

impl DeadMassPool {
    /// An empty pool: zero mass, zero decay rate.
    pub fn new() -> Self {
        Self::default()
    }

    /// The remaining dead biomass.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// The blended instantaneous decay rate.
    pub fn decay_rate(&self) -> f64 {
        self.decay_rate
    }

    /// The informational initial mass set at creation.
    pub fn initial_mass(&self) -> f64 {
        self.initial_mass
    }

    /// Overwrite the pool's mass.
    ///
    /// Rejects negative or non-finite values: pool mass is physically
    /// remaining biomass, and a negative mass would make the next
    /// [`decompose`](DeadMassPool::decompose) truncate a negative value.
    pub fn set_mass(&mut self, mass: f64) -> Result<(), PoolError> {
        if !mass.is_finite() || mass < 0.0 {
            return Err(PoolError::NegativeMass { mass });
        }
        self.mass = mass;
        Ok(())
    }

    /// Overwrite the decay rate.
    pub fn set_decay_rate(&mut self, rate: f64) {
        self.decay_rate = rate;
    }

    /// Record the informational initial mass.
    pub fn set_initial_mass(&mut self, mass: f64) {
        self.initial_mass = mass;
    }

    /// Merge dead biomass into the pool.
    ///
    /// The pool's decay rate becomes the mass-weighted average of its
    /// current rate and the incoming rate, so multiple additions blend
    /// the same way regardless of order. Adding zero mass leaves the
    /// rate unchanged; adding into an empty pool adopts the incoming
    /// rate exactly.
    pub fn add_mass(&mut self, input_mass: f64, input_decay_rate: f64) -> Result<(), PoolError> {
        if !input_mass.is_finite() || input_mass < 0.0 {
            return Err(PoolError::NegativeMass { mass: input_mass });
        }
        let total = self.mass + input_mass;
        if total == 0.0 {
            self.decay_rate = 0.0;
        } else {
            self.decay_rate =
                (self.mass * self.decay_rate + input_mass * input_decay_rate) / total;
        }
        self.mass = total;
        Ok(())
    }

    /// Remove a fraction of the pool's biomass, returning the amount
    /// removed.
    ///
    /// `fraction` must lie in `[0, 1]`. The decay rate is unchanged by
    /// extraction.
    pub fn reduce_mass(&mut self, fraction: f64) -> Result<f64, PoolError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(PoolError::FractionOutOfRange { fraction });
        }
        let removed = self.mass * fraction;
        self.mass -= removed;
        Ok(removed)
    }

    /// Decompose the pool's biomass for one year, returning the amount
    /// that decomposed.
    ///
    /// The remaining mass is `floor(mass · e^(−decay_rate))`. The
    /// truncation to a whole number is deliberate, inherited behavior:
    /// downstream models calibrated against it depend on the truncated
    /// values, so this must stay a floor, not a round.
    pub fn decompose(&mut self) -> f64 {
        let old_mass = self.mass;
        let new_mass = (self.mass * (-self.decay_rate).exp()).floor();
        self.mass = new_mass;
        old_mass - new_mass
    }
}
