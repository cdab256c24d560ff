// src/data/store.rs - Shared dataset snapshot with atomic refresh

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::Rng;

use super::dataset::{Dataset, DatasetCounts};
use super::factories::FactorySettings;
use super::kpi::{self, Kpi};
use super::random::Generator;
use crate::config::GenerationConfig;
use crate::error::Result;
use crate::types::Timestamp;
use crate::utils::Time;

/// Holds the current [`Dataset`] and the generator that builds the next one
///
/// Readers get an `Arc` to an immutable snapshot. `refresh` builds the
/// replacement without holding the snapshot lock and swaps it in, so a
/// reader never sees a partially built dataset.
#[derive(Debug)]
pub struct DatasetStore<R: Rng = StdRng> {
    current: RwLock<Arc<Dataset>>,
    generator: Mutex<Generator<R>>,
    counts: DatasetCounts,
    settings: FactorySettings,
    fixed_anchor: Option<Timestamp>,
}

impl DatasetStore<StdRng> {
    /// Store built from configuration
    ///
    /// A configured anchor pins every snapshot to that instant; with a seed
    /// as well, the first snapshot is reproducible.
    pub fn from_config(config: &GenerationConfig) -> Result<Self> {
        let gen = match config.seed {
            Some(seed) => Generator::seeded(seed),
            None => Generator::from_entropy(),
        }
        .with_currency(config.currency);
        match config.anchor {
            Some(anchor) => Self::with_fixed_anchor(
                gen,
                anchor,
                config.counts,
                config.factory_settings(),
            ),
            None => Self::new(gen, config.counts, config.factory_settings()),
        }
    }
}

impl<R: Rng> DatasetStore<R> {
    /// Store whose refreshes follow the clock
    ///
    /// The first snapshot uses the generator's own anchor; every refresh
    /// re-anchors to the current second.
    pub fn new(gen: Generator<R>, counts: DatasetCounts, settings: FactorySettings) -> Result<Self> {
        Self::build(gen, counts, settings, None)
    }

    /// Store whose snapshots all hang off `anchor`
    pub fn with_fixed_anchor(
        gen: Generator<R>,
        anchor: Timestamp,
        counts: DatasetCounts,
        settings: FactorySettings,
    ) -> Result<Self> {
        Self::build(gen.with_anchor(anchor), counts, settings, Some(anchor))
    }

    fn build(
        mut gen: Generator<R>,
        counts: DatasetCounts,
        settings: FactorySettings,
        fixed_anchor: Option<Timestamp>,
    ) -> Result<Self> {
        let dataset = Dataset::generate(&mut gen, &counts, &settings)?;
        Ok(Self {
            current: RwLock::new(Arc::new(dataset)),
            generator: Mutex::new(gen),
            counts,
            settings,
            fixed_anchor,
        })
    }

    /// Current snapshot; stays valid across later refreshes
    pub fn snapshot(&self) -> Arc<Dataset> {
        Arc::clone(&self.current.read())
    }

    /// Build a new dataset and make it current
    ///
    /// Unless the anchor is fixed, date windows move to the current second.
    /// The generator lock is held through the swap so concurrent refreshes
    /// install their snapshots in build order. On failure the previous
    /// snapshot stays in place.
    pub fn refresh(&self) -> Result<Arc<Dataset>> {
        let mut gen = self.generator.lock();
        if self.fixed_anchor.is_none() {
            gen.set_anchor(Time::now_secs());
        }
        let dataset = Arc::new(Dataset::generate(&mut *gen, &self.counts, &self.settings)?);
        *self.current.write() = Arc::clone(&dataset);
        drop(gen);

        tracing::info!(generated_at = %dataset.generated_at(), "Dataset snapshot refreshed");
        Ok(dataset)
    }

    /// Fresh KPI values for a role identifier
    pub fn kpis_for(&self, role: &str) -> Result<Vec<Kpi>> {
        let mut gen = self.generator.lock();
        kpi::kpis_for(&mut *gen, role)
    }
}
