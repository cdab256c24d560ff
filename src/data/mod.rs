// src/data/mod.rs

//! Synthetic dealership data: primitive generators, entity factories,
//! dataset assembly, KPI synthesis and the read-side helpers the
//! dashboard uses.

pub mod aggregate;
pub mod dataset;
pub mod entities;
pub mod factories;
pub mod kpi;
pub mod money;
pub mod random;
pub mod store;
pub mod table;
mod vocab;

pub use dataset::{Dataset, DatasetCounts, DatasetSummary};
pub use entities::*;
pub use factories::FactorySettings;
pub use kpi::{kpis_for, kpis_for_role, ChangeType, Kpi, KpiFormat, KpiValue};
pub use money::{Currency, Money};
pub use random::{Generator, RandomError};
pub use store::DatasetStore;
pub use table::{sort_rows, sorted, SortDirection, SortField};
