// src/data/aggregate.rs - Roll-ups the dashboard widgets chart

//! Summaries computed from a [`Dataset`] snapshot.
//!
//! Money sums are done in cents, so every breakdown adds up exactly to the
//! collection total.

use serde::{Deserialize, Serialize};

use super::dataset::Dataset;
use super::entities::*;
use super::money::{Currency, Money};
use crate::utils::collections::group_by;

/// Count of records sharing one status value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount<S> {
    pub status: S,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreGross {
    pub store_id: u32,
    pub store_name: String,
    pub deals: usize,
    pub front_gross: Money,
    pub back_gross: Money,
    pub total_gross: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalespersonStanding {
    pub employee_id: String,
    pub name: String,
    pub units: usize,
    pub total_gross: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianWorkload {
    pub employee_id: String,
    pub name: String,
    pub open: usize,
    pub finished: usize,
    pub labor: Money,
}

fn money_sum(currency: Currency, amounts: impl Iterator<Item = Money>) -> Money {
    Money::from_cents(amounts.map(|m| m.cents).sum(), currency)
}

fn currency_of(dataset: &Dataset) -> Currency {
    dataset
        .vehicles()
        .first()
        .map(|v| v.cost.currency)
        .unwrap_or_default()
}

fn status_counts<T, S>(items: &[T], status: impl Fn(&T) -> S) -> Vec<StatusCount<S>>
where
    S: Ord + Copy + std::fmt::Display,
{
    group_by(items, status)
        .into_iter()
        .map(|(status, group)| StatusCount {
            status,
            label: status.to_string(),
            count: group.len(),
        })
        .collect()
}

/// Deal counts per status, in status order
pub fn deals_by_status(dataset: &Dataset) -> Vec<StatusCount<DealStatus>> {
    status_counts(dataset.deals(), |d| d.status)
}

pub fn repair_orders_by_status(dataset: &Dataset) -> Vec<StatusCount<RepairOrderStatus>> {
    status_counts(dataset.repair_orders(), |r| r.status)
}

pub fn appointments_by_status(dataset: &Dataset) -> Vec<StatusCount<AppointmentStatus>> {
    status_counts(dataset.appointments(), |a| a.status)
}

pub fn orders_by_priority(dataset: &Dataset) -> Vec<StatusCount<Priority>> {
    status_counts(dataset.orders(), |o| o.priority)
}

/// Front, back and total gross per store; stores without deals report zero
pub fn gross_by_store(dataset: &Dataset) -> Vec<StoreGross> {
    let currency = currency_of(dataset);
    let groups = group_by(dataset.deals(), |d| d.store_id);
    dataset
        .stores()
        .iter()
        .map(|store| {
            let deals = groups.get(&store.id).map(Vec::as_slice).unwrap_or_default();
            StoreGross {
                store_id: store.id,
                store_name: store.name.clone(),
                deals: deals.len(),
                front_gross: money_sum(currency, deals.iter().map(|d| d.front_gross)),
                back_gross: money_sum(currency, deals.iter().map(|d| d.back_gross)),
                total_gross: money_sum(currency, deals.iter().map(|d| d.total_gross)),
            }
        })
        .collect()
}

/// Salespeople ranked by total gross, then by units
pub fn salesperson_leaderboard(dataset: &Dataset) -> Vec<SalespersonStanding> {
    let currency = currency_of(dataset);
    let groups = group_by(dataset.deals(), |d| d.salesperson_id.clone());
    let mut standings: Vec<SalespersonStanding> = dataset
        .employees_with_role(Role::Salesperson)
        .into_iter()
        .map(|employee| {
            let deals = groups.get(&employee.id).map(Vec::as_slice).unwrap_or_default();
            SalespersonStanding {
                employee_id: employee.id.clone(),
                name: employee.full_name(),
                units: deals.len(),
                total_gross: money_sum(currency, deals.iter().map(|d| d.total_gross)),
            }
        })
        .collect();
    standings.sort_by(|a, b| {
        b.total_gross
            .cents
            .cmp(&a.total_gross.cents)
            .then(b.units.cmp(&a.units))
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });
    standings
}

/// Open and finished repair orders per technician
pub fn technician_workload(dataset: &Dataset) -> Vec<TechnicianWorkload> {
    let currency = currency_of(dataset);
    let groups = group_by(dataset.repair_orders(), |r| r.technician_id.clone());
    dataset
        .employees_with_role(Role::Technician)
        .into_iter()
        .map(|employee| {
            let orders = groups.get(&employee.id).map(Vec::as_slice).unwrap_or_default();
            let finished = orders.iter().filter(|r| r.status.is_finished()).count();
            TechnicianWorkload {
                employee_id: employee.id.clone(),
                name: employee.full_name(),
                open: orders
                    .iter()
                    .filter(|r| !r.status.is_finished() && r.status != RepairOrderStatus::Cancelled)
                    .count(),
                finished,
                labor: money_sum(currency, orders.iter().map(|r| r.labor)),
            }
        })
        .collect()
}

/// Sum of gross over every deal
pub fn total_gross(dataset: &Dataset) -> Money {
    money_sum(
        currency_of(dataset),
        dataset.deals().iter().map(|d| d.total_gross),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::DatasetCounts;
    use crate::data::factories::FactorySettings;
    use crate::data::random::Generator;
    use crate::utils::Time;

    fn dataset() -> Dataset {
        let mut gen = Generator::seeded(21).with_anchor(Time::from_secs(1_700_000_000));
        Dataset::generate(&mut gen, &DatasetCounts::default(), &FactorySettings::default())
            .unwrap()
    }

    #[test]
    fn test_status_counts_cover_collections() {
        let dataset = dataset();
        let deals: usize = deals_by_status(&dataset).iter().map(|s| s.count).sum();
        assert_eq!(deals, dataset.deals().len());
        let ros: usize = repair_orders_by_status(&dataset).iter().map(|s| s.count).sum();
        assert_eq!(ros, dataset.repair_orders().len());
        let appts: usize = appointments_by_status(&dataset).iter().map(|s| s.count).sum();
        assert_eq!(appts, dataset.appointments().len());
        let orders: usize = orders_by_priority(&dataset).iter().map(|s| s.count).sum();
        assert_eq!(orders, dataset.orders().len());

        let statuses: Vec<_> = deals_by_status(&dataset).iter().map(|s| s.status).collect();
        let mut sorted = statuses.clone();
        sorted.sort();
        assert_eq!(statuses, sorted);
    }

    #[test]
    fn test_gross_by_store_sums_to_total() {
        let dataset = dataset();
        let by_store = gross_by_store(&dataset);
        assert_eq!(by_store.len(), dataset.stores().len());
        let cents: i64 = by_store.iter().map(|s| s.total_gross.cents).sum();
        assert_eq!(cents, total_gross(&dataset).cents);
        let deals: usize = by_store.iter().map(|s| s.deals).sum();
        assert_eq!(deals, dataset.deals().len());
        for store in &by_store {
            assert_eq!(
                store.total_gross.cents,
                store.front_gross.cents + store.back_gross.cents
            );
        }
    }

    #[test]
    fn test_leaderboard_is_ranked() {
        let dataset = dataset();
        let board = salesperson_leaderboard(&dataset);
        assert_eq!(board.len(), dataset.employees_with_role(Role::Salesperson).len());
        assert!(board
            .windows(2)
            .all(|w| w[0].total_gross.cents >= w[1].total_gross.cents));
        let units: usize = board.iter().map(|s| s.units).sum();
        assert_eq!(units, dataset.deals().len());
    }

    #[test]
    fn test_technician_workload_covers_orders() {
        let dataset = dataset();
        let workload = technician_workload(&dataset);
        let cancelled = dataset
            .repair_orders()
            .iter()
            .filter(|r| r.status == RepairOrderStatus::Cancelled)
            .count();
        let counted: usize = workload.iter().map(|w| w.open + w.finished).sum();
        assert_eq!(counted + cancelled, dataset.repair_orders().len());
    }
}
