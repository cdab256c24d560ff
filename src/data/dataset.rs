// src/data/dataset.rs - One-shot assembly of every entity collection

use std::collections::{HashMap, HashSet};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entities::*;
use super::factories::{self, FactorySettings};
use super::random::Generator;
use crate::error::{Error, Result, ResultExt};
use crate::types::Timestamp;
use crate::utils::collections::find_duplicates;
use crate::utils::timing::{duration_to_human, Stopwatch};

/// How many of each entity to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetCounts {
    pub stores: usize,
    pub employees: usize,
    pub customers: usize,
    pub vehicles: usize,
    pub deals: usize,
    pub appointments: usize,
    pub repair_orders: usize,
    pub orders: usize,
}

impl Default for DatasetCounts {
    fn default() -> Self {
        Self {
            stores: 3,
            employees: 25,
            customers: 150,
            vehicles: 75,
            deals: 120,
            appointments: 60,
            repair_orders: 80,
            orders: 40,
        }
    }
}

/// Collection sizes of a built dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub stores: usize,
    pub employees: usize,
    pub customers: usize,
    pub vehicles: usize,
    pub deals: usize,
    pub appointments: usize,
    pub repair_orders: usize,
    pub orders: usize,
}

impl DatasetSummary {
    pub fn total(&self) -> usize {
        self.stores
            + self.employees
            + self.customers
            + self.vehicles
            + self.deals
            + self.appointments
            + self.repair_orders
            + self.orders
    }
}

/// Every generated collection, built once and read-only afterwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    generated_at: Timestamp,
    stores: Vec<Store>,
    employees: Vec<Employee>,
    customers: Vec<Customer>,
    vehicles: Vec<Vehicle>,
    deals: Vec<Deal>,
    appointments: Vec<ServiceAppointment>,
    repair_orders: Vec<RepairOrder>,
    orders: Vec<Order>,
}

impl Dataset {
    /// Run every factory in dependency order
    ///
    /// Stores, employees, customers and vehicles come first; deals,
    /// appointments, repair orders and orders reference them. The first
    /// failing factory aborts the build.
    pub fn generate<R: Rng>(
        gen: &mut Generator<R>,
        counts: &DatasetCounts,
        settings: &FactorySettings,
    ) -> Result<Self> {
        let mut stopwatch = Stopwatch::start();

        let stores = factories::generate_stores(gen, counts.stores).in_factory("stores")?;
        stopwatch.lap("stores");
        let employees = factories::generate_employees(gen, counts.employees).in_factory("employees")?;
        stopwatch.lap("employees");
        let customers = factories::generate_customers(gen, counts.customers).in_factory("customers")?;
        stopwatch.lap("customers");
        let vehicles = factories::generate_vehicles(gen, counts.vehicles).in_factory("vehicles")?;
        stopwatch.lap("vehicles");
        let deals = factories::generate_deals(
            gen,
            counts.deals,
            &customers,
            &vehicles,
            &employees,
            &stores,
            settings,
        )
        .in_factory("deals")?;
        stopwatch.lap("deals");
        let appointments = factories::generate_appointments(
            gen,
            counts.appointments,
            &customers,
            &vehicles,
            &employees,
            settings,
        )
        .in_factory("appointments")?;
        stopwatch.lap("appointments");
        let repair_orders = factories::generate_repair_orders(
            gen,
            counts.repair_orders,
            &customers,
            &vehicles,
            &employees,
            settings,
        )
        .in_factory("repair_orders")?;
        stopwatch.lap("repair_orders");
        let orders = factories::generate_orders(gen, counts.orders, &customers, settings)
            .in_factory("orders")?;
        stopwatch.lap("orders");

        for (step, elapsed) in stopwatch.lap_times() {
            tracing::debug!(step, elapsed = %duration_to_human(elapsed), "factory finished");
        }

        let dataset = Self {
            generated_at: gen.anchor(),
            stores,
            employees,
            customers,
            vehicles,
            deals,
            appointments,
            repair_orders,
            orders,
        };

        let summary = dataset.summary();
        tracing::info!(
            stores = summary.stores,
            employees = summary.employees,
            customers = summary.customers,
            vehicles = summary.vehicles,
            deals = summary.deals,
            appointments = summary.appointments,
            repair_orders = summary.repair_orders,
            orders = summary.orders,
            "Generated dataset of {} records in {}",
            summary.total(),
            duration_to_human(stopwatch.elapsed())
        );

        Ok(dataset)
    }

    /// Generation anchor every date window was measured from
    pub fn generated_at(&self) -> Timestamp {
        self.generated_at
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn appointments(&self) -> &[ServiceAppointment] {
        &self.appointments
    }

    pub fn repair_orders(&self) -> &[RepairOrder] {
        &self.repair_orders
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn store(&self, id: u32) -> Option<&Store> {
        self.stores.iter().find(|s| s.id == id)
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn customer(&self, key: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.key == key)
    }

    pub fn vehicle(&self, key: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.key == key)
    }

    pub fn employees_with_role(&self, role: Role) -> Vec<&Employee> {
        self.employees.iter().filter(|e| e.role == role).collect()
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            stores: self.stores.len(),
            employees: self.employees.len(),
            customers: self.customers.len(),
            vehicles: self.vehicles.len(),
            deals: self.deals.len(),
            appointments: self.appointments.len(),
            repair_orders: self.repair_orders.len(),
            orders: self.orders.len(),
        }
    }

    /// Re-check identity uniqueness and every cross-reference
    ///
    /// Returns one message per problem found; an empty list means the
    /// dataset is consistent.
    pub fn validate_references(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let mut duplicates = |collection: &str, keys: Vec<String>| {
            problems.extend(
                keys.into_iter()
                    .map(|key| format!("{}: duplicate key {}", collection, key)),
            );
        };
        duplicates("stores", find_duplicates(&self.stores, |s| s.id.to_string()));
        duplicates("employees", find_duplicates(&self.employees, |e| e.id.clone()));
        duplicates("customers", find_duplicates(&self.customers, |c| c.key.clone()));
        duplicates("vehicles", find_duplicates(&self.vehicles, |v| v.key.clone()));
        duplicates("deals", find_duplicates(&self.deals, |d| d.key.clone()));
        duplicates("appointments", find_duplicates(&self.appointments, |a| a.id.clone()));
        duplicates("repair_orders", find_duplicates(&self.repair_orders, |r| r.id.clone()));
        duplicates("orders", find_duplicates(&self.orders, |o| o.id.clone()));

        let store_ids: HashSet<u32> = self.stores.iter().map(|s| s.id).collect();
        let customers: HashSet<&str> = self.customers.iter().map(|c| c.key.as_str()).collect();
        let vehicles: HashSet<&str> = self.vehicles.iter().map(|v| v.key.as_str()).collect();
        let roles: HashMap<&str, Role> = self
            .employees
            .iter()
            .map(|e| (e.id.as_str(), e.role))
            .collect();

        let mut check_staff = |owner: &str, field: &str, id: &str, role: Role| match roles.get(id) {
            Some(actual) if *actual == role => {}
            Some(actual) => problems.push(format!(
                "{}: {} {} is a {}, expected {}",
                owner, field, id, actual, role
            )),
            None => problems.push(format!("{}: unknown {} {}", owner, field, id)),
        };
        for deal in &self.deals {
            check_staff(&deal.key, "salesperson", &deal.salesperson_id, Role::Salesperson);
            check_staff(
                &deal.key,
                "finance manager",
                &deal.finance_manager_id,
                Role::FinanceManager,
            );
        }
        for appointment in &self.appointments {
            check_staff(
                &appointment.id,
                "advisor",
                &appointment.advisor_id,
                Role::ServiceAdvisor,
            );
        }
        for ro in &self.repair_orders {
            check_staff(&ro.id, "advisor", &ro.advisor_id, Role::ServiceAdvisor);
            check_staff(&ro.id, "technician", &ro.technician_id, Role::Technician);
        }

        let mut check = |ok: bool, owner: &str, what: &str, key: &str| {
            if !ok {
                problems.push(format!("{}: unknown {} {}", owner, what, key));
            }
        };
        for deal in &self.deals {
            check(store_ids.contains(&deal.store_id), &deal.key, "store", &deal.store_id.to_string());
            check(customers.contains(deal.customer_key.as_str()), &deal.key, "customer", &deal.customer_key);
            check(vehicles.contains(deal.vehicle_key.as_str()), &deal.key, "vehicle", &deal.vehicle_key);
        }
        for appointment in &self.appointments {
            let id = &appointment.id;
            check(customers.contains(appointment.customer_key.as_str()), id, "customer", &appointment.customer_key);
            check(vehicles.contains(appointment.vehicle_key.as_str()), id, "vehicle", &appointment.vehicle_key);
        }
        for ro in &self.repair_orders {
            check(customers.contains(ro.customer_key.as_str()), &ro.id, "customer", &ro.customer_key);
            check(vehicles.contains(ro.vehicle_key.as_str()), &ro.id, "vehicle", &ro.vehicle_key);
        }
        for order in &self.orders {
            check(customers.contains(order.customer_key.as_str()), &order.id, "customer", &order.customer_key);
        }

        problems
    }

    /// `validate_references` as a `Result`, for callers that want to fail fast
    pub fn ensure_consistent(&self) -> Result<()> {
        let problems = self.validate_references();
        if problems.is_empty() {
            return Ok(());
        }
        Err(problems.iter().fold(
            Error::validation("dataset", format!("{} reference problems", problems.len())),
            |error, problem| error.caused_by(problem),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::utils::Time;

    fn generator(seed: u64) -> Generator {
        Generator::seeded(seed).with_anchor(Time::from_secs(1_700_000_000))
    }

    fn small_counts() -> DatasetCounts {
        DatasetCounts {
            stores: 2,
            employees: 12,
            customers: 20,
            vehicles: 10,
            deals: 15,
            appointments: 10,
            repair_orders: 10,
            orders: 5,
        }
    }

    #[test]
    fn test_generate_matches_counts() {
        let counts = small_counts();
        let dataset =
            Dataset::generate(&mut generator(1), &counts, &FactorySettings::default()).unwrap();
        let summary = dataset.summary();
        assert_eq!(summary.stores, 2);
        assert_eq!(summary.employees, 12);
        assert_eq!(summary.deals, 15);
        assert_eq!(summary.orders, 5);
        assert_eq!(summary.total(), 84);
        assert!(dataset.validate_references().is_empty());
        assert!(dataset.ensure_consistent().is_ok());
    }

    #[test]
    fn test_lookups() {
        let dataset =
            Dataset::generate(&mut generator(2), &small_counts(), &FactorySettings::default())
                .unwrap();
        let deal = &dataset.deals()[0];
        assert_eq!(dataset.customer(&deal.customer_key).unwrap().full_name(), deal.customer_name);
        assert_eq!(
            dataset.vehicle(&deal.vehicle_key).unwrap().description(),
            deal.vehicle_description
        );
        assert!(dataset.store(deal.store_id).is_some());
        assert_eq!(
            dataset.employee(&deal.salesperson_id).unwrap().role,
            Role::Salesperson
        );
        assert!(dataset.customer("CUST-99999").is_none());
        assert!(dataset.store(0).is_none());
    }

    #[test]
    fn test_employees_with_role_partitions_staff() {
        let dataset =
            Dataset::generate(&mut generator(3), &small_counts(), &FactorySettings::default())
                .unwrap();
        let total: usize = Role::ALL
            .iter()
            .map(|role| dataset.employees_with_role(*role).len())
            .sum();
        assert_eq!(total, dataset.employees().len());
        assert!(dataset.employees_with_role(Role::Accountant).is_empty());
    }

    #[test]
    fn test_same_seed_same_dataset() {
        let counts = small_counts();
        let settings = FactorySettings::default();
        let a = Dataset::generate(&mut generator(9), &counts, &settings).unwrap();
        let b = Dataset::generate(&mut generator(9), &counts, &settings).unwrap();
        let c = Dataset::generate(&mut generator(10), &counts, &settings).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.summary(), c.summary());
    }

    #[test]
    fn test_validate_references_reports_problems() {
        let mut dataset =
            Dataset::generate(&mut generator(4), &small_counts(), &FactorySettings::default())
                .unwrap();
        dataset.deals[0].customer_key = "CUST-00000".to_string();
        dataset.deals[1].store_id = 42;
        let advisor = dataset.appointments[0].advisor_id.clone();
        dataset.repair_orders[0].technician_id = advisor;
        let key = dataset.orders[0].id.clone();
        dataset.orders[1].id = key;

        let problems = dataset.validate_references();
        assert_eq!(problems.len(), 4, "{:?}", problems);
        assert!(problems.iter().any(|p| p.contains("unknown customer CUST-00000")));
        assert!(problems.iter().any(|p| p.contains("unknown store 42")));
        assert!(problems.iter().any(|p| p.contains("expected Technician")));
        assert!(problems.iter().any(|p| p.starts_with("orders: duplicate key")));

        let error = dataset.ensure_consistent().unwrap_err();
        assert_eq!(error.causes.len(), 4);
    }

    #[test]
    fn test_primitive_failure_names_factory() {
        let settings = FactorySettings {
            history_days: -1,
            ..FactorySettings::default()
        };
        let error = Dataset::generate(&mut generator(6), &small_counts(), &settings).unwrap_err();
        assert_eq!(
            error.kind,
            ErrorKind::Generation {
                factory: Some("deals".to_string()),
                parameter: Some("date_range".to_string()),
            }
        );
    }

    #[test]
    fn test_empty_dataset() {
        let counts = DatasetCounts {
            stores: 0,
            employees: 0,
            customers: 0,
            vehicles: 0,
            deals: 0,
            appointments: 0,
            repair_orders: 0,
            orders: 0,
        };
        let dataset =
            Dataset::generate(&mut generator(5), &counts, &FactorySettings::default()).unwrap();
        assert_eq!(dataset.summary().total(), 0);
        assert!(dataset.validate_references().is_empty());
    }

    #[test]
    fn test_counts_deserialize_with_defaults() {
        let counts: DatasetCounts = serde_json::from_str(r#"{"deals": 7}"#).unwrap();
        assert_eq!(counts.deals, 7);
        assert_eq!(counts.stores, 3);
        assert_eq!(counts.customers, 150);
    }
}
