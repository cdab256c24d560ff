// src/data/factories.rs - One factory per entity type

//! Entity factories.
//!
//! Each factory takes the generator, a count, and the collections it
//! references. Cross-references are independent uniform picks, so one
//! customer can appear on many deals. A factory asked for at least one
//! entity fails fast when a collection it references is empty, or when a
//! role it needs has nobody on staff.

use chrono::Datelike;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entities::*;
use super::money::Money;
use super::random::Generator;
use super::vocab;
use crate::error::{Error, Result};
use crate::utils::Time;

/// Time windows and rates shared by the dated factories
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorySettings {
    /// How far back deals, repair orders and orders are dated
    pub history_days: i64,
    /// How far ahead appointments may be scheduled
    pub horizon_days: i64,
    /// Sales tax applied to labor and parts on repair orders
    pub tax_rate: f64,
}

impl Default for FactorySettings {
    fn default() -> Self {
        Self {
            history_days: 90,
            horizon_days: 30,
            tax_rate: 0.0825,
        }
    }
}

/// Customers are backdated up to three years
const CUSTOMER_HISTORY_DAYS: i64 = 1095;

fn require<T>(factory: &str, dependency: &str, items: &[T]) -> Result<()> {
    if items.is_empty() {
        return Err(Error::missing_dependency(factory, dependency));
    }
    Ok(())
}

fn staff_with_role<'a>(
    factory: &str,
    employees: &'a [Employee],
    role: Role,
) -> Result<Vec<&'a Employee>> {
    let staff: Vec<&Employee> = employees.iter().filter(|e| e.role == role).collect();
    if staff.is_empty() {
        return Err(Error::empty_population(factory, role));
    }
    Ok(staff)
}

fn person_name<R: Rng>(gen: &mut Generator<R>) -> Result<(String, String)> {
    Ok((
        gen.pick(vocab::FIRST_NAMES)?.to_string(),
        gen.pick(vocab::LAST_NAMES)?.to_string(),
    ))
}

fn address<R: Rng>(gen: &mut Generator<R>) -> Result<Address> {
    let (city, state, zip_prefix) = gen.pick(vocab::CITIES)?;
    Ok(Address {
        street: format!("{} {}", gen.random_int(100, 9999)?, gen.pick(vocab::STREET_NAMES)?),
        city: city.to_string(),
        state: state.to_string(),
        postal_code: format!("{}{:02}", zip_prefix, gen.random_int(0, 99)?),
    })
}

fn phone<R: Rng>(gen: &mut Generator<R>) -> Result<String> {
    Ok(format!(
        "({}) 555-{:04}",
        gen.random_int(201, 989)?,
        gen.random_int(0, 9999)?
    ))
}

/// Sequence number keeps addresses unique across namesakes
fn email(first: &str, last: &str, seq: usize, domain: &str) -> String {
    format!(
        "{}.{}{}@{}",
        first.to_lowercase(),
        last.to_lowercase(),
        seq,
        domain
    )
}

pub fn generate_stores<R: Rng>(gen: &mut Generator<R>, count: usize) -> Result<Vec<Store>> {
    let mut stores = Vec::with_capacity(count);
    for i in 0..count {
        let (make, _) = gen.pick(vocab::MAKES)?;
        let name = format!("{} {}", gen.pick(vocab::STORE_PREFIXES)?, make);
        stores.push(Store {
            id: (i + 1) as u32,
            legal_name: format!("{} {}", name, gen.pick(vocab::LEGAL_SUFFIXES)?),
            name,
            address: address(gen)?,
            phone: phone(gen)?,
        });
    }
    tracing::debug!(count = stores.len(), "generated stores");
    Ok(stores)
}

/// The first seven employees cover every staffed role once, so any count
/// of at least seven leaves no role empty.
pub fn generate_employees<R: Rng>(gen: &mut Generator<R>, count: usize) -> Result<Vec<Employee>> {
    let mut employees = Vec::with_capacity(count);
    for i in 0..count {
        let role = match Role::STAFFED.get(i) {
            Some(role) => *role,
            None => gen.pick(Role::STAFFED)?,
        };
        let (first_name, last_name) = person_name(gen)?;
        let tenure_days = gen.random_int(30, 3650)?;
        employees.push(Employee {
            id: format!("EMP-{:04}", i + 1),
            email: email(&first_name, &last_name, i + 1, "dealer.example.com"),
            first_name,
            last_name,
            role,
            hire_date: (gen.anchor() - Time::duration_days(tenure_days)).date_naive(),
            is_active: gen.chance(0.92)?,
        });
    }
    tracing::debug!(count = employees.len(), "generated employees");
    Ok(employees)
}

pub fn generate_customers<R: Rng>(gen: &mut Generator<R>, count: usize) -> Result<Vec<Customer>> {
    let mut customers = Vec::with_capacity(count);
    for i in 0..count {
        let (first_name, last_name) = person_name(gen)?;
        let customer_type = match gen.random_int(1, 100)? {
            1..=80 => CustomerType::Retail,
            81..=90 => CustomerType::Wholesale,
            _ => CustomerType::Fleet,
        };
        let contact = ContactInfo {
            address: address(gen)?,
            email: email(&first_name, &last_name, i + 1, gen.pick(vocab::EMAIL_DOMAINS)?),
            phone: phone(gen)?,
        };
        let license = if gen.chance(0.7)? {
            let valid_days = gen.random_int(30, 1825)?;
            Some(DriverLicense {
                number: format!(
                    "{}{:07}",
                    gen.random_string(vocab::LICENSE_ALPHABET, 1)?,
                    gen.random_int(0, 9_999_999)?
                ),
                state: contact.address.state.clone(),
                expires_on: (gen.anchor() + Time::duration_days(valid_days)).date_naive(),
            })
        } else {
            None
        };
        customers.push(Customer {
            key: format!("CUST-{:05}", i + 1),
            first_name,
            last_name,
            contact,
            customer_type,
            license,
            created_at: gen.date_in_past(CUSTOMER_HISTORY_DAYS)?,
        });
    }
    tracing::debug!(count = customers.len(), "generated customers");
    Ok(customers)
}

pub fn generate_vehicles<R: Rng>(gen: &mut Generator<R>, count: usize) -> Result<Vec<Vehicle>> {
    let model_year = i64::from(gen.anchor().year());
    let mut vehicles = Vec::with_capacity(count);
    for i in 0..count {
        let (make, models) = gen.pick(vocab::MAKES)?;
        let model = gen.pick(models)?;
        let condition = if gen.chance(0.55)? {
            VehicleCondition::New
        } else {
            VehicleCondition::Used
        };
        let (year, mileage) = match condition {
            VehicleCondition::New => (
                gen.random_int(model_year, model_year + 1)?,
                gen.random_int(0, 50)?,
            ),
            VehicleCondition::Used => (
                gen.random_int(model_year - 8, model_year - 1)?,
                gen.random_int(5_000, 120_000)?,
            ),
        };
        let msrp = gen.random_money(22_000.0, 85_000.0)?;
        let cost = Money::from_cents(
            gen.random_int(msrp.cents * 80 / 100, msrp.cents * 92 / 100)?,
            msrp.currency,
        );
        let selling_price = Money::from_cents(gen.random_int(cost.cents, msrp.cents)?, msrp.currency);
        let stock_prefix = match condition {
            VehicleCondition::New => 'N',
            VehicleCondition::Used => 'U',
        };
        vehicles.push(Vehicle {
            key: format!("VEH-{:05}", i + 1),
            vin: gen.random_string(vocab::VIN_ALPHABET, 17)?,
            stock_number: format!("{}{:05}", stock_prefix, i + 1),
            year: year as i32,
            make: make.to_string(),
            model: model.to_string(),
            condition,
            mileage: mileage as u32,
            cost,
            msrp,
            selling_price,
            color: gen.pick(vocab::COLORS)?.to_string(),
            engine: gen.pick(vocab::ENGINES)?.to_string(),
            transmission: gen.pick(vocab::TRANSMISSIONS)?.to_string(),
            fuel_type: gen.pick(vocab::FUEL_TYPES)?.to_string(),
            body_style: gen.pick(vocab::BODY_STYLES)?.to_string(),
        });
    }
    tracing::debug!(count = vehicles.len(), "generated vehicles");
    Ok(vehicles)
}

#[allow(clippy::too_many_arguments)]
pub fn generate_deals<R: Rng>(
    gen: &mut Generator<R>,
    count: usize,
    customers: &[Customer],
    vehicles: &[Vehicle],
    employees: &[Employee],
    stores: &[Store],
    settings: &FactorySettings,
) -> Result<Vec<Deal>> {
    const FACTORY: &str = "deals";
    if count == 0 {
        return Ok(Vec::new());
    }
    require(FACTORY, "customers", customers)?;
    require(FACTORY, "vehicles", vehicles)?;
    require(FACTORY, "employees", employees)?;
    require(FACTORY, "stores", stores)?;
    let salespeople = staff_with_role(FACTORY, employees, Role::Salesperson)?;
    let finance_managers = staff_with_role(FACTORY, employees, Role::FinanceManager)?;

    let mut deals = Vec::with_capacity(count);
    for i in 0..count {
        let customer = gen.pick_one(customers)?;
        let vehicle = gen.pick_one(vehicles)?;
        let salesperson = gen.pick(&salespeople)?;
        let finance_manager = gen.pick(&finance_managers)?;
        let store = gen.pick_one(stores)?;
        let deal_type = gen.pick(DealType::ALL)?;

        let front_gross = gen.random_money(500.0, 6_000.0)?;
        let back_gross = match deal_type {
            DealType::Cash => gen.random_money(0.0, 800.0)?,
            DealType::Finance | DealType::Lease => gen.random_money(300.0, 3_500.0)?,
        };

        deals.push(Deal {
            key: format!("DEAL-{:05}", i + 1),
            deal_number: 10_001 + i as u32,
            deal_date: gen.date_in_past(settings.history_days)?,
            customer_key: customer.key.clone(),
            customer_name: customer.full_name(),
            vehicle_key: vehicle.key.clone(),
            vehicle_description: vehicle.description(),
            deal_type,
            status: gen.pick(DealStatus::ALL)?,
            front_gross,
            back_gross,
            total_gross: front_gross + back_gross,
            salesperson_id: salesperson.id.clone(),
            finance_manager_id: finance_manager.id.clone(),
            store_id: store.id,
        });
    }
    tracing::debug!(count = deals.len(), "generated deals");
    Ok(deals)
}

pub fn generate_appointments<R: Rng>(
    gen: &mut Generator<R>,
    count: usize,
    customers: &[Customer],
    vehicles: &[Vehicle],
    employees: &[Employee],
    settings: &FactorySettings,
) -> Result<Vec<ServiceAppointment>> {
    const FACTORY: &str = "appointments";
    if count == 0 {
        return Ok(Vec::new());
    }
    require(FACTORY, "customers", customers)?;
    require(FACTORY, "vehicles", vehicles)?;
    require(FACTORY, "employees", employees)?;
    let advisors = staff_with_role(FACTORY, employees, Role::ServiceAdvisor)?;

    let past = [
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];
    let upcoming = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Cancelled,
    ];

    let mut appointments = Vec::with_capacity(count);
    for i in 0..count {
        let customer = gen.pick_one(customers)?;
        let vehicle = gen.pick_one(vehicles)?;
        let advisor = gen.pick(&advisors)?;
        let scheduled_at = gen.date_around_anchor(settings.horizon_days / 2, settings.horizon_days)?;
        let status = if scheduled_at <= gen.anchor() {
            gen.pick(&past)?
        } else {
            gen.pick(&upcoming)?
        };
        let concern_count = gen.random_int(1, 3)? as usize;
        let concerns = gen
            .sample(vocab::SERVICE_CONCERNS, concern_count)
            .into_iter()
            .map(|c| c.to_string())
            .collect();

        appointments.push(ServiceAppointment {
            id: format!("APT-{:05}", i + 1),
            scheduled_at,
            status,
            estimated_duration_minutes: gen.random_int(2, 16)? as u32 * 15,
            concerns,
            customer_key: customer.key.clone(),
            customer_name: customer.full_name(),
            vehicle_key: vehicle.key.clone(),
            vehicle_description: vehicle.description(),
            advisor_id: advisor.id.clone(),
        });
    }
    tracing::debug!(count = appointments.len(), "generated appointments");
    Ok(appointments)
}

pub fn generate_repair_orders<R: Rng>(
    gen: &mut Generator<R>,
    count: usize,
    customers: &[Customer],
    vehicles: &[Vehicle],
    employees: &[Employee],
    settings: &FactorySettings,
) -> Result<Vec<RepairOrder>> {
    const FACTORY: &str = "repair_orders";
    if count == 0 {
        return Ok(Vec::new());
    }
    require(FACTORY, "customers", customers)?;
    require(FACTORY, "vehicles", vehicles)?;
    require(FACTORY, "employees", employees)?;
    let advisors = staff_with_role(FACTORY, employees, Role::ServiceAdvisor)?;
    let technicians = staff_with_role(FACTORY, employees, Role::Technician)?;

    let mut repair_orders = Vec::with_capacity(count);
    for i in 0..count {
        let customer = gen.pick_one(customers)?;
        let vehicle = gen.pick_one(vehicles)?;
        let advisor = gen.pick(&advisors)?;
        let technician = gen.pick(&technicians)?;
        let status = gen.pick(RepairOrderStatus::ALL)?;

        let opened_at = gen.date_in_past(settings.history_days)?;
        let promised_at = opened_at + Time::duration_hours(gen.random_int(4, 72)?);
        let closed_at = if status.is_finished() {
            let closed = opened_at + Time::duration_hours(gen.random_int(2, 120)?);
            Some(closed.min(gen.anchor()))
        } else {
            None
        };

        let labor = gen.random_money(80.0, 1_800.0)?;
        let parts = gen.random_money(0.0, 2_500.0)?;
        let sublet = if gen.chance(0.15)? {
            gen.random_money(50.0, 600.0)?
        } else {
            Money::zero(gen.currency())
        };
        let tax = (labor + parts).scale(settings.tax_rate);

        repair_orders.push(RepairOrder {
            id: format!("RO-{:05}", i + 1),
            ro_number: 50_001 + i as u32,
            status,
            opened_at,
            promised_at,
            closed_at,
            labor,
            parts,
            sublet,
            tax,
            total: labor + parts + sublet + tax,
            customer_key: customer.key.clone(),
            vehicle_key: vehicle.key.clone(),
            advisor_id: advisor.id.clone(),
            technician_id: technician.id.clone(),
        });
    }
    tracing::debug!(count = repair_orders.len(), "generated repair orders");
    Ok(repair_orders)
}

pub fn generate_orders<R: Rng>(
    gen: &mut Generator<R>,
    count: usize,
    customers: &[Customer],
    settings: &FactorySettings,
) -> Result<Vec<Order>> {
    const FACTORY: &str = "orders";
    if count == 0 {
        return Ok(Vec::new());
    }
    require(FACTORY, "customers", customers)?;

    let mut orders = Vec::with_capacity(count);
    for i in 0..count {
        let customer = gen.pick_one(customers)?;
        let order_type = gen.pick(OrderType::ALL)?;
        let total = match order_type {
            OrderType::Vehicle => gen.random_money(25_000.0, 90_000.0)?,
            OrderType::Parts => gen.random_money(50.0, 5_000.0)?,
            OrderType::Service => gen.random_money(100.0, 3_000.0)?,
            OrderType::Accessories => gen.random_money(50.0, 2_500.0)?,
        };

        let ordered_at = gen.date_in_past(settings.history_days)?;
        let expected_delivery = ordered_at + Time::duration_days(gen.random_int(3, 60)?);
        let logistics_status = gen.pick(LogisticsStatus::ALL)?;
        let actual_delivery = if logistics_status == LogisticsStatus::Delivered {
            let delivered = ordered_at + Time::duration_days(gen.random_int(2, 75)?);
            Some(delivered.min(gen.anchor()))
        } else {
            None
        };

        orders.push(Order {
            id: format!("ORD-{:05}", i + 1),
            order_number: 70_001 + i as u32,
            order_type,
            customer_key: customer.key.clone(),
            customer_name: customer.full_name(),
            status: gen.pick(OrderStatus::ALL)?,
            oem_status: gen.pick(OemStatus::ALL)?,
            upfitter_status: gen.pick(UpfitterStatus::ALL)?,
            logistics_status,
            payment_status: gen.pick(PaymentStatus::ALL)?,
            admin_status: gen.pick(AdminStatus::ALL)?,
            ordered_at,
            expected_delivery,
            actual_delivery,
            total,
            priority: gen.pick(Priority::ALL)?,
        });
    }
    tracing::debug!(count = orders.len(), "generated orders");
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashSet;

    fn generator() -> Generator {
        Generator::seeded(11).with_anchor(Time::from_secs(1_718_000_000))
    }

    fn employee(id: &str, role: Role) -> Employee {
        Employee {
            id: id.to_string(),
            first_name: "Test".to_string(),
            last_name: "Employee".to_string(),
            role,
            email: format!("{}@dealer.example.com", id),
            hire_date: Time::from_secs(1_600_000_000).date_naive(),
            is_active: true,
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut gen = generator();
        let settings = FactorySettings::default();
        assert!(generate_stores(&mut gen, 0).unwrap().is_empty());
        assert!(generate_employees(&mut gen, 0).unwrap().is_empty());
        assert!(generate_customers(&mut gen, 0).unwrap().is_empty());
        assert!(generate_vehicles(&mut gen, 0).unwrap().is_empty());
        assert!(generate_deals(&mut gen, 0, &[], &[], &[], &[], &settings).unwrap().is_empty());
        assert!(generate_appointments(&mut gen, 0, &[], &[], &[], &settings).unwrap().is_empty());
        assert!(generate_repair_orders(&mut gen, 0, &[], &[], &[], &settings).unwrap().is_empty());
        assert!(generate_orders(&mut gen, 0, &[], &settings).unwrap().is_empty());
    }

    #[test]
    fn test_unique_identities() {
        let mut gen = generator();
        let customers = generate_customers(&mut gen, 300).unwrap();
        let keys: HashSet<_> = customers.iter().map(|c| &c.key).collect();
        assert_eq!(keys.len(), 300);
        let emails: HashSet<_> = customers.iter().map(|c| &c.contact.email).collect();
        assert_eq!(emails.len(), 300);

        let vehicles = generate_vehicles(&mut gen, 200).unwrap();
        let stock: HashSet<_> = vehicles.iter().map(|v| &v.stock_number).collect();
        assert_eq!(stock.len(), 200);
    }

    #[test]
    fn test_first_employees_cover_every_staffed_role() {
        let mut gen = generator();
        let employees = generate_employees(&mut gen, 7).unwrap();
        let roles: HashSet<_> = employees.iter().map(|e| e.role).collect();
        assert_eq!(roles.len(), Role::STAFFED.len());
    }

    #[test]
    fn test_vehicle_pricing_is_ordered() {
        let mut gen = generator();
        for v in generate_vehicles(&mut gen, 100).unwrap() {
            assert!(v.cost.cents <= v.selling_price.cents);
            assert!(v.selling_price.cents <= v.msrp.cents);
            assert_eq!(v.vin.len(), 17);
            assert!(!v.vin.contains(['I', 'O', 'Q']));
            match v.condition {
                VehicleCondition::New => assert!(v.mileage <= 50),
                VehicleCondition::Used => assert!(v.mileage >= 5_000),
            }
        }
    }

    #[test]
    fn test_deal_gross_is_derived() {
        let mut gen = generator();
        let settings = FactorySettings::default();
        let stores = generate_stores(&mut gen, 2).unwrap();
        let employees = generate_employees(&mut gen, 10).unwrap();
        let customers = generate_customers(&mut gen, 20).unwrap();
        let vehicles = generate_vehicles(&mut gen, 20).unwrap();
        let deals =
            generate_deals(&mut gen, 50, &customers, &vehicles, &employees, &stores, &settings)
                .unwrap();

        assert_eq!(deals.len(), 50);
        for deal in &deals {
            assert_eq!(deal.total_gross.cents, deal.front_gross.cents + deal.back_gross.cents);
            let salesperson = employees.iter().find(|e| e.id == deal.salesperson_id).unwrap();
            assert_eq!(salesperson.role, Role::Salesperson);
            let finance = employees.iter().find(|e| e.id == deal.finance_manager_id).unwrap();
            assert_eq!(finance.role, Role::FinanceManager);
        }
    }

    #[test]
    fn test_deals_without_customers_fail() {
        let mut gen = generator();
        let settings = FactorySettings::default();
        let stores = generate_stores(&mut gen, 1).unwrap();
        let employees = generate_employees(&mut gen, 7).unwrap();
        let vehicles = generate_vehicles(&mut gen, 3).unwrap();
        let err = generate_deals(&mut gen, 5, &[], &vehicles, &employees, &stores, &settings)
            .unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::MissingDependency {
                factory: "deals".to_string(),
                dependency: "customers".to_string(),
            }
        );
    }

    fn missing(factory: &str, dependency: &str) -> ErrorKind {
        ErrorKind::MissingDependency {
            factory: factory.to_string(),
            dependency: dependency.to_string(),
        }
    }

    #[test]
    fn test_appointments_without_vehicles_fail() {
        let mut gen = generator();
        let settings = FactorySettings::default();
        let customers = generate_customers(&mut gen, 3).unwrap();
        let employees = generate_employees(&mut gen, 7).unwrap();
        let err = generate_appointments(&mut gen, 4, &customers, &[], &employees, &settings)
            .unwrap_err();
        assert_eq!(err.kind, missing("appointments", "vehicles"));
        assert!(err.is_critical());
    }

    #[test]
    fn test_repair_orders_without_customers_fail() {
        let mut gen = generator();
        let settings = FactorySettings::default();
        let vehicles = generate_vehicles(&mut gen, 3).unwrap();
        let employees = generate_employees(&mut gen, 7).unwrap();
        let err = generate_repair_orders(&mut gen, 4, &[], &vehicles, &employees, &settings)
            .unwrap_err();
        assert_eq!(err.kind, missing("repair_orders", "customers"));
    }

    #[test]
    fn test_orders_without_customers_fail() {
        let mut gen = generator();
        let err = generate_orders(&mut gen, 4, &[], &FactorySettings::default()).unwrap_err();
        assert_eq!(err.kind, missing("orders", "customers"));
    }

    #[test]
    fn test_repair_orders_without_technicians_fail() {
        let mut gen = generator();
        let settings = FactorySettings::default();
        let customers = generate_customers(&mut gen, 5).unwrap();
        let vehicles = generate_vehicles(&mut gen, 5).unwrap();
        let employees = vec![
            employee("EMP-0001", Role::ServiceAdvisor),
            employee("EMP-0002", Role::Salesperson),
        ];
        let err = generate_repair_orders(&mut gen, 80, &customers, &vehicles, &employees, &settings)
            .unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::EmptyPopulation { ref factory, ref role }
                if factory == "repair_orders" && role == "Technician"
        ));
    }

    #[test]
    fn test_repair_order_totals() {
        let mut gen = generator();
        let settings = FactorySettings::default();
        let customers = generate_customers(&mut gen, 10).unwrap();
        let vehicles = generate_vehicles(&mut gen, 10).unwrap();
        let employees = generate_employees(&mut gen, 7).unwrap();
        let orders =
            generate_repair_orders(&mut gen, 80, &customers, &vehicles, &employees, &settings)
                .unwrap();

        for ro in &orders {
            assert_eq!(
                ro.total.cents,
                ro.labor.cents + ro.parts.cents + ro.sublet.cents + ro.tax.cents
            );
            assert_eq!(ro.tax, (ro.labor + ro.parts).scale(settings.tax_rate));
            assert!(ro.promised_at > ro.opened_at);
            assert_eq!(ro.closed_at.is_some(), ro.status.is_finished());
            if let Some(closed) = ro.closed_at {
                assert!(closed >= ro.opened_at && closed <= gen.anchor());
            }
        }
    }

    #[test]
    fn test_appointment_status_matches_schedule() {
        let mut gen = generator();
        let settings = FactorySettings::default();
        let customers = generate_customers(&mut gen, 10).unwrap();
        let vehicles = generate_vehicles(&mut gen, 10).unwrap();
        let employees = generate_employees(&mut gen, 7).unwrap();
        let anchor = gen.anchor();
        let appointments =
            generate_appointments(&mut gen, 60, &customers, &vehicles, &employees, &settings)
                .unwrap();

        for apt in &appointments {
            if apt.scheduled_at > anchor {
                assert!(!matches!(
                    apt.status,
                    AppointmentStatus::Completed | AppointmentStatus::NoShow
                ));
            }
            assert!((1..=3).contains(&apt.concerns.len()));
            assert_eq!(apt.estimated_duration_minutes % 15, 0);
        }
    }

    #[test]
    fn test_order_delivery_tracks_logistics() {
        let mut gen = generator();
        let settings = FactorySettings::default();
        let customers = generate_customers(&mut gen, 10).unwrap();
        let orders = generate_orders(&mut gen, 40, &customers, &settings).unwrap();

        assert_eq!(orders.len(), 40);
        for order in &orders {
            assert_eq!(
                order.actual_delivery.is_some(),
                order.logistics_status == LogisticsStatus::Delivered
            );
            assert!(order.expected_delivery > order.ordered_at);
            assert!(customers.iter().any(|c| c.key == order.customer_key));
        }
    }
}
