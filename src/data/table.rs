// src/data/table.rs - Typed column sorting for the dashboard tables

//! Each table has a field enum parsed from the UI's column identifier
//! (`"dealDate"`, `"totalGross"`, ...). A field maps to a [`SortKey`]
//! extractor, so sorting never goes through string-keyed property access.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::entities::*;
use crate::error::{Error, Result};
use crate::types::Timestamp;

/// Comparable value pulled out of a row
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey<'a> {
    Text(&'a str),
    Int(i64),
    Time(Timestamp),
    /// Missing values sort before present ones
    OptionalTime(Option<Timestamp>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(Error::validation("direction", format!("unknown sort direction '{}'", s))),
        }
    }
}

/// A column of a row type that can be sorted on
pub trait SortField<T>: Copy {
    fn key<'a>(&self, row: &'a T) -> SortKey<'a>;
}

/// Stable sort of `rows` by `field`; ties keep their generation order
pub fn sort_rows<T, F: SortField<T>>(rows: &mut [T], field: F, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ordering = field.key(a).cmp(&field.key(b));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Sorted copy of borrowed rows, for read-only snapshots
pub fn sorted<'a, T, F: SortField<T>>(
    rows: &'a [T],
    field: F,
    direction: SortDirection,
) -> Vec<&'a T> {
    let mut view: Vec<&T> = rows.iter().collect();
    view.sort_by(|a, b| {
        let ordering: Ordering = field.key(a).cmp(&field.key(b));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    view
}

/// Declares a field enum with its column ids and extractors
macro_rules! sort_fields {
    ($name:ident for $row:ty { $($variant:ident => $column:literal, |$r:ident| $key:expr;)+ }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Column identifier the UI uses
            pub fn column(&self) -> &'static str {
                match self {
                    $($name::$variant => $column),+
                }
            }
        }

        impl SortField<$row> for $name {
            fn key<'a>(&self, row: &'a $row) -> SortKey<'a> {
                match self {
                    $($name::$variant => { let $r = row; $key }),+
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|field| field.column() == s)
                    .ok_or_else(|| {
                        Error::validation(
                            "sort",
                            format!("unknown {} column '{}'", stringify!($row), s),
                        )
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.column())
            }
        }
    };
}

fn rank<T: Ord + Copy>(all: &[T], value: T) -> SortKey<'static> {
    SortKey::Int(all.iter().position(|v| *v == value).unwrap_or(all.len()) as i64)
}

sort_fields!(DealField for Deal {
    Key => "key", |d| SortKey::Text(&d.key);
    DealNumber => "dealNumber", |d| SortKey::Int(i64::from(d.deal_number));
    DealDate => "dealDate", |d| SortKey::Time(d.deal_date);
    CustomerName => "customerName", |d| SortKey::Text(&d.customer_name);
    VehicleDescription => "vehicleDescription", |d| SortKey::Text(&d.vehicle_description);
    DealType => "dealType", |d| rank(DealType::ALL, d.deal_type);
    Status => "status", |d| rank(DealStatus::ALL, d.status);
    FrontGross => "frontGross", |d| SortKey::Int(d.front_gross.cents);
    BackGross => "backGross", |d| SortKey::Int(d.back_gross.cents);
    TotalGross => "totalGross", |d| SortKey::Int(d.total_gross.cents);
    StoreId => "storeId", |d| SortKey::Int(i64::from(d.store_id));
});

sort_fields!(AppointmentField for ServiceAppointment {
    Id => "id", |a| SortKey::Text(&a.id);
    ScheduledAt => "scheduledAt", |a| SortKey::Time(a.scheduled_at);
    Status => "status", |a| rank(AppointmentStatus::ALL, a.status);
    Duration => "estimatedDurationMinutes", |a| SortKey::Int(i64::from(a.estimated_duration_minutes));
    CustomerName => "customerName", |a| SortKey::Text(&a.customer_name);
    VehicleDescription => "vehicleDescription", |a| SortKey::Text(&a.vehicle_description);
});

sort_fields!(RepairOrderField for RepairOrder {
    Id => "id", |r| SortKey::Text(&r.id);
    RoNumber => "roNumber", |r| SortKey::Int(i64::from(r.ro_number));
    Status => "status", |r| rank(RepairOrderStatus::ALL, r.status);
    OpenedAt => "openedAt", |r| SortKey::Time(r.opened_at);
    PromisedAt => "promisedAt", |r| SortKey::Time(r.promised_at);
    ClosedAt => "closedAt", |r| SortKey::OptionalTime(r.closed_at);
    Labor => "labor", |r| SortKey::Int(r.labor.cents);
    Total => "total", |r| SortKey::Int(r.total.cents);
});

sort_fields!(OrderField for Order {
    Id => "id", |o| SortKey::Text(&o.id);
    OrderNumber => "orderNumber", |o| SortKey::Int(i64::from(o.order_number));
    OrderType => "orderType", |o| rank(OrderType::ALL, o.order_type);
    CustomerName => "customerName", |o| SortKey::Text(&o.customer_name);
    Status => "status", |o| rank(OrderStatus::ALL, o.status);
    OrderedAt => "orderedAt", |o| SortKey::Time(o.ordered_at);
    ExpectedDelivery => "expectedDelivery", |o| SortKey::Time(o.expected_delivery);
    Total => "total", |o| SortKey::Int(o.total.cents);
    Priority => "priority", |o| rank(Priority::ALL, o.priority);
});

sort_fields!(VehicleField for Vehicle {
    Key => "key", |v| SortKey::Text(&v.key);
    StockNumber => "stockNumber", |v| SortKey::Text(&v.stock_number);
    Year => "year", |v| SortKey::Int(i64::from(v.year));
    Make => "make", |v| SortKey::Text(&v.make);
    Model => "model", |v| SortKey::Text(&v.model);
    Mileage => "mileage", |v| SortKey::Int(i64::from(v.mileage));
    Msrp => "msrp", |v| SortKey::Int(v.msrp.cents);
    SellingPrice => "sellingPrice", |v| SortKey::Int(v.selling_price.cents);
});

sort_fields!(CustomerField for Customer {
    Key => "key", |c| SortKey::Text(&c.key);
    FirstName => "firstName", |c| SortKey::Text(&c.first_name);
    LastName => "lastName", |c| SortKey::Text(&c.last_name);
    CustomerType => "customerType", |c| rank(CustomerType::ALL, c.customer_type);
    CreatedAt => "createdAt", |c| SortKey::Time(c.created_at);
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::{Dataset, DatasetCounts};
    use crate::data::factories::FactorySettings;
    use crate::data::random::Generator;
    use crate::utils::Time;

    fn dataset() -> Dataset {
        let mut gen = Generator::seeded(11).with_anchor(Time::from_secs(1_700_000_000));
        Dataset::generate(&mut gen, &DatasetCounts::default(), &FactorySettings::default())
            .unwrap()
    }

    fn assert_monotone<T, F: SortField<T>>(rows: &[&T], field: F, direction: SortDirection) {
        for pair in rows.windows(2) {
            let ordering = field.key(pair[0]).cmp(&field.key(pair[1]));
            match direction {
                SortDirection::Ascending => assert_ne!(ordering, Ordering::Greater),
                SortDirection::Descending => assert_ne!(ordering, Ordering::Less),
            }
        }
    }

    #[test]
    fn test_every_field_sorts_monotonically() {
        let dataset = dataset();
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            for field in DealField::ALL {
                assert_monotone(&sorted(dataset.deals(), *field, direction), *field, direction);
            }
            for field in AppointmentField::ALL {
                assert_monotone(&sorted(dataset.appointments(), *field, direction), *field, direction);
            }
            for field in RepairOrderField::ALL {
                assert_monotone(&sorted(dataset.repair_orders(), *field, direction), *field, direction);
            }
            for field in OrderField::ALL {
                assert_monotone(&sorted(dataset.orders(), *field, direction), *field, direction);
            }
            for field in VehicleField::ALL {
                assert_monotone(&sorted(dataset.vehicles(), *field, direction), *field, direction);
            }
            for field in CustomerField::ALL {
                assert_monotone(&sorted(dataset.customers(), *field, direction), *field, direction);
            }
        }
    }

    #[test]
    fn test_column_ids_parse() {
        assert_eq!("totalGross".parse::<DealField>().unwrap(), DealField::TotalGross);
        assert_eq!("closedAt".parse::<RepairOrderField>().unwrap(), RepairOrderField::ClosedAt);
        assert!("total_gross".parse::<DealField>().is_err());
        for field in OrderField::ALL {
            assert_eq!(field.column().parse::<OrderField>().unwrap(), *field);
        }
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Descending);
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_sort_rows_in_place_is_stable() {
        let mut deals = dataset().deals().to_vec();
        sort_rows(&mut deals, DealField::Status, SortDirection::Ascending);
        for pair in deals.windows(2) {
            if pair[0].status == pair[1].status {
                assert!(pair[0].deal_number < pair[1].deal_number);
            }
        }
        sort_rows(&mut deals, DealField::DealNumber, SortDirection::Descending);
        assert_eq!(deals[0].deal_number, 10_120);
    }

    #[test]
    fn test_missing_close_dates_sort_first() {
        let dataset = dataset();
        let rows = sorted(dataset.repair_orders(), RepairOrderField::ClosedAt, SortDirection::Ascending);
        let first_closed = rows.iter().position(|r| r.closed_at.is_some());
        if let Some(index) = first_closed {
            assert!(rows[index..].iter().all(|r| r.closed_at.is_some()));
        }
        assert_eq!(SortDirection::Ascending.toggle(), SortDirection::Descending);
    }
}
