// src/data/entities.rs - Generated dealership entities

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;
use crate::types::Timestamp;

/// Declares a closed set of display values: the enum, its `ALL` table,
/// a human label and `Display`.
macro_rules! labeled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labeled_enum!(
    /// Job function. Seven roles are staffed by generated employees; parts
    /// counter and accountant exist only as dashboard (KPI) roles.
    Role {
        GeneralManager => "General Manager",
        SalesManager => "Sales Manager",
        ServiceManager => "Service Manager",
        FinanceManager => "Finance Manager",
        Salesperson => "Salesperson",
        ServiceAdvisor => "Service Advisor",
        Technician => "Technician",
        PartsCounter => "Parts Counter",
        Accountant => "Accountant",
    }
);

impl Role {
    /// Roles the employee factory assigns
    pub const STAFFED: &'static [Role] = &[
        Role::Salesperson,
        Role::ServiceAdvisor,
        Role::Technician,
        Role::FinanceManager,
        Role::ServiceManager,
        Role::SalesManager,
        Role::GeneralManager,
    ];

    /// Kebab-case identifier used by the dashboard and the CLI
    pub fn id(&self) -> &'static str {
        match self {
            Role::GeneralManager => "general-manager",
            Role::SalesManager => "sales-manager",
            Role::ServiceManager => "service-manager",
            Role::FinanceManager => "finance-manager",
            Role::Salesperson => "salesperson",
            Role::ServiceAdvisor => "service-advisor",
            Role::Technician => "technician",
            Role::PartsCounter => "parts-counter",
            Role::Accountant => "accountant",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    /// Accepts `general-manager`, `general_manager`, `General Manager`, `generalManager`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.id().replace('-', "") == normalized)
            .ok_or_else(|| format!("unknown role: {}", s))
    }
}

labeled_enum!(CustomerType {
    Retail => "Retail",
    Wholesale => "Wholesale",
    Fleet => "Fleet",
});

labeled_enum!(VehicleCondition {
    New => "New",
    Used => "Used",
});

labeled_enum!(DealType {
    Cash => "Cash",
    Finance => "Finance",
    Lease => "Lease",
});

labeled_enum!(DealStatus {
    Open => "Open",
    Closed => "Closed",
    Delivered => "Delivered",
});

labeled_enum!(AppointmentStatus {
    Scheduled => "Scheduled",
    Confirmed => "Confirmed",
    InProgress => "In Progress",
    Completed => "Completed",
    Cancelled => "Cancelled",
    NoShow => "No Show",
});

labeled_enum!(RepairOrderStatus {
    Open => "Open",
    InProgress => "In Progress",
    WaitingParts => "Waiting Parts",
    WaitingApproval => "Waiting Approval",
    Completed => "Completed",
    Invoiced => "Invoiced",
    Closed => "Closed",
    Cancelled => "Cancelled",
});

impl RepairOrderStatus {
    /// Work finished; the order carries a close date
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Invoiced | Self::Closed)
    }
}

labeled_enum!(OrderType {
    Vehicle => "Vehicle",
    Parts => "Parts",
    Service => "Service",
    Accessories => "Accessories",
});

labeled_enum!(OrderStatus {
    Pending => "Pending",
    Confirmed => "Confirmed",
    InProduction => "In Production",
    Shipped => "Shipped",
    Delivered => "Delivered",
    Cancelled => "Cancelled",
});

labeled_enum!(OemStatus {
    NotSubmitted => "Not Submitted",
    Submitted => "Submitted",
    Acknowledged => "Acknowledged",
    Scheduled => "Scheduled",
    Built => "Built",
});

labeled_enum!(UpfitterStatus {
    NotRequired => "Not Required",
    Pending => "Pending",
    InProgress => "In Progress",
    Completed => "Completed",
});

labeled_enum!(LogisticsStatus {
    AwaitingPickup => "Awaiting Pickup",
    InTransit => "In Transit",
    Delayed => "Delayed",
    Delivered => "Delivered",
});

labeled_enum!(PaymentStatus {
    Pending => "Pending",
    Partial => "Partial",
    Paid => "Paid",
    Refunded => "Refunded",
});

labeled_enum!(AdminStatus {
    Incomplete => "Incomplete",
    UnderReview => "Under Review",
    Approved => "Approved",
});

labeled_enum!(Priority {
    Low => "Low",
    Medium => "Medium",
    High => "High",
    Critical => "Critical",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {} {}",
            self.street, self.city, self.state, self.postal_code
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: u32,
    pub name: String,
    pub legal_name: String,
    pub address: Address,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub email: String,
    pub hire_date: NaiveDate,
    pub is_active: bool,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub address: Address,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverLicense {
    pub number: String,
    pub state: String,
    pub expires_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub key: String,
    pub first_name: String,
    pub last_name: String,
    pub contact: ContactInfo,
    pub customer_type: CustomerType,
    pub license: Option<DriverLicense>,
    pub created_at: Timestamp,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub key: String,
    pub vin: String,
    pub stock_number: String,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub condition: VehicleCondition,
    pub mileage: u32,
    pub cost: Money,
    pub msrp: Money,
    pub selling_price: Money,
    pub color: String,
    pub engine: String,
    pub transmission: String,
    pub fuel_type: String,
    pub body_style: String,
}

impl Vehicle {
    /// `"2023 Toyota Camry"`
    pub fn description(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub key: String,
    pub deal_number: u32,
    pub deal_date: Timestamp,
    pub customer_key: String,
    pub customer_name: String,
    pub vehicle_key: String,
    pub vehicle_description: String,
    pub deal_type: DealType,
    pub status: DealStatus,
    pub front_gross: Money,
    pub back_gross: Money,
    pub total_gross: Money,
    pub salesperson_id: String,
    pub finance_manager_id: String,
    pub store_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAppointment {
    pub id: String,
    pub scheduled_at: Timestamp,
    pub status: AppointmentStatus,
    pub estimated_duration_minutes: u32,
    pub concerns: Vec<String>,
    pub customer_key: String,
    pub customer_name: String,
    pub vehicle_key: String,
    pub vehicle_description: String,
    pub advisor_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairOrder {
    pub id: String,
    pub ro_number: u32,
    pub status: RepairOrderStatus,
    pub opened_at: Timestamp,
    pub promised_at: Timestamp,
    pub closed_at: Option<Timestamp>,
    pub labor: Money,
    pub parts: Money,
    pub sublet: Money,
    pub tax: Money,
    pub total: Money,
    pub customer_key: String,
    pub vehicle_key: String,
    pub advisor_id: String,
    pub technician_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_number: u32,
    pub order_type: OrderType,
    pub customer_key: String,
    pub customer_name: String,
    pub status: OrderStatus,
    pub oem_status: OemStatus,
    pub upfitter_status: UpfitterStatus,
    pub logistics_status: LogisticsStatus,
    pub payment_status: PaymentStatus,
    pub admin_status: AdminStatus,
    pub ordered_at: Timestamp,
    pub expected_delivery: Timestamp,
    pub actual_delivery: Option<Timestamp>,
    pub total: Money,
    pub priority: Priority,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("general-manager".parse::<Role>().unwrap(), Role::GeneralManager);
        assert_eq!("service_advisor".parse::<Role>().unwrap(), Role::ServiceAdvisor);
        assert_eq!("Parts Counter".parse::<Role>().unwrap(), Role::PartsCounter);
        assert_eq!("financeManager".parse::<Role>().unwrap(), Role::FinanceManager);
        assert!("janitor".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_tables() {
        assert_eq!(Role::ALL.len(), 9);
        assert_eq!(Role::STAFFED.len(), 7);
        assert!(!Role::STAFFED.contains(&Role::PartsCounter));
        assert!(!Role::STAFFED.contains(&Role::Accountant));
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&RepairOrderStatus::WaitingParts).unwrap(),
            "\"waiting_parts\""
        );
        assert_eq!(AppointmentStatus::NoShow.to_string(), "No Show");
        assert!(RepairOrderStatus::Invoiced.is_finished());
        assert!(!RepairOrderStatus::Cancelled.is_finished());
    }
}
