// src/data/kpi.rs - Role-based KPI synthesis

//! KPI records for the role dashboards.
//!
//! Which KPIs a role sees, and in what order, comes from a fixed table.
//! Only the values are random: current and previous are drawn
//! independently from the metric's range, and the change is always
//! `current - previous` rounded to cents.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entities::Role;
use super::money::{group_thousands, Currency};
use super::random::Generator;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiFormat {
    Currency,
    Number,
    Percentage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Increase,
    Decrease,
    Neutral,
}

/// Numeric value, or text the dashboard shows as-is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KpiValue {
    Number(f64),
    Text(String),
}

impl KpiValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub id: String,
    pub title: String,
    pub value: KpiValue,
    pub previous_value: Option<f64>,
    pub change: f64,
    pub change_type: ChangeType,
    pub format: KpiFormat,
    pub currency: Option<Currency>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub target: Option<f64>,
}

impl Kpi {
    /// Value as the widget prints it: `$412,345`, `1,234`, `87.5%`
    pub fn display_value(&self) -> String {
        match &self.value {
            KpiValue::Number(n) => format_value(*n, self.format, self.currency),
            KpiValue::Text(text) => text.clone(),
        }
    }

    /// Signed change with a trend arrow, e.g. `↗ +$1,250` or `↘ -2.5%`
    pub fn display_change(&self) -> String {
        let arrow = match self.change_type {
            ChangeType::Increase => "↗ +",
            ChangeType::Decrease => "↘ -",
            ChangeType::Neutral => "",
        };
        format!(
            "{}{}",
            arrow,
            format_value(self.change.abs(), self.format, self.currency)
        )
    }

    /// Relative change against the previous period, in percent
    pub fn change_percent(&self) -> Option<f64> {
        let previous = self.previous_value?;
        (previous != 0.0).then(|| round_to(self.change / previous * 100.0, 1))
    }

    /// Progress toward the target, in percent
    pub fn target_progress(&self) -> Option<f64> {
        let target = self.target?;
        let current = self.value.as_number()?;
        (target != 0.0).then(|| round_to(current / target * 100.0, 1))
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn format_value(value: f64, format: KpiFormat, currency: Option<Currency>) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    match format {
        KpiFormat::Currency => {
            let symbol = currency.unwrap_or_default().symbol();
            format!("{}{}{}", sign, symbol, group_thousands(abs.round() as u64))
        }
        KpiFormat::Number if abs.fract() == 0.0 => {
            format!("{}{}", sign, group_thousands(abs as u64))
        }
        KpiFormat::Number => format!("{}{:.1}", sign, abs),
        KpiFormat::Percentage => format!("{}{:.1}%", sign, abs),
    }
}

/// One row of a role's KPI table
#[derive(Debug, Clone, Copy)]
struct KpiDefinition {
    id: &'static str,
    title: &'static str,
    format: KpiFormat,
    min: f64,
    max: f64,
    /// Values are whole numbers (counts, days, hours)
    integral: bool,
    target: Option<f64>,
    icon: &'static str,
    color: &'static str,
}

const fn currency(id: &'static str, title: &'static str, min: f64, max: f64) -> KpiDefinition {
    KpiDefinition {
        id,
        title,
        format: KpiFormat::Currency,
        min,
        max,
        integral: false,
        target: None,
        icon: "dollar-sign",
        color: "green",
    }
}

const fn count(id: &'static str, title: &'static str, min: f64, max: f64) -> KpiDefinition {
    KpiDefinition {
        id,
        title,
        format: KpiFormat::Number,
        min,
        max,
        integral: true,
        target: None,
        icon: "hash",
        color: "blue",
    }
}

const fn ratio(id: &'static str, title: &'static str, min: f64, max: f64) -> KpiDefinition {
    KpiDefinition {
        id,
        title,
        format: KpiFormat::Number,
        min,
        max,
        integral: false,
        target: None,
        icon: "activity",
        color: "indigo",
    }
}

const fn percent(id: &'static str, title: &'static str, min: f64, max: f64) -> KpiDefinition {
    KpiDefinition {
        id,
        title,
        format: KpiFormat::Percentage,
        min,
        max,
        integral: false,
        target: None,
        icon: "percent",
        color: "purple",
    }
}

impl KpiDefinition {
    const fn target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }

    const fn icon(mut self, icon: &'static str, color: &'static str) -> Self {
        self.icon = icon;
        self.color = color;
        self
    }
}

const GENERAL_MANAGER: &[KpiDefinition] = &[
    currency("total-revenue", "Total Revenue", 1_500_000.0, 3_500_000.0).target(3_000_000.0),
    currency("gross-profit", "Gross Profit", 250_000.0, 600_000.0).icon("trending-up", "green"),
    count("units-sold", "Units Sold", 80.0, 220.0).icon("car", "blue").target(200.0),
    currency("service-revenue", "Service Revenue", 150_000.0, 400_000.0).icon("wrench", "orange"),
    percent("customer-satisfaction", "Customer Satisfaction", 80.0, 99.0)
        .icon("smile", "yellow")
        .target(95.0),
    ratio("inventory-turn", "Inventory Turn", 6.0, 14.0).icon("refresh-cw", "indigo"),
];

const SALES_MANAGER: &[KpiDefinition] = &[
    count("units-sold", "Units Sold", 80.0, 220.0).icon("car", "blue").target(200.0),
    currency("front-gross", "Front-End Gross", 150_000.0, 400_000.0),
    currency("avg-gross-per-unit", "Avg Gross per Unit", 1_500.0, 4_500.0),
    percent("closing-ratio", "Closing Ratio", 10.0, 35.0).target(25.0),
    count("showroom-traffic", "Showroom Traffic", 400.0, 1_200.0).icon("users", "teal"),
];

const SERVICE_MANAGER: &[KpiDefinition] = &[
    currency("service-revenue", "Service Revenue", 150_000.0, 400_000.0).icon("wrench", "orange"),
    count("repair-orders", "Repair Orders", 400.0, 1_100.0).icon("clipboard", "blue"),
    currency("avg-ro-value", "Average RO Value", 250.0, 650.0),
    percent("tech-efficiency", "Technician Efficiency", 85.0, 125.0).target(110.0),
    percent("csi-score", "Service CSI", 80.0, 99.0).icon("smile", "yellow").target(95.0),
];

const FINANCE_MANAGER: &[KpiDefinition] = &[
    currency("backend-gross", "Back-End Gross", 100_000.0, 300_000.0),
    currency("pvr", "Per Vehicle Retail", 1_200.0, 2_800.0).target(2_000.0),
    percent("finance-penetration", "Finance Penetration", 55.0, 85.0),
    percent("warranty-penetration", "Service Contract Penetration", 30.0, 65.0)
        .icon("shield", "purple"),
    count("deals-funded", "Deals Funded", 60.0, 200.0).icon("check-circle", "green"),
];

const SALESPERSON: &[KpiDefinition] = &[
    count("my-units", "My Units Sold", 5.0, 25.0).icon("car", "blue").target(15.0),
    currency("my-gross", "My Gross Profit", 10_000.0, 60_000.0),
    currency("my-commission", "My Commission", 3_000.0, 15_000.0),
    count("active-leads", "Active Leads", 10.0, 60.0).icon("user-plus", "teal"),
    percent("my-closing-ratio", "My Closing Ratio", 10.0, 40.0),
];

const SERVICE_ADVISOR: &[KpiDefinition] = &[
    count("my-ros", "My Repair Orders", 60.0, 180.0).icon("clipboard", "blue"),
    currency("my-labor-sales", "My Labor Sales", 20_000.0, 70_000.0).target(55_000.0),
    currency("my-avg-ro", "My Average RO", 250.0, 650.0),
    count("appointments-today", "Appointments Today", 5.0, 30.0).icon("calendar", "indigo"),
    percent("upsell-rate", "Upsell Rate", 15.0, 45.0),
];

const TECHNICIAN: &[KpiDefinition] = &[
    ratio("flagged-hours", "Flagged Hours", 80.0, 220.0).icon("clock", "blue").target(160.0),
    percent("efficiency", "Efficiency", 85.0, 140.0).target(115.0),
    count("jobs-completed", "Jobs Completed", 40.0, 140.0).icon("check-circle", "green"),
    percent("comeback-rate", "Comeback Rate", 0.5, 6.0).icon("rotate-ccw", "red"),
];

const PARTS_COUNTER: &[KpiDefinition] = &[
    currency("parts-sales", "Parts Sales", 80_000.0, 250_000.0).icon("package", "orange"),
    percent("parts-gross-margin", "Parts Gross Margin", 25.0, 45.0).target(40.0),
    percent("fill-rate", "Fill Rate", 80.0, 98.0).target(95.0),
    currency("inventory-value", "Inventory Value", 300_000.0, 900_000.0).icon("archive", "gray"),
    count("special-orders", "Special Orders", 20.0, 120.0).icon("truck", "indigo"),
];

const ACCOUNTANT: &[KpiDefinition] = &[
    currency("net-profit", "Net Profit", 80_000.0, 350_000.0).icon("trending-up", "green"),
    currency("accounts-receivable", "Accounts Receivable", 200_000.0, 750_000.0),
    currency("contracts-in-transit", "Contracts in Transit", 300_000.0, 1_200_000.0),
    count("days-to-fund", "Days to Fund", 2.0, 12.0).icon("calendar", "indigo").target(5.0),
    currency("operating-expenses", "Operating Expenses", 400_000.0, 900_000.0)
        .icon("credit-card", "red"),
];

fn definitions(role: Role) -> &'static [KpiDefinition] {
    match role {
        Role::GeneralManager => GENERAL_MANAGER,
        Role::SalesManager => SALES_MANAGER,
        Role::ServiceManager => SERVICE_MANAGER,
        Role::FinanceManager => FINANCE_MANAGER,
        Role::Salesperson => SALESPERSON,
        Role::ServiceAdvisor => SERVICE_ADVISOR,
        Role::Technician => TECHNICIAN,
        Role::PartsCounter => PARTS_COUNTER,
        Role::Accountant => ACCOUNTANT,
    }
}

/// KPI ids and titles for a role, in display order
pub fn kpi_schema(role: Role) -> Vec<(&'static str, &'static str)> {
    definitions(role).iter().map(|d| (d.id, d.title)).collect()
}

/// KPIs for a role identifier; unknown identifiers get an empty list
pub fn kpis_for<R: Rng>(gen: &mut Generator<R>, role: &str) -> Result<Vec<Kpi>> {
    match role.parse::<Role>() {
        Ok(role) => kpis_for_role(gen, role),
        Err(_) => {
            tracing::debug!("No KPI schema for role '{}'", role);
            Ok(Vec::new())
        }
    }
}

pub fn kpis_for_role<R: Rng>(gen: &mut Generator<R>, role: Role) -> Result<Vec<Kpi>> {
    definitions(role)
        .iter()
        .map(|definition| synthesize(gen, definition))
        .collect()
}

fn draw<R: Rng>(gen: &mut Generator<R>, definition: &KpiDefinition) -> Result<f64> {
    if definition.integral {
        Ok(gen.random_int(definition.min as i64, definition.max as i64)? as f64)
    } else {
        Ok(gen.random_currency(definition.min, definition.max)?)
    }
}

fn synthesize<R: Rng>(gen: &mut Generator<R>, definition: &KpiDefinition) -> Result<Kpi> {
    let current = draw(gen, definition)?;
    let previous = draw(gen, definition)?;
    let change = round_to(current - previous, 2);
    let change_type = if change > 0.0 {
        ChangeType::Increase
    } else if change < 0.0 {
        ChangeType::Decrease
    } else {
        ChangeType::Neutral
    };

    Ok(Kpi {
        id: definition.id.to_string(),
        title: definition.title.to_string(),
        value: KpiValue::Number(current),
        previous_value: Some(previous),
        change,
        change_type,
        format: definition.format,
        currency: (definition.format == KpiFormat::Currency).then(|| gen.currency()),
        icon: Some(definition.icon.to_string()),
        color: Some(definition.color.to_string()),
        target: definition.target,
    })
}
