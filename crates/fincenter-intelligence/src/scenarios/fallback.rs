//! Built-in scenarios used whenever the generator cannot supply any.

use super::Scenario;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn fallback_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::named(
            "Supply Chain Stress",
            0.35,
            "Key vendor contracts lapse without renewal while unpaid invoices pile up, \
             straining supplier relationships and procurement capacity.",
            -12.0,
            -18.0,
            strings(&[
                "Vendor service interruption",
                "Emergency procurement at premium prices",
                "Operational delays",
            ]),
            strings(&[
                "Expedite contract renewals",
                "Clear overdue invoices",
                "Identify alternative vendors",
            ]),
        ),
        Scenario::named(
            "Budget Overrun Cascade",
            0.28,
            "Departments over their targets push quarterly forecasts off track and \
             force emergency cost-cutting.",
            -15.0,
            -10.0,
            strings(&[
                "FY target miss",
                "Reduced investment capacity",
                "Staff morale impact from cuts",
            ]),
            strings(&[
                "Freeze discretionary spending",
                "Reallocate under-budget department funds",
                "Monthly variance reviews",
            ]),
        ),
        Scenario::named(
            "Controlled Recovery",
            0.42,
            "Timely renewals and invoice resolution ease financial stress and free \
             capital for strategic investment.",
            5.0,
            8.0,
            strings(&["Execution risk on action plan", "Market conditions"]),
            strings(&[
                "Execute top-priority recommendations",
                "Monthly KPI tracking",
                "Engage strategic vendors for multi-year deals",
            ]),
        ),
    ]
}
