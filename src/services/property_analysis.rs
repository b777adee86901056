//! Per-property financial analysis
//!
//! Interest-only mortgage model: the monthly payment is balance × rate / 12.
//! The base case uses phase-2 (refinanced) figures, falling back to phase 1
//! where phase 2 is blank.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::DashboardSettings;
use crate::models::dashboard::KpiCard;
use crate::models::property::{
    AppreciationTimeline, CapitalPosition, CapitalSource, FinancialInputs, PortfolioOverview,
    PortfolioRow, PortfolioTotals, PropertyAnalysis, PropertyMetrics, PropertySummary,
    ScenarioResult,
};
use crate::models::records::{same_address, CapitalTransaction, Property, Scenario, Valuation};
use crate::services::aggregation::{summarize, summarize_capital};
use crate::services::breakeven::{estimate_breakeven, Breakeven, BreakevenConfig, ValuePoint};
use crate::services::formatting::{format_date, format_month};
use crate::services::snapshot::PortfolioSnapshot;

const MONTHS_PER_YEAR: Decimal = dec!(12);

fn nonzero_or(value: Decimal, fallback: Decimal) -> Decimal {
    if value.is_zero() { fallback } else { value }
}

/// `part / whole` as a percentage to two places; zero when `whole` is zero.
fn percent(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp(2))
        .unwrap_or(Decimal::ZERO)
}

pub fn capital_position(property: &Property, events: &[CapitalTransaction]) -> CapitalPosition {
    let own: Vec<&CapitalTransaction> = events
        .iter()
        .filter(|e| e.property_id == property.id)
        .collect();

    if !own.is_empty() {
        let summary = summarize_capital(own.iter().copied());
        return CapitalPosition {
            source: CapitalSource::CapitalTransactions,
            cash_deployed: summary.cash_deployed,
            equity_extracted: summary.equity_extracted,
            net_cash_invested: summary.net_cash_invested,
            by_kind: summary.by_kind,
            events: own.into_iter().cloned().collect(),
        };
    }

    let deposit = (property.purchase_price - property.phase1_mortgage).max(Decimal::ZERO);
    let cash_deployed = deposit + property.acquisition_costs + property.renovation_cost;
    let equity_extracted = if property.phase2_mortgage.is_zero() {
        Decimal::ZERO
    } else {
        (property.phase2_mortgage - property.phase1_mortgage).max(Decimal::ZERO)
    };

    CapitalPosition {
        source: CapitalSource::MasterFigures,
        cash_deployed,
        equity_extracted,
        net_cash_invested: cash_deployed - equity_extracted,
        by_kind: Vec::new(),
        events: Vec::new(),
    }
}

pub fn base_inputs(property: &Property, net_cash_invested: Decimal) -> FinancialInputs {
    let refinanced = !property.phase2_mortgage.is_zero();
    let (mortgage_balance, mortgage_rate_pct) = if refinanced {
        (
            property.phase2_mortgage,
            nonzero_or(property.phase2_rate, property.phase1_rate),
        )
    } else {
        (property.phase1_mortgage, property.phase1_rate)
    };

    let market_value = nonzero_or(
        property.market_value,
        nonzero_or(property.refinance_value, property.purchase_price),
    );

    FinancialInputs {
        market_value,
        mortgage_balance,
        mortgage_rate_pct,
        monthly_rent: property.phase2_monthly_rent,
        monthly_costs: property.phase2_monthly_costs,
        net_cash_invested,
    }
}

/// Zero scenario fields keep the base figure.
pub fn scenario_inputs(base: &FinancialInputs, scenario: &Scenario) -> FinancialInputs {
    FinancialInputs {
        market_value: nonzero_or(scenario.revaluation, base.market_value),
        mortgage_balance: base.mortgage_balance + scenario.equity_release,
        mortgage_rate_pct: nonzero_or(scenario.mortgage_rate, base.mortgage_rate_pct),
        monthly_rent: nonzero_or(scenario.monthly_rent, base.monthly_rent),
        monthly_costs: base.monthly_costs,
        net_cash_invested: base.net_cash_invested - scenario.equity_release,
    }
}

pub fn compute_metrics(inputs: &FinancialInputs) -> PropertyMetrics {
    let monthly_mortgage_payment = (inputs.mortgage_balance * inputs.mortgage_rate_pct
        / Decimal::ONE_HUNDRED
        / MONTHS_PER_YEAR)
        .round_dp(2);
    let monthly_cash_flow = inputs.monthly_rent - inputs.monthly_costs - monthly_mortgage_payment;
    let annual_cash_flow = monthly_cash_flow * MONTHS_PER_YEAR;

    let cash_on_cash_pct = (inputs.net_cash_invested > Decimal::ZERO)
        .then(|| percent(annual_cash_flow, inputs.net_cash_invested));

    PropertyMetrics {
        monthly_mortgage_payment,
        monthly_cash_flow,
        annual_cash_flow,
        gross_yield_pct: percent(inputs.monthly_rent * MONTHS_PER_YEAR, inputs.market_value),
        cash_on_cash_pct,
        equity: inputs.market_value - inputs.mortgage_balance,
        loan_to_value_pct: percent(inputs.mortgage_balance, inputs.market_value),
    }
}

/// Known value milestones for `property`, ascending by date.
pub fn appreciation_points(
    property: &Property,
    valuations: &[Valuation],
    today: NaiveDate,
) -> Vec<ValuePoint> {
    let mut points = Vec::new();

    if let Some(date) = property.purchase_date {
        if property.purchase_price > Decimal::ZERO {
            points.push(ValuePoint::on_day(date, property.purchase_price, "Purchase"));
        }
    }

    if let Some(date) = property.refinance_date {
        if property.refinance_value > Decimal::ZERO {
            points.push(ValuePoint::on_day(
                date,
                property.refinance_value,
                "Refinance valuation",
            ));
        }
    }

    for valuation in valuations
        .iter()
        .filter(|v| v.value > Decimal::ZERO && same_address(&v.address, &property.address))
    {
        let label = if valuation.source.is_empty() {
            "Valuation".to_string()
        } else {
            format!("Valuation ({})", valuation.source)
        };
        points.push(ValuePoint::on_day(valuation.date, valuation.value, label));
    }

    points.sort_by_key(|p| p.date);

    if property.market_value > Decimal::ZERO {
        let current = ValuePoint::on_day(today, property.market_value, "Current estimate");
        if points.last().is_none_or(|last| current.date > last.date) {
            points.push(current);
        }
    }

    points
}

pub fn breakeven_target(property: &Property, net_cash_invested: Decimal) -> Decimal {
    property.purchase_price + net_cash_invested
}

fn breakeven_label(outcome: &Breakeven) -> Option<String> {
    match outcome {
        Breakeven::AlreadyAchieved { date, .. } | Breakeven::Interpolated { date, .. } => Some(
            format!("Capital recovered {}", format_date(date.date_naive())),
        ),
        Breakeven::Projected { date, .. } => Some(format!(
            "Capital recovered by {} (projected)",
            format_month(*date)
        )),
        Breakeven::Undetermined => None,
    }
}

pub fn appreciation_timeline(
    property: &Property,
    valuations: &[Valuation],
    net_cash_invested: Decimal,
    config: &BreakevenConfig,
    today: NaiveDate,
) -> AppreciationTimeline {
    let points = appreciation_points(property, valuations, today);
    let target = breakeven_target(property, net_cash_invested);
    let breakeven = estimate_breakeven(&points, target, config);

    let gain_to_date = points
        .last()
        .map(|p| p.value - property.purchase_price)
        .unwrap_or(Decimal::ZERO);

    AppreciationTimeline {
        breakeven_label: breakeven_label(&breakeven),
        points,
        target,
        breakeven,
        gain_to_date,
    }
}

pub fn analyze_property(
    property: &Property,
    snapshot: &PortfolioSnapshot,
    settings: &DashboardSettings,
    today: NaiveDate,
) -> PropertyAnalysis {
    let capital = capital_position(property, &snapshot.capital_transactions);
    let inputs = base_inputs(property, capital.net_cash_invested);
    let metrics = compute_metrics(&inputs);

    let scenarios = snapshot
        .scenarios
        .iter()
        .filter(|s| s.property_id == property.id)
        .map(|scenario| {
            let scenario_inputs = scenario_inputs(&inputs, scenario);
            let scenario_metrics = compute_metrics(&scenario_inputs);
            ScenarioResult {
                id: scenario.id,
                name: scenario.name.clone(),
                cash_flow_change: scenario_metrics.monthly_cash_flow - metrics.monthly_cash_flow,
                inputs: scenario_inputs,
                metrics: scenario_metrics,
            }
        })
        .collect();

    let timeline = appreciation_timeline(
        property,
        &snapshot.valuations,
        capital.net_cash_invested,
        &settings.breakeven,
        today,
    );

    let ledger = summarize(
        snapshot
            .transactions
            .iter()
            .filter(|t| same_address(&t.property, &property.address)),
        &settings.income_category,
    );

    let symbol = settings.currency_symbol.as_str();
    let cards = vec![
        KpiCard::currency("netCashInvested", "Net Cash Invested", capital.net_cash_invested, symbol),
        KpiCard::currency("monthlyCashFlow", "Monthly Cash Flow", metrics.monthly_cash_flow, symbol),
        KpiCard::currency("equity", "Equity", metrics.equity, symbol),
        KpiCard::percentage("cashOnCash", "Cash on Cash", metrics.cash_on_cash_pct),
    ];

    PropertyAnalysis {
        property: PropertySummary::from(property),
        cards,
        capital,
        inputs,
        metrics,
        scenarios,
        timeline,
        ledger,
        fetched_at: snapshot.fetched_at,
    }
}

pub fn portfolio_overview(snapshot: &PortfolioSnapshot, settings: &DashboardSettings) -> PortfolioOverview {
    let mut totals = PortfolioTotals::default();

    let properties: Vec<PortfolioRow> = snapshot
        .properties
        .iter()
        .map(|property| {
            let capital = capital_position(property, &snapshot.capital_transactions);
            let inputs = base_inputs(property, capital.net_cash_invested);
            let metrics = compute_metrics(&inputs);

            totals.property_count += 1;
            totals.market_value += inputs.market_value;
            totals.mortgage_balance += inputs.mortgage_balance;
            totals.equity += metrics.equity;
            totals.net_cash_invested += capital.net_cash_invested;
            totals.monthly_cash_flow += metrics.monthly_cash_flow;
            totals.annual_cash_flow += metrics.annual_cash_flow;

            PortfolioRow {
                property: PropertySummary::from(property),
                net_cash_invested: capital.net_cash_invested,
                metrics,
            }
        })
        .collect();

    let symbol = settings.currency_symbol.as_str();
    let cards = vec![
        KpiCard::currency("marketValue", "Portfolio Value", totals.market_value, symbol),
        KpiCard::currency("equity", "Total Equity", totals.equity, symbol),
        KpiCard::currency("netCashInvested", "Net Cash Invested", totals.net_cash_invested, symbol),
        KpiCard::currency("monthlyCashFlow", "Monthly Cash Flow", totals.monthly_cash_flow, symbol),
    ];

    PortfolioOverview {
        properties,
        totals,
        cards,
        fetched_at: snapshot.fetched_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::records::CapitalEventKind;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Bought 150k on a 112.5k bridge, refurbished, refinanced at 200k.
    fn mill_lane() -> Property {
        Property {
            id: 1,
            code: "ML12".to_string(),
            address: "12 Mill Lane, Leeds".to_string(),
            city: "Leeds".to_string(),
            purchase_date: Some(day(2021, 3, 1)),
            purchase_price: dec!(150000),
            acquisition_costs: dec!(6200),
            renovation_cost: dec!(18000),
            phase1_mortgage: dec!(112500),
            phase1_rate: dec!(4.5),
            refinance_date: Some(day(2022, 3, 1)),
            refinance_value: dec!(200000),
            phase2_mortgage: dec!(150000),
            phase2_rate: dec!(4.8),
            phase2_monthly_rent: dec!(1350),
            phase2_monthly_costs: dec!(210),
            market_value: dec!(210000),
            listing_url: None,
        }
    }

    fn settings() -> DashboardSettings {
        DashboardSettings::default()
    }

    #[test]
    fn test_capital_from_master_figures() {
        let position = capital_position(&mill_lane(), &[]);

        assert_eq!(position.source, CapitalSource::MasterFigures);
        // 37,500 deposit + 6,200 fees + 18,000 works
        assert_eq!(position.cash_deployed, dec!(61700));
        assert_eq!(position.equity_extracted, dec!(37500));
        assert_eq!(position.net_cash_invested, dec!(24200));
    }

    #[test]
    fn test_capital_prefers_recorded_events() {
        let event = |id: i64, property_id: i64, kind: CapitalEventKind, amount: Decimal| {
            CapitalTransaction {
                id,
                property_id,
                date: None,
                kind,
                description: String::new(),
                amount,
            }
        };
        let events = vec![
            event(1, 1, CapitalEventKind::Purchase, dec!(-40000)),
            event(2, 1, CapitalEventKind::Refinance, dec!(30000)),
            event(3, 2, CapitalEventKind::Purchase, dec!(-99999)),
        ];

        let position = capital_position(&mill_lane(), &events);
        assert_eq!(position.source, CapitalSource::CapitalTransactions);
        assert_eq!(position.net_cash_invested, dec!(10000));
        assert_eq!(position.events.len(), 2);
    }

    #[test]
    fn test_no_refinance_means_no_equity_extracted() {
        let mut property = mill_lane();
        property.phase2_mortgage = Decimal::ZERO;

        let position = capital_position(&property, &[]);
        assert_eq!(position.equity_extracted, Decimal::ZERO);

        let inputs = base_inputs(&property, position.net_cash_invested);
        assert_eq!(inputs.mortgage_balance, dec!(112500));
        assert_eq!(inputs.mortgage_rate_pct, dec!(4.5));
    }

    #[test]
    fn test_base_metrics() {
        let inputs = base_inputs(&mill_lane(), dec!(24200));
        let metrics = compute_metrics(&inputs);

        // 150,000 × 4.8% / 12
        assert_eq!(metrics.monthly_mortgage_payment, dec!(600));
        assert_eq!(metrics.monthly_cash_flow, dec!(540));
        assert_eq!(metrics.annual_cash_flow, dec!(6480));
        assert_eq!(metrics.gross_yield_pct, dec!(7.71));
        assert_eq!(metrics.cash_on_cash_pct, Some(dec!(26.78)));
        assert_eq!(metrics.equity, dec!(60000));
        assert_eq!(metrics.loan_to_value_pct, dec!(71.43));
    }

    #[test]
    fn test_cash_on_cash_absent_when_all_cash_out() {
        let mut inputs = base_inputs(&mill_lane(), Decimal::ZERO);
        assert_eq!(compute_metrics(&inputs).cash_on_cash_pct, None);

        inputs.net_cash_invested = dec!(-5000);
        assert_eq!(compute_metrics(&inputs).cash_on_cash_pct, None);
    }

    #[test]
    fn test_zero_market_value_gives_zero_ratios() {
        let inputs = FinancialInputs {
            market_value: Decimal::ZERO,
            mortgage_balance: dec!(100000),
            mortgage_rate_pct: dec!(5),
            monthly_rent: dec!(800),
            monthly_costs: Decimal::ZERO,
            net_cash_invested: dec!(1000),
        };
        let metrics = compute_metrics(&inputs);
        assert_eq!(metrics.gross_yield_pct, Decimal::ZERO);
        assert_eq!(metrics.loan_to_value_pct, Decimal::ZERO);
    }

    #[test]
    fn test_all_zero_scenario_reproduces_base() {
        let base = base_inputs(&mill_lane(), dec!(24200));
        let scenario = Scenario {
            id: 9,
            property_id: 1,
            name: "Unchanged".to_string(),
            revaluation: Decimal::ZERO,
            equity_release: Decimal::ZERO,
            mortgage_rate: Decimal::ZERO,
            monthly_rent: Decimal::ZERO,
        };

        let inputs = scenario_inputs(&base, &scenario);
        assert_eq!(inputs, base);
        assert_eq!(compute_metrics(&inputs), compute_metrics(&base));
    }

    #[test]
    fn test_scenario_overrides() {
        let base = base_inputs(&mill_lane(), dec!(24200));
        let scenario = Scenario {
            id: 10,
            property_id: 1,
            name: "Remortgage at 5.5%".to_string(),
            revaluation: dec!(230000),
            equity_release: dec!(20000),
            mortgage_rate: dec!(5.5),
            monthly_rent: Decimal::ZERO,
        };

        let inputs = scenario_inputs(&base, &scenario);
        assert_eq!(inputs.market_value, dec!(230000));
        assert_eq!(inputs.mortgage_balance, dec!(170000));
        assert_eq!(inputs.mortgage_rate_pct, dec!(5.5));
        assert_eq!(inputs.monthly_rent, dec!(1350));
        assert_eq!(inputs.net_cash_invested, dec!(4200));

        let metrics = compute_metrics(&inputs);
        // 170,000 × 5.5% / 12 = 779.166..
        assert_eq!(metrics.monthly_mortgage_payment, dec!(779.17));
    }

    #[test]
    fn test_appreciation_points_ordered_and_matched() {
        let valuations = vec![
            Valuation {
                id: 1,
                address: " 12 MILL LANE, LEEDS".to_string(),
                date: day(2023, 6, 1),
                value: dec!(205000),
                source: "Zoopla".to_string(),
            },
            Valuation {
                id: 2,
                address: "4 Canal St".to_string(),
                date: day(2023, 7, 1),
                value: dec!(99000),
                source: String::new(),
            },
            Valuation {
                id: 3,
                address: "12 Mill Lane, Leeds".to_string(),
                date: day(2021, 9, 1),
                value: Decimal::ZERO,
                source: String::new(),
            },
        ];

        let points = appreciation_points(&mill_lane(), &valuations, day(2024, 5, 1));
        let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Purchase",
                "Refinance valuation",
                "Valuation (Zoopla)",
                "Current estimate"
            ]
        );
        assert!(points.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_current_estimate_skipped_when_not_latest() {
        let valuations = vec![Valuation {
            id: 1,
            address: "12 Mill Lane, Leeds".to_string(),
            date: day(2030, 1, 1),
            value: dec!(260000),
            source: String::new(),
        }];

        let points = appreciation_points(&mill_lane(), &valuations, day(2024, 5, 1));
        assert_eq!(points.last().unwrap().label, "Valuation");
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn test_timeline_interpolates_breakeven() {
        let timeline = appreciation_timeline(
            &mill_lane(),
            &[],
            dec!(24200),
            &BreakevenConfig::default(),
            day(2024, 3, 1),
        );

        // Target 174,200 sits between purchase (150k) and refinance (200k)
        assert_eq!(timeline.target, dec!(174200));
        assert!(matches!(
            timeline.breakeven,
            Breakeven::Interpolated { index: 0, .. }
        ));
        assert!(timeline.breakeven_label.unwrap().starts_with("Capital recovered "));
        assert_eq!(timeline.gain_to_date, dec!(60000));
    }

    #[test]
    fn test_timeline_projects_when_target_out_of_reach() {
        let timeline = appreciation_timeline(
            &mill_lane(),
            &[],
            dec!(100000),
            &BreakevenConfig::default(),
            day(2024, 3, 1),
        );

        assert!(timeline.breakeven.is_projected());
        assert!(timeline.breakeven_label.unwrap().ends_with("(projected)"));
    }

    fn canal_street_snapshot() -> PortfolioSnapshot {
        let property = Property {
            id: 2,
            code: "CS4".to_string(),
            address: "4 Canal St, Manchester".to_string(),
            city: "Manchester".to_string(),
            purchase_date: Some(day(2022, 6, 1)),
            purchase_price: dec!(95000),
            acquisition_costs: Decimal::ZERO,
            renovation_cost: Decimal::ZERO,
            phase1_mortgage: dec!(71250),
            phase1_rate: dec!(5.2),
            refinance_date: None,
            refinance_value: Decimal::ZERO,
            phase2_mortgage: Decimal::ZERO,
            phase2_rate: Decimal::ZERO,
            phase2_monthly_rent: dec!(900),
            phase2_monthly_costs: dec!(150),
            market_value: dec!(98000),
            listing_url: None,
        };
        let event = |id: i64, kind: CapitalEventKind, amount: Decimal| CapitalTransaction {
            id,
            property_id: 2,
            date: Some(day(2022, 6, 1)),
            kind,
            description: String::new(),
            amount,
        };

        let mut snapshot = PortfolioSnapshot::empty();
        snapshot.properties = vec![property];
        snapshot.capital_transactions = vec![
            event(1, CapitalEventKind::Purchase, dec!(-23750)),
            event(2, CapitalEventKind::AcquisitionCosts, dec!(-4100)),
        ];
        snapshot
    }

    #[test]
    fn test_slow_trend_beyond_horizon_is_undetermined() {
        let snapshot = canal_street_snapshot();
        let property = &snapshot.properties[0];

        // 3,000 gained over four years leaves 24,850 about 33 years out
        let analysis = analyze_property(property, &snapshot, &settings(), day(2026, 6, 1));

        assert_eq!(analysis.capital.source, CapitalSource::CapitalTransactions);
        assert_eq!(analysis.timeline.target, dec!(122850));
        assert_eq!(analysis.timeline.breakeven, Breakeven::Undetermined);
        assert_eq!(analysis.timeline.breakeven_label, None);
    }

    #[test]
    fn test_same_trend_within_horizon_is_projected() {
        let snapshot = canal_street_snapshot();
        let property = &snapshot.properties[0];

        // Same 3,000 gain over two years reaches the target in about 17
        let analysis = analyze_property(property, &snapshot, &settings(), day(2024, 6, 1));

        assert!(analysis.timeline.breakeven.is_projected());
        assert_eq!(analysis.timeline.breakeven.projected_points().len(), 2);
    }

    #[test]
    fn test_timeline_without_points_is_undetermined() {
        let mut property = mill_lane();
        property.purchase_date = None;
        property.refinance_date = None;
        property.market_value = Decimal::ZERO;

        let timeline = appreciation_timeline(
            &property,
            &[],
            dec!(24200),
            &BreakevenConfig::default(),
            day(2024, 3, 1),
        );
        assert!(timeline.points.is_empty());
        assert_eq!(timeline.breakeven, Breakeven::Undetermined);
        assert_eq!(timeline.breakeven_label, None);
    }

    #[test]
    fn test_portfolio_totals() {
        let mut snapshot = PortfolioSnapshot::empty();
        let mut second = mill_lane();
        second.id = 2;
        second.address = "4 Canal St".to_string();
        snapshot.properties = vec![mill_lane(), second];

        let overview = portfolio_overview(&snapshot, &settings());
        assert_eq!(overview.properties.len(), 2);
        assert_eq!(overview.totals.property_count, 2);
        assert_eq!(overview.totals.market_value, dec!(420000));
        assert_eq!(overview.totals.monthly_cash_flow, dec!(1080));
        assert_eq!(overview.totals.net_cash_invested, dec!(48400));
        assert_eq!(overview.cards[0].display, "£420,000.00");
    }

    #[test]
    fn test_analyze_property_joins_ledger_by_address() {
        use crate::models::records::Transaction;

        let mut snapshot = PortfolioSnapshot::empty();
        snapshot.properties = vec![mill_lane()];
        snapshot.transactions = vec![
            Transaction {
                id: 1,
                date: day(2024, 1, 1),
                property: "12 mill lane, leeds".to_string(),
                description: "Rent".to_string(),
                category: "Rental Income".to_string(),
                amount: dec!(1350),
            },
            Transaction {
                id: 2,
                date: day(2024, 1, 2),
                property: "4 Canal St".to_string(),
                description: "Rent".to_string(),
                category: "Rental Income".to_string(),
                amount: dec!(900),
            },
        ];

        let analysis = analyze_property(&mill_lane(), &snapshot, &settings(), day(2024, 3, 1));
        assert_eq!(analysis.ledger.income, dec!(1350));
        assert_eq!(analysis.ledger.transaction_count, 1);
        assert_eq!(analysis.cards.len(), 4);
        assert!(analysis.scenarios.is_empty());
    }
}
