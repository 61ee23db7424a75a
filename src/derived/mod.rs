//! Derived indicators computed from raw debt series.
//!
//! Steps run in dependency order and each is guarded on its own inputs: a
//! missing input skips that metric only. GDP is implied by private debt and its
//! ratio to GDP (`debt / percent * 100`).

use crate::domain::{CountryRecord, Metric};
use crate::series::{combine_opt, diff_opt};

fn ratio_pct(a: f64, b: f64) -> f64 {
    (a / b) * 100.0
}

/// Layer every derived metric onto `record`.
pub fn compute_derived_metrics(record: &mut CountryRecord) {
    use Metric::*;

    let commercial = combine_opt(record.get(PrivateDebt), record.get(HouseholdDebt), |a, b| a - b);
    record.insert_opt(CommercialDebt, commercial);

    let gdp = combine_opt(record.get(PrivateDebt), record.get(PrivateDebtPercent), ratio_pct);
    record.insert_opt(Gdp, gdp);

    let gdp_usd = combine_opt(record.get(PrivateDebtUsd), record.get(PrivateDebtPercent), ratio_pct);
    record.insert_opt(GdpUsd, gdp_usd);

    if record.has(Gdp) || record.has(GdpUsd) {
        let constant = vec![Some(100.0); record.len()];
        record.insert(GdpPercent, constant);
    }

    let commercial_pct = combine_opt(record.get(CommercialDebt), record.get(Gdp), ratio_pct);
    record.insert_opt(CommercialDebtPercent, commercial_pct);

    let gdp_change = diff_opt(record.get(Gdp));
    record.insert_opt(GdpChange, gdp_change);

    let all_debt = combine_opt(record.get(PrivateDebtPercent), record.get(PublicDebtPercent), |a, b| a + b);
    record.insert_opt(AllDebtPercent, all_debt);

    let credit_pct = diff_opt(record.get(PrivateDebtPercent));
    record.insert_opt(CreditPercent, credit_pct);

    let credit = diff_opt(record.get(PrivateDebt));
    record.insert_opt(Credit, credit);

    // Nominal GDP growth plus net new private credit.
    let keen = combine_opt(record.get(GdpChange), record.get(Credit), |a, b| a + b);
    record.insert_opt(KeenGrowth, keen);

    let commercial_usd = combine_opt(record.get(PrivateDebtUsd), record.get(HouseholdDebtUsd), |a, b| a - b);
    record.insert_opt(CommercialDebtUsd, commercial_usd);
}
