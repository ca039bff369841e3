//! Daily financial aggregation.
//!
//! Everything in this module is a pure function over records that have already been fetched:
//! no I/O, no shared state, and the same input always yields the same output. Sums are carried
//! at full `Decimal` precision; rounding to two places happens only when a value is displayed.
//!
//! The cash reconciliation for a date works like this:
//!
//! ```text
//! net_total                       = Σ transformation selling price + Σ paraniz sale amount
//! net_total_with_cash_and_expenses = net_total + cash in box yesterday - Σ expenses
//! cash_difference                 = cash in box today - net_total_with_cash_and_expenses
//! ```
//!
//! A positive difference means there is more cash in the box than the records explain, a
//! negative one means cash is missing.

use crate::model::{
    round_for_display, CashSnapshot, Debt, Expense, Numeric, ParanizBatch, ParanizCategory,
    ParanizSale, Transformation,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// Sums the value picked by `selector` across `records`.
///
/// Each value goes through `Numeric`, so absent or malformed values count as zero. An empty
/// slice sums to zero.
pub fn sum_amounts<T, N, F>(records: &[T], selector: F) -> Decimal
where
    N: Numeric,
    F: Fn(&T) -> N,
{
    records.iter().map(|r| selector(r).to_decimal()).sum()
}

/// Totals of a set of transformations.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct TransformationTotals {
    /// Σ selling price, in TL.
    pub total_selling_price: Decimal,
    /// Σ product cost × quantity, in dollars.
    pub total_cost_price_in_dollar: Decimal,
}

pub fn transformation_totals(records: &[Transformation]) -> TransformationTotals {
    TransformationTotals {
        total_selling_price: sum_amounts(records, |t| t.selling_price),
        total_cost_price_in_dollar: sum_amounts(records, |t| t.cost_in_dollar()),
    }
}

/// Totals of the kontor/fatura breakdown records.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct ParanizTotals {
    pub total_kontor_amount: Decimal,
    pub total_kontor_cost: Decimal,
    pub total_fatura_amount: Decimal,
    pub total_fatura_cost: Decimal,
}

pub fn paraniz_totals(records: &[ParanizBatch]) -> ParanizTotals {
    ParanizTotals {
        total_kontor_amount: sum_amounts(records, |b| b.kontor_amount),
        total_kontor_cost: sum_amounts(records, |b| b.kontor_cost),
        total_fatura_amount: sum_amounts(records, |b| b.fatura_amount),
        total_fatura_cost: sum_amounts(records, |b| b.fatura_cost),
    }
}

/// Σ amount of the paraniz sales in `category`.
pub fn sum_paraniz_sales_by_category(sales: &[ParanizSale], category: ParanizCategory) -> Decimal {
    sales
        .iter()
        .filter(|s| s.category == category)
        .map(|s| s.amount)
        .sum()
}

/// The calendar day before `date`, or `None` for the earliest representable date.
pub fn previous_day(date: NaiveDate) -> Option<NaiveDate> {
    date.pred_opt()
}

/// Looks up the snapshot of the day before `date` and returns the cash that was in the box at the
/// end of that day. Returns zero when there is no snapshot.
pub fn resolve_previous_day_cash<F>(date: NaiveDate, lookup: F) -> Decimal
where
    F: FnOnce(NaiveDate) -> Option<CashSnapshot>,
{
    previous_day(date)
        .and_then(lookup)
        .map(|snapshot| snapshot.cash_in_box_today)
        .unwrap_or_default()
}

/// The day's takings: transformation sales plus Paraniz sales. Both count as shop revenue in
/// one cash box.
pub fn net_total(total_selling_price: Decimal, total_paraniz_sales_amount: Decimal) -> Decimal {
    total_selling_price + total_paraniz_sales_amount
}

pub fn net_total_with_cash_and_expenses(
    net_total: Decimal,
    cash_in_box_yesterday: Decimal,
    total_expenses: Decimal,
) -> Decimal {
    net_total + cash_in_box_yesterday - total_expenses
}

pub fn cash_difference(
    cash_in_box_today: Decimal,
    net_total_with_cash_and_expenses: Decimal,
) -> CashDifference {
    CashDifference(cash_in_box_today - net_total_with_cash_and_expenses)
}

pub fn cost_in_local_currency(total_cost_price_in_dollar: Decimal, dollar_to_tl_rate: Decimal) -> Decimal {
    total_cost_price_in_dollar * dollar_to_tl_rate
}

/// The difference between counted cash and the cash the records account for.
///
/// Displays as `0` when exact, `+12.50` for an excess and `-12.50` for a shortage.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CashDifference(Decimal);

impl CashDifference {
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_excess(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_shortage(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

impl Display for CashDifference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0.is_zero() {
            return write!(f, "0");
        }
        let rounded = round_for_display(self.0.abs());
        if self.is_excess() {
            write!(f, "+{rounded}")
        } else {
            write!(f, "-{rounded}")
        }
    }
}

impl Serialize for CashDifference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Serialize::serialize(&self.0, serializer)
    }
}

/// Total and count of the debts that are still open.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct DebtTotals {
    pub unpaid_total: Decimal,
    pub unpaid_count: usize,
}

/// Sums the debts that are not paid. Paid debts are skipped even when they are passed in.
pub fn debt_totals(debts: &[Debt]) -> DebtTotals {
    debts
        .iter()
        .filter(|d| !d.is_paid)
        .fold(DebtTotals::default(), |mut totals, debt| {
            totals.unpaid_total += debt.amount;
            totals.unpaid_count += 1;
            totals
        })
}

/// Everything needed to compute the dashboard of a single date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecords {
    pub date: NaiveDate,
    pub expenses: Vec<Expense>,
    pub transformations: Vec<Transformation>,
    pub paraniz_sales: Vec<ParanizSale>,
    pub paraniz_batches: Vec<ParanizBatch>,
    /// The snapshot of `date`, if the cash has been counted.
    pub snapshot: Option<CashSnapshot>,
    /// The snapshot of the day before `date`, used when `snapshot` does not carry yesterday's
    /// cash explicitly.
    pub previous_snapshot: Option<CashSnapshot>,
}

impl DailyRecords {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            expenses: Vec::new(),
            transformations: Vec::new(),
            paraniz_sales: Vec::new(),
            paraniz_batches: Vec::new(),
            snapshot: None,
            previous_snapshot: None,
        }
    }
}

/// The dashboard figures of a single date.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_expenses: Decimal,
    pub transformations: TransformationTotals,
    pub total_paraniz_sales: Decimal,
    pub total_fatura_sales: Decimal,
    pub total_kontor_sales: Decimal,
    pub paraniz: ParanizTotals,
    /// False when no cash snapshot exists for the date yet.
    pub cash_counted: bool,
    pub cash_in_box_yesterday: Decimal,
    pub cash_in_box_today: Decimal,
    pub dollar_to_tl_rate: Decimal,
    /// Transformation cost converted to TL. `None` until a dollar rate is entered.
    pub cost_in_local_currency: Option<Decimal>,
    pub net_total: Decimal,
    pub net_total_with_cash_and_expenses: Decimal,
    pub cash_difference: CashDifference,
}

impl DailySummary {
    pub fn compute(records: &DailyRecords) -> Self {
        let date = records.date;
        let total_expenses = sum_amounts(&records.expenses, |e| e.amount);
        let transformations = transformation_totals(&records.transformations);
        let total_paraniz_sales = sum_amounts(&records.paraniz_sales, |s| s.amount);

        let snapshot = records.snapshot.as_ref();
        let cash_in_box_today = snapshot.map(|s| s.cash_in_box_today).unwrap_or_default();
        let dollar_to_tl_rate = snapshot.map(|s| s.dollar_to_tl_rate).unwrap_or_default();
        let cash_in_box_yesterday = match snapshot.and_then(|s| s.cash_in_box_yesterday) {
            Some(stored) => stored,
            None => resolve_previous_day_cash(date, |previous| {
                records
                    .previous_snapshot
                    .clone()
                    .filter(|s| s.date == previous)
            }),
        };

        let net = net_total(transformations.total_selling_price, total_paraniz_sales);
        let with_cash = net_total_with_cash_and_expenses(net, cash_in_box_yesterday, total_expenses);
        let cost_in_local = if dollar_to_tl_rate.is_zero() {
            None
        } else {
            Some(cost_in_local_currency(
                transformations.total_cost_price_in_dollar,
                dollar_to_tl_rate,
            ))
        };

        Self {
            date,
            total_expenses,
            transformations,
            total_paraniz_sales,
            total_fatura_sales: sum_paraniz_sales_by_category(
                &records.paraniz_sales,
                ParanizCategory::Fatura,
            ),
            total_kontor_sales: sum_paraniz_sales_by_category(
                &records.paraniz_sales,
                ParanizCategory::Kontor,
            ),
            paraniz: paraniz_totals(&records.paraniz_batches),
            cash_counted: snapshot.is_some(),
            cash_in_box_yesterday,
            cash_in_box_today,
            dollar_to_tl_rate,
            cost_in_local_currency: cost_in_local,
            net_total: net,
            net_total_with_cash_and_expenses: with_cash,
            cash_difference: cash_difference(cash_in_box_today, with_cash),
        }
    }
}

/// Records whose date lies in `[start, end]`, both ends inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeRecords {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub expenses: Vec<Expense>,
    pub transformations: Vec<Transformation>,
    pub paraniz_sales: Vec<ParanizSale>,
}

/// Totals over a date range. Cash reconciliation only exists per date, so it is not part of this.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct RangeSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_expenses: Decimal,
    pub transformations: TransformationTotals,
    pub total_paraniz_sales: Decimal,
    pub total_fatura_sales: Decimal,
    pub total_kontor_sales: Decimal,
    pub net_total: Decimal,
}

impl RangeSummary {
    pub fn compute(records: &RangeRecords) -> Self {
        let transformations = transformation_totals(&records.transformations);
        let total_paraniz_sales = sum_amounts(&records.paraniz_sales, |s| s.amount);
        Self {
            start: records.start,
            end: records.end,
            total_expenses: sum_amounts(&records.expenses, |e| e.amount),
            transformations,
            total_paraniz_sales,
            total_fatura_sales: sum_paraniz_sales_by_category(
                &records.paraniz_sales,
                ParanizCategory::Fatura,
            ),
            total_kontor_sales: sum_paraniz_sales_by_category(
                &records.paraniz_sales,
                ParanizCategory::Kontor,
            ),
            net_total: net_total(transformations.total_selling_price, total_paraniz_sales),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::cell::Cell;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn expense(amount: Decimal) -> Expense {
        Expense {
            id: format!("e-{amount}"),
            date: date("2024-05-10"),
            name: "expense".to_string(),
            amount,
        }
    }

    fn transformation(quantity: Decimal, product_cost: Decimal, selling_price: Decimal) -> Transformation {
        Transformation {
            id: "t".to_string(),
            date: date("2024-05-10"),
            name: "phone case".to_string(),
            quantity,
            product_cost,
            selling_price,
            is_net_profit: false,
        }
    }

    fn sale(amount: Decimal, category: ParanizCategory) -> ParanizSale {
        ParanizSale {
            id: "p".to_string(),
            date: date("2024-05-10"),
            name: "top-up".to_string(),
            amount,
            cost: Decimal::ZERO,
            category,
            subscription_number: "5551234567".to_string(),
        }
    }

    fn debt(amount: Decimal, is_paid: bool) -> Debt {
        Debt {
            id: "d".to_string(),
            date: date("2024-05-10"),
            customer_name: "Ayse".to_string(),
            product_name: "charger".to_string(),
            product_cost: Decimal::ZERO,
            amount,
            is_paid,
        }
    }

    fn snapshot(d: &str, today: Decimal) -> CashSnapshot {
        CashSnapshot::new(date(d), today)
    }

    #[test]
    fn test_sum_amounts_empty_is_zero() {
        let empty: Vec<Expense> = Vec::new();
        assert_eq!(sum_amounts(&empty, |e| e.amount), Decimal::ZERO);
        let empty: Vec<&str> = Vec::new();
        assert_eq!(sum_amounts(&empty, |s| *s), Decimal::ZERO);
    }

    #[test]
    fn test_sum_amounts_two_values() {
        let records = vec![expense(dec!(12.35)), expense(dec!(7.65))];
        assert_eq!(sum_amounts(&records, |e| e.amount), dec!(20.00));
    }

    #[test]
    fn test_sum_amounts_order_invariant() {
        let mut records = vec![
            expense(dec!(0.1)),
            expense(dec!(1000.333)),
            expense(dec!(-5)),
            expense(dec!(0.2)),
        ];
        let forward = sum_amounts(&records, |e| e.amount);
        records.reverse();
        let backward = sum_amounts(&records, |e| e.amount);
        records.swap(0, 2);
        let shuffled = sum_amounts(&records, |e| e.amount);
        assert_eq!(forward, backward);
        assert_eq!(forward, shuffled);
        assert_eq!(forward, dec!(995.633));
    }

    #[test]
    fn test_sum_amounts_bad_values_count_as_zero() {
        let raw: Vec<Option<&str>> = vec![Some("10"), None, Some("abc"), Some(""), Some("2.5")];
        assert_eq!(sum_amounts(&raw, |v| *v), dec!(12.5));

        let floats = vec![1.5_f64, f64::NAN, 2.0];
        assert_eq!(sum_amounts(&floats, |v| *v), dec!(3.5));
    }

    #[test]
    fn test_transformation_totals_keep_full_precision() {
        let records: Vec<Transformation> = (0..7)
            .map(|_| transformation(dec!(3), dec!(0.85), dec!(10)))
            .collect();
        let totals = transformation_totals(&records);
        assert_eq!(totals.total_cost_price_in_dollar, dec!(17.85));
        assert_eq!(totals.total_selling_price, dec!(70));
    }

    #[test]
    fn test_transformation_totals_sub_cent_values_are_not_rounded() {
        let records = vec![
            transformation(dec!(1), dec!(0.004), dec!(0.004)),
            transformation(dec!(1), dec!(0.004), dec!(0.004)),
        ];
        let totals = transformation_totals(&records);
        assert_eq!(totals.total_cost_price_in_dollar, dec!(0.008));
        assert_eq!(totals.total_selling_price, dec!(0.008));
    }

    #[test]
    fn test_paraniz_totals() {
        let batch = |ka, kc, fa, fc| ParanizBatch {
            id: "b".to_string(),
            date: date("2024-05-10"),
            kontor_amount: ka,
            kontor_cost: kc,
            fatura_amount: fa,
            fatura_cost: fc,
        };
        let totals = paraniz_totals(&[
            batch(dec!(100), dec!(90), dec!(250), dec!(245)),
            batch(dec!(50), dec!(44.5), dec!(0), dec!(0)),
        ]);
        assert_eq!(totals.total_kontor_amount, dec!(150));
        assert_eq!(totals.total_kontor_cost, dec!(134.5));
        assert_eq!(totals.total_fatura_amount, dec!(250));
        assert_eq!(totals.total_fatura_cost, dec!(245));
        assert_eq!(paraniz_totals(&[]), ParanizTotals::default());
    }

    #[test]
    fn test_sum_paraniz_sales_by_category() {
        let sales = vec![
            sale(dec!(100), ParanizCategory::Fatura),
            sale(dec!(20), ParanizCategory::Kontor),
            sale(dec!(30), ParanizCategory::Kontor),
        ];
        assert_eq!(
            sum_paraniz_sales_by_category(&sales, ParanizCategory::Fatura),
            dec!(100)
        );
        assert_eq!(
            sum_paraniz_sales_by_category(&sales, ParanizCategory::Kontor),
            dec!(50)
        );
    }

    #[test]
    fn test_previous_day_rollover() {
        assert_eq!(previous_day(date("2024-03-01")), Some(date("2024-02-29")));
        assert_eq!(previous_day(date("2023-03-01")), Some(date("2023-02-28")));
        assert_eq!(previous_day(date("2024-01-01")), Some(date("2023-12-31")));
        assert_eq!(previous_day(date("2024-05-01")), Some(date("2024-04-30")));
        assert_eq!(previous_day(NaiveDate::MIN), None);
    }

    #[test]
    fn test_resolve_previous_day_cash_queries_leap_day() {
        let queried = Cell::new(None);
        let cash = resolve_previous_day_cash(date("2024-03-01"), |d| {
            queried.set(Some(d));
            Some(snapshot("2024-02-29", dec!(320.50)))
        });
        assert_eq!(queried.get(), Some(date("2024-02-29")));
        assert_eq!(cash, dec!(320.50));
    }

    #[test]
    fn test_resolve_previous_day_cash_queries_non_leap_day() {
        let queried = Cell::new(None);
        let cash = resolve_previous_day_cash(date("2023-03-01"), |d| {
            queried.set(Some(d));
            None
        });
        assert_eq!(queried.get(), Some(date("2023-02-28")));
        assert_eq!(cash, Decimal::ZERO);
    }

    #[test]
    fn test_net_totals() {
        assert_eq!(net_total(dec!(150), dec!(40)), dec!(190));
        assert_eq!(
            net_total_with_cash_and_expenses(dec!(190), dec!(60), dec!(50)),
            dec!(200)
        );
    }

    #[test]
    fn test_cash_difference_zero() {
        let diff = cash_difference(dec!(100), dec!(100));
        assert_eq!(diff.value(), Decimal::ZERO);
        assert_eq!(diff.to_string(), "0");
        assert!(!diff.is_excess());
        assert!(!diff.is_shortage());
    }

    #[test]
    fn test_cash_difference_excess() {
        let diff = cash_difference(dec!(150), dec!(100));
        assert_eq!(diff.value(), dec!(50));
        assert_eq!(diff.to_string(), "+50.00");
        assert!(diff.is_excess());
    }

    #[test]
    fn test_cash_difference_shortage() {
        let diff = cash_difference(dec!(80), dec!(100));
        assert_eq!(diff.value(), dec!(-20));
        assert_eq!(diff.to_string(), "-20.00");
        assert!(diff.is_shortage());
    }

    #[test]
    fn test_cash_difference_rounds_only_for_display() {
        let diff = cash_difference(dec!(100.005), dec!(100));
        assert_eq!(diff.value(), dec!(0.005));
        assert_eq!(diff.to_string(), "+0.01");
    }

    #[test]
    fn test_cash_difference_tiny_values_keep_their_sign() {
        let short = cash_difference(dec!(99.999), dec!(100));
        assert!(short.is_shortage());
        assert_eq!(short.to_string(), "-0.00");

        let over = cash_difference(dec!(100.001), dec!(100));
        assert_eq!(over.to_string(), "+0.00");
    }

    #[test]
    fn test_cash_difference_serializes_raw_value() {
        let json = serde_json::to_string(&cash_difference(dec!(150), dec!(100))).unwrap();
        assert_eq!(json, "\"50\"");
    }

    #[test]
    fn test_cost_in_local_currency() {
        assert_eq!(cost_in_local_currency(dec!(20), dec!(32.5)), dec!(650.0));
        assert_eq!(cost_in_local_currency(dec!(20), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_debt_totals() {
        let debts = vec![
            debt(dec!(100), false),
            debt(dec!(50), true),
            debt(dec!(25), false),
        ];
        let totals = debt_totals(&debts);
        assert_eq!(totals.unpaid_total, dec!(125));
        assert_eq!(totals.unpaid_count, 2);
        assert_eq!(debt_totals(&[]), DebtTotals::default());
    }

    fn scenario() -> DailyRecords {
        let mut records = DailyRecords::new(date("2024-05-10"));
        records.expenses = vec![expense(dec!(30)), expense(dec!(20))];
        records.transformations = vec![
            transformation(dec!(5), dec!(2), dec!(100)),
            transformation(dec!(10), dec!(1), dec!(50)),
        ];
        records.paraniz_sales = vec![sale(dec!(40), ParanizCategory::Kontor)];
        records.snapshot = Some(snapshot("2024-05-10", dec!(205)));
        records.previous_snapshot = Some(snapshot("2024-05-09", dec!(60)));
        records
    }

    #[test]
    fn test_daily_summary_end_to_end() {
        let summary = DailySummary::compute(&scenario());
        assert_eq!(summary.total_expenses, dec!(50));
        assert_eq!(summary.transformations.total_selling_price, dec!(150));
        assert_eq!(summary.transformations.total_cost_price_in_dollar, dec!(20));
        assert_eq!(summary.total_paraniz_sales, dec!(40));
        assert_eq!(summary.total_kontor_sales, dec!(40));
        assert_eq!(summary.total_fatura_sales, Decimal::ZERO);
        assert_eq!(summary.cash_in_box_yesterday, dec!(60));
        assert_eq!(summary.net_total, dec!(190));
        assert_eq!(summary.net_total_with_cash_and_expenses, dec!(200));
        assert_eq!(summary.cash_difference.value(), dec!(5));
        assert_eq!(summary.cash_difference.to_string(), "+5.00");
        assert!(summary.cash_counted);
        assert_eq!(summary.cost_in_local_currency, None);
    }

    #[test]
    fn test_daily_summary_prefers_stored_yesterday_cash() {
        let mut records = scenario();
        if let Some(s) = records.snapshot.as_mut() {
            s.cash_in_box_yesterday = Some(dec!(65));
        }
        let summary = DailySummary::compute(&records);
        assert_eq!(summary.cash_in_box_yesterday, dec!(65));
        assert_eq!(summary.cash_difference.to_string(), "0");
    }

    #[test]
    fn test_daily_summary_ignores_previous_snapshot_of_wrong_date() {
        let mut records = scenario();
        records.previous_snapshot = Some(snapshot("2024-05-01", dec!(60)));
        let summary = DailySummary::compute(&records);
        assert_eq!(summary.cash_in_box_yesterday, Decimal::ZERO);
    }

    #[test]
    fn test_daily_summary_converts_cost_when_rate_is_set() {
        let mut records = scenario();
        if let Some(s) = records.snapshot.as_mut() {
            s.dollar_to_tl_rate = dec!(32.25);
        }
        let summary = DailySummary::compute(&records);
        assert_eq!(summary.cost_in_local_currency, Some(dec!(645.00)));
    }

    #[test]
    fn test_daily_summary_without_any_records() {
        let summary = DailySummary::compute(&DailyRecords::new(date("2024-05-10")));
        assert!(!summary.cash_counted);
        assert_eq!(summary.net_total, Decimal::ZERO);
        assert_eq!(summary.cash_difference.to_string(), "0");
    }

    #[test]
    fn test_daily_summary_is_deterministic_across_threads() {
        let records = scenario();
        let expected = DailySummary::compute(&records);
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| DailySummary::compute(&records)))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_range_summary() {
        let records = RangeRecords {
            start: date("2024-05-01"),
            end: date("2024-05-31"),
            expenses: vec![expense(dec!(30)), expense(dec!(20))],
            transformations: vec![transformation(dec!(5), dec!(2), dec!(100))],
            paraniz_sales: vec![
                sale(dec!(40), ParanizCategory::Kontor),
                sale(dec!(60), ParanizCategory::Fatura),
            ],
        };
        let summary = RangeSummary::compute(&records);
        assert_eq!(summary.total_expenses, dec!(50));
        assert_eq!(summary.transformations.total_cost_price_in_dollar, dec!(10));
        assert_eq!(summary.total_paraniz_sales, dec!(100));
        assert_eq!(summary.total_fatura_sales, dec!(60));
        assert_eq!(summary.total_kontor_sales, dec!(40));
        assert_eq!(summary.net_total, dec!(200));
    }
}
