use crate::constants::RESPONSIBLE_ALL;
use crate::errors::Result;
use crate::expenses::{ExpenseServiceTrait, ExpenseView, PaymentType};
use crate::insights::insights_model::{BucketEntry, MonthSummary, SpendingBucket};
use crate::utils::round2;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

fn bucketize<F>(occurrences: &[ExpenseView], key_of: F) -> Vec<SpendingBucket>
where
    F: Fn(&ExpenseView) -> String,
{
    // Vec keeps first-encounter order; the map only resolves positions.
    let mut buckets: Vec<SpendingBucket> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for occurrence in occurrences {
        let key = key_of(occurrence);
        let index = *positions.entry(key.clone()).or_insert_with(|| {
            buckets.push(SpendingBucket {
                name: key,
                total: Decimal::ZERO,
                entries: Vec::new(),
            });
            buckets.len() - 1
        });
        buckets[index].total += occurrence.value;
        buckets[index].entries.push(BucketEntry {
            name: occurrence.name.clone(),
            value: occurrence.value,
        });
    }

    for bucket in &mut buckets {
        bucket.total = round2(bucket.total);
    }
    buckets
}

/// Groups a month's occurrences by category name. An empty input yields an
/// empty result; no sentinel bucket is created spuriously.
pub fn aggregate_by_category(occurrences: &[ExpenseView]) -> Vec<SpendingBucket> {
    bucketize(occurrences, |o| o.category.name.clone())
}

/// Groups the same occurrence set by responsible. Bucket names are the
/// literal responsible strings seen this month, which also feed the
/// responsible filter selector.
pub fn aggregate_by_responsible(occurrences: &[ExpenseView]) -> Vec<SpendingBucket> {
    bucketize(occurrences, |o| o.responsible.clone())
}

/// Narrows a month's occurrences the way the dashboard filters do: by
/// payment source, optionally one specific card, optionally one responsible
/// (the "Todos" sentinel bypasses that filter).
pub fn filter_occurrences(
    occurrences: &[ExpenseView],
    source: PaymentType,
    card_id: Option<&str>,
    responsible: Option<&str>,
) -> Vec<ExpenseView> {
    occurrences
        .iter()
        .filter(|o| source.matches(o.card.is_some()))
        .filter(|o| match (source, card_id) {
            (PaymentType::Card, Some(id)) => {
                o.card.as_ref().map(|c| c.id.as_str()) == Some(id)
            }
            _ => true,
        })
        .filter(|o| match responsible {
            None => true,
            Some(r) if r == RESPONSIBLE_ALL => true,
            Some(r) => o.responsible == r,
        })
        .cloned()
        .collect()
}

/// KPI totals for one month's occurrences.
pub fn month_summary(occurrences: &[ExpenseView]) -> MonthSummary {
    let mut card_total = Decimal::ZERO;
    let mut debit_total = Decimal::ZERO;
    for occurrence in occurrences {
        if occurrence.card.is_some() {
            card_total += occurrence.value;
        } else {
            debit_total += occurrence.value;
        }
    }
    let total = card_total + debit_total;
    let transaction_count = occurrences.len();
    let average_value = if transaction_count > 0 {
        round2(total / Decimal::from(transaction_count))
    } else {
        Decimal::ZERO
    };

    MonthSummary {
        total: round2(total),
        card_total: round2(card_total),
        debit_total: round2(debit_total),
        transaction_count,
        average_value,
    }
}

/// Trait for insight service operations
pub trait InsightServiceTrait: Send + Sync {
    fn get_category_breakdown(
        &self,
        year: i32,
        month: u32,
        source: PaymentType,
        card_id: Option<&str>,
        responsible: Option<&str>,
    ) -> Result<Vec<SpendingBucket>>;

    fn get_responsible_breakdown(&self, year: i32, month: u32) -> Result<Vec<SpendingBucket>>;

    fn get_month_summary(&self, year: i32, month: u32) -> Result<MonthSummary>;
}

pub struct InsightService {
    expense_service: Arc<dyn ExpenseServiceTrait>,
}

impl InsightService {
    pub fn new(expense_service: Arc<dyn ExpenseServiceTrait>) -> Self {
        InsightService { expense_service }
    }
}

impl InsightServiceTrait for InsightService {
    fn get_category_breakdown(
        &self,
        year: i32,
        month: u32,
        source: PaymentType,
        card_id: Option<&str>,
        responsible: Option<&str>,
    ) -> Result<Vec<SpendingBucket>> {
        let occurrences = self
            .expense_service
            .get_month_expenses(year, month, PaymentType::All)?;
        let filtered = filter_occurrences(&occurrences, source, card_id, responsible);
        Ok(aggregate_by_category(&filtered))
    }

    fn get_responsible_breakdown(&self, year: i32, month: u32) -> Result<Vec<SpendingBucket>> {
        let occurrences = self
            .expense_service
            .get_month_expenses(year, month, PaymentType::All)?;
        Ok(aggregate_by_responsible(&occurrences))
    }

    fn get_month_summary(&self, year: i32, month: u32) -> Result<MonthSummary> {
        let occurrences = self
            .expense_service
            .get_month_expenses(year, month, PaymentType::All)?;
        Ok(month_summary(&occurrences))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expenses::{CardRef, CategoryRef};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn occurrence(
        name: &str,
        value: Decimal,
        category: &str,
        responsible: &str,
        card: Option<&str>,
    ) -> ExpenseView {
        ExpenseView {
            id: format!("exp-{}", name),
            name: name.to_string(),
            note: None,
            value,
            responsible: responsible.to_string(),
            category: CategoryRef {
                id: format!("cat-{}", category),
                name: category.to_string(),
            },
            card: card.map(|id| CardRef {
                id: id.to_string(),
                name: format!("Card {}", id),
                is_active: true,
            }),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            is_installment: false,
            installment_count: 1,
            installment_value: None,
            current_installment: None,
        }
    }

    #[test]
    fn test_aggregate_by_category_keeps_first_encounter_order() {
        let occurrences = vec![
            occurrence("feira", dec!(50.00), "Mercado", "Eu", None),
            occurrence("gasolina", dec!(200.00), "Transporte", "Eu", None),
            occurrence("padaria", dec!(12.50), "Mercado", "Eu", None),
        ];

        let buckets = aggregate_by_category(&occurrences);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].name, "Mercado");
        assert_eq!(buckets[0].total, dec!(62.50));
        assert_eq!(buckets[0].entries.len(), 2);
        assert_eq!(buckets[1].name, "Transporte");
        assert_eq!(buckets[1].total, dec!(200.00));
    }

    #[test]
    fn test_aggregate_by_category_empty_input() {
        assert!(aggregate_by_category(&[]).is_empty());
    }

    #[test]
    fn test_aggregate_by_category_rounds_totals() {
        let occurrences = vec![
            occurrence("a", dec!(0.101), "Outros", "Eu", None),
            occurrence("b", dec!(0.102), "Outros", "Eu", None),
        ];
        let buckets = aggregate_by_category(&occurrences);
        assert_eq!(buckets[0].total, dec!(0.20));
    }

    #[test]
    fn test_aggregate_by_responsible() {
        let occurrences = vec![
            occurrence("feira", dec!(50.00), "Mercado", "Ana", None),
            occurrence("cinema", dec!(40.00), "Lazer", "Eu", None),
            occurrence("padaria", dec!(10.00), "Mercado", "Ana", None),
        ];

        let buckets = aggregate_by_responsible(&occurrences);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].name, "Ana");
        assert_eq!(buckets[0].total, dec!(60.00));
        assert_eq!(buckets[1].name, "Eu");
    }

    #[test]
    fn test_filter_occurrences_by_source_and_card() {
        let occurrences = vec![
            occurrence("feira", dec!(50.00), "Mercado", "Eu", None),
            occurrence("jantar", dec!(90.00), "Lazer", "Eu", Some("card-1")),
            occurrence("roupa", dec!(120.00), "Vestuário", "Eu", Some("card-2")),
        ];

        let debit = filter_occurrences(&occurrences, PaymentType::Debit, None, None);
        assert_eq!(debit.len(), 1);

        let one_card =
            filter_occurrences(&occurrences, PaymentType::Card, Some("card-2"), None);
        assert_eq!(one_card.len(), 1);
        assert_eq!(one_card[0].name, "roupa");

        let all_cards = filter_occurrences(&occurrences, PaymentType::Card, None, None);
        assert_eq!(all_cards.len(), 2);
    }

    #[test]
    fn test_filter_occurrences_by_responsible_with_sentinel() {
        let occurrences = vec![
            occurrence("feira", dec!(50.00), "Mercado", "Ana", None),
            occurrence("cinema", dec!(40.00), "Lazer", "Eu", None),
        ];

        let ana = filter_occurrences(&occurrences, PaymentType::All, None, Some("Ana"));
        assert_eq!(ana.len(), 1);

        let todos =
            filter_occurrences(&occurrences, PaymentType::All, None, Some(RESPONSIBLE_ALL));
        assert_eq!(todos.len(), 2);
    }

    #[test]
    fn test_month_summary() {
        let occurrences = vec![
            occurrence("feira", dec!(50.00), "Mercado", "Eu", None),
            occurrence("jantar", dec!(90.00), "Lazer", "Eu", Some("card-1")),
            occurrence("roupa", dec!(120.00), "Vestuário", "Eu", Some("card-2")),
        ];

        let summary = month_summary(&occurrences);
        assert_eq!(summary.total, dec!(260.00));
        assert_eq!(summary.card_total, dec!(210.00));
        assert_eq!(summary.debit_total, dec!(50.00));
        assert_eq!(summary.transaction_count, 3);
        assert_eq!(summary.average_value, dec!(86.67));
    }

    #[test]
    fn test_month_summary_empty() {
        let summary = month_summary(&[]);
        assert!(summary.total.is_zero());
        assert_eq!(summary.transaction_count, 0);
        assert!(summary.average_value.is_zero());
    }
}
