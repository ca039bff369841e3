use serde::{Deserialize, Serialize};

/// The kinds of record kept in the book.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Entity {
    /// End-of-day cash counts, one per date.
    Cash,
    Expense,
    Transformation,
    ParanizSale,
    /// Kontor/fatura breakdown records.
    Paraniz,
    Debt,
    Product,
    Note,
}

serde_plain::derive_display_from_serialize!(Entity);
serde_plain::derive_fromstr_from_deserialize!(Entity);

impl Entity {
    /// The SQLite table holding records of this kind.
    pub fn table(&self) -> &'static str {
        match self {
            Entity::Cash => "cash_snapshots",
            Entity::Expense => "expenses",
            Entity::Transformation => "transformations",
            Entity::ParanizSale => "paraniz_sales",
            Entity::Paraniz => "paraniz_batches",
            Entity::Debt => "debts",
            Entity::Product => "products",
            Entity::Note => "notes",
        }
    }

    /// Capitalized name used at the start of messages, e.g. "Paraniz sale".
    pub fn title(&self) -> &'static str {
        match self {
            Entity::Cash => "Cash snapshot",
            Entity::Expense => "Expense",
            Entity::Transformation => "Transformation",
            Entity::ParanizSale => "Paraniz sale",
            Entity::Paraniz => "Paraniz batch",
            Entity::Debt => "Debt",
            Entity::Product => "Product",
            Entity::Note => "Note",
        }
    }

    /// Lowercase name, pluralized when `count != 1`.
    pub fn noun(&self, count: usize) -> String {
        let singular = self.title().to_lowercase();
        match (count, self) {
            (1, _) => singular,
            (_, Entity::Paraniz) => format!("{singular}es"),
            _ => format!("{singular}s"),
        }
    }

    /// Whether records of this kind carry a date.
    pub fn is_dated(&self) -> bool {
        !matches!(self, Entity::Product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_entity_names() {
        assert_eq!(Entity::ParanizSale.to_string(), "paraniz-sale");
        assert_eq!(Entity::from_str("paraniz").unwrap(), Entity::Paraniz);
        assert!(Entity::from_str("invoice").is_err());
    }

    #[test]
    fn test_entity_noun() {
        assert_eq!(Entity::Expense.noun(1), "expense");
        assert_eq!(Entity::Expense.noun(3), "expenses");
        assert_eq!(Entity::Paraniz.noun(2), "paraniz batches");
        assert_eq!(Entity::Cash.noun(0), "cash snapshots");
    }

    #[test]
    fn test_entity_value_enum_matches_serde() {
        use clap::ValueEnum;
        for entity in Entity::value_variants() {
            let name = entity.to_possible_value().unwrap().get_name().to_string();
            assert_eq!(name, entity.to_string());
        }
    }
}
