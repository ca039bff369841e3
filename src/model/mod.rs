//! Types that represent the core data model: the record kinds of the daily book.
mod amount;
mod cash;
mod debt;
mod entity;
mod expense;
mod note;
mod numeric;
mod paraniz;
mod product;
mod transformation;

pub use amount::{round_for_display, Amount, AmountError, DISPLAY_DP};
pub use cash::CashSnapshot;
pub use debt::{Debt, DebtUpdates};
pub use entity::Entity;
pub use expense::{Expense, ExpenseUpdates};
pub use note::{Note, NoteUpdates};
pub use numeric::{coerce, Numeric};
pub use paraniz::{
    ParanizBatch, ParanizBatchUpdates, ParanizCategory, ParanizSale, ParanizSaleUpdates,
};
pub use product::{Product, ProductUpdates};
pub use transformation::{Transformation, TransformationUpdates};
