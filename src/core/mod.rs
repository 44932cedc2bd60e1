/// Totals, averages and month boundaries
pub mod aggregate;
/// Expense store: validated CRUD and filtered queries
pub mod expense;
/// Plain-text formatting of expenses and summaries
pub mod report;
