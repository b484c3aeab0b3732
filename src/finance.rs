use crate::clock;
use crate::errors::DomainError;
use crate::models::{Finances, MonthlySummary, Transaction, TransactionInput};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Income,
    Expense,
}

impl FromStr for Kind {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(DomainError::invalid("kind")),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Income => "income",
            Self::Expense => "expense",
        })
    }
}

/// Conventional category labels. The data layer accepts any string.
pub const INCOME_CATEGORIES: [(&str, &str); 4] = [
    ("terapia", "Terapia Manual"),
    ("rehabilitacion", "Rehabilitación"),
    ("consulta", "Consulta"),
    ("otro_ingreso", "Otro Ingreso"),
];

pub const EXPENSE_CATEGORIES: [(&str, &str); 7] = [
    ("renta", "Renta"),
    ("luz", "Luz"),
    ("agua", "Agua"),
    ("internet", "Internet"),
    ("insumos", "Insumos"),
    ("salarios", "Salarios"),
    ("otro_gasto", "Otro Gasto"),
];

pub const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

fn sequence_mut(finances: &mut Finances, kind: Kind) -> &mut Vec<Transaction> {
    match kind {
        Kind::Income => &mut finances.income,
        Kind::Expense => &mut finances.expenses,
    }
}

fn sequence(finances: &Finances, kind: Kind) -> &[Transaction] {
    match kind {
        Kind::Income => &finances.income,
        Kind::Expense => &finances.expenses,
    }
}

pub fn record_transaction(
    finances: &mut Finances,
    kind: Kind,
    input: TransactionInput,
) -> Result<Transaction, DomainError> {
    if input.description.trim().is_empty() {
        return Err(DomainError::missing("description"));
    }
    if input.category.trim().is_empty() {
        return Err(DomainError::missing("category"));
    }
    let amount: f64 = input
        .amount
        .trim()
        .parse()
        .map_err(|_| DomainError::missing("amount"))?;

    let transaction = Transaction {
        id: clock::new_id(),
        description: input.description,
        amount,
        date: if input.date.trim().is_empty() {
            clock::today_string()
        } else {
            input.date
        },
        category: input.category,
    };
    sequence_mut(finances, kind).push(transaction.clone());
    Ok(transaction)
}

pub fn delete_transaction(
    finances: &mut Finances,
    kind: Kind,
    id: &str,
) -> Result<(), DomainError> {
    let sequence = sequence_mut(finances, kind);
    let before = sequence.len();
    sequence.retain(|t| t.id != id);
    if sequence.len() == before {
        return Err(DomainError::not_found("transacción", id));
    }
    Ok(())
}

/// Transactions of one kind falling in the given calendar month. `month0` is
/// zero-based, matching the stored month index of the original data.
pub fn filter_by_month(
    finances: &Finances,
    kind: Kind,
    year: i32,
    month0: u32,
) -> Vec<Transaction> {
    sequence(finances, kind)
        .iter()
        .filter(|t| month_of(&t.date) == Some((year, month0)))
        .cloned()
        .collect()
}

pub fn monthly_aggregate(finances: &Finances, year: i32, month0: u32) -> MonthlySummary {
    let total_income: f64 = filter_by_month(finances, Kind::Income, year, month0)
        .iter()
        .map(|t| t.amount)
        .sum();
    let total_expenses: f64 = filter_by_month(finances, Kind::Expense, year, month0)
        .iter()
        .map(|t| t.amount)
        .sum();
    MonthlySummary {
        total_income,
        total_expenses,
        net: total_income - total_expenses,
    }
}

/// Plain-text monthly report: summary header, then every matching income and
/// expense line as `d/m/yyyy - description: $amount`.
pub fn render_report(finances: &Finances, year: i32, month0: u32) -> String {
    let summary = monthly_aggregate(finances, year, month0);
    let month = month_name(month0);

    let mut report = format!("REPORTE FINANCIERO - {month} {year}\n");
    report.push_str(&"=".repeat(50));
    report.push_str("\n\n");

    report.push_str("RESUMEN\n");
    report.push_str(&"-".repeat(30));
    report.push('\n');
    report.push_str(&format!(
        "Total Ingresos: ${}\n",
        format_amount(summary.total_income)
    ));
    report.push_str(&format!(
        "Total Gastos: ${}\n",
        format_amount(summary.total_expenses)
    ));
    report.push_str(&format!("Ganancia Neta: ${}\n\n", format_amount(summary.net)));

    report.push_str("INGRESOS\n");
    report.push_str(&"-".repeat(30));
    report.push('\n');
    for t in filter_by_month(finances, Kind::Income, year, month0) {
        report.push_str(&transaction_line(&t));
    }

    report.push_str("\nGASTOS\n");
    report.push_str(&"-".repeat(30));
    report.push('\n');
    for t in filter_by_month(finances, Kind::Expense, year, month0) {
        report.push_str(&transaction_line(&t));
    }

    report
}

pub fn report_filename(year: i32, month0: u32) -> String {
    format!("reporte-{}-{year}.txt", month_name(month0))
}

fn month_name(month0: u32) -> &'static str {
    MONTH_NAMES
        .get(month0 as usize)
        .copied()
        .unwrap_or("Desconocido")
}

fn transaction_line(t: &Transaction) -> String {
    let date = match parse_date(&t.date) {
        Some(d) => d.format("%-d/%-m/%Y").to_string(),
        None => t.date.clone(),
    };
    format!("{date} - {}: ${}\n", t.description, format_amount(t.amount))
}

/// Transaction dates are either plain calendar dates or full RFC 3339
/// timestamps (the seed data); the calendar day is whatever precedes the
/// `T` either way. Parsing tolerates missing zero padding (`2025-1-5`).
fn parse_date(date: &str) -> Option<NaiveDate> {
    let day = date.split('T').next().unwrap_or(date);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn month_of(date: &str) -> Option<(i32, u32)> {
    use chrono::Datelike;
    let parsed = parse_date(date)?;
    Some((parsed.year(), parsed.month0()))
}

/// Thousands-separated amount with up to two decimals.
fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let rounded = (amount.abs() * 100.0).round() / 100.0;
    let whole = rounded.trunc() as u64;
    let cents = ((rounded - rounded.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if cents > 0 {
        if cents % 10 == 0 {
            out.push_str(&format!(".{}", cents / 10));
        } else {
            out.push_str(&format!(".{cents:02}"));
        }
    }
    out
}
