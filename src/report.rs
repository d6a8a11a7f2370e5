//! Text rendering of ledger data for the command line.
//!
//! Amounts are shown the Brazilian way: `R$` prefix, `.` between thousands
//! and `,` before the cents.
use crate::entry::{format_timestamp, Entry, EntryKind};
use crate::errors::ExportError;
use crate::ledger::Summary;

const EMPTY_LISTING: &str = "Nenhuma transação registrada até o momento.";

/// Formats a value as Brazilian reais, e.g. `R$ 1.234,56`.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (integer, cents) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (idx, digit) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("R$ {}{},{}", sign, grouped, cents)
}

/// The confirmation line printed after an entry is recorded.
pub fn render_added(entry: &Entry) -> String {
    format!(
        "Transação adicionada: {}{} [{}] {}",
        entry.kind().sign(),
        format_currency(entry.amount()),
        format_timestamp(&entry.timestamp()),
        entry.description()
    )
}

/// Renders entries as a numbered table, or a notice if there are none.
pub fn render_listing(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return EMPTY_LISTING.to_string();
    }

    let rows = entries.iter().enumerate().map(|(idx, entry)| {
        let kind = match entry.kind() {
            EntryKind::Credit => "Entrada",
            EntryKind::Debit => "Saída",
        };
        format!(
            "{:>2} {:<19} {:<8} {:<12} {}",
            idx + 1,
            format_timestamp(&entry.timestamp()),
            kind,
            format_currency(entry.amount()),
            entry.description()
        )
    });

    [
        "#  Data e hora           Tipo     Valor        Descrição".to_string(),
        "-".repeat(60),
    ]
    .into_iter()
    .chain(rows)
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn render_summary(summary: &Summary) -> String {
    [
        "Resumo financeiro".to_string(),
        "-".repeat(30),
        format!("Entradas: {}", format_currency(summary.credits)),
        format!("Saídas:   {}", format_currency(summary.debits)),
        format!("Saldo:    {}", format_currency(summary.balance)),
    ]
    .join("\n")
}

/// Serializes entries as CSV with a `kind,description,value,timestamp`
/// header.
pub fn export_csv(entries: &[Entry]) -> Result<String, ExportError> {
    // The header is written by hand so that an empty ledger still exports
    // one.
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(vec![]);
    wtr.write_record(["kind", "description", "value", "timestamp"])?;

    for entry in entries {
        wtr.serialize(entry)?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(String::from_utf8(wtr.into_inner()?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(kind: EntryKind, description: &str, amount: f64, day: u32) -> Entry {
        let moment = NaiveDate::from_ymd_opt(2023, 1, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Entry::new(kind, description, amount, Some(moment)).unwrap()
    }

    #[test]
    fn should_format_currency_with_brazilian_separators() {
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(5.5), "R$ 5,50");
        assert_eq!(format_currency(999.999), "R$ 1.000,00");
        assert_eq!(format_currency(1234.5), "R$ 1.234,50");
        assert_eq!(format_currency(2500.0), "R$ 2.500,00");
        assert_eq!(format_currency(123456.78), "R$ 123.456,78");
        assert_eq!(format_currency(1234567.891), "R$ 1.234.567,89");
    }

    #[test]
    fn should_keep_negative_sign_after_prefix() {
        assert_eq!(format_currency(-450.0), "R$ -450,00");
        assert_eq!(format_currency(-1234.5), "R$ -1.234,50");
    }

    #[test]
    fn should_render_added_entry_with_sign() {
        let credit = entry(EntryKind::Credit, "Salário", 2500.0, 10);
        assert_eq!(
            render_added(&credit),
            "Transação adicionada: +R$ 2.500,00 [2023-01-10T09:00:00] Salário"
        );

        let debit = entry(EntryKind::Debit, "Aluguel", 1200.0, 12);
        assert_eq!(
            render_added(&debit),
            "Transação adicionada: -R$ 1.200,00 [2023-01-12T09:00:00] Aluguel"
        );
    }

    #[test]
    fn should_render_empty_listing_notice() {
        assert_eq!(render_listing(&[]), EMPTY_LISTING);
    }

    #[test]
    fn should_render_listing_table() {
        let entries = vec![
            entry(EntryKind::Credit, "Salário", 2500.0, 10),
            entry(EntryKind::Debit, "Aluguel", 1200.0, 12),
        ];
        let output = render_listing(&entries);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "#  Data e hora           Tipo     Valor        Descrição"
        );
        assert_eq!(lines[1], "-".repeat(60));
        assert_eq!(
            lines[2],
            " 1 2023-01-10T09:00:00 Entrada  R$ 2.500,00  Salário"
        );
        assert_eq!(
            lines[3],
            " 2 2023-01-12T09:00:00 Saída    R$ 1.200,00  Aluguel"
        );
    }

    #[test]
    fn should_render_summary() {
        let summary = Summary {
            credits: 800.0,
            debits: 350.0,
            balance: 450.0,
        };
        assert_eq!(
            render_summary(&summary),
            "Resumo financeiro\n\
             ------------------------------\n\
             Entradas: R$ 800,00\n\
             Saídas:   R$ 350,00\n\
             Saldo:    R$ 450,00"
        );
    }

    #[test]
    fn should_export_entries_as_csv() {
        let entries = vec![
            entry(EntryKind::Credit, "Salário", 2500.0, 10),
            entry(EntryKind::Debit, "Aluguel, casa", 1200.5, 12),
        ];
        let output = export_csv(&entries).unwrap();
        assert_eq!(
            output,
            "kind,description,value,timestamp\n\
             entrada,Salário,2500.0,2023-01-10T09:00:00\n\
             saida,\"Aluguel, casa\",1200.5,2023-01-12T09:00:00\n"
        );
    }

    #[test]
    fn should_export_header_for_no_entries() {
        assert_eq!(
            export_csv(&[]).unwrap(),
            "kind,description,value,timestamp\n"
        );
    }
}
