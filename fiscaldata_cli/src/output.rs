use anyhow::Result;
use fiscaldata_lib::Table;
use tabled::builder::Builder;
use tabled::settings::Style;

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

// -- Record builder --

/// Result tables carry their column set at runtime (a pivoted table grows
/// one column per category seen in the data), so rendering goes through the
/// tabled builder rather than a derived row struct.
fn build_records(table: &Table) -> Builder {
    let mut builder = Builder::default();
    builder.push_record(table.columns().iter().map(String::as_str));
    for row in table.rows() {
        builder.push_record(row.values().iter().map(ToString::to_string));
    }
    builder
}

// -- Table output --

pub fn print_table(table: &Table) {
    let mut out = build_records(table).build();
    out.with(Style::sharp());
    println!("{}", out);
}

// -- Markdown output --

pub fn print_markdown(table: &Table) {
    let mut out = build_records(table).build();
    out.with(Style::markdown());
    println!("{}", out);
}

// -- CSV output --

pub fn print_csv(table: &Table) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    write_records(table, &mut wtr)?;
    wtr.flush()?;
    Ok(())
}

fn write_records<W: std::io::Write>(table: &Table, wtr: &mut csv::Writer<W>) -> Result<()> {
    wtr.write_record(table.columns())?;
    for row in table.rows() {
        wtr.write_record(row.values().iter().map(ToString::to_string))?;
    }
    Ok(())
}

// -- JSON output --

pub fn print_json(table: &Table) {
    match serde_json::to_string_pretty(&table.to_json()) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
