#![cfg(not(tarpaulin_include))]

use propsheet::downloader::to_csv;
use propsheet::loader::load_proposals;
use propsheet::sheet::generate_sheet;

use std::env;
use std::fs;
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let s = Instant::now(); // Start time for the entire export
    let args: Vec<String> = env::args().collect();

    if args.len() != 3 {
        eprintln!("Usage: {} <proposals.json> <out.csv>", args[0]);
        return Ok(());
    }

    let proposals = load_proposals(&args[1])?;
    println!("Loaded {} proposals from {}", proposals.len(), args[1]);

    let sheet = generate_sheet(&proposals);
    println!(
        "Sheet: {} columns ({} titulares, {} dependentes), {} rows",
        sheet.total_columns,
        sheet.max_titulares,
        sheet.max_dependentes,
        sheet.data.len()
    );

    let csv = to_csv(&sheet)?;
    fs::write(&args[2], csv)?;
    println!("Wrote {}", args[2]);

    let e = s.elapsed().as_secs_f64(); // Calculate total elapsed time
    println!("Total elapsed time: {:.1} seconds", e);

    Ok(())
}
