#![cfg(not(tarpaulin_include))]

use crate::sheet::SheetData;
use std::error::Error;

/// Convert an assembled sheet to CSV format
///
/// This function exports a generated proposal sheet to CSV (Comma-Separated
/// Values) format. It creates a string with the sheet data where:
/// - Row 0 holds the generated column names (ID_ABM, EMPRESA, ...)
/// - Values are comma-separated
/// - Special characters (commas, quotes, newlines) are properly escaped
///
/// # Arguments
/// * `sheet` - Reference to the assembled sheet to convert
///
/// # Returns
/// * `Result<String, Box<dyn Error>>` - CSV content as a string or an error
///
/// # Examples
/// ```
/// use propsheet::sheet::generate_sheet;
/// use propsheet::downloader::to_csv;
///
/// let sheet = generate_sheet(&[]);
/// match to_csv(&sheet) {
///     Ok(csv) => println!("CSV generated: {} bytes", csv.len()),
///     Err(e) => eprintln!("Failed to generate CSV: {}", e),
/// }
/// ```
pub fn to_csv(sheet: &SheetData) -> Result<String, Box<dyn Error>> {
    let mut csv_content = String::new();

    // Add header row with generated column names
    for (c, name) in sheet.headers.iter().enumerate() {
        if c > 0 {
            csv_content.push(',');
        }
        csv_content.push_str(&escape_csv_field(name));
    }
    csv_content.push('\n');

    // Add data rows
    for row in &sheet.data {
        for (c, value) in row.iter().enumerate() {
            if c > 0 {
                csv_content.push(',');
            }
            csv_content.push_str(&escape_csv_field(value));
        }
        csv_content.push('\n');
    }

    Ok(csv_content)
}

/// Convert an assembled sheet to XLSX format
///
/// This function exports a generated proposal sheet to XLSX (Excel) format
/// using the rust_xlsxwriter library. It preserves all cell values in a format
/// that Microsoft Excel and other spreadsheet applications can open.
///
/// # Arguments
/// * `sheet` - Reference to the assembled sheet to convert
///
/// # Returns
/// * `Result<Vec<u8>, Box<dyn Error>>` - XLSX file content as bytes or an error
#[cfg(feature = "web")]
pub fn to_xlsx(sheet: &SheetData) -> Result<Vec<u8>, Box<dyn Error>> {
    use rust_xlsxwriter::{Workbook, Worksheet};

    // Create a new workbook and worksheet
    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();

    for (c, name) in sheet.headers.iter().enumerate() {
        worksheet.write_string(0, c as u16, name)?;
    }

    for (r, row) in sheet.data.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                worksheet.write_string((r + 1) as u32, c as u16, value)?;
            }
        }
    }

    workbook.push_worksheet(worksheet);

    // Save to memory buffer
    let buffer = workbook.save_to_buffer()?;

    Ok(buffer)
}

// Handle value - escape commas, quotes, newlines as needed
fn escape_csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        let escaped = value.replace("\"", "\"\"");
        format!("\"{}\"", escaped)
    } else {
        value.to_string()
    }
}
