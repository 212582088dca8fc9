use std::error::Error;

use crate::sampler::SampleResult;

/// MIME type advertised for the XLSX download.
pub const XLSX_MIME: &str = "application/vnd.ms-excel";

/// Suggested filename for the XLSX download.
pub const XLSX_FILENAME: &str = "random_categories.xlsx";

/// Convert a sample result to XLSX format
///
/// Encodes the result as a single-sheet workbook named `Sheet1` with a
/// header row matching the included columns, one data row per result row,
/// and no index column. Re-reading the blob with a spreadsheet reader
/// reproduces the same headers and rows.
///
/// # Arguments
/// * `result` - Reference to the sample result to convert
///
/// # Returns
/// * `Result<Vec<u8>, Box<dyn Error>>` - XLSX file content as bytes or an error
///
/// # Examples
/// ```
/// use catex::category::{CategoryDataset, CategoryRow, Level};
/// use catex::downloader::to_xlsx;
/// use catex::sampler::sample;
/// use catex::session::ExclusionSet;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let dataset = CategoryDataset::new(vec![
///     CategoryRow::new(["식품".into(), "음료".into(), "커피".into(), "원두커피".into()]),
/// ]);
/// let mut rng = StdRng::seed_from_u64(1);
/// let result = sample(&dataset, 1, Level::One, &ExclusionSet::new(), &mut rng).unwrap();
///
/// match to_xlsx(&result) {
///     Ok(xlsx_data) => println!("XLSX generated: {} bytes", xlsx_data.len()),
///     Err(e) => eprintln!("Failed to generate XLSX: {}", e),
/// }
/// ```
pub fn to_xlsx(result: &SampleResult) -> Result<Vec<u8>, Box<dyn Error>> {
    use rust_xlsxwriter::{Workbook, Worksheet};

    // Create a new workbook and worksheet
    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();
    worksheet.set_name("Sheet1")?;

    // Header row
    for (c, column) in result.columns().iter().enumerate() {
        worksheet.write_string(0, c as u16, *column)?;
    }

    // Data rows
    for (r, row) in result.rows().iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            worksheet.write_string((r + 1) as u32, c as u16, value)?;
        }
    }

    workbook.push_worksheet(worksheet);

    // Save to memory buffer
    let buffer = workbook.save_to_buffer()?;

    Ok(buffer)
}

/// Convert a sample result to CSV format
///
/// Produces a string with the included column headers on the first line and
/// one comma-separated line per result row. Special characters (commas,
/// quotes, newlines) are properly escaped.
///
/// # Arguments
/// * `result` - Reference to the sample result to convert
///
/// # Returns
/// * `String` - CSV content
pub fn to_csv(result: &SampleResult) -> String {
    let mut csv_content = String::new();

    // Add header row
    for (c, column) in result.columns().iter().enumerate() {
        if c > 0 {
            csv_content.push(',');
        }
        csv_content.push_str(&escape_csv_field(column));
    }
    csv_content.push('\n');

    // Add data rows
    for row in result.rows() {
        for (c, value) in row.iter().enumerate() {
            if c > 0 {
                csv_content.push(',');
            }
            csv_content.push_str(&escape_csv_field(value));
        }
        csv_content.push('\n');
    }

    csv_content
}

// Escape commas, quotes, and newlines as needed
fn escape_csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        let escaped = value.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        value.to_string()
    }
}
