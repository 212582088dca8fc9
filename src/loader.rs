use calamine::{Data, Reader, open_workbook_auto};
use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::category::{CategoryDataset, CategoryRow, Level};

/// Load a category dataset from an Excel file
///
/// Reads the first worksheet, locates the four taxonomy columns by their
/// header names (대분류, 중분류, 소분류, 세분류), and collects every data row
/// into a [`CategoryDataset`]. Rows whose level-1 cell is empty are skipped,
/// which drops the blank trailing rows spreadsheet editors tend to leave.
///
/// # Arguments
/// * `filepath` - Path to the `.xlsx` or `.xls` file to load
///
/// # Returns
/// * `Result<CategoryDataset, Box<dyn Error>>` - The loaded dataset or an error
///
/// # Examples
/// ```no_run
/// use catex::loader::from_excel;
///
/// match from_excel("categories.xlsx") {
///     Ok(dataset) => println!("Loaded {} category rows", dataset.len()),
///     Err(e) => eprintln!("Error loading Excel: {}", e),
/// }
/// ```
pub fn from_excel(filepath: impl AsRef<Path>) -> Result<CategoryDataset, Box<dyn Error>> {
    let mut workbook = open_workbook_auto(filepath)?;

    // Get the first worksheet
    let sheet_name = workbook
        .sheet_names()
        .first()
        .ok_or("No sheets found in Excel file")?
        .clone();

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows();

    let header = rows.next().ok_or("Excel sheet is empty")?;
    let header_cells: Vec<String> = header.iter().map(cell_to_string).collect();
    let indices = level_column_indices(&header_cells)?;

    let mut category_rows = Vec::new();
    for row in rows {
        let values = indices.map(|idx| row.get(idx).map(cell_to_string).unwrap_or_default());
        if values[0].is_empty() {
            continue;
        }
        category_rows.push(CategoryRow::new(values));
    }

    Ok(CategoryDataset::new(category_rows))
}

/// Load a category dataset from a CSV file
///
/// Expects the same header names as the Excel loader. Quoted fields with
/// embedded commas, quotes, or doubled quotes are handled.
///
/// # Arguments
/// * `filepath` - Path to the CSV file to load
///
/// # Returns
/// * `Result<CategoryDataset, Box<dyn Error>>` - The loaded dataset or an error
///
/// # Examples
/// ```no_run
/// use catex::loader::from_csv;
///
/// match from_csv("categories.csv") {
///     Ok(dataset) => println!("Loaded {} category rows", dataset.len()),
///     Err(e) => eprintln!("Error loading CSV: {}", e),
/// }
/// ```
pub fn from_csv(filepath: impl AsRef<Path>) -> Result<CategoryDataset, Box<dyn Error>> {
    let file = File::open(filepath)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header_line = lines.next().ok_or("CSV file is empty")??;
    let header_cells: Vec<String> = parse_csv_row(&header_line)
        .into_iter()
        .map(|cell| cell.trim().to_string())
        .collect();
    let indices = level_column_indices(&header_cells)?;

    let mut category_rows = Vec::new();
    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let cells = parse_csv_row(&line);
        let values = indices
            .map(|idx| cells.get(idx).map(|cell| cell.trim().to_string()).unwrap_or_default());
        if values[0].is_empty() {
            continue;
        }
        category_rows.push(CategoryRow::new(values));
    }

    Ok(CategoryDataset::new(category_rows))
}

/// Detect file type and load appropriate format
///
/// This function examines the file extension and calls the appropriate loader
/// for CSV or Excel files.
///
/// # Arguments
/// * `filepath` - Path to the file to load
///
/// # Returns
/// * `Result<CategoryDataset, Box<dyn Error>>` - The loaded dataset or an error
pub fn load_dataset(filepath: impl AsRef<Path>) -> Result<CategoryDataset, Box<dyn Error>> {
    let path = filepath.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("csv") => from_csv(path),
        Some("xlsx") | Some("xls") => from_excel(path),
        Some(ext) => Err(format!("Unsupported file extension: {}", ext).into()),
        None => Err("File has no extension".into()),
    }
}

// Locate each level's column in the header row, by header name.
fn level_column_indices(header_cells: &[String]) -> Result<[usize; 4], Box<dyn Error>> {
    let mut indices = [0usize; 4];
    for level in Level::ALL {
        let position = header_cells
            .iter()
            .position(|cell| cell == level.header())
            .ok_or_else(|| format!("Missing category column '{}'", level.header()))?;
        indices[level.index()] = position;
    }
    Ok(indices)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

// Parse a CSV row into a vector of strings
fn parse_csv_row(line: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current_field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if let Some(&next) = chars.peek() {
                    if next == '"' && in_quotes {
                        // Double quote inside quoted field - add a single quote
                        current_field.push('"');
                        chars.next();
                    } else {
                        // Toggle quote state
                        in_quotes = !in_quotes;
                    }
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                // End of field
                result.push(current_field);
                current_field = String::new();
            }
            _ => {
                current_field.push(c);
            }
        }
    }

    // Add the last field
    result.push(current_field);

    result
}
