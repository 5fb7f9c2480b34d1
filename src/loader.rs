#![cfg(not(tarpaulin_include))]

use crate::proposal::Proposal;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load a proposal batch from a JSON file
///
/// This function imports a JSON array of proposal records in the upstream
/// camelCase wire format. Missing optional fields deserialize to their
/// defaults, so partially filled proposals load without error.
///
/// # Arguments
/// * `filepath` - Path to the JSON file to load
///
/// # Returns
/// * `Result<Vec<Proposal>, Box<dyn Error>>` - The loaded batch or an error
///
/// # Examples
/// ```no_run
/// use propsheet::loader::from_json;
///
/// match from_json("proposals.json") {
///     Ok(batch) => println!("Successfully loaded {} proposals", batch.len()),
///     Err(e) => eprintln!("Error loading JSON: {}", e),
/// }
/// ```
pub fn from_json(filepath: impl AsRef<Path>) -> Result<Vec<Proposal>, Box<dyn Error>> {
    let file = File::open(filepath)?;
    let reader = BufReader::new(file);
    let proposals: Vec<Proposal> = serde_json::from_reader(reader)?;
    Ok(proposals)
}

/// Detect file type and load the appropriate format
///
/// This function examines the file extension and calls the appropriate loader.
/// Only JSON batches are supported; snapshot files go through
/// `saving::load_snapshot` instead.
///
/// # Arguments
/// * `filepath` - Path to the file to load
///
/// # Returns
/// * `Result<Vec<Proposal>, Box<dyn Error>>` - The loaded batch or an error
///
/// # Examples
/// ```no_run
/// use propsheet::loader::load_proposals;
///
/// match load_proposals("proposals.json") {
///     Ok(batch) => println!("Successfully loaded batch"),
///     Err(e) => eprintln!("Error loading file: {}", e),
/// }
/// ```
pub fn load_proposals(filepath: impl AsRef<Path>) -> Result<Vec<Proposal>, Box<dyn Error>> {
    let path = filepath.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("json") => from_json(path),
        Some(ext) => Err(format!("Unsupported file extension: {}", ext).into()),
        None => Err("File has no extension".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_batch_from_json_file() {
        let mut file = tempfile::NamedTempFile::with_suffix(".json").unwrap();
        write!(
            file,
            r#"[{{"abmCode":"ABM-123","titulares":[{{"nomeCompleto":"Jane Doe"}}]}}]"#
        )
        .unwrap();
        let batch = load_proposals(file.path()).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].abm_code, "ABM-123");
        assert_eq!(batch[0].titulares().len(), 1);
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = tempfile::NamedTempFile::with_suffix(".xml").unwrap();
        assert!(load_proposals(file.path()).is_err());
    }
}
