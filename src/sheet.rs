use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analyzer::{ExportConfig, SheetStructure};
use crate::formatter::format_row;
use crate::headers::generate_headers;
use crate::proposal::Proposal;

/// One fully assembled export: headers, data rows and the schema maxima
///
/// `data` always holds exactly one row per input proposal and every row has
/// `total_columns` cells. Serializes camelCase for the REST layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetData {
    pub headers: Vec<String>,
    pub data: Vec<Vec<String>>,
    pub max_titulares: usize,
    pub max_dependentes: usize,
    pub max_vendor_attachments: usize,
    pub max_client_attachments: usize,
    pub total_columns: usize,
    pub last_updated: DateTime<Utc>,
}

/// Assemble the sheet for a batch with the default export constants
pub fn generate_sheet(proposals: &[Proposal]) -> SheetData {
    generate_sheet_with(proposals, &ExportConfig::default())
}

/// Assemble the sheet for a batch: one analyzer pass, one header pass, one
/// formatter pass per proposal, all sharing the same maxima
pub fn generate_sheet_with(proposals: &[Proposal], config: &ExportConfig) -> SheetData {
    let structure = SheetStructure::analyze(proposals, config);
    let headers = generate_headers(&structure);
    let data: Vec<Vec<String>> = proposals
        .iter()
        .map(|proposal| format_row(proposal, &structure, config))
        .collect();

    debug_assert!(data.iter().all(|row| row.len() == headers.len()));

    SheetData {
        headers,
        data,
        max_titulares: structure.max_titulares,
        max_dependentes: structure.max_dependentes,
        max_vendor_attachments: structure.max_vendor_attachments,
        max_client_attachments: structure.max_client_attachments,
        total_columns: structure.total_columns,
        last_updated: Utc::now(),
    }
}

/// Flatten a [`SheetData`] into a plain 2-D matrix with the headers as row 0,
/// the shape bulk spreadsheet "values" APIs expect
pub fn format_for_sheets(sheet: &SheetData) -> Vec<Vec<String>> {
    let mut matrix = Vec::with_capacity(sheet.data.len() + 1);
    matrix.push(sheet.headers.clone());
    matrix.extend(sheet.data.iter().cloned());
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::Person;

    #[test]
    fn empty_batch_yields_headers_and_no_rows() {
        let sheet = generate_sheet(&[]);
        assert_eq!(sheet.headers.len(), 71);
        assert_eq!(sheet.total_columns, 71);
        assert!(sheet.data.is_empty());
        assert_eq!(sheet.max_titulares, 3);
        assert_eq!(sheet.max_dependentes, 5);
    }

    #[test]
    fn one_row_per_proposal() {
        let batch = vec![
            Proposal::new("ABM-001"),
            Proposal::new("ABM-002"),
            Proposal::new("ABM-003"),
        ];
        let sheet = generate_sheet(&batch);
        assert_eq!(sheet.data.len(), 3);
        for row in &sheet.data {
            assert_eq!(row.len(), sheet.headers.len());
        }
    }

    #[test]
    fn all_rows_share_the_batch_maxima() {
        let wide = Proposal {
            dependentes: Some(vec![
                Person {
                    nome_completo: Some("D".to_string()),
                    ..Default::default()
                };
                9
            ]),
            ..Default::default()
        };
        let batch = vec![wide, Proposal::default()];
        let sheet = generate_sheet(&batch);
        assert_eq!(sheet.max_dependentes, 9);
        assert_eq!(sheet.data[0].len(), sheet.data[1].len());
        assert_eq!(sheet.data[1].len(), sheet.total_columns);
    }

    #[test]
    fn matrix_puts_headers_in_row_zero() {
        let batch = vec![Proposal::new("ABM-010")];
        let sheet = generate_sheet(&batch);
        let matrix = format_for_sheets(&sheet);
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix[0], sheet.headers);
        assert_eq!(matrix[1], sheet.data[0]);
    }
}
