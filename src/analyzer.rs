use serde::{Deserialize, Serialize};

use crate::headers::{
    ATTACHMENT_FIELD_COUNT, BASE_COLUMNS, DEPENDENTE_FIELD_COUNT, TITULAR_FIELD_COUNT,
    TRAILING_COLUMNS,
};
use crate::proposal::Proposal;

/// Named export constants, overridable in tests
///
/// The floor slot counts guarantee a minimum schema width even for an empty
/// batch; the commission fields are business constants the row formatter
/// stamps onto every row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Minimum title-holder slots reserved in the schema
    pub min_titulares: usize,

    /// Minimum dependent slots reserved in the schema
    pub min_dependentes: usize,

    /// Minimum vendor-attachment slots reserved in the schema
    pub min_vendor_attachments: usize,

    /// Minimum client-attachment slots reserved in the schema
    pub min_client_attachments: usize,

    /// Supervisor name stamped on every row
    pub supervisor_nome: String,

    /// Supervisor commission stamped on every row
    pub supervisor_percent: String,

    /// Flat commission applied when a meeting name is present
    pub reuniao_percent: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            min_titulares: 3,
            min_dependentes: 5,
            min_vendor_attachments: 3,
            min_client_attachments: 3,
            supervisor_nome: "Patricia Silva".to_string(),
            supervisor_percent: "5%".to_string(),
            reuniao_percent: "10%".to_string(),
        }
    }
}

/// The schema width computed for one export batch
///
/// Each maximum is the larger of the configured floor and the longest
/// corresponding array observed across *all* proposals in the batch, so every
/// row in the batch shares one schema regardless of how sparse any single
/// proposal is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetStructure {
    pub max_titulares: usize,
    pub max_dependentes: usize,
    pub max_vendor_attachments: usize,
    pub max_client_attachments: usize,
    pub total_columns: usize,
}

impl SheetStructure {
    /// Scan the batch once and compute the schema maxima
    ///
    /// A missing sub-array counts as length 0; malformed proposals cannot
    /// fail this pass, only widen or not widen the schema.
    pub fn analyze(proposals: &[Proposal], config: &ExportConfig) -> Self {
        let mut max_titulares = config.min_titulares;
        let mut max_dependentes = config.min_dependentes;
        let mut max_vendor_attachments = config.min_vendor_attachments;
        let mut max_client_attachments = config.min_client_attachments;

        for proposal in proposals {
            max_titulares = max_titulares.max(proposal.titulares().len());
            max_dependentes = max_dependentes.max(proposal.dependentes().len());
            max_vendor_attachments =
                max_vendor_attachments.max(proposal.vendor_attachments().len());
            max_client_attachments =
                max_client_attachments.max(proposal.client_attachments().len());
        }

        let total_columns = BASE_COLUMNS.len()
            + ATTACHMENT_FIELD_COUNT * max_vendor_attachments
            + ATTACHMENT_FIELD_COUNT * max_client_attachments
            + TITULAR_FIELD_COUNT * max_titulares
            + DEPENDENTE_FIELD_COUNT * max_dependentes
            + TRAILING_COLUMNS.len();

        SheetStructure {
            max_titulares,
            max_dependentes,
            max_vendor_attachments,
            max_client_attachments,
            total_columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::Person;

    fn with_titulares(n: usize) -> Proposal {
        Proposal {
            titulares: Some(vec![Person::default(); n]),
            ..Default::default()
        }
    }

    #[test]
    fn empty_batch_yields_floor_values() {
        let s = SheetStructure::analyze(&[], &ExportConfig::default());
        assert_eq!(s.max_titulares, 3);
        assert_eq!(s.max_dependentes, 5);
        assert_eq!(s.max_vendor_attachments, 3);
        assert_eq!(s.max_client_attachments, 3);
        assert_eq!(s.total_columns, 71);
    }

    #[test]
    fn maxima_grow_to_the_widest_proposal() {
        let batch = vec![with_titulares(2), with_titulares(7), with_titulares(1)];
        let s = SheetStructure::analyze(&batch, &ExportConfig::default());
        assert_eq!(s.max_titulares, 7);
        // other maxima untouched by the batch stay at their floors
        assert_eq!(s.max_dependentes, 5);
    }

    #[test]
    fn data_never_shrinks_the_floor() {
        let batch = vec![with_titulares(1)];
        let s = SheetStructure::analyze(&batch, &ExportConfig::default());
        assert_eq!(s.max_titulares, 3);
    }

    #[test]
    fn missing_arrays_count_as_empty() {
        let p = Proposal::default();
        assert_eq!(p.titulares().len(), 0);
        let s = SheetStructure::analyze(&[p], &ExportConfig::default());
        assert_eq!(s.max_titulares, 3);
        assert_eq!(s.total_columns, 71);
    }

    #[test]
    fn total_columns_tracks_each_group() {
        let config = ExportConfig::default();
        let batch = vec![with_titulares(10)];
        let s = SheetStructure::analyze(&batch, &config);
        // 7 extra titular slots over the floor add 5 columns each
        assert_eq!(s.total_columns, 71 + 7 * 5);
    }

    #[test]
    fn floors_are_overridable() {
        let config = ExportConfig {
            min_titulares: 1,
            min_dependentes: 1,
            min_vendor_attachments: 0,
            min_client_attachments: 0,
            ..Default::default()
        };
        let s = SheetStructure::analyze(&[], &config);
        assert_eq!(s.max_titulares, 1);
        assert_eq!(s.total_columns, 26 + 5 + 3 + 3);
    }
}
