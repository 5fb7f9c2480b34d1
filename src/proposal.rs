use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

lazy_static! {
    static ref ABM_CODE_REGEX: Regex = Regex::new(r"^ABM-[0-9]{3,6}$").unwrap();
}

/// A single insurance-contract offer, tracked from creation to implementation
///
/// Proposals arrive from the vendor portal as JSON with the upstream camelCase
/// field names. Every nested structure is optional: a proposal fresh out of
/// the vendor portal may carry nothing but an ABM code, and the export layer
/// treats every missing field as its documented default instead of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Proposal {
    /// Opaque storage id (assigned on create when blank)
    pub id: String,

    /// Short human-facing business identifier, e.g. "ABM-1042"
    pub abm_code: String,

    /// Company/plan contract details
    pub contract_data: Option<ContractData>,

    /// Title-holders (primary insured persons), in portal entry order
    pub titulares: Option<Vec<Person>>,

    /// Dependents covered under a title-holder's plan
    pub dependentes: Option<Vec<Person>>,

    /// Documents uploaded by the vendor
    pub vendor_attachments: Option<Vec<Attachment>>,

    /// Documents uploaded by the client
    pub client_attachments: Option<Vec<Attachment>>,

    /// Internal staff-only notes and commission flags
    pub internal_data: Option<InternalData>,

    /// Workflow state
    pub status: ProposalStatus,

    /// "low" / "medium" / "high"; absent means "medium"
    pub priority: Option<String>,

    pub approved: Option<bool>,
    pub rejected: Option<bool>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractData {
    pub nome_empresa: Option<String>,
    pub cnpj: Option<String>,
    pub plano: Option<String>,
    pub valor: Option<String>,
    pub vigencia_inicio: Option<String>,
    pub vigencia_fim: Option<String>,
    pub odonto_conjugado: Option<bool>,
    pub compulsorio: Option<bool>,
}

/// A title-holder or dependent. `parentesco` is only populated for dependents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Person {
    pub nome_completo: Option<String>,
    pub cpf: Option<String>,
    pub rg: Option<String>,
    pub email_pessoal: Option<String>,
    pub telefone_pessoal: Option<String>,
    pub parentesco: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attachment {
    pub name: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InternalData {
    /// Primary seller name
    pub vendedor: Option<String>,

    /// Secondary seller name (split sales only)
    pub vendedor2: Option<String>,

    /// Split sale: both sellers credited at half commission
    pub venda_dupla: Option<bool>,

    /// Meeting name; presence triggers the flat meeting commission
    pub reuniao: Option<String>,

    pub desconto: Option<String>,
    pub origem: Option<String>,
    pub observacoes: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    #[default]
    EmAnalise,
    PendenteCliente,
    Aprovada,
    Rejeitada,
    Implantada,
    Cancelada,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::EmAnalise => "em_analise",
            ProposalStatus::PendenteCliente => "pendente_cliente",
            ProposalStatus::Aprovada => "aprovada",
            ProposalStatus::Rejeitada => "rejeitada",
            ProposalStatus::Implantada => "implantada",
            ProposalStatus::Cancelada => "cancelada",
        }
    }
}

impl Proposal {
    pub fn new(abm_code: &str) -> Self {
        Proposal {
            id: Uuid::new_v4().to_string(),
            abm_code: abm_code.to_string(),
            created_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Check the ABM code against the portal naming convention
    pub fn has_valid_abm(&self) -> bool {
        ABM_CODE_REGEX.is_match(&self.abm_code)
    }

    // Slice accessors: a missing sub-array reads as empty, never as an error
    pub fn titulares(&self) -> &[Person] {
        self.titulares.as_deref().unwrap_or(&[])
    }

    pub fn dependentes(&self) -> &[Person] {
        self.dependentes.as_deref().unwrap_or(&[])
    }

    pub fn vendor_attachments(&self) -> &[Attachment] {
        self.vendor_attachments.as_deref().unwrap_or(&[])
    }

    pub fn client_attachments(&self) -> &[Attachment] {
        self.client_attachments.as_deref().unwrap_or(&[])
    }
}

impl Person {
    /// A person with a blank name is treated as absent by the export layer
    pub fn has_name(&self) -> bool {
        self.nome_completo
            .as_deref()
            .map(|n| !n.is_empty())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abm_code_validation() {
        assert!(Proposal::new("ABM-1042").has_valid_abm());
        assert!(Proposal::new("ABM-100200").has_valid_abm());
        assert!(!Proposal::new("ABM-12").has_valid_abm());
        assert!(!Proposal::new("abm-1042").has_valid_abm());
        assert!(!Proposal::new("1042").has_valid_abm());
        assert!(!Proposal::new("").has_valid_abm());
    }

    #[test]
    fn new_proposal_gets_id_and_timestamp() {
        let p = Proposal::new("ABM-555");
        assert!(!p.id.is_empty());
        assert!(p.created_at.is_some());
        assert_eq!(p.status, ProposalStatus::EmAnalise);
    }

    #[test]
    fn deserializes_partial_camel_case_json() {
        let json = r#"{
            "abmCode": "ABM-123",
            "contractData": { "nomeEmpresa": "Acme Ltda", "odontoConjugado": true },
            "titulares": [ { "nomeCompleto": "Jane Doe", "cpf": "123.456.789-00" } ],
            "internalData": { "vendaDupla": true, "vendedor": "Carlos" }
        }"#;
        let p: Proposal = serde_json::from_str(json).unwrap();
        assert_eq!(p.abm_code, "ABM-123");
        let contract = p.contract_data.as_ref().unwrap();
        assert_eq!(contract.nome_empresa.as_deref(), Some("Acme Ltda"));
        assert_eq!(contract.odonto_conjugado, Some(true));
        assert_eq!(p.titulares().len(), 1);
        assert!(p.titulares()[0].has_name());
        assert_eq!(p.dependentes().len(), 0);
        assert_eq!(p.vendor_attachments().len(), 0);
        assert_eq!(p.internal_data.unwrap().venda_dupla, Some(true));
    }

    #[test]
    fn person_with_blank_name_reads_as_absent() {
        let p = Person {
            nome_completo: Some(String::new()),
            cpf: Some("111.222.333-44".to_string()),
            ..Default::default()
        };
        assert!(!p.has_name());
    }

    #[test]
    fn status_tokens_are_stable() {
        assert_eq!(ProposalStatus::EmAnalise.as_str(), "em_analise");
        assert_eq!(ProposalStatus::Implantada.as_str(), "implantada");
        let s: ProposalStatus = serde_json::from_str("\"aprovada\"").unwrap();
        assert_eq!(s, ProposalStatus::Aprovada);
    }
}
