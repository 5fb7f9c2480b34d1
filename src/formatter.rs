use chrono::Utc;

use crate::analyzer::{ExportConfig, SheetStructure};
use crate::headers::{
    client_attachment_columns, dependente_columns, titular_columns, vendor_attachment_columns,
};
use crate::proposal::{Attachment, Person, Proposal};

/// Ordered (column, value) accumulator
///
/// Rows are built as named pairs and projected to values at the end, so the
/// traversal order is the single source of truth for both column names and
/// cell positions.
struct RowBuilder {
    fields: Vec<(String, String)>,
}

impl RowBuilder {
    fn with_capacity(capacity: usize) -> Self {
        RowBuilder {
            fields: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, name: &str, value: String) {
        self.fields.push((name.to_string(), value));
    }

    fn push_group<const N: usize>(&mut self, names: [String; N], values: [String; N]) {
        for (name, value) in names.into_iter().zip(values) {
            self.fields.push((name, value));
        }
    }
}

fn sim_nao(flag: bool) -> String {
    if flag { "Sim" } else { "Não" }.to_string()
}

fn opt_sim_nao(flag: Option<bool>) -> String {
    flag.map(sim_nao).unwrap_or_default()
}

fn opt_str(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn attachment_pair(attachment: Option<&Attachment>) -> [String; 2] {
    match attachment {
        Some(a) => [opt_str(&a.name), opt_str(&a.url)],
        None => [String::new(), String::new()],
    }
}

fn titular_values(person: Option<&Person>) -> [String; 5] {
    match person {
        // A person with a blank name pads exactly like an absent slot
        Some(p) if p.has_name() => [
            opt_str(&p.nome_completo),
            opt_str(&p.cpf),
            opt_str(&p.rg),
            opt_str(&p.email_pessoal),
            opt_str(&p.telefone_pessoal),
        ],
        _ => Default::default(),
    }
}

fn dependente_values(person: Option<&Person>) -> [String; 3] {
    match person {
        Some(p) if p.has_name() => [
            opt_str(&p.nome_completo),
            opt_str(&p.cpf),
            opt_str(&p.parentesco),
        ],
        _ => Default::default(),
    }
}

/// Format one proposal as a single flat row aligned to `generate_headers`
///
/// Every column the headers declare gets exactly one cell: missing scalars
/// fall back to empty strings (or their documented literal default), missing
/// slots pad with empties. The function never fails on malformed input.
pub fn format_row(
    proposal: &Proposal,
    structure: &SheetStructure,
    config: &ExportConfig,
) -> Vec<String> {
    format_row_fields(proposal, structure, config)
        .into_iter()
        .map(|(_, value)| value)
        .collect()
}

/// The named-pair form of [`format_row`], kept public within the crate so the
/// assembler and tests can verify name/position agreement with the headers.
pub(crate) fn format_row_fields(
    proposal: &Proposal,
    structure: &SheetStructure,
    config: &ExportConfig,
) -> Vec<(String, String)> {
    let contract = proposal.contract_data.clone().unwrap_or_default();
    let internal = proposal.internal_data.clone().unwrap_or_default();

    let mut row = RowBuilder::with_capacity(structure.total_columns);

    // Identity and contract block
    row.push("ID_ABM", proposal.abm_code.clone());
    row.push("EMPRESA", opt_str(&contract.nome_empresa));
    row.push("CNPJ", opt_str(&contract.cnpj));
    row.push("PLANO", opt_str(&contract.plano));
    row.push("VALOR", opt_str(&contract.valor));
    row.push("VIGENCIA_INICIO", opt_str(&contract.vigencia_inicio));
    row.push("VIGENCIA_FIM", opt_str(&contract.vigencia_fim));
    row.push("ODONTO_CONJUGADO", opt_sim_nao(contract.odonto_conjugado));
    row.push("COMPULSORIO", opt_sim_nao(contract.compulsorio));

    // Workflow block
    row.push("STATUS", proposal.status.as_str().to_string());
    row.push(
        "PRIORIDADE",
        proposal
            .priority
            .clone()
            .unwrap_or_else(|| "medium".to_string()),
    );
    row.push("APROVADO", sim_nao(proposal.approved.unwrap_or(false)));
    row.push("REJEITADO", sim_nao(proposal.rejected.unwrap_or(false)));

    // Internal notes
    row.push("DESCONTO", opt_str(&internal.desconto));
    row.push("ORIGEM", opt_str(&internal.origem));
    row.push("OBSERVACOES", opt_str(&internal.observacoes));

    // Commission block: a split sale credits both sellers at half, otherwise
    // the primary seller takes everything and the secondary columns stay blank
    let venda_dupla = internal.venda_dupla.unwrap_or(false);
    row.push("VENDEDOR_1_NOME", opt_str(&internal.vendedor));
    if venda_dupla {
        row.push("VENDEDOR_1_PERCENT", "50%".to_string());
        row.push("VENDEDOR_2_NOME", opt_str(&internal.vendedor2));
        row.push("VENDEDOR_2_PERCENT", "50%".to_string());
    } else {
        row.push("VENDEDOR_1_PERCENT", "100%".to_string());
        row.push("VENDEDOR_2_NOME", String::new());
        row.push("VENDEDOR_2_PERCENT", String::new());
    }

    let reuniao = opt_str(&internal.reuniao);
    let reuniao_percent = if reuniao.is_empty() {
        String::new()
    } else {
        config.reuniao_percent.clone()
    };
    row.push("REUNIAO_NOME", reuniao);
    row.push("REUNIAO_PERCENT", reuniao_percent);
    row.push("SUPERVISOR_NOME", config.supervisor_nome.clone());
    row.push("SUPERVISOR_PERCENT", config.supervisor_percent.clone());

    // Attachment summary counts
    row.push(
        "QTD_ANEXOS_VENDEDOR",
        proposal.vendor_attachments().len().to_string(),
    );
    row.push(
        "QTD_ANEXOS_CLIENTE",
        proposal.client_attachments().len().to_string(),
    );

    // Attachment links, aligned by slot index
    let vendor = proposal.vendor_attachments();
    for i in 0..structure.max_vendor_attachments {
        row.push_group(vendor_attachment_columns(i + 1), attachment_pair(vendor.get(i)));
    }
    let client = proposal.client_attachments();
    for i in 0..structure.max_client_attachments {
        row.push_group(client_attachment_columns(i + 1), attachment_pair(client.get(i)));
    }

    // Person groups
    let titulares = proposal.titulares();
    for i in 0..structure.max_titulares {
        row.push_group(titular_columns(i + 1), titular_values(titulares.get(i)));
    }
    let dependentes = proposal.dependentes();
    for i in 0..structure.max_dependentes {
        row.push_group(dependente_columns(i + 1), dependente_values(dependentes.get(i)));
    }

    // Trailing block
    let created = proposal.created_at.unwrap_or_else(Utc::now);
    row.push("ANEXOS", "Ver anexos".to_string());
    row.push("DATA_CRIACAO", created.format("%d/%m/%Y").to_string());
    row.push("HORA_CRIACAO", created.format("%H:%M:%S").to_string());

    row.fields
}
