use crate::analyzer::SheetStructure;

/// Fixed leading block: identity, contract, workflow, internal notes,
/// commission and attachment-summary columns, in export order.
pub const BASE_COLUMNS: &[&str] = &[
    "ID_ABM",
    "EMPRESA",
    "CNPJ",
    "PLANO",
    "VALOR",
    "VIGENCIA_INICIO",
    "VIGENCIA_FIM",
    "ODONTO_CONJUGADO",
    "COMPULSORIO",
    "STATUS",
    "PRIORIDADE",
    "APROVADO",
    "REJEITADO",
    "DESCONTO",
    "ORIGEM",
    "OBSERVACOES",
    "VENDEDOR_1_NOME",
    "VENDEDOR_1_PERCENT",
    "VENDEDOR_2_NOME",
    "VENDEDOR_2_PERCENT",
    "REUNIAO_NOME",
    "REUNIAO_PERCENT",
    "SUPERVISOR_NOME",
    "SUPERVISOR_PERCENT",
    "QTD_ANEXOS_VENDEDOR",
    "QTD_ANEXOS_CLIENTE",
];

/// Fixed trailing block: anchor label plus creation date and time.
pub const TRAILING_COLUMNS: &[&str] = &["ANEXOS", "DATA_CRIACAO", "HORA_CRIACAO"];

/// Columns per title-holder slot (name, cpf, rg, email, phone)
pub const TITULAR_FIELD_COUNT: usize = 5;

/// Columns per dependent slot (name, cpf, relationship)
pub const DEPENDENTE_FIELD_COUNT: usize = 3;

/// Columns per attachment slot (name, link)
pub const ATTACHMENT_FIELD_COUNT: usize = 2;

// Group-column naming. The row formatter walks these same helpers, which is
// what keeps header order and row order mechanically in sync.

pub fn titular_columns(slot: usize) -> [String; TITULAR_FIELD_COUNT] {
    [
        format!("TITULAR{}_NOME", slot),
        format!("TITULAR{}_CPF", slot),
        format!("TITULAR{}_RG", slot),
        format!("TITULAR{}_EMAIL", slot),
        format!("TITULAR{}_TELEFONE", slot),
    ]
}

pub fn dependente_columns(slot: usize) -> [String; DEPENDENTE_FIELD_COUNT] {
    [
        format!("DEPENDENTE{}_NOME", slot),
        format!("DEPENDENTE{}_CPF", slot),
        format!("DEPENDENTE{}_PARENTESCO", slot),
    ]
}

pub fn vendor_attachment_columns(slot: usize) -> [String; ATTACHMENT_FIELD_COUNT] {
    [
        format!("ANEXO_VENDEDOR{}_NOME", slot),
        format!("ANEXO_VENDEDOR{}_LINK", slot),
    ]
}

pub fn client_attachment_columns(slot: usize) -> [String; ATTACHMENT_FIELD_COUNT] {
    [
        format!("ANEXO_CLIENTE{}_NOME", slot),
        format!("ANEXO_CLIENTE{}_LINK", slot),
    ]
}

/// Produce the full ordered header row for the given sheet structure
///
/// The layout is: base block, vendor-attachment pairs, client-attachment
/// pairs, title-holder groups, dependent groups, trailing block. Slot indices
/// in column names are 1-based (`TITULAR1_NOME` .. `TITULARn_TELEFONE`).
///
/// The returned array's length always equals `structure.total_columns`; the
/// row formatter emits values in exactly this order.
pub fn generate_headers(structure: &SheetStructure) -> Vec<String> {
    let mut headers: Vec<String> = Vec::with_capacity(structure.total_columns);

    for name in BASE_COLUMNS {
        headers.push((*name).to_string());
    }

    for i in 1..=structure.max_vendor_attachments {
        headers.extend(vendor_attachment_columns(i));
    }
    for i in 1..=structure.max_client_attachments {
        headers.extend(client_attachment_columns(i));
    }

    for i in 1..=structure.max_titulares {
        headers.extend(titular_columns(i));
    }
    for i in 1..=structure.max_dependentes {
        headers.extend(dependente_columns(i));
    }

    for name in TRAILING_COLUMNS {
        headers.push((*name).to_string());
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::ExportConfig;

    #[test]
    fn header_count_matches_total_columns() {
        let structure = SheetStructure::analyze(&[], &ExportConfig::default());
        let headers = generate_headers(&structure);
        assert_eq!(headers.len(), structure.total_columns);
        // floors: 26 base + 2*3 + 2*3 + 5*3 + 3*5 + 3 trailing
        assert_eq!(headers.len(), 71);
    }

    #[test]
    fn generation_is_deterministic() {
        let structure = SheetStructure::analyze(&[], &ExportConfig::default());
        assert_eq!(generate_headers(&structure), generate_headers(&structure));
    }

    #[test]
    fn titular_group_fields_are_contiguous() {
        let structure = SheetStructure::analyze(&[], &ExportConfig::default());
        let headers = generate_headers(&structure);
        let start = headers.iter().position(|h| h == "TITULAR1_NOME").unwrap();
        assert_eq!(headers[start], "TITULAR1_NOME");
        assert_eq!(headers[start + 1], "TITULAR1_CPF");
        assert_eq!(headers[start + 2], "TITULAR1_RG");
        assert_eq!(headers[start + 3], "TITULAR1_EMAIL");
        assert_eq!(headers[start + 4], "TITULAR1_TELEFONE");
        assert_eq!(headers[start + 5], "TITULAR2_NOME");
    }

    #[test]
    fn layout_order_is_stable() {
        let structure = SheetStructure::analyze(&[], &ExportConfig::default());
        let headers = generate_headers(&structure);
        assert_eq!(headers[0], "ID_ABM");
        assert_eq!(headers[1], "EMPRESA");
        assert_eq!(headers[BASE_COLUMNS.len()], "ANEXO_VENDEDOR1_NOME");
        assert_eq!(headers[headers.len() - 3], "ANEXOS");
        assert_eq!(headers[headers.len() - 2], "DATA_CRIACAO");
        assert_eq!(headers[headers.len() - 1], "HORA_CRIACAO");
    }
}
