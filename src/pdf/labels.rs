use crate::core::Language;

/// Printed texts for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub receipt: &'static str,
    pub payment_part: &'static str,
    pub account: &'static str,
    pub reference: &'static str,
    pub additional_information: &'static str,
    pub payable_by: &'static str,
    pub payable_by_blank: &'static str,
    pub currency: &'static str,
    pub amount: &'static str,
    pub acceptance_point: &'static str,
    pub invoice_title: &'static str,
    pub position: &'static str,
    pub quantity: &'static str,
    pub description: &'static str,
    pub total: &'static str,
    pub vat: &'static str,
    pub total_with_vat: &'static str,
    pub payment_note: &'static str,
}

pub fn labels(language: Language) -> &'static Labels {
    match language {
        Language::De => &DE,
        Language::Fr => &FR,
        Language::It => &IT,
        Language::En => &EN,
    }
}

static DE: Labels = Labels {
    receipt: "Empfangsschein",
    payment_part: "Zahlteil",
    account: "Konto / Zahlbar an",
    reference: "Referenz",
    additional_information: "Zusätzliche Informationen",
    payable_by: "Zahlbar durch",
    payable_by_blank: "Zahlbar durch (Name/Adresse)",
    currency: "Währung",
    amount: "Betrag",
    acceptance_point: "Annahmestelle",
    invoice_title: "Rechnung Nr.",
    position: "Position",
    quantity: "Menge",
    description: "Bezeichnung",
    total: "Total",
    vat: "MWST",
    total_with_vat: "Total inkl. MWST",
    payment_note: "Zahlbar innert 30 Tagen",
};

static FR: Labels = Labels {
    receipt: "Récépissé",
    payment_part: "Section paiement",
    account: "Compte / Payable à",
    reference: "Référence",
    additional_information: "Informations supplémentaires",
    payable_by: "Payable par",
    payable_by_blank: "Payable par (nom/adresse)",
    currency: "Monnaie",
    amount: "Montant",
    acceptance_point: "Point de dépôt",
    invoice_title: "Facture Nr.",
    position: "Position",
    quantity: "Quantité",
    description: "Description",
    total: "Total",
    vat: "TVA",
    total_with_vat: "Total avec TVA",
    payment_note: "Payable dans les 30 jours",
};

static IT: Labels = Labels {
    receipt: "Ricevuta",
    payment_part: "Sezione pagamento",
    account: "Conto / Pagabile a",
    reference: "Riferimento",
    additional_information: "Informazioni supplementari",
    payable_by: "Pagabile da",
    payable_by_blank: "Pagabile da (nome/indirizzo)",
    currency: "Valuta",
    amount: "Importo",
    acceptance_point: "Punto di accettazione",
    invoice_title: "Fattura n.",
    position: "Posizione",
    quantity: "Quantità",
    description: "Descrizione",
    total: "Totale",
    vat: "IVA",
    total_with_vat: "Totale con IVA",
    payment_note: "Pagabile entro 30 giorni",
};

static EN: Labels = Labels {
    receipt: "Receipt",
    payment_part: "Payment part",
    account: "Account / Payable to",
    reference: "Reference",
    additional_information: "Additional information",
    payable_by: "Payable by",
    payable_by_blank: "Payable by (name/address)",
    currency: "Currency",
    amount: "Amount",
    acceptance_point: "Acceptance point",
    invoice_title: "Invoice No.",
    position: "Position",
    quantity: "Quantity",
    description: "Description",
    total: "Total",
    vat: "VAT",
    total_with_vat: "Total incl. VAT",
    payment_note: "Payable within 30 days",
};
