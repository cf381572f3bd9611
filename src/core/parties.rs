use super::types::{Party, PartyDraft};

/// The debtor as each part of the document sees it.
///
/// The payment slip only takes a complete address; the letter head prints
/// whatever the caller sent, leaving missing lines blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveDebtor {
    /// Debtor encoded in the QR code and printed under "Payable by".
    pub for_slip: Option<Party>,
    /// Debtor printed in the address window of the letter.
    pub for_letter: Option<PartyDraft>,
}

impl EffectiveDebtor {
    pub fn resolve(debtor: Option<&PartyDraft>) -> Self {
        let Some(draft) = debtor.filter(|d| !d.is_empty()) else {
            return Self::default();
        };
        Self {
            for_slip: draft.complete(),
            for_letter: Some(draft.clone()),
        }
    }

    /// True when the letter has a debtor but the slip had to drop it.
    pub fn is_partial(&self) -> bool {
        self.for_letter.is_some() && self.for_slip.is_none()
    }
}
