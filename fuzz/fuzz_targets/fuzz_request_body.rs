#![no_main]

use libfuzzer_sys::fuzz_target;
use swissbill::core::{EffectiveDebtor, ValidationPolicy, reconcile};
use swissbill::handler::Event;
use swissbill::qrbill::QrBill;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(request) = Event::from_text(s).request() else {
        return;
    };
    let Ok(amounts) = reconcile(&request, ValidationPolicy::Derive) else {
        return;
    };
    let debtor = EffectiveDebtor::resolve(request.debtor.as_ref());
    let bill = QrBill::from_request(&request, &amounts, &debtor);
    let _ = bill.validate();
    let _ = bill.payload();
});
