//! Property tests for checksum generation and verification.

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;

use robokassa_gateway::domain::payment::{
    Amount, CustomParamNames, CustomParams, GatewaySettings, InboundParams, InvoiceId,
    PaymentError, PaymentFormBuilder, PaymentVerifier, PurchaseRequest, Signer,
};

fn settings(names: &[&str]) -> GatewaySettings {
    GatewaySettings::new("shop1", "pw1", "pw2")
        .with_custom_params(CustomParamNames::new(names.iter().copied()).unwrap())
}

fn inbound(out_sum: &str, invoice_id: u64, custom: &CustomParams, signature: &str) -> InboundParams {
    let mut pairs = vec![
        ("OutSum".to_string(), out_sum.to_string()),
        ("InvId".to_string(), invoice_id.to_string()),
        ("SignatureValue".to_string(), signature.to_string()),
    ];
    for (name, value) in custom.iter() {
        pairs.push((CustomParamNames::wire_name(name), value.to_string()));
    }
    pairs.into_iter().collect()
}

fn wire_amount(cents: i64) -> String {
    Amount::new(Decimal::new(cents, 2)).unwrap().to_wire()
}

proptest! {
    #[test]
    fn signed_notification_always_verifies(
        cents in 0i64..1_000_000_000,
        invoice in any::<u64>(),
        user in "[A-Za-z0-9]{1,12}",
        order in "[A-Za-z0-9_]{1,12}",
    ) {
        let settings = Arc::new(settings(&["user", "order"]));
        let out_sum = wire_amount(cents);
        let custom = CustomParams::new().with("user", user).with("order", order);
        let signature = Signer::new(&settings).result(&out_sum, InvoiceId::new(invoice), &custom);

        let callback = PaymentVerifier::new(settings)
            .verify_notification(&inbound(&out_sum, invoice, &custom, signature.as_str()))
            .unwrap();

        prop_assert_eq!(callback.invoice_id, InvoiceId::new(invoice));
        prop_assert_eq!(callback.out_sum, out_sum);
        prop_assert_eq!(callback.custom_params, custom);
    }

    #[test]
    fn signed_redirect_verifies_in_any_case(
        cents in 0i64..1_000_000_000,
        invoice in any::<u64>(),
    ) {
        let settings = Arc::new(settings(&[]));
        let out_sum = wire_amount(cents);
        let signature = Signer::new(&settings)
            .redirect(&out_sum, InvoiceId::new(invoice), &CustomParams::new());
        let lowercase = signature.as_str().to_ascii_lowercase();

        let verifier = PaymentVerifier::new(settings);
        let empty = CustomParams::new();

        prop_assert!(verifier
            .verify_success_redirect(&inbound(&out_sum, invoice, &empty, signature.as_str()))
            .is_ok());
        prop_assert!(verifier
            .verify_success_redirect(&inbound(&out_sum, invoice, &empty, &lowercase))
            .is_ok());
    }

    #[test]
    fn tampered_amount_is_rejected(
        cents in 0i64..1_000_000_000,
        invoice in any::<u64>(),
    ) {
        let settings = Arc::new(settings(&[]));
        let empty = CustomParams::new();
        let signature = Signer::new(&settings)
            .result(&wire_amount(cents), InvoiceId::new(invoice), &empty);

        let tampered = inbound(&wire_amount(cents + 1), invoice, &empty, signature.as_str());

        prop_assert_eq!(
            PaymentVerifier::new(settings).verify_notification(&tampered),
            Err(PaymentError::BadSignature)
        );
    }

    #[test]
    fn tampered_invoice_is_rejected(
        cents in 0i64..1_000_000_000,
        invoice in 0u64..u64::MAX,
    ) {
        let settings = Arc::new(settings(&[]));
        let out_sum = wire_amount(cents);
        let empty = CustomParams::new();
        let signature = Signer::new(&settings).result(&out_sum, InvoiceId::new(invoice), &empty);

        let tampered = inbound(&out_sum, invoice + 1, &empty, signature.as_str());

        prop_assert_eq!(
            PaymentVerifier::new(settings).verify_notification(&tampered),
            Err(PaymentError::BadSignature)
        );
    }

    #[test]
    fn tampered_invoice_on_success_redirect_is_rejected(
        cents in 0i64..1_000_000_000,
        invoice in 0u64..u64::MAX,
    ) {
        let settings = Arc::new(settings(&[]));
        let out_sum = wire_amount(cents);
        let empty = CustomParams::new();
        let signature = Signer::new(&settings).redirect(&out_sum, InvoiceId::new(invoice), &empty);

        let tampered = inbound(&out_sum, invoice + 1, &empty, signature.as_str());

        prop_assert_eq!(
            PaymentVerifier::new(settings).verify_success_redirect(&tampered),
            Err(PaymentError::BadSignature)
        );
    }

    #[test]
    fn declaration_order_does_not_change_signature(
        cents in 0i64..1_000_000,
        invoice in 1u64..1_000_000,
        user in "[A-Za-z0-9]{1,8}",
        order in "[A-Za-z0-9]{1,8}",
    ) {
        let request = PurchaseRequest::new()
            .amount(Amount::new(Decimal::new(cents, 2)).unwrap())
            .invoice_id(invoice)
            .custom_param("user", user)
            .custom_param("order", order);

        let forward = PaymentFormBuilder::new(Arc::new(settings(&["user", "order"])))
            .purchase(&request);
        let reversed = PaymentFormBuilder::new(Arc::new(settings(&["order", "user"])))
            .purchase(&request);

        prop_assert_eq!(forward.signature(), reversed.signature());
        prop_assert_eq!(forward.fields(), reversed.fields());
    }

    #[test]
    fn whole_amounts_sign_like_their_two_decimal_form(
        units in 0i64..10_000_000,
        invoice in 1u64..1_000_000,
    ) {
        let builder = PaymentFormBuilder::new(Arc::new(settings(&[])));
        let whole = builder.purchase(
            &PurchaseRequest::new()
                .amount(Amount::new(Decimal::new(units, 0)).unwrap())
                .invoice_id(invoice),
        );
        let cents = builder.purchase(
            &PurchaseRequest::new()
                .amount(Amount::new(Decimal::new(units * 100, 2)).unwrap())
                .invoice_id(invoice),
        );

        prop_assert_eq!(whole.signature(), cents.signature());
        prop_assert_eq!(
            whole.post_fields().get("OutSum").cloned(),
            Some(format!("{}.00", units))
        );
    }
}
