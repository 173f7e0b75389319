//! Validation rules enforced before any write reaches the store

use crate::models::{CreateNoteItemInput, MovementType};

// ============================================================================
// Master data
// ============================================================================

/// Supplier, client and product names must be non-empty once trimmed.
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("name is required");
    }
    Ok(())
}

// ============================================================================
// Pedido notes
// ============================================================================

/// Inbound notes require a supplier; outbound notes require a client.
pub fn validate_note_counterparty(
    movement: MovementType,
    supplier_id: Option<i64>,
    client_id: Option<i64>,
) -> Result<(), &'static str> {
    match movement {
        MovementType::Inbound if supplier_id.is_none() => {
            Err("supplier is required for inbound notes")
        }
        MovementType::Outbound if client_id.is_none() => {
            Err("client is required for outbound notes")
        }
        _ => Ok(()),
    }
}

/// A note needs at least one item; every quantity must be strictly positive.
pub fn validate_note_items(items: &[CreateNoteItemInput]) -> Result<(), &'static str> {
    if items.is_empty() {
        return Err("at least one item is required");
    }
    if items.iter().any(|item| item.quantity <= 0) {
        return Err("item quantity must be a positive integer");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_must_not_be_blank() {
        assert!(validate_name("ACME").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name("").is_err());
    }

    #[test]
    fn inbound_requires_supplier() {
        let err = validate_note_counterparty(MovementType::Inbound, None, Some(7));
        assert_eq!(err, Err("supplier is required for inbound notes"));
        assert!(validate_note_counterparty(MovementType::Inbound, Some(1), None).is_ok());
    }

    #[test]
    fn outbound_requires_client() {
        let err = validate_note_counterparty(MovementType::Outbound, Some(1), None);
        assert_eq!(err, Err("client is required for outbound notes"));
        assert!(validate_note_counterparty(MovementType::Outbound, None, Some(7)).is_ok());
    }

    #[test]
    fn items_must_be_present_and_positive() {
        assert!(validate_note_items(&[]).is_err());

        let zero = [CreateNoteItemInput {
            product_id: 1,
            quantity: 0,
        }];
        assert!(validate_note_items(&zero).is_err());

        let ok = [CreateNoteItemInput {
            product_id: 1,
            quantity: 5,
        }];
        assert!(validate_note_items(&ok).is_ok());
    }
}
