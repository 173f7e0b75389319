//! Pedido note models: movement direction, creation inputs, numbering

use serde::{Deserialize, Serialize};

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    Inbound,
    Outbound,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Inbound => "inbound",
            MovementType::Outbound => "outbound",
        }
    }

    /// Label printed on order documents.
    pub fn label(&self) -> &'static str {
        match self {
            MovementType::Inbound => "Entrada",
            MovementType::Outbound => "Salida",
        }
    }

    /// Contribution of one item unit to stock.
    pub fn sign(&self) -> i64 {
        match self {
            MovementType::Inbound => 1,
            MovementType::Outbound => -1,
        }
    }

    /// Case-insensitive parse. Accepts the canonical names and the
    /// `entrada`/`salida` spellings used on the original order forms.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "inbound" | "entrada" => Some(MovementType::Inbound),
            "outbound" | "salida" => Some(MovementType::Outbound),
            _ => None,
        }
    }
}

/// Input for creating a note together with its items.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNoteInput {
    /// Movement direction, normalized via [`MovementType::parse`].
    pub movement_type: String,
    /// Required for inbound notes.
    pub supplier_id: Option<i64>,
    /// Required for outbound notes.
    pub client_id: Option<i64>,
    /// Free-form order reference.
    pub reference_text: Option<String>,
    pub items: Vec<CreateNoteItemInput>,
}

/// One product line of a note being created.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNoteItemInput {
    pub product_id: i64,
    pub quantity: i64,
}

/// Sequence number printed on exported documents, e.g. `N2026_0007`.
pub fn note_sequence_number(year: i32, id: i64) -> String {
    format!("N{}_{:04}", year, id)
}

/// Signed stock contribution of a batch of movements. This is the same
/// formula the ledger aggregate applies in SQL.
pub fn stock_from_movements<I>(movements: I) -> i64
where
    I: IntoIterator<Item = (MovementType, i64)>,
{
    movements
        .into_iter()
        .map(|(movement, quantity)| movement.sign() * quantity)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_legacy_spellings() {
        assert_eq!(MovementType::parse("ENTRADA"), Some(MovementType::Inbound));
        assert_eq!(MovementType::parse("salida"), Some(MovementType::Outbound));
        assert_eq!(MovementType::parse(" Inbound "), Some(MovementType::Inbound));
        assert_eq!(MovementType::parse("transfer"), None);
    }

    #[test]
    fn sequence_number_pads_to_four_digits() {
        assert_eq!(note_sequence_number(2026, 7), "N2026_0007");
        assert_eq!(note_sequence_number(2026, 12345), "N2026_12345");
    }

    #[test]
    fn stock_folds_signed_quantities() {
        let movements = [
            (MovementType::Inbound, 50),
            (MovementType::Inbound, 30),
            (MovementType::Outbound, 20),
            (MovementType::Inbound, 10),
            (MovementType::Outbound, 15),
        ];
        assert_eq!(stock_from_movements(movements), 55);
        assert_eq!(stock_from_movements([]), 0);
    }
}
