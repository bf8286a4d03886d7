use crate::card::{Card, Unit};
use crate::topic::Quantity;

/// Molar volume of an ideal gas at standard conditions, in litres per mole.
pub const MOLAR_VOLUME_L: f64 = 22.4;

/// Molar masses (g/mol) for the formulas that appear on cards.
const MOLAR_MASSES: &[(&str, f64)] = &[
    ("H₂", 2.0),
    ("He", 4.0),
    ("CH₄", 16.0),
    ("NH₃", 17.0),
    ("H₂O", 18.0),
    ("N₂", 28.0),
    ("O₂", 32.0),
    ("CO₂", 44.0),
    ("CaO", 56.0),
    ("NaCl", 58.5),
    ("MgO", 40.0),
];

pub fn molar_mass(formula: &str) -> Option<f64> {
    MOLAR_MASSES
        .iter()
        .find(|(known, _)| *known == formula)
        .map(|(_, mass)| *mass)
}

/// What to do when a card's formula has no molar-mass entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum UnknownFormulaPolicy {
    /// Treat the molar mass as 1 g/mol so every card stays comparable.
    /// Keeps rounds playable at the cost of a chemically wrong conversion.
    #[default]
    AssumeUnitMass,
    /// Refuse the conversion; the evaluator scores the card as an automatic
    /// loss instead.
    MarkInvalid,
}

fn resolve_molar_mass(formula: &str, policy: UnknownFormulaPolicy) -> Option<f64> {
    match molar_mass(formula) {
        Some(mass) => Some(mass),
        None => match policy {
            UnknownFormulaPolicy::AssumeUnitMass => Some(1.0),
            UnknownFormulaPolicy::MarkInvalid => None,
        },
    }
}

/// Converts a card's declared quantity into `target` units.
///
/// Identity conversions never consult the molar-mass table, so `None` is
/// only possible under [`UnknownFormulaPolicy::MarkInvalid`] when the
/// conversion actually needs the mass.
pub fn convert(card: &Card, target: Unit, policy: UnknownFormulaPolicy) -> Option<f64> {
    if card.unit == target {
        return Some(card.value);
    }

    match (card.unit, target) {
        (Unit::Grams, Unit::Moles) => {
            resolve_molar_mass(&card.formula, policy).map(|mass| card.value / mass)
        }
        (Unit::Grams, Unit::Liters) => resolve_molar_mass(&card.formula, policy)
            .map(|mass| (card.value / mass) * MOLAR_VOLUME_L),
        (Unit::Moles, Unit::Grams) => {
            resolve_molar_mass(&card.formula, policy).map(|mass| card.value * mass)
        }
        (Unit::Moles, Unit::Liters) => Some(card.value * MOLAR_VOLUME_L),
        (Unit::Liters, Unit::Moles) => Some(card.value / MOLAR_VOLUME_L),
        (Unit::Liters, Unit::Grams) => resolve_molar_mass(&card.formula, policy)
            .map(|mass| (card.value / MOLAR_VOLUME_L) * mass),
        _ => unreachable!("identity conversions are handled above"),
    }
}

/// Converts toward the quantity a topic compares on. Melting point is read
/// off the card verbatim, ignoring value and unit.
pub fn convert_quantity(
    card: &Card,
    quantity: Quantity,
    policy: UnknownFormulaPolicy,
) -> Option<f64> {
    match quantity {
        Quantity::Mass => convert(card, Unit::Grams, policy),
        Quantity::Moles => convert(card, Unit::Moles, policy),
        Quantity::Volume => convert(card, Unit::Liters, policy),
        Quantity::MeltingPoint => Some(card.melting_point as f64),
    }
}
