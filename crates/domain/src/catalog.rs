//! The fixed charge catalog and the option list the charge picker works from.
//!
//! Catalog records are offered under identifiers `A`, `B`, ... in catalog
//! order. Selecting an option re-offers the same charge under `<id>1` so a
//! charge can be cited more than once. Known defect, kept on purpose: after
//! selecting an option twice and removing the first selection, the picker
//! lists that charge twice.

use serde::Serialize;

use crate::ids::ChargeId;
use crate::value_objects::SelectedCharge;

/// A charge definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRecord {
    pub name: &'static str,
    pub fine_amount: u32,
    pub description: &'static str,
}

impl ChargeRecord {
    const fn new(name: &'static str, fine_amount: u32, description: &'static str) -> Self {
        Self {
            name,
            fine_amount,
            description,
        }
    }
}

/// Charge catalog, in display order. Names are kept verbatim, trailing
/// spaces included, since saved citations quote them.
pub static CHARGES: [ChargeRecord; 21] = [
    ChargeRecord::new(
        "Petty Theft",
        250,
        "Steals property in the value of less than $1,000 from another person.",
    ),
    ChargeRecord::new(
        "Vandalism",
        250,
        "Intentionally causing damage to property they do not own.",
    ),
    ChargeRecord::new(
        "Loitering",
        150,
        "Intentionally standing or waiting idly without apparent purpose.",
    ),
    ChargeRecord::new(
        "Littering",
        250,
        "The act of throwing objects on the ground in a disobedient manner. Leaving trash and other items on the ground.",
    ),
    ChargeRecord::new(
        "Public Intoxication ",
        150,
        "A person who is under the influence of Alcohol or a Controlled Dangerous Substance, in a public place.",
    ),
    ChargeRecord::new(
        "Jaywalking",
        150,
        "Crosses a road without the use of a crosswalk, or without a marked crossing light.",
    ),
    ChargeRecord::new(
        "Failure to Yield to Emergency Vehicle",
        150,
        "Does not pull to the side of the road when an emergency vehicle is trying to pass with sirens and or lights enabled.",
    ),
    ChargeRecord::new(
        "Failure to Obey Traffic Control Devices",
        150,
        "Does not obey a sign or signal defined as regulatory.",
    ),
    ChargeRecord::new(
        "Negligent Driving",
        250,
        "Drives in a way that is negligent with no regard to basic traffic rules.",
    ),
    ChargeRecord::new(
        "Third Degree Speeding",
        250,
        "Speeds in excess of 0 mph to 35 mph. ",
    ),
    ChargeRecord::new(
        "Second Degree Speeding",
        500,
        "Speeds in excess of 36 mph to 55 mph. Add 2 points.",
    ),
    ChargeRecord::new(
        "First Degree Speeding",
        750,
        "Speeds in excess of more than 55 mph. Add 3 points.",
    ),
    ChargeRecord::new(
        "Illegal Passing",
        250,
        "Passing another vehicle by a shoulder, median, or solid lines. Passing must be completely made without interfering with safe operation of any approaching vehicle from the opposite direction.",
    ),
    ChargeRecord::new(
        "Driving on the Wrong Side of The Road",
        250,
        "Driving on the left side of the road, against opposing traffic.",
    ),
    ChargeRecord::new(
        "Illegal Turn",
        250,
        "Performing a turn at a stop sign or red light without coming to a full and complete stop, or failure to yield to pedestrians. Making a left-hand turn were signs posted prohibit such a turn.",
    ),
    ChargeRecord::new(
        "Failure to Stop",
        250,
        "Failure to come to a complete and full stop at a posted stop sign or red light. Right on red is permitted when a full stop is completed and after yielding to traffic and pedestrians.",
    ),
    ChargeRecord::new(
        "Unauthorized Parking",
        400,
        "Parks in an area that is unsafe or on government property. Parking on a sidewalk, to include ANY portion of the tire touching the curb. Parking in the wrong direction of traffic. Parking on a red line. ",
    ),
    ChargeRecord::new(
        "Riding on a Sidewalk",
        250,
        "A bicyclist is required to follow normal traffic laws and must stay off sidewalks for safety purposes.",
    ),
    ChargeRecord::new(
        "Operating a Motor Vehicle Without Proper Identification ",
        250,
        "Person has a valid drivers license but is unable to provide a valid citizen identification to law enforcement upon request. Vehicle is to be impounded by law enforcement. ",
    ),
    ChargeRecord::new(
        "Improper Window Tint",
        250,
        "Operating a vehicle with tint that obscures the view from the outside. Window tint must be completely be dark to where Law Enforcement can't see citizens in the vehicle.  Law Enforcement may use discretion to ",
    ),
    ChargeRecord::new(
        "Failure to Signal",
        100,
        "Does not use a turn signal when necessary.",
    ),
];

/// Catalog records paired with their identifiers
pub fn entries() -> impl Iterator<Item = (ChargeId, &'static ChargeRecord)> {
    CHARGES
        .iter()
        .enumerate()
        .map(|(index, record)| (ChargeId::catalog(index), record))
}

/// Resolves an option identifier to its catalog record.
///
/// Re-offered identifiers (`A1`, `A11`, ...) resolve to the original record;
/// charges imported from MDW output never resolve.
pub fn lookup(id: &ChargeId) -> Option<&'static ChargeRecord> {
    id.catalog_index().and_then(|index| CHARGES.get(index))
}

/// Finds a catalog option by identifier or by (case-insensitive, trimmed) name
pub fn find(identifier_or_name: &str) -> Option<SelectedCharge> {
    let wanted = identifier_or_name.trim();
    if wanted.is_empty() {
        return None;
    }
    entries()
        .find(|(id, record)| {
            id.as_str() == wanted || record.name.trim().eq_ignore_ascii_case(wanted)
        })
        .map(|(id, record)| SelectedCharge::new(id, record.name))
}

/// Every option the picker knows about: the catalog plus each current
/// selection offered again, ordered by identifier.
pub fn charge_options(selected: &[SelectedCharge]) -> Vec<SelectedCharge> {
    let mut options: Vec<SelectedCharge> = entries()
        .map(|(id, record)| SelectedCharge::new(id, record.name))
        .chain(selected.iter().map(SelectedCharge::reoffered))
        .collect();
    options.sort_by(|a, b| {
        let a = a.id.as_str();
        let b = b.id.as_str();
        a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
    });
    options
}

/// Options the picker lists: those not currently selected
pub fn selectable_options<'a>(
    options: &'a [SelectedCharge],
    selected: &[SelectedCharge],
) -> Vec<&'a SelectedCharge> {
    options
        .iter()
        .filter(|option| !selected.iter().any(|s| s.id == option.id))
        .collect()
}

/// Type-ahead filter: case-insensitive substring match on the label
pub fn filter_options<'a>(options: &[&'a SelectedCharge], query: &str) -> Vec<&'a SelectedCharge> {
    let query = query.trim().to_lowercase();
    options
        .iter()
        .copied()
        .filter(|option| query.is_empty() || option.label.to_lowercase().contains(&query))
        .collect()
}

/// Catalog records whose name contains `query`, ignoring case
pub fn search(query: &str) -> Vec<(ChargeId, &'static ChargeRecord)> {
    let query = query.trim().to_lowercase();
    entries()
        .filter(|(_, record)| record.name.to_lowercase().contains(&query))
        .collect()
}

/// Sum of catalog fines for the selections that resolve to a catalog record
pub fn suggested_fine(selected: &[SelectedCharge]) -> u32 {
    selected
        .iter()
        .filter_map(|charge| lookup(&charge.id))
        .map(|record| record.fine_amount)
        .sum()
}
