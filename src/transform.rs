//! Scryfall card → [`NormalizedCard`] projection.

use crate::models::{NormalizedCard, ScryfallCard};

/// Image resolution stored in `image_uri`.
const IMAGE_VARIANT: &str = "normal";

/// Project a raw Scryfall card onto the stored card shape.
///
/// Missing scalars stay `None`; list and map fields default to empty.
pub fn process_card(card: &ScryfallCard) -> NormalizedCard {
    NormalizedCard {
        id: card.id.clone(),
        name: card.name.clone(),
        set: card.set.clone(),
        set_name: card.set_name.clone(),
        mana_cost: card.mana_cost.clone(),
        cmc: card.cmc,
        type_line: card.type_line.clone(),
        oracle_text: card.oracle_text.clone(),
        rarity: card.rarity.clone(),
        image_uri: image_uri(card),
        scryfall_uri: card.scryfall_uri.clone(),
        price_usd: price(card, "usd"),
        price_usd_foil: price(card, "usd_foil"),
        colors: card.colors.clone().unwrap_or_default(),
        color_identity: card.color_identity.clone().unwrap_or_default(),
        legalities: card.legalities.clone().unwrap_or_default(),
    }
}

/// The card's own image set decides when present; faces are only consulted
/// for cards without one (double-faced layouts).
fn image_uri(card: &ScryfallCard) -> Option<String> {
    match card.image_uris.as_ref().filter(|uris| !uris.is_empty()) {
        Some(uris) => uris.get(IMAGE_VARIANT).cloned(),
        None => card
            .card_faces
            .iter()
            .flatten()
            .find_map(|face| face.image_uris.as_ref()?.get(IMAGE_VARIANT).cloned()),
    }
}

fn price(card: &ScryfallCard, key: &str) -> Option<String> {
    card.prices.as_ref()?.get(key)?.clone()
}
