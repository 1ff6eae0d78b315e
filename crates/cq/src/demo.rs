//! The built-in apartment demo: six Berlin flats scored on district, amenity,
//! price/distance/size buckets and soft text features.
//!
//! Used whenever no config file or dataset is given.

use std::collections::BTreeMap;

use cqql_config::CqqlConfig;
use cqql_core::{AttrType, ScoredObject};

const DB: &[&str] = &[
    "balcony",
    "elevator",
    "furnished",
    "pets",
    "kreuzberg",
    "neukoelln",
    "charlottenburg",
    "prenzlauerberg",
    // Weight atoms are crisp switches.
    "theta_price",
    "theta_dist",
    "theta_text",
];

const PROX: &[&str] = &["price", "dist", "size"];

const TEXT: &[&str] = &["quiet", "modern", "sunny", "family"];

/// The demo attribute types, with `price`, `dist` and `size` ordinal.
pub fn demo_config() -> CqqlConfig {
    let attributes: BTreeMap<String, AttrType> = DB
        .iter()
        .map(|a| (a.to_string(), AttrType::Db))
        .chain(PROX.iter().map(|a| (a.to_string(), AttrType::Prox)))
        .chain(TEXT.iter().map(|a| (a.to_string(), AttrType::Text)))
        .collect();

    CqqlConfig {
        ordinal: PROX.iter().map(|a| a.to_string()).collect(),
        attributes,
        ..CqqlConfig::default()
    }
}

fn apartment(name: &str, scores: &[(&str, f64)]) -> ScoredObject {
    scores
        .iter()
        .fold(ScoredObject::new(name), |obj, (atom, value)| obj.score(*atom, *value))
        .score("theta_price", 0.8)
        .score("theta_dist", 0.7)
        .score("theta_text", 0.6)
}

/// The six demo apartments.
#[rustfmt::skip]
pub fn demo_objects() -> Vec<ScoredObject> {
    vec![
        apartment(
            "Apt1-Kreuzberg-Modern",
            &[
                ("kreuzberg", 1.0), ("neukoelln", 0.0), ("charlottenburg", 0.0), ("prenzlauerberg", 0.0),
                ("balcony", 1.0), ("elevator", 0.0), ("furnished", 1.0), ("pets", 0.0),
                ("price__low", 0.6), ("price__mid", 0.8), ("price__high", 0.2),
                ("dist__near", 0.7), ("dist__mid", 0.6), ("dist__far", 0.2),
                ("size__small", 0.3), ("size__ok", 0.7), ("size__large", 0.4),
                ("quiet", 0.4), ("modern", 0.9), ("sunny", 0.6), ("family", 0.3),
            ],
        ),
        apartment(
            "Apt2-Neukoelln-Budget",
            &[
                ("kreuzberg", 0.0), ("neukoelln", 1.0), ("charlottenburg", 0.0), ("prenzlauerberg", 0.0),
                ("balcony", 0.0), ("elevator", 0.0), ("furnished", 0.0), ("pets", 1.0),
                ("price__low", 0.9), ("price__mid", 0.5), ("price__high", 0.1),
                ("dist__near", 0.4), ("dist__mid", 0.7), ("dist__far", 0.3),
                ("size__small", 0.6), ("size__ok", 0.5), ("size__large", 0.2),
                ("quiet", 0.3), ("modern", 0.4), ("sunny", 0.5), ("family", 0.4),
            ],
        ),
        apartment(
            "Apt3-Charlottenburg-Quiet",
            &[
                ("kreuzberg", 0.0), ("neukoelln", 0.0), ("charlottenburg", 1.0), ("prenzlauerberg", 0.0),
                ("balcony", 1.0), ("elevator", 1.0), ("furnished", 0.0), ("pets", 1.0),
                ("price__low", 0.2), ("price__mid", 0.6), ("price__high", 0.8),
                ("dist__near", 0.6), ("dist__mid", 0.7), ("dist__far", 0.2),
                ("size__small", 0.2), ("size__ok", 0.6), ("size__large", 0.8),
                ("quiet", 0.9), ("modern", 0.5), ("sunny", 0.5), ("family", 0.7),
            ],
        ),
        apartment(
            "Apt4-PrenzlauerBerg-Family",
            &[
                ("kreuzberg", 0.0), ("neukoelln", 0.0), ("charlottenburg", 0.0), ("prenzlauerberg", 1.0),
                ("balcony", 1.0), ("elevator", 1.0), ("furnished", 1.0), ("pets", 1.0),
                ("price__low", 0.3), ("price__mid", 0.7), ("price__high", 0.6),
                ("dist__near", 0.8), ("dist__mid", 0.5), ("dist__far", 0.1),
                ("size__small", 0.1), ("size__ok", 0.6), ("size__large", 0.9),
                ("quiet", 0.7), ("modern", 0.7), ("sunny", 0.6), ("family", 0.9),
            ],
        ),
        apartment(
            "Apt5-Kreuzberg-Cheap-Far",
            &[
                ("kreuzberg", 1.0), ("neukoelln", 0.0), ("charlottenburg", 0.0), ("prenzlauerberg", 0.0),
                ("balcony", 0.0), ("elevator", 0.0), ("furnished", 0.0), ("pets", 1.0),
                ("price__low", 1.0), ("price__mid", 0.4), ("price__high", 0.0),
                ("dist__near", 0.2), ("dist__mid", 0.5), ("dist__far", 0.7),
                ("size__small", 0.7), ("size__ok", 0.4), ("size__large", 0.1),
                ("quiet", 0.4), ("modern", 0.3), ("sunny", 0.4), ("family", 0.2),
            ],
        ),
        apartment(
            "Apt6-Charlottenburg-Lux",
            &[
                ("kreuzberg", 0.0), ("neukoelln", 0.0), ("charlottenburg", 1.0), ("prenzlauerberg", 0.0),
                ("balcony", 1.0), ("elevator", 1.0), ("furnished", 1.0), ("pets", 0.0),
                ("price__low", 0.0), ("price__mid", 0.3), ("price__high", 1.0),
                ("dist__near", 0.7), ("dist__mid", 0.6), ("dist__far", 0.1),
                ("size__small", 0.0), ("size__ok", 0.4), ("size__large", 1.0),
                ("quiet", 0.8), ("modern", 0.9), ("sunny", 0.7), ("family", 0.6),
            ],
        ),
    ]
}
