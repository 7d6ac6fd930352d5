//! Address parser contract and a basic street-address parser.
//!
//! The lookup service only depends on [`AddressParser`]. [`BasicParser`]
//! handles the common shapes well enough to drive the service:
//!
//! ```text
//! 1234 N Broad Street            number, predir, name, suffix
//! 1234-36 Market St              ranged number (high expands to 1236)
//! 1234A Chestnut St Apt 2        low suffix, unit
//! 1234 1/2 South St #3           fraction, `#` unit
//! ```

use crate::types::ParsedQuery;
use phf::phf_map;
use regex::Regex;
use std::sync::LazyLock;

/// Turns a free-text query into a [`ParsedQuery`]. Parsing never fails; an
/// unrecognisable query yields empty components.
pub trait AddressParser: Send + Sync {
    fn parse(&self, query: &str) -> ParsedQuery;
}

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

static DIRECTIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "N" => "N", "NORTH" => "N",
    "S" => "S", "SOUTH" => "S",
    "E" => "E", "EAST" => "E",
    "W" => "W", "WEST" => "W",
    "NE" => "NE", "NORTHEAST" => "NE",
    "NW" => "NW", "NORTHWEST" => "NW",
    "SE" => "SE", "SOUTHEAST" => "SE",
    "SW" => "SW", "SOUTHWEST" => "SW",
};

static SUFFIXES: phf::Map<&'static str, &'static str> = phf_map! {
    "ST" => "ST", "STREET" => "ST",
    "AVE" => "AVE", "AV" => "AVE", "AVENUE" => "AVE",
    "RD" => "RD", "ROAD" => "RD",
    "BLVD" => "BLVD", "BOULEVARD" => "BLVD",
    "DR" => "DR", "DRIVE" => "DR",
    "LN" => "LN", "LANE" => "LN",
    "PL" => "PL", "PLACE" => "PL",
    "CT" => "CT", "COURT" => "CT",
    "TER" => "TER", "TERRACE" => "TER",
    "PKWY" => "PKWY", "PARKWAY" => "PKWY",
    "CIR" => "CIR", "CIRCLE" => "CIR",
    "SQ" => "SQ", "SQUARE" => "SQ",
    "ALY" => "ALY", "ALLEY" => "ALY",
    "WAY" => "WAY",
    "PIKE" => "PIKE",
    "WALK" => "WALK",
    "ROW" => "ROW",
};

static UNIT_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
    "APT" => "APT", "APARTMENT" => "APT",
    "UNIT" => "UNIT",
    "STE" => "STE", "SUITE" => "STE",
    "FL" => "FL", "FLOOR" => "FL",
    "RM" => "RM", "ROOM" => "RM",
    "BSMT" => "BSMT",
    "REAR" => "REAR",
    "FRNT" => "FRNT",
};

static ADDRESS_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)([A-Z])?(?:-([0-9]+)[A-Z]?)?$").expect("address number pattern must compile")
});

static FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+/[0-9]+$").expect("fraction pattern must compile"));

// ---------------------------------------------------------------------------
// BasicParser
// ---------------------------------------------------------------------------

/// Vocabulary-driven parser for `number [predir] name [suffix] [postdir]
/// [unit]` queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicParser;

impl AddressParser for BasicParser {
    fn parse(&self, query: &str) -> ParsedQuery {
        let normalised = query.to_uppercase().replace([',', '.'], " ");
        let mut tokens: Vec<&str> = normalised.split_whitespace().collect();
        let mut parsed = ParsedQuery::default();

        if let Some(first) = tokens.first().copied() {
            if let Some(caps) = ADDRESS_NUMBER.captures(first) {
                let low = &caps[1];
                parsed.address_full = Some(first.to_string());
                parsed.address_low = low.parse().ok();
                parsed.address_low_suffix = caps.get(2).map(|m| m.as_str().to_string());
                if let Some(high) = caps.get(3) {
                    parsed.address_high = high.as_str().parse().ok();
                    parsed.address_high_full = Some(expand_high(low, high.as_str()));
                }
                tokens.remove(0);

                if tokens.first().is_some_and(|t| FRACTION.is_match(t)) {
                    parsed.address_low_frac = Some(tokens.remove(0).to_string());
                }
            }
        }

        if let Some(pos) = tokens
            .iter()
            .position(|t| t.starts_with('#') || UNIT_TYPES.contains_key(*t))
        {
            let unit: Vec<&str> = tokens.split_off(pos);
            let designator = unit[0];
            if let Some(num) = designator.strip_prefix('#') {
                parsed.unit_type = Some("#".to_string());
                parsed.unit_num = non_empty(num).or_else(|| unit.get(1).map(|s| s.to_string()));
            } else {
                parsed.unit_type = UNIT_TYPES.get(designator).map(|s| s.to_string());
                parsed.unit_num = unit.get(1).map(|s| s.to_string());
            }
        }

        // "South St" is a street named South, not a directional.
        let bare_suffix_follows = tokens.len() == 2 && SUFFIXES.contains_key(tokens[1]);
        if tokens.len() > 1 && !bare_suffix_follows {
            if let Some(dir) = DIRECTIONS.get(tokens[0]) {
                parsed.street_predir = Some(dir.to_string());
                tokens.remove(0);
            }
        }
        if tokens.len() > 1 {
            if let Some(dir) = tokens.last().and_then(|t| DIRECTIONS.get(*t)) {
                parsed.street_postdir = Some(dir.to_string());
                tokens.pop();
            }
        }
        if tokens.len() > 1 {
            if let Some(suffix) = tokens.last().and_then(|t| SUFFIXES.get(*t)) {
                parsed.street_suffix = Some(suffix.to_string());
                tokens.pop();
            }
        }
        parsed.street_name = non_empty(&tokens.join(" "));
        parsed.street_address = compose_street_address(&parsed);
        parsed
    }
}

/// `1234` + `36` → `1236`: the high end borrows the low end's leading digits.
fn expand_high(low: &str, high: &str) -> String {
    if high.len() < low.len() {
        format!("{}{}", &low[..low.len() - high.len()], high)
    } else {
        high.to_string()
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn compose_street_address(parsed: &ParsedQuery) -> Option<String> {
    let parts = [
        parsed.address_full.as_deref(),
        parsed.address_low_frac.as_deref(),
        parsed.street_predir.as_deref(),
        parsed.street_name.as_deref(),
        parsed.street_suffix.as_deref(),
        parsed.street_postdir.as_deref(),
        parsed.unit_type.as_deref(),
        parsed.unit_num.as_deref(),
    ];
    let joined = parts.into_iter().flatten().collect::<Vec<_>>().join(" ");
    non_empty(&joined)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
