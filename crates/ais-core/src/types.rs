//! Core types for ais-core.
//!
//! This module defines the value objects shared across the lookup pipeline:
//! the parser output ([`ParsedQuery`]), the registry projection of an
//! address ([`AddressRecord`]) with its [`ServiceAreas`], and the
//! [`AddressField`] discriminant used as the key of filter maps.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Parser output
// ---------------------------------------------------------------------------

/// Structured decomposition of a free-text address query.
///
/// Produced by an [`AddressParser`](crate::parser::AddressParser) and consumed
/// read-only by the filter builder and block resolver. Any field may be
/// `None`; values are already normalised (uppercase, abbreviated).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuery {
    pub street_predir: Option<String>,
    pub street_name: Option<String>,
    pub street_suffix: Option<String>,
    pub street_postdir: Option<String>,
    /// The complete address-number token as typed, e.g. `1234-36` or `1234A`.
    pub address_full: Option<String>,
    /// Numeric low end of the address number.
    pub address_low: Option<i64>,
    pub address_low_suffix: Option<String>,
    pub address_low_frac: Option<String>,
    /// Numeric high end as typed (`36` in `1234-36`).
    pub address_high: Option<i64>,
    /// Fully-qualified high end (`1236` in `1234-36`).
    pub address_high_full: Option<String>,
    pub unit_type: Option<String>,
    pub unit_num: Option<String>,
    /// Pre-composed normalised street address.
    pub street_address: Option<String>,
}

impl ParsedQuery {
    /// The address-number token used for matching: the numeric low end when
    /// the parser split one out, the full token otherwise.
    pub fn address_number_token(&self) -> Option<String> {
        self.address_low
            .map(|low| low.to_string())
            .or_else(|| self.address_full.clone())
    }
}

// ---------------------------------------------------------------------------
// Registry record
// ---------------------------------------------------------------------------

/// Read-only projection of one address in the registry.
///
/// Multi-valued identifiers (`pwd_account_nums`, `opa_owners`) are stored
/// pipe-joined, exactly as the registry keeps them; splitting happens in the
/// serializer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressRecord {
    pub street_address: String,
    pub address_low: Option<i64>,
    pub address_low_suffix: Option<String>,
    pub address_low_frac: Option<String>,
    pub address_high: Option<i64>,
    pub street_predir: Option<String>,
    pub street_name: Option<String>,
    pub street_suffix: Option<String>,
    pub street_postdir: Option<String>,
    pub unit_type: Option<String>,
    pub unit_num: Option<String>,
    pub street_full: Option<String>,

    pub zip_code: Option<String>,
    pub zip_4: Option<String>,

    pub seg_id: Option<i64>,
    pub seg_side: Option<String>,
    pub pwd_parcel_id: Option<String>,
    pub dor_parcel_id: Option<String>,
    pub opa_account_num: Option<String>,
    pub opa_owners: Option<String>,
    pub opa_address: Option<String>,
    pub info_residents: Option<String>,
    pub info_companies: Option<String>,
    pub pwd_account_nums: Option<String>,
    pub li_address_key: Option<String>,
    pub voters: Option<String>,

    pub geocode_type: Option<String>,
    pub geocode_x: Option<f64>,
    pub geocode_y: Option<f64>,

    pub service_areas: ServiceAreas,
}

impl AddressRecord {
    /// Text form of a filterable field, `None` when the record holds no
    /// value. Numeric columns are rendered in decimal.
    pub fn field_text(&self, field: AddressField) -> Option<String> {
        match field {
            AddressField::StreetName => self.street_name.clone(),
            AddressField::StreetPredir => self.street_predir.clone(),
            AddressField::StreetPostdir => self.street_postdir.clone(),
            AddressField::StreetSuffix => self.street_suffix.clone(),
            AddressField::AddressLow => self.address_low.map(|n| n.to_string()),
            AddressField::AddressHigh => self.address_high.map(|n| n.to_string()),
            AddressField::UnitNum => self.unit_num.clone(),
        }
    }

    /// Whether the record carries a tax/ownership account number.
    pub fn has_opa_account(&self) -> bool {
        self.opa_account_num
            .as_deref()
            .is_some_and(|num| !num.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Filterable fields
// ---------------------------------------------------------------------------

/// Registry columns that can appear in a
/// [`FilterSpecification`](crate::filter::FilterSpecification).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressField {
    StreetName,
    AddressLow,
    StreetPredir,
    StreetPostdir,
    StreetSuffix,
    UnitNum,
    AddressHigh,
}

impl AddressField {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressField::StreetName => "street_name",
            AddressField::AddressLow => "address_low",
            AddressField::StreetPredir => "street_predir",
            AddressField::StreetPostdir => "street_postdir",
            AddressField::StreetSuffix => "street_suffix",
            AddressField::UnitNum => "unit_num",
            AddressField::AddressHigh => "address_high",
        }
    }
}

impl std::fmt::Display for AddressField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Service areas
// ---------------------------------------------------------------------------

/// Service-area attributes associated with an address.
///
/// The attribute set is declared statically; [`ServiceAreas::entries`] yields
/// them in the order they are merged into a rendered feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceAreas {
    pub center_city_district: Option<String>,
    pub cua_zone: Option<String>,
    pub li_district: Option<String>,
    pub philly_rising_area: Option<String>,
    pub census_tract_2010: Option<String>,
    pub census_block_group_2010: Option<String>,
    pub census_block_2010: Option<String>,
    pub council_district_2016: Option<String>,
    pub political_ward: Option<String>,
    pub political_division: Option<String>,
    pub planning_district: Option<String>,
    pub elementary_school: Option<String>,
    pub middle_school: Option<String>,
    pub high_school: Option<String>,
    pub zoning: Option<String>,
    pub police_division: Option<String>,
    pub police_district: Option<String>,
    pub police_service_area: Option<String>,
    pub rubbish_recycle_day: Option<String>,
    pub recycling_diversion_rate: Option<String>,
    pub leaf_collection_area: Option<String>,
    pub sanitation_area: Option<String>,
    pub sanitation_district: Option<String>,
    pub historic_street: Option<String>,
    pub highway_district: Option<String>,
    pub highway_section: Option<String>,
    pub highway_subsection: Option<String>,
    pub traffic_district: Option<String>,
    pub traffic_pm_district: Option<String>,
    pub street_light_route: Option<String>,
    pub pwd_maint_district: Option<String>,
    pub pwd_pressure_district: Option<String>,
    pub pwd_treatment_plant: Option<String>,
    pub pwd_water_plate: Option<String>,
    pub pwd_center_city_district: Option<String>,
}

/// Names of every service-area attribute, in merge order.
pub const SERVICE_AREA_FIELDS: [&str; 35] = [
    "center_city_district",
    "cua_zone",
    "li_district",
    "philly_rising_area",
    "census_tract_2010",
    "census_block_group_2010",
    "census_block_2010",
    "council_district_2016",
    "political_ward",
    "political_division",
    "planning_district",
    "elementary_school",
    "middle_school",
    "high_school",
    "zoning",
    "police_division",
    "police_district",
    "police_service_area",
    "rubbish_recycle_day",
    "recycling_diversion_rate",
    "leaf_collection_area",
    "sanitation_area",
    "sanitation_district",
    "historic_street",
    "highway_district",
    "highway_section",
    "highway_subsection",
    "traffic_district",
    "traffic_pm_district",
    "street_light_route",
    "pwd_maint_district",
    "pwd_pressure_district",
    "pwd_treatment_plant",
    "pwd_water_plate",
    "pwd_center_city_district",
];

impl ServiceAreas {
    /// Every attribute paired with its name, in [`SERVICE_AREA_FIELDS`] order.
    pub fn entries(&self) -> [(&'static str, Option<&str>); 35] {
        let values = [
            &self.center_city_district,
            &self.cua_zone,
            &self.li_district,
            &self.philly_rising_area,
            &self.census_tract_2010,
            &self.census_block_group_2010,
            &self.census_block_2010,
            &self.council_district_2016,
            &self.political_ward,
            &self.political_division,
            &self.planning_district,
            &self.elementary_school,
            &self.middle_school,
            &self.high_school,
            &self.zoning,
            &self.police_division,
            &self.police_district,
            &self.police_service_area,
            &self.rubbish_recycle_day,
            &self.recycling_diversion_rate,
            &self.leaf_collection_area,
            &self.sanitation_area,
            &self.sanitation_district,
            &self.historic_street,
            &self.highway_district,
            &self.highway_section,
            &self.highway_subsection,
            &self.traffic_district,
            &self.traffic_pm_district,
            &self.street_light_route,
            &self.pwd_maint_district,
            &self.pwd_pressure_district,
            &self.pwd_treatment_plant,
            &self.pwd_water_plate,
            &self.pwd_center_city_district,
        ];
        let mut out = [("", None); 35];
        for (slot, (name, value)) in out
            .iter_mut()
            .zip(SERVICE_AREA_FIELDS.iter().zip(values))
        {
            *slot = (*name, value.as_deref());
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
