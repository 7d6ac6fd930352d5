//! GeoJSON document serializers.
//!
//! A serializer turns one [`AddressRecord`] into a feature (`model_to_data`)
//! and wraps features in an envelope ([`GeoJson::render`]):
//!
//! ```text
//! single:  metadata… , type, properties, geometry
//! many:    metadata… , pagination… , type = "FeatureCollection", features
//! ```
//!
//! Key order is part of the output contract, so documents are built on
//! `serde_json::Map` with insertion order preserved.
//!
//! # Multi-valued fields
//!
//! The registry stores multi-valued identifiers joined on
//! [`MULTI_VALUE_DELIMITER`]. The full serializer splits them into arrays;
//! the summary serializer emits them joined, as stored.

use crate::paginate::PageInfo;
use crate::types::AddressRecord;
use serde_json::{Map, Value};
use std::sync::Arc;

/// An ordered JSON object.
pub type Document = Map<String, Value>;

/// Separator of multi-valued identifier columns.
pub const MULTI_VALUE_DELIMITER: char = '|';

/// Spatial reference of stored geocode coordinates.
pub const ENGINE_SRID: u32 = 2272;

/// Spatial reference of rendered geometries unless configured otherwise.
pub const DEFAULT_SRID: u32 = 4326;

const RECYCLING_DIVERSION_RATE: &str = "recycling_diversion_rate";

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Per-record output handed to [`GeoJson::render`].
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Feature(Document),
    Collection(Vec<Document>),
}

/// Envelope shared by every GeoJSON serializer: optional metadata and
/// pagination fields placed ahead of the feature data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoJson {
    pub metadata: Option<Document>,
    pub pagination: Option<PageInfo>,
}

impl GeoJson {
    pub fn render(&self, data: Rendered) -> Value {
        let mut out = Document::new();
        if let Some(metadata) = &self.metadata {
            out.extend(metadata.clone());
        }

        match data {
            Rendered::Collection(features) => {
                if let Some(pagination) = &self.pagination {
                    out.extend(pagination.to_fields());
                }
                out.insert("type".into(), Value::from("FeatureCollection"));
                out.insert(
                    "features".into(),
                    Value::Array(features.into_iter().map(Value::Object).collect()),
                );
            }
            Rendered::Feature(feature) => out.extend(feature),
        }

        Value::Object(out)
    }
}

/// A record-to-feature projection with a GeoJSON envelope.
pub trait FeatureSerializer {
    fn envelope(&self) -> &GeoJson;

    /// Render one record's feature: `type`, `properties`, `geometry`.
    fn model_to_data(&self, record: &AddressRecord) -> Document;

    fn serialize(&self, record: &AddressRecord) -> Value {
        self.envelope()
            .render(Rendered::Feature(self.model_to_data(record)))
    }

    fn serialize_many(&self, records: &[AddressRecord]) -> Value {
        let features = records.iter().map(|r| self.model_to_data(r)).collect();
        self.envelope().render(Rendered::Collection(features))
    }
}

// ---------------------------------------------------------------------------
// Reprojection hook
// ---------------------------------------------------------------------------

/// Coordinate transform between spatial references. The math lives outside
/// this crate; serializers only invoke it.
pub trait Reproject: Send + Sync {
    fn reproject(&self, x: f64, y: f64, from_srid: u32, to_srid: u32) -> (f64, f64);
}

/// Returns coordinates unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Reproject for Passthrough {
    fn reproject(&self, x: f64, y: f64, _from_srid: u32, _to_srid: u32) -> (f64, f64) {
        (x, y)
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn text(value: &Option<String>) -> Value {
    Value::from(value.clone())
}

/// Empty strings render as null.
fn text_or_null(value: &Option<String>) -> Value {
    match value.as_deref() {
        Some(s) if !s.is_empty() => Value::from(s),
        _ => Value::Null,
    }
}

/// Split a delimiter-joined column into an array; empty renders as null.
fn split_multi(value: &Option<String>) -> Value {
    match value.as_deref() {
        Some(s) if !s.is_empty() => Value::Array(
            s.split(MULTI_VALUE_DELIMITER)
                .map(Value::from)
                .collect(),
        ),
        _ => Value::Null,
    }
}

fn point(coordinates: [Value; 2]) -> Value {
    let mut geometry = Document::new();
    geometry.insert("type".into(), Value::from("Point"));
    geometry.insert("coordinates".into(), Value::Array(coordinates.into()));
    Value::Object(geometry)
}

fn feature(properties: Document, geometry: Value) -> Document {
    let mut data = Document::new();
    data.insert("type".into(), Value::from("Feature"));
    data.insert("properties".into(), Value::Object(properties));
    data.insert("geometry".into(), geometry);
    data
}

// ---------------------------------------------------------------------------
// Full public document
// ---------------------------------------------------------------------------

/// The public address feature: split identifiers, service areas merged into
/// the properties, and the recycling-rate transform applied.
#[derive(Clone)]
pub struct AddressJsonSerializer {
    envelope: GeoJson,
    srid: u32,
    projection: Arc<dyn Reproject>,
}

impl Default for AddressJsonSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressJsonSerializer {
    pub fn new() -> Self {
        Self {
            envelope: GeoJson::default(),
            srid: DEFAULT_SRID,
            projection: Arc::new(Passthrough),
        }
    }

    pub fn with_metadata(mut self, metadata: Document) -> Self {
        self.envelope.metadata = Some(metadata);
        self
    }

    pub fn with_pagination(mut self, pagination: PageInfo) -> Self {
        self.envelope.pagination = Some(pagination);
        self
    }

    pub fn with_srid(mut self, srid: u32) -> Self {
        self.srid = srid;
        self
    }

    pub fn with_projection(mut self, projection: Arc<dyn Reproject>) -> Self {
        self.projection = projection;
        self
    }

    fn geometry(&self, record: &AddressRecord) -> Value {
        if record.geocode_type.is_none() {
            return Value::Null;
        }
        match (record.geocode_x, record.geocode_y) {
            (Some(x), Some(y)) => {
                let (x, y) = self.projection.reproject(x, y, ENGINE_SRID, self.srid);
                point([Value::from(x), Value::from(y)])
            }
            (x, y) => point([Value::from(x), Value::from(y)]),
        }
    }
}

impl FeatureSerializer for AddressJsonSerializer {
    fn envelope(&self) -> &GeoJson {
        &self.envelope
    }

    fn model_to_data(&self, a: &AddressRecord) -> Document {
        let mut p = Document::new();
        p.insert("street_address".into(), Value::from(a.street_address.as_str()));
        p.insert("address_low".into(), Value::from(a.address_low));
        p.insert("address_low_suffix".into(), text(&a.address_low_suffix));
        p.insert("address_low_frac".into(), text(&a.address_low_frac));
        p.insert("address_high".into(), Value::from(a.address_high));
        p.insert("street_predir".into(), text(&a.street_predir));
        p.insert("street_name".into(), text(&a.street_name));
        p.insert("street_suffix".into(), text(&a.street_suffix));
        p.insert("street_postdir".into(), text(&a.street_postdir));
        p.insert("unit_type".into(), text(&a.unit_type));
        p.insert("unit_num".into(), text(&a.unit_num));
        p.insert("street_full".into(), text(&a.street_full));

        p.insert("zip_code".into(), text_or_null(&a.zip_code));
        p.insert("zip_4".into(), text_or_null(&a.zip_4));

        p.insert("pwd_parcel_id".into(), text_or_null(&a.pwd_parcel_id));
        p.insert("dor_parcel_id".into(), text_or_null(&a.dor_parcel_id));

        p.insert("li_address_key".into(), text(&a.li_address_key));
        p.insert("pwd_account_nums".into(), split_multi(&a.pwd_account_nums));

        p.insert("opa_account_num".into(), text_or_null(&a.opa_account_num));
        p.insert("opa_owners".into(), split_multi(&a.opa_owners));
        p.insert("opa_address".into(), text_or_null(&a.opa_address));

        let geom_type = a.geocode_type.as_ref().map(|_| "centroid");
        p.insert("geom_type".into(), Value::from(geom_type));
        p.insert("geom_source".into(), text(&a.geocode_type));

        for (name, value) in a.service_areas.entries() {
            p.insert(name.into(), Value::from(value));
        }

        let mut data = feature(p, self.geometry(a));
        transform_exceptions(&mut data);
        data
    }
}

/// Convert a numeric `recycling_diversion_rate` percentage into a fraction
/// with three decimal places. Absent, null or non-numeric values are left
/// untouched.
pub fn transform_exceptions(data: &mut Document) {
    let Some(Value::Object(properties)) = data.get_mut("properties") else {
        return;
    };
    let Some(value) = properties.get_mut(RECYCLING_DIVERSION_RATE) else {
        return;
    };

    let rate = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    if let Some(rate) = rate.filter(|r| r.is_finite()) {
        *value = Value::from(round3(rate / 100.0));
    }
}

/// Three decimal places, rounded on the exact binary value with ties to even.
fn round3(value: f64) -> f64 {
    format!("{value:.3}").parse().unwrap_or(value)
}

// ---------------------------------------------------------------------------
// Summary document
// ---------------------------------------------------------------------------

/// Flat projection for listing and debugging: raw stored values, operational
/// fields, no splitting, no transforms, geometry always a point.
#[derive(Debug, Clone, Default)]
pub struct AddressSummaryJsonSerializer {
    envelope: GeoJson,
}

impl AddressSummaryJsonSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata(mut self, metadata: Document) -> Self {
        self.envelope.metadata = Some(metadata);
        self
    }

    pub fn with_pagination(mut self, pagination: PageInfo) -> Self {
        self.envelope.pagination = Some(pagination);
        self
    }
}

impl FeatureSerializer for AddressSummaryJsonSerializer {
    fn envelope(&self) -> &GeoJson {
        &self.envelope
    }

    fn model_to_data(&self, a: &AddressRecord) -> Document {
        let mut p = Document::new();
        p.insert("street_address".into(), Value::from(a.street_address.as_str()));
        p.insert("address_low".into(), Value::from(a.address_low));
        p.insert("address_low_suffix".into(), text(&a.address_low_suffix));
        p.insert("address_low_frac".into(), text(&a.address_low_frac));
        p.insert("address_high".into(), Value::from(a.address_high));
        p.insert("street_predir".into(), text(&a.street_predir));
        p.insert("street_name".into(), text(&a.street_name));
        p.insert("street_suffix".into(), text(&a.street_suffix));
        p.insert("street_postdir".into(), text(&a.street_postdir));
        p.insert("unit_type".into(), text(&a.unit_type));
        p.insert("unit_num".into(), text(&a.unit_num));
        p.insert("street_full".into(), text(&a.street_full));

        p.insert("zip_code".into(), text(&a.zip_code));
        p.insert("zip_4".into(), text(&a.zip_4));

        p.insert("seg_id".into(), Value::from(a.seg_id));
        p.insert("seg_side".into(), text(&a.seg_side));
        p.insert("pwd_parcel_id".into(), text(&a.pwd_parcel_id));
        p.insert("dor_parcel_id".into(), text(&a.dor_parcel_id));
        p.insert("opa_account_num".into(), text(&a.opa_account_num));
        p.insert("opa_owners".into(), text(&a.opa_owners));
        p.insert("opa_address".into(), text(&a.opa_address));
        p.insert("info_residents".into(), text(&a.info_residents));
        p.insert("info_companies".into(), text(&a.info_companies));
        p.insert("pwd_account_nums".into(), text(&a.pwd_account_nums));
        p.insert("li_address_key".into(), text(&a.li_address_key));
        p.insert("voters".into(), text(&a.voters));

        p.insert("geocode_type".into(), text(&a.geocode_type));
        p.insert("geocode_x".into(), Value::from(a.geocode_x));
        p.insert("geocode_y".into(), Value::from(a.geocode_y));

        let geometry = point([Value::from(a.geocode_x), Value::from(a.geocode_y)]);
        feature(p, geometry)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
