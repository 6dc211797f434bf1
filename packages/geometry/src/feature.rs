//! `GeoJSON` export of parsed legal descriptions.
//!
//! Each result becomes one `Feature`: the polygon (if any) as geometry and
//! the parse metadata as properties, ready to drop onto a map layer.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue};
use parcel_trace_legal_description_models::ParsedLegalDescription;

use crate::{centroid, to_geo_polygon};

/// Converts a parsed description into a `GeoJSON` [`Feature`].
///
/// Results without a polygon produce a feature with a `null` geometry so
/// the confidence and issues still reach the client.
#[must_use]
pub fn to_feature(result: &ParsedLegalDescription) -> Feature {
    let geometry = result
        .polygon
        .as_ref()
        .map(|polygon| Geometry::new(geojson::Value::from(&to_geo_polygon(polygon))));

    let mut properties = JsonObject::new();
    properties.insert(
        "township".to_string(),
        JsonValue::String(result.township.clone()),
    );
    properties.insert("range".to_string(), JsonValue::String(result.range.clone()));
    properties.insert(
        "section".to_string(),
        JsonValue::String(result.section.clone()),
    );
    if let Some(dialect) = result.dialect {
        properties.insert("dialect".to_string(), JsonValue::String(dialect.to_string()));
    }
    properties.insert(
        "confidence".to_string(),
        serde_json::json!(result.confidence),
    );
    properties.insert("issues".to_string(), serde_json::json!(result.issues));
    properties.insert(
        "pointCount".to_string(),
        serde_json::json!(result.points.len()),
    );

    if let Some(c) = result.polygon.as_ref().and_then(centroid) {
        properties.insert("centroid".to_string(), serde_json::json!([c.lng, c.lat]));
    }

    Feature {
        bbox: None,
        geometry,
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Converts several parsed descriptions into one [`FeatureCollection`].
#[must_use]
pub fn to_feature_collection(results: &[ParsedLegalDescription]) -> FeatureCollection {
    let features: Vec<Feature> = results.iter().map(to_feature).collect();
    log::debug!("Exporting {} legal descriptions as GeoJSON", features.len());

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use parcel_trace_legal_description_models::{Coordinate, DescriptionDialect};

    use super::*;
    use crate::assemble;

    fn with_polygon() -> ParsedLegalDescription {
        let mut result = ParsedLegalDescription::new("T1N R1E");
        result.dialect = Some(DescriptionDialect::RectangularSurvey);
        result.township = "1N".to_string();
        result.confidence = 0.6;
        result.polygon = Some(
            assemble(&[
                Coordinate::new(0.0, 0.0),
                Coordinate::new(0.0, 2.0),
                Coordinate::new(2.0, 2.0),
                Coordinate::new(2.0, 0.0),
            ])
            .unwrap(),
        );
        result
    }

    #[test]
    fn feature_carries_polygon_and_properties() {
        let json = serde_json::to_value(to_feature(&with_polygon())).unwrap();
        assert_eq!(json["type"], "Feature");
        assert_eq!(json["geometry"]["type"], "Polygon");
        assert_eq!(json["geometry"]["coordinates"][0].as_array().unwrap().len(), 5);
        assert_eq!(json["properties"]["township"], "1N");
        assert_eq!(json["properties"]["dialect"], "RECTANGULAR_SURVEY");
        assert_eq!(json["properties"]["centroid"][0], 1.0);
        assert_eq!(json["properties"]["centroid"][1], 1.0);
    }

    #[test]
    fn feature_without_polygon_has_null_geometry() {
        let mut result = ParsedLegalDescription::new("somewhere");
        result.issues.push("Informal description".to_string());
        let feature = to_feature(&result);
        assert!(feature.geometry.is_none());
        let json = serde_json::to_value(&feature).unwrap();
        assert!(json["geometry"].is_null());
        assert_eq!(json["properties"]["issues"][0], "Informal description");
        assert!(json["properties"].get("centroid").is_none());
    }

    #[test]
    fn collection_keeps_order() {
        let results = vec![with_polygon(), ParsedLegalDescription::new("x")];
        let collection = to_feature_collection(&results);
        assert_eq!(collection.features.len(), 2);
        assert!(collection.features[0].geometry.is_some());
        assert!(collection.features[1].geometry.is_none());
    }
}
