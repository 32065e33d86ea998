use std::path::Path;

use geojson::{Feature, FeatureCollection, Geometry, Value};

use crate::{error::Result, pipeline::LocatedParts, types::RegionDecision};

impl LocatedParts {
    /// Export every traced region as a GeoJSON Polygon feature in pixel
    /// coordinates. Rejected regions are included and distinguishable by
    /// their `accepted` property.
    pub fn to_geojson(&self) -> FeatureCollection {
        let features = self
            .regions
            .iter()
            .enumerate()
            .map(|(i, region)| region_feature(i, region))
            .collect();

        let mut foreign_members = serde_json::Map::new();
        foreign_members.insert(
            "image_width".to_string(),
            serde_json::Value::Number(serde_json::Number::from(self.image_width)),
        );
        foreign_members.insert(
            "image_height".to_string(),
            serde_json::Value::Number(serde_json::Number::from(self.image_height)),
        );
        foreign_members.insert(
            "region_count".to_string(),
            serde_json::Value::Number(serde_json::Number::from(self.regions.len())),
        );
        foreign_members.insert(
            "accepted_count".to_string(),
            serde_json::Value::Number(serde_json::Number::from(self.accepted().count())),
        );

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: Some(foreign_members),
        }
    }

    /// Export to GeoJSON and serialize to JSON string
    pub fn to_geojson_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_geojson())?)
    }

    /// Save GeoJSON to file
    pub fn save_geojson<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_geojson_string()?)?;
        Ok(())
    }
}

fn region_feature(id: usize, region: &RegionDecision) -> Feature {
    // GeoJSON rings are explicitly closed, first position repeated last
    let mut ring: Vec<Vec<f64>> = region
        .contour
        .points
        .iter()
        .map(|p| vec![p.x as f64, p.y as f64])
        .collect();
    if let Some(first) = ring.first().cloned() {
        ring.push(first);
    }
    let geometry = Geometry::new(Value::Polygon(vec![ring]));

    let mut properties = serde_json::Map::new();
    properties.insert(
        "id".to_string(),
        serde_json::Value::Number(serde_json::Number::from(id)),
    );
    properties.insert("accepted".to_string(), serde_json::Value::Bool(region.accepted));
    properties.insert(
        "x".to_string(),
        serde_json::Value::Number(serde_json::Number::from(region.bounding_box.x)),
    );
    properties.insert(
        "y".to_string(),
        serde_json::Value::Number(serde_json::Number::from(region.bounding_box.y)),
    );
    properties.insert(
        "width".to_string(),
        serde_json::Value::Number(serde_json::Number::from(region.bounding_box.width)),
    );
    properties.insert(
        "height".to_string(),
        serde_json::Value::Number(serde_json::Number::from(region.bounding_box.height)),
    );

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: Some(geojson::feature::Id::Number(serde_json::Number::from(id))),
        properties: Some(properties),
        foreign_members: None,
    }
}
