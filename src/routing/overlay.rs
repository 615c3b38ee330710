//! The "route" source/layer pair and the origin point layer.
//!
//! Engines differ on duplicate registration: some error, some silently
//! ignore it. Both helpers look before they register.

use crate::core::config::RouteConfig;
use crate::core::constants::{ORIGIN_POINT_LAYER_ID, ROUTE_OVERLAY_ID};
use crate::core::geo::LngLat;
use crate::data::geojson::GeoJson;
use crate::layers::base::LayerSpec;
use crate::traits::MapInstance;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayChange {
    Created,
    Updated,
}

/// Draws `coordinates` as the route line, creating the overlay on first use
/// and replacing its data afterwards.
pub fn upsert_route<I>(instance: &mut I, coordinates: Vec<LngLat>, style: &RouteConfig) -> Result<OverlayChange>
where
    I: MapInstance + ?Sized,
{
    let data = GeoJson::line_string(coordinates);

    if instance.has_layer(ROUTE_OVERLAY_ID) && instance.has_source(ROUTE_OVERLAY_ID) {
        instance.set_source_data(ROUTE_OVERLAY_ID, data)?;
        return Ok(OverlayChange::Updated);
    }

    let added_source = if instance.has_source(ROUTE_OVERLAY_ID) {
        instance.set_source_data(ROUTE_OVERLAY_ID, data)?;
        false
    } else {
        instance.add_source(ROUTE_OVERLAY_ID, data)?;
        true
    };

    let layer = LayerSpec::line(
        ROUTE_OVERLAY_ID,
        ROUTE_OVERLAY_ID,
        style.line_color.as_str(),
        style.line_width,
        style.line_opacity,
    );
    if let Err(e) = instance.add_layer(layer) {
        // source and layer go in together or not at all
        if added_source {
            instance.remove_source(ROUTE_OVERLAY_ID);
        }
        return Err(e);
    }
    log::debug!("route line layer added");
    Ok(OverlayChange::Created)
}

/// Adds the circle layer marking the route origin. Returns false when it is
/// already there.
pub fn add_origin_point<I>(instance: &mut I, style: &RouteConfig) -> Result<bool>
where
    I: MapInstance + ?Sized,
{
    if instance.has_layer(ORIGIN_POINT_LAYER_ID) {
        return Ok(false);
    }
    instance.add_layer(LayerSpec::circle(
        ORIGIN_POINT_LAYER_ID,
        GeoJson::point(style.origin),
        style.origin_point_radius,
        style.origin_point_color.as_str(),
    ))?;
    Ok(true)
}
