use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::MapDocument;

/// Errors that can occur while producing the map artifact.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to write map artifact {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode marker data: {0}")]
    Serialize(#[from] serde_json::Error),
}

const DEFAULT_ZOOM: u32 = 13;

/// Leaflet and markercluster assets, pinned so an artifact renders the
/// same way years later.
const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>reportmap</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.css">
<link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.Default.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<script src="https://unpkg.com/leaflet.markercluster@1.5.3/dist/leaflet.markercluster.js"></script>
<style>
html, body { margin: 0; height: 100%; }
#map { height: 100%; }
</style>
</head>
<body>
<div id="map"></div>
<script>
var tiles = L.tileLayer("https://tile.openstreetmap.org/{z}/{x}/{y}.png", {
  maxZoom: 19,
  attribution: "&copy; OpenStreetMap contributors"
});
"#;

/// Marker labels go through textContent, so report text stays text.
const PAGE_SCRIPT: &str = r#"var cluster = L.markerClusterGroup();
reports.forEach(function (r) {
  var marker = L.marker([r.lat, r.lon]);
  var popup = document.createElement("div");
  popup.textContent = r.popup;
  marker.bindPopup(popup);
  var tooltip = document.createElement("div");
  tooltip.textContent = r.tooltip;
  marker.bindTooltip(tooltip);
  cluster.addLayer(marker);
});
map.addLayer(cluster);
</script>
</body>
</html>
"#;

/// Render the document as one self-contained HTML page.
pub fn render_html(doc: &MapDocument) -> Result<String, RenderError> {
    let markers_json = html_safe_json(serde_json::to_string(doc.markers())?);
    let lat = doc.center().lat();
    let lon = doc.center().lon();

    let mut html =
        String::with_capacity(PAGE_HEAD.len() + PAGE_SCRIPT.len() + markers_json.len() + 512);
    html.push_str(PAGE_HEAD);
    html.push_str(&format!(
        "var map = L.map(\"map\").setView([{lat:.7}, {lon:.7}], {DEFAULT_ZOOM});\n"
    ));
    html.push_str("tiles.addTo(map);\n");
    html.push_str(&format!("L.marker([{lat:.7}, {lon:.7}]).addTo(map);\n"));
    html.push_str(&format!(
        "L.circle([{lat:.7}, {lon:.7}], {{ radius: {} }}).addTo(map);\n",
        doc.radius_meters()
    ));
    html.push_str(&format!("var reports = {markers_json};\n"));
    html.push_str(PAGE_SCRIPT);

    Ok(html)
}

/// Write the rendered page, overwriting any existing file at `path`.
pub fn write_html(path: &Path, html: &str) -> Result<(), RenderError> {
    let io_err = |source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(html.as_bytes()).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    Ok(())
}

/// Escape `<`, `>` and `&` inside a JSON string with `\uXXXX` forms so
/// embedded report text cannot close the surrounding script tag.
fn html_safe_json(json: String) -> String {
    json.replace('&', "\\u0026")
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
}
