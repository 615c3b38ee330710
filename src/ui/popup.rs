//! Popup markup for location markers.
//!
//! Popups are static: the HTML is produced once when the marker is placed.
//! The only inputs are the marker's fields; the phone block is emitted only
//! when the marker has a phone.

use crate::data::markers::LocationMarker;
use serde::{Deserialize, Serialize};

const ICON_PERSON: &[&str] = &["M16 7a4 4 0 11-8 0 4 4 0 018 0zM12 14a7 7 0 00-7 7h14a7 7 0 00-7-7z"];
const ICON_MAIL: &[&str] = &["M3 8l7.89 5.26a2 2 0 002.22 0L21 8M5 19h14a2 2 0 002-2V7a2 2 0 00-2-2H5a2 2 0 00-2 2v10a2 2 0 002 2z"];
const ICON_PIN: &[&str] = &[
    "M17.657 16.657L13.414 20.9a1.998 1.998 0 01-2.827 0l-4.244-4.243a8 8 0 1111.314 0z",
    "M15 11a3 3 0 11-6 0 3 3 0 016 0z",
];
const ICON_PHONE: &[&str] = &["M3 5a2 2 0 012-2h3.28a1 1 0 01.948.684l1.498 4.493a1 1 0 01-.502 1.21l-2.257 1.13a11.042 11.042 0 005.516 5.516l1.13-2.257a1 1 0 011.21-.502l4.493 1.498a1 1 0 01.684.949V19a2 2 0 01-2 2h-1C9.716 21 3 14.284 3 6V5z"];

/// Section headings shown in the popup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupLabels {
    pub responsible: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    pub go_to: String,
}

impl Default for PopupLabels {
    fn default() -> Self {
        Self {
            responsible: "Encargado".to_string(),
            email: "Correo".to_string(),
            address: "Dirección".to_string(),
            phone: "Teléfono".to_string(),
            go_to: "Ir a ubicación".to_string(),
        }
    }
}

/// The fields a popup needs, borrowed from a marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupContent<'a> {
    pub title: &'a str,
    pub responsible: &'a str,
    pub email: &'a str,
    pub address: &'a str,
    pub phone: Option<&'a str>,
}

impl<'a> PopupContent<'a> {
    pub fn from_marker(marker: &'a LocationMarker) -> Self {
        Self {
            title: &marker.title,
            responsible: &marker.encargado,
            email: &marker.correo,
            address: &marker.direccion,
            phone: marker.phone(),
        }
    }

    pub fn to_html(&self, labels: &PopupLabels) -> String {
        let mut html = String::with_capacity(2048);
        html.push_str(&format!(
            r#"<div class="p-4"><div class="mb-4"><h3 class="text-base font-bold text-gray-800 mb-1">{}</h3><div class="h-1 w-20 bg-blue-500 rounded"></div></div><div class="space-y-3">"#,
            escape_html(self.title)
        ));

        section(
            &mut html,
            ICON_PERSON,
            &labels.responsible,
            &format!(r#"<span class="text-sm">{}</span>"#, escape_html(self.responsible)),
        );
        section(
            &mut html,
            ICON_MAIL,
            &labels.email,
            &link("mailto:", self.email),
        );
        section(
            &mut html,
            ICON_PIN,
            &labels.address,
            &format!(r#"<span class="text-sm">{}</span>"#, escape_html(self.address)),
        );
        if let Some(phone) = self.phone {
            section(&mut html, ICON_PHONE, &labels.phone, &link("tel:", phone));
        }

        html.push_str(&format!(
            r#"</div><div class="mt-4 pt-3 border-t border-gray-200"><button class="w-full bg-blue-500 hover:bg-blue-600 text-white py-2 px-4 rounded-md text-sm flex items-center justify-center gap-2">{}</button></div></div>"#,
            escape_html(&labels.go_to)
        ));
        html
    }
}

/// Popup HTML for a marker with the default labels
pub fn render_popup(marker: &LocationMarker) -> String {
    PopupContent::from_marker(marker).to_html(&PopupLabels::default())
}

fn section(html: &mut String, icon: &[&str], label: &str, body: &str) {
    let paths: String = icon
        .iter()
        .map(|d| {
            format!(
                r#"<path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="{}" />"#,
                d
            )
        })
        .collect();
    html.push_str(&format!(
        r#"<div class="flex items-start text-gray-700"><svg class="w-5 h-5 mr-3 mt-0.5 text-blue-500 flex-shrink-0" fill="none" stroke="currentColor" viewBox="0 0 24 24">{}</svg><div><span class="text-sm font-semibold block text-gray-600">{}</span>{}</div></div>"#,
        paths,
        escape_html(label),
        body
    ));
}

fn link(scheme: &str, value: &str) -> String {
    let escaped = escape_html(value);
    format!(
        r#"<a href="{}{}" class="text-sm text-blue-500 hover:text-blue-600">{}</a>"#,
        scheme, escaped, escaped
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(telefono: Option<&str>) -> LocationMarker {
        LocationMarker {
            title: "Emsad Centro".to_string(),
            lat: 22.1505,
            lng: -100.9733,
            encargado: "María López".to_string(),
            correo: "emsad.centro@example.mx".to_string(),
            direccion: "Av. Universidad 100".to_string(),
            telefono: telefono.map(str::to_string),
        }
    }

    #[test]
    fn test_popup_without_phone() {
        let html = render_popup(&marker(None));

        assert!(html.contains("Emsad Centro"));
        assert!(html.contains("María López"));
        assert!(html.contains(r#"href="mailto:emsad.centro@example.mx""#));
        assert!(html.contains("Av. Universidad 100"));
        assert!(!html.contains("tel:"));
        assert!(!html.contains("Teléfono"));
    }

    #[test]
    fn test_popup_with_phone() {
        let html = render_popup(&marker(Some("555-1234")));

        assert!(html.contains(r#"href="tel:555-1234""#));
        assert!(html.contains("Teléfono"));
    }

    #[test]
    fn test_icons_draw_every_path() {
        let html = render_popup(&marker(Some("555-1234")));

        assert_eq!(html.matches("<svg").count(), 4);
        assert_eq!(html.matches("<path ").count(), 5);
        assert!(html.contains(r#"d="M15 11a3 3 0 11-6 0 3 3 0 016 0z""#));
    }

    #[test]
    fn test_popup_escapes_markup() {
        let mut m = marker(None);
        m.title = "<script>alert(1)</script>".to_string();
        m.correo = "a\"b@example.mx".to_string();
        let html = render_popup(&m);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("mailto:a&quot;b@example.mx"));
    }

    #[test]
    fn test_custom_labels() {
        let labels = PopupLabels {
            responsible: "Manager".to_string(),
            ..Default::default()
        };
        let html = PopupContent::from_marker(&marker(None)).to_html(&labels);
        assert!(html.contains("Manager"));
        assert!(!html.contains("Encargado"));
    }
}
