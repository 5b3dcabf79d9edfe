//! Font lookup for text rendering.
//!
//! The system font database is scanned once, with the bundled DejaVu Sans
//! face added to it. The generic families (`sans-serif`, `serif`,
//! `monospace`) are pointed at faces that are actually installed, so CSS
//! names such as "Arial" resolve on hosts that only ship DejaVu or
//! Liberation. Each resolved face is parsed with `rusttype` on first use and
//! kept for the rest of the process.

use fontdb::{Database, Family, Query, Stretch, Style, Weight, ID};
use rusttype::Font;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, OnceLock};

const BUNDLED_FONT: &[u8] = include_bytes!("../../../assets/fonts/dejavu/DejaVuSans.ttf");

const SANS_SERIF_CANDIDATES: &[&str] = &[
    "Arial",
    "Helvetica",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
    "FreeSans",
];
const SERIF_CANDIDATES: &[&str] = &[
    "Times New Roman",
    "Liberation Serif",
    "DejaVu Serif",
    "Noto Serif",
    "FreeSerif",
];
const MONOSPACE_CANDIDATES: &[&str] = &[
    "Courier New",
    "Liberation Mono",
    "DejaVu Sans Mono",
    "Noto Sans Mono",
    "FreeMono",
];

/// The face every lookup can fall back to.
fn bundled_font() -> &'static Font<'static> {
    static FONT: OnceLock<Font<'static>> = OnceLock::new();
    FONT.get_or_init(|| {
        Font::try_from_bytes(BUNDLED_FONT)
            .unwrap_or_else(|| panic!("bundled DejaVu Sans font is invalid"))
    })
}

fn installed_families(fonts: &Database) -> BTreeSet<String> {
    fonts
        .faces()
        .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
        .collect()
}

fn first_installed<'a>(installed: &BTreeSet<String>, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .find(|name| installed.contains(*name))
}

fn system_fonts() -> &'static Database {
    static SYSTEM: OnceLock<Database> = OnceLock::new();
    SYSTEM.get_or_init(|| {
        let mut fonts = Database::new();
        fonts.load_system_fonts();
        fonts.load_font_data(BUNDLED_FONT.to_vec());

        let installed = installed_families(&fonts);
        if let Some(name) = first_installed(&installed, SANS_SERIF_CANDIDATES) {
            fonts.set_sans_serif_family(name);
        }
        if let Some(name) = first_installed(&installed, SERIF_CANDIDATES) {
            fonts.set_serif_family(name);
        }
        if let Some(name) = first_installed(&installed, MONOSPACE_CANDIDATES) {
            fonts.set_monospace_family(name);
        }

        tracing::debug!(
            "Indexed {} font faces across {} families",
            fonts.len(),
            installed.len()
        );
        fonts
    })
}

/// Parsed faces by fontdb id. `None` records a face that failed to parse.
fn parsed_faces() -> &'static Mutex<HashMap<ID, Option<&'static Font<'static>>>> {
    static PARSED: OnceLock<Mutex<HashMap<ID, Option<&'static Font<'static>>>>> = OnceLock::new();
    PARSED.get_or_init(Default::default)
}

/// Resolve the face for a text element's family and weight.
///
/// Tries the requested family, then the installed sans-serif family, and
/// finally the bundled face, so a text element always has a font.
pub fn get_font_for(family: &str, bold: bool, italic: bool) -> &'static Font<'static> {
    let weight = if bold { Weight::BOLD } else { Weight::NORMAL };
    let style = if italic { Style::Italic } else { Style::Normal };

    [family, "sans-serif"]
        .into_iter()
        .find_map(|family| find_face(family, weight, style).and_then(parse_face))
        .unwrap_or_else(|| {
            tracing::debug!("No installed face for '{}', using bundled font", family);
            bundled_font()
        })
}

/// fontdb families to query for a CSS-style family name.
fn query_families(family: &str) -> Vec<Family<'_>> {
    let family = family.trim();
    let generic = match family.to_ascii_lowercase().as_str() {
        "" | "sans" | "sans-serif" => return vec![Family::SansSerif],
        "serif" => return vec![Family::Serif],
        "monospace" => return vec![Family::Monospace],
        "cursive" => return vec![Family::Cursive],
        "fantasy" => return vec![Family::Fantasy],
        "times new roman" | "georgia" => Family::Serif,
        "courier new" | "courier" => Family::Monospace,
        _ => Family::SansSerif,
    };
    vec![Family::Name(family), generic]
}

fn find_face(family: &str, weight: Weight, style: Style) -> Option<ID> {
    let families = query_families(family);
    system_fonts().query(&Query {
        families: &families,
        weight,
        stretch: Stretch::Normal,
        style,
    })
}

fn parse_face(id: ID) -> Option<&'static Font<'static>> {
    let mut parsed = parsed_faces().lock().unwrap_or_else(|p| p.into_inner());
    *parsed.entry(id).or_insert_with(|| {
        let font = system_fonts()
            .with_face_data(id, |data, index| {
                Font::try_from_vec_and_index(data.to_vec(), index)
            })
            .flatten();
        if font.is_none() {
            tracing::warn!("Font face {:?} could not be parsed", id);
        }
        font.map(|font| &*Box::leak(Box::new(font)))
    })
}
