use crate::consts::{HTML_SIGNATURE_REGEX, PLIST_SIGNATURE_REGEX, SHORTCUT_SIGNATURE_REGEX};
use crate::detect::{self, Detected};
use crate::payload::Payload;
use derive_more::Display;

/// The kinds of input the extractor understands.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Windows `.url`: `[InternetShortcut]` with a `URL=` line.
    #[display("internet shortcut")]
    InternetShortcut,
    /// macOS `.webloc` property list.
    #[display("webloc")]
    Webloc,
    /// HTML pages and Netscape bookmark exports.
    #[display("HTML")]
    Markup,
    /// JSON: session files, browser bookmark backups, record lists.
    #[display("JSON")]
    Structured,
    /// CSV, TSV or semicolon-separated text.
    #[display("CSV")]
    Delimited,
    /// One URL per line.
    #[display("text")]
    Lines,
}

/// A format that can be recognised from content alone.
struct Sniffer {
    format: Format,
    signature: fn(&str) -> bool,
}

/// Checked in order when nothing was declared; the first detector with a
/// matching signature that finds something wins. Delimited text is only ever
/// declared, since any comma in a line list would look like a CSV.
const SNIFFERS: [Sniffer; 5] = [
    Sniffer { format: Format::InternetShortcut, signature: |text| SHORTCUT_SIGNATURE_REGEX.is_match(text) },
    Sniffer { format: Format::Webloc, signature: |text| PLIST_SIGNATURE_REGEX.is_match(text) },
    Sniffer { format: Format::Markup, signature: |text| HTML_SIGNATURE_REGEX.is_match(text) },
    Sniffer { format: Format::Structured, signature: |text| text.trim_start().starts_with(['{', '[']) },
    Sniffer { format: Format::Lines, signature: |text| !text.trim().is_empty() },
];

impl Format {
    /// Run this format's detector.
    pub fn detect(self, text: &str) -> Option<Detected> {
        match self {
            Self::InternetShortcut => detect::shortcut::internet_shortcut(text),
            Self::Webloc => detect::shortcut::webloc(text),
            Self::Markup => detect::markup::detect(text),
            Self::Structured => detect::structured::detect(text),
            Self::Delimited => detect::delimited::detect(text),
            Self::Lines => detect::lines::detect(text),
        }
    }

    /// Format named by the payload's extension, else by its media type.
    pub fn declared(payload: &Payload) -> Option<Self> {
        let by_extension = payload.extension().and_then(|ext| match ext.as_str() {
            "url" => Some(Self::InternetShortcut),
            "webloc" => Some(Self::Webloc),
            "html" | "htm" => Some(Self::Markup),
            "json" => Some(Self::Structured),
            "csv" | "tsv" => Some(Self::Delimited),
            "txt" => Some(Self::Lines),
            _ => None,
        });
        by_extension.or_else(|| {
            let essence = payload.essence()?;
            match essence.as_str() {
                "application/internet-shortcut" | "application/x-url" => Some(Self::InternetShortcut),
                xml if xml.contains("xml")
                    && !xml.contains("html")
                    && PLIST_SIGNATURE_REGEX.is_match(payload.text()) =>
                {
                    Some(Self::Webloc)
                },
                html if html.contains("html") => Some(Self::Markup),
                json if json.contains("json") => Some(Self::Structured),
                "text/csv" | "text/tab-separated-values" | "application/csv" => Some(Self::Delimited),
                text if text.starts_with("text/") => Some(Self::Lines),
                _ => None,
            }
        })
    }

    /// Detect by content signature, first success wins.
    pub fn sniff(text: &str) -> Option<(Self, Detected)> {
        SNIFFERS
            .iter()
            .filter(|sniffer| (sniffer.signature)(text))
            .find_map(|sniffer| sniffer.format.detect(text).map(|detected| (sniffer.format, detected)))
    }
}
