//! Configuration structures for the reclassification pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the riclass pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiclassConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Record extraction configuration.
    pub extraction: ExtractionConfig,

    /// Delimited-text reading configuration.
    pub csv: CsvConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to scan (0 = unlimited).
    pub max_pages: usize,

    /// Below this many characters of recovered text a warning is logged.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            min_text_length: 50,
        }
    }
}

/// Record extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Two candidates with equal code and description are duplicates when
    /// their amounts differ by no more than this.
    pub dedup_tolerance: f64,

    /// Candidates with a shorter description are discarded.
    pub min_description_chars: usize,

    /// A buffered table region is kept only when it holds more than this
    /// many lines when a non-numeric line closes it.
    pub table_min_lines: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            dedup_tolerance: 0.01,
            min_description_chars: 3,
            table_min_lines: 3,
        }
    }
}

/// Delimited-text reading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    /// Field delimiter. Italian accounting exports ship with `;`.
    pub delimiter: char,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self { delimiter: ';' }
    }
}

impl RiclassConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RiclassConfig::default();
        assert_eq!(config.extraction.dedup_tolerance, 0.01);
        assert_eq!(config.extraction.min_description_chars, 3);
        assert_eq!(config.extraction.table_min_lines, 3);
        assert_eq!(config.csv.delimiter, ';');
        assert_eq!(config.pdf.max_pages, 0);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: RiclassConfig =
            serde_json::from_str(r#"{"csv": {"delimiter": ","}}"#).unwrap();
        assert_eq!(config.csv.delimiter, ',');
        assert_eq!(config.extraction.dedup_tolerance, 0.01);
    }
}
