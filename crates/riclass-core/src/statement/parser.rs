//! Record extraction from balance-statement text.

use regex::Regex;
use tracing::{debug, trace};

use crate::models::account::{AccountRecord, CompanyInfo, DeclaredTotals};
use crate::models::config::ExtractionConfig;

use super::rules::patterns::{
    line_templates, CLOSING_DATE_PATTERNS, COMPANY_NAME_PATTERNS, DECL_EQUITY, DECL_LOSS,
    DECL_PROFIT, DECL_TOTAL_ASSETS, DECL_TOTAL_LIABILITIES, FISCAL_YEAR_PATTERNS, NOISE_TOKENS,
    NUMERAL_TOKEN, SECTION_KEYWORDS, TAX_CODE_PATTERNS, VAT_NUMBER_PATTERNS,
};
use super::rules::{normalize_code, parse_amount};

/// Everything recovered from one statement's text.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Extracted account records, in discovery order, deduplicated.
    pub records: Vec<AccountRecord>,
    /// Statement metadata, first match per field.
    pub company: CompanyInfo,
    /// Printed aggregate lines, carried through unclassified.
    pub declared: DeclaredTotals,
}

/// Extracts account records, company metadata and declared totals from
/// noisy statement text.
///
/// Text is consumed block by block (one block per document page) so that
/// metadata fields settle in physical order and the table heuristic can
/// pick up repeating section headers as they appear.
#[derive(Debug)]
pub struct BalanceParser {
    config: ExtractionConfig,
}

impl BalanceParser {
    /// Create a parser with default thresholds.
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// Create a parser with explicit thresholds.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Parse a single block of text.
    pub fn parse(&self, text: &str) -> ParseResult {
        self.parse_blocks([text])
    }

    /// Parse a sequence of text blocks in physical order.
    pub fn parse_blocks<'a, I>(&self, blocks: I) -> ParseResult
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut result = ParseResult::default();

        for block in blocks {
            self.scan_company_info(block, &mut result.company);
            self.scan_declared_totals(block, &mut result.declared);

            for candidate in self.extract_line_records(block) {
                self.push_deduplicated(&mut result.records, candidate);
            }
            for region in self.table_regions(block) {
                for candidate in self.extract_line_records(&region) {
                    self.push_deduplicated(&mut result.records, candidate);
                }
            }
        }

        let before = result.records.len();
        result.records.retain(|r| !self.is_noise(&r.description));
        if result.records.len() < before {
            debug!(
                "noise filter dropped {} of {} candidates",
                before - result.records.len(),
                before
            );
        }

        debug!(
            "extracted {} records, declared totals present: {}",
            result.records.len(),
            !result.declared.is_empty()
        );
        result
    }

    /// Run every line template over the text and keep plausible candidates.
    fn extract_line_records(&self, text: &str) -> Vec<AccountRecord> {
        let mut candidates = Vec::new();

        for template in line_templates() {
            for caps in template.captures_iter(text) {
                let description = caps[2].trim().to_string();
                if description.chars().count() < self.config.min_description_chars {
                    continue;
                }
                if !description.chars().any(char::is_alphabetic) {
                    continue;
                }

                let amount = parse_amount(&caps[3]);
                if amount == 0.0 {
                    continue;
                }

                let code = normalize_code(&caps[1]);
                trace!("candidate {} {:?} {}", code, description, amount);
                candidates.push(AccountRecord {
                    code,
                    description,
                    amount,
                });
            }
        }

        candidates
    }

    /// Buffer runs of numeral-bearing lines that follow a section header
    /// and resubmit them to the line templates.
    ///
    /// A region opens on a line containing a section keyword; it closes on
    /// the first line without a numeral token (kept only when more than
    /// `table_min_lines` lines are buffered) or at end of input.
    fn table_regions(&self, text: &str) -> Vec<String> {
        let mut regions = Vec::new();
        let mut buffer: Vec<&str> = Vec::new();
        let mut open = false;

        for line in text.lines() {
            if !open {
                open = contains_section_keyword(line);
                continue;
            }

            if NUMERAL_TOKEN.is_match(line) {
                buffer.push(line);
                continue;
            }

            if buffer.len() > self.config.table_min_lines {
                regions.push(buffer.join("\n"));
            }
            buffer.clear();
            // The closing line may itself open the next region.
            open = contains_section_keyword(line);
        }

        if !buffer.is_empty() {
            regions.push(buffer.join("\n"));
        }

        if !regions.is_empty() {
            trace!("detected {} table regions", regions.len());
        }
        regions
    }

    /// Append a candidate unless an equal record was already extracted.
    fn push_deduplicated(&self, records: &mut Vec<AccountRecord>, candidate: AccountRecord) {
        let duplicate = records.iter().any(|r| {
            r.code == candidate.code
                && r.description.trim() == candidate.description.trim()
                && (r.amount - candidate.amount).abs() <= self.config.dedup_tolerance
        });
        if !duplicate {
            records.push(candidate);
        }
    }

    /// Drop descriptions that are pagination noise or carry no words.
    fn is_noise(&self, description: &str) -> bool {
        let lower = description.to_lowercase();
        let trimmed = lower.trim();

        trimmed.chars().count() < self.config.min_description_chars
            || !trimmed.chars().any(char::is_alphabetic)
            || NOISE_TOKENS.iter().any(|t| trimmed.contains(t))
    }

    /// Populate company metadata; the first matching candidate per field
    /// wins and later blocks never overwrite it.
    fn scan_company_info(&self, text: &str, info: &mut CompanyInfo) {
        set_first_match(&mut info.company_name, &COMPANY_NAME_PATTERNS, text);
        set_first_match(&mut info.fiscal_year, &FISCAL_YEAR_PATTERNS, text);
        set_first_match(&mut info.closing_date, &CLOSING_DATE_PATTERNS, text);
        set_first_match(&mut info.vat_number, &VAT_NUMBER_PATTERNS, text);
        set_first_match(&mut info.tax_code, &TAX_CODE_PATTERNS, text);
    }

    /// Record printed aggregate lines, first match per label.
    fn scan_declared_totals(&self, text: &str, declared: &mut DeclaredTotals) {
        set_first_amount(&mut declared.total_assets, &DECL_TOTAL_ASSETS, text);
        set_first_amount(&mut declared.total_liabilities, &DECL_TOTAL_LIABILITIES, text);
        set_first_amount(&mut declared.equity, &DECL_EQUITY, text);
        set_first_amount(&mut declared.profit, &DECL_PROFIT, text);
        set_first_amount(&mut declared.loss, &DECL_LOSS, text);
    }
}

impl Default for BalanceParser {
    fn default() -> Self {
        Self::new()
    }
}

fn contains_section_keyword(line: &str) -> bool {
    let lower = line.to_lowercase();
    SECTION_KEYWORDS.iter().any(|k| lower.contains(k))
}

fn set_first_match(slot: &mut Option<String>, candidates: &[Regex], text: &str) {
    if slot.is_some() {
        return;
    }
    for pattern in candidates {
        if let Some(caps) = pattern.captures(text) {
            *slot = Some(caps[1].trim().to_string());
            return;
        }
    }
}

fn set_first_amount(slot: &mut Option<f64>, pattern: &Regex, text: &str) {
    if slot.is_some() {
        return;
    }
    if let Some(caps) = pattern.captures(text) {
        *slot = Some(parse_amount(&caps[1]));
    }
}
