//! Regex tables for balance-statement record extraction.
//!
//! Every template keeps its quantifiers bounded and line-anchored so a
//! pathological document cannot trigger runaway backtracking.

use lazy_static::lazy_static;
use regex::Regex;

/// Amount token: optional parentheses/sign, EU or US digit grouping.
const AMOUNT: &str = r"\(?-?\d{1,12}(?:[.,]\d{3})*(?:[.,]\d{1,2})?\)?-?";

/// Account heading: starts with a letter, 3-60 chars of letters,
/// digits and light punctuation.
const HEADING: &str = r"[A-Za-zÀ-ÖØ-öø-ÿ(][A-Za-zÀ-ÖØ-öø-ÿ0-9 .,'()/&-]{2,59}?";

lazy_static! {
    // Line templates, in application order. All of them are run against
    // all text so complementary layouts in one document are all captured.

    /// Dotted/dashed numeric codes: `1-1-10 Cassa contanti 1.500,00`.
    pub static ref DOTTED_CODE_LINE: Regex = Regex::new(&format!(
        r"(?m)^[ \t]*([0-9]{{1,4}}(?:[-./_ \\][0-9]{{1,4}}){{1,3}})[ \t]+({HEADING})[ \t]+({AMOUNT})[ \t]*[DA]?[ \t]*$"
    )).unwrap();

    /// Statutory item codes: `A.I.1) Crediti verso soci 2.500,00`.
    pub static ref STATUTORY_CODE_LINE: Regex = Regex::new(&format!(
        r"(?m)^[ \t]*([A-Z](?:\.[IVXLC]{{1,4}}|\))(?:\.\d{{1,2}})?\)?)[ \t]+({HEADING})[ \t]+({AMOUNT})[ \t]*$"
    )).unwrap();

    /// Bare numeric codes: `1500 Banca c/c 2.000,00`.
    pub static ref BARE_CODE_LINE: Regex = Regex::new(&format!(
        r"(?m)^[ \t]*(\d{{2,8}})[ \t]+({HEADING})[ \t]+({AMOUNT})[ \t]*[DA]?[ \t]*$"
    )).unwrap();

    /// Parenthesized numeric codes: `(210) Fondo svalutazione 300,00`.
    pub static ref PAREN_CODE_LINE: Regex = Regex::new(&format!(
        r"(?m)^[ \t]*\((\d{{1,6}})\)[ \t]+({HEADING})[ \t]+({AMOUNT})[ \t]*$"
    )).unwrap();

    /// Decimal or grouped numeral, used to keep a table region open.
    pub static ref NUMERAL_TOKEN: Regex = Regex::new(
        r"\d{1,3}(?:[.,]\d{3})+|\d+[.,]\d{1,2}\b"
    ).unwrap();

    // Statement metadata. Ordered candidates per field; the first match
    // wins and the field is never overwritten by a later block.

    pub static ref COMPANY_NAME_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?im)^[ \t]*(?:ragione[ \t]+sociale|denominazione)[ \t:]+([^\n]{3,80})").unwrap(),
        Regex::new(r"(?im)^[ \t]*società[ \t:]+([^\n]{3,80})").unwrap(),
    ];

    pub static ref FISCAL_YEAR_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:esercizio|anno)[ \t:]+(\d{4})").unwrap(),
        Regex::new(r"(?i)bilancio[ \t]+al[ \t]+\d{1,2}[-/]\d{1,2}[-/](\d{4})").unwrap(),
    ];

    pub static ref CLOSING_DATE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)data[ \t]+chiusura[ \t:]*(\d{1,2}[-/]\d{1,2}[-/]\d{4})").unwrap(),
        Regex::new(r"(?i)\bal[ \t]+(\d{1,2}[-/]\d{1,2}[-/]\d{4})").unwrap(),
    ];

    pub static ref VAT_NUMBER_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:p\.[ \t]?iva|partita[ \t]+iva)[ \t:.]*(\d{11})").unwrap(),
    ];

    pub static ref TAX_CODE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:c\.f\.|codice[ \t]+fiscale)[ \t:.]*([A-Za-z0-9]{11,16})").unwrap(),
    ];

    // Declared aggregate lines, carried through as a cross-check only.

    pub static ref DECL_TOTAL_ASSETS: Regex = Regex::new(&format!(
        r"(?i)totale[ \t]+attivo[ \t:]*({AMOUNT})"
    )).unwrap();

    pub static ref DECL_TOTAL_LIABILITIES: Regex = Regex::new(&format!(
        r"(?i)totale[ \t]+passivo[ \t:]*({AMOUNT})"
    )).unwrap();

    pub static ref DECL_EQUITY: Regex = Regex::new(&format!(
        r"(?i)(?:totale[ \t]+)?patrimonio[ \t]+netto[ \t:]*({AMOUNT})"
    )).unwrap();

    pub static ref DECL_PROFIT: Regex = Regex::new(&format!(
        r"(?i)utile(?:[ \t]+(?:d['’]esercizio|netto))?[ \t:]*({AMOUNT})"
    )).unwrap();

    pub static ref DECL_LOSS: Regex = Regex::new(&format!(
        r"(?i)perdita(?:[ \t]+(?:d['’]esercizio|netta))?[ \t:]*({AMOUNT})"
    )).unwrap();
}

/// Line templates in application order.
pub fn line_templates() -> [&'static Regex; 4] {
    [
        &DOTTED_CODE_LINE,
        &STATUTORY_CODE_LINE,
        &BARE_CODE_LINE,
        &PAREN_CODE_LINE,
    ]
}

/// Lowercased tokens that open a candidate table region.
pub const SECTION_KEYWORDS: &[&str] = &[
    "attivo",
    "passivo",
    "patrimonio",
    "immobilizzazioni",
    "circolante",
    "rimanenze",
    "crediti",
    "debiti",
    "disponibilità",
    "disponibilita",
    "cassa",
    "banca",
    "fondi",
    "ratei",
    "risconti",
    "capitale",
    "assets",
    "liabilities",
    "equity",
    "receivables",
    "payables",
    "cash",
];

/// Lowercased pagination/continuation tokens; any match discards the record.
pub const NOISE_TOKENS: &[&str] = &[
    "pag.",
    "pagina",
    "segue",
    "riporto",
    "a riportare",
    "continua",
    "carried forward",
    "continued",
];
