//! Built-in CEE category mapping.

/// Default mapping shipped with the library, in the exchange format
/// accepted by [`super::Taxonomy::from_json`]. Replaceable at runtime
/// with a user-supplied document of the same shape.
pub const DEFAULT_TAXONOMY_JSON: &str = r#"{
  "attivo": {
    "immobilizzazioni": {
      "immateriali": {
        "pattern": "1[-_]7[-_]\\d+",
        "voci": ["software", "licenze", "brevetti", "avviamento"]
      },
      "materiali": {
        "terreni_fabbricati": {
          "pattern": "1[-_]6[-_](10|11)",
          "voci": ["fabbricato", "terreno"]
        },
        "impianti": {
          "pattern": "1[-_]6[-_](1|2|13)",
          "voci": ["impianti", "macchinari", "centrale"]
        },
        "attrezzature": {
          "pattern": "1[-_]6[-_]3",
          "voci": ["attrezzatura", "attrezzature"]
        },
        "altri": {
          "pattern": "1[-_]6[-_](4|5|6)",
          "voci": ["automezzi", "macchine", "mobili"]
        }
      },
      "finanziarie": {
        "pattern": "1[-_]16[-_]\\d+",
        "voci": ["titoli", "partecipazioni"]
      }
    },
    "circolante": {
      "rimanenze": {
        "pattern": "1[-_]10[-_]\\d+",
        "voci": ["magazzino", "rimanenze", "prodotti"]
      },
      "crediti": {
        "clienti": {
          "pattern": "1[-_](3|4)[-_]\\d+",
          "voci": ["clienti", "effetti"]
        },
        "altri": {
          "pattern": "1[-_](5|13)[-_]\\d+",
          "voci": ["crediti", "anticipi", "depositi"]
        }
      },
      "disponibilita": {
        "pattern": "1[-_](1|2)[-_]?\\d*",
        "voci": ["cassa", "banca", "banche", "depositi"]
      }
    },
    "ratei_risconti": {
      "pattern": "1[-_]8[-_]\\d+",
      "voci": ["ratei", "risconti"]
    }
  },
  "passivo": {
    "patrimonio": {
      "pattern": "2[-_]13[-_]\\d+",
      "voci": ["capitale", "riserva", "utili"]
    },
    "fondi": {
      "pattern": "2[-_](8|12)[-_]\\d*",
      "voci": ["tfr", "fondi", "accantonamenti"]
    },
    "fondi_ammortamento": {
      "pattern": "2[-_]9[-_]\\d+",
      "voci": ["ammortamento", "amm.", "f.amm"]
    },
    "debiti": {
      "pattern": "2[-_](2|3|4|6)[-_]?\\d*",
      "voci": ["debiti", "fornitori", "banche", "finanziamenti"]
    },
    "ratei_risconti": {
      "pattern": "2[-_]7[-_]\\d+",
      "voci": ["ratei", "risconti"]
    }
  }
}"#;
