//! Static registry of procedures under mandatory national ISC surveillance.
//!
//! Matching is exact-first with a substring fallback, over canonical names
//! and aliases. The table is fixed at compile time and never mutated.

/// A procedure subject to mandatory post-operative infection surveillance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcedureEntry {
    /// Standardized clinical name (lowercase, pt-BR)
    pub canonical: &'static str,
    /// Surveillance period in days post-operation
    pub surveillance_days: u32,
    /// Alternate names, abbreviations, and unaccented spellings
    pub aliases: &'static [&'static str],
    /// Suggested wound class, when one applies to the whole procedure
    pub wound_class: Option<&'static str>,
}

/// Surveillance period applied when a procedure is not in the registry
pub const DEFAULT_SURVEILLANCE_DAYS: u32 = 30;

/// Wound class suggestion when no registry hint applies
pub const DEFAULT_WOUND_CLASS: &str = "Confirmar com ato operatório (pode variar: \
    Limpa / Potencialmente contaminada / Contaminada / Infectada)";

/// Procedures with nationally mandated surveillance. Order matters: within
/// each match step, the first entry satisfying the condition wins.
pub const PROCEDURES: &[ProcedureEntry] = &[
    ProcedureEntry {
        canonical: "cesariana",
        surveillance_days: 30,
        aliases: &["cesárea", "parto cesáreo", "cesariana"],
        wound_class: Some("Potencialmente contaminada"),
    },
    ProcedureEntry {
        canonical: "prótese de mama",
        surveillance_days: 90,
        aliases: &["protese de mama", "implante mamário", "mamoplastia com prótese"],
        wound_class: Some("Limpa (com implante)"),
    },
    ProcedureEntry {
        canonical: "artroplastia de quadril",
        surveillance_days: 90,
        aliases: &["atq", "prótese de quadril", "artroplastia quadril"],
        wound_class: Some("Limpa (com implante)"),
    },
    ProcedureEntry {
        canonical: "artroplastia de joelho",
        surveillance_days: 90,
        aliases: &["atj", "prótese de joelho", "artroplastia joelho"],
        wound_class: Some("Limpa (com implante)"),
    },
    ProcedureEntry {
        canonical: "revascularização do miocárdio",
        surveillance_days: 90,
        aliases: &["crm", "cabg", "revascularizacao miocardio"],
        wound_class: Some("Potencialmente contaminada"),
    },
    ProcedureEntry {
        canonical: "derivação interna neurológica",
        surveillance_days: 90,
        aliases: &["dvp", "derivacao ventriculoperitoneal", "derivacao interna neurologica"],
        wound_class: Some("Limpa (com implante)"),
    },
    ProcedureEntry {
        canonical: "facectomia",
        surveillance_days: 90,
        aliases: &["catarata", "cirurgia de catarata", "facectomia"],
        wound_class: Some("Limpa"),
    },
];

/// Look up a normalized (trimmed, lowercase) term in the registry.
///
/// Steps, first match wins, no scoring:
/// 1. term equals a canonical name
/// 2. term equals an alias (case-insensitive)
/// 3. a canonical name is a substring of the term
/// 4. an alias is a substring of the term
///
/// No match is a valid outcome, not an error.
pub fn match_procedure(normalized: &str) -> Option<&'static ProcedureEntry> {
    if let Some(entry) = PROCEDURES.iter().find(|e| e.canonical == normalized) {
        return Some(entry);
    }

    if let Some(entry) = PROCEDURES
        .iter()
        .find(|e| e.aliases.iter().any(|a| a.to_lowercase() == normalized))
    {
        return Some(entry);
    }

    if let Some(entry) = PROCEDURES.iter().find(|e| normalized.contains(e.canonical)) {
        return Some(entry);
    }

    PROCEDURES
        .iter()
        .find(|e| e.aliases.iter().any(|a| normalized.contains(&a.to_lowercase())))
}

/// Wound class for an entry, falling back to the global default
pub fn wound_class_for(entry: &ProcedureEntry) -> &'static str {
    entry.wound_class.unwrap_or(DEFAULT_WOUND_CLASS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_canonical_match() {
        let entry = match_procedure("cesariana").unwrap();
        assert_eq!(entry.canonical, "cesariana");
        assert_eq!(entry.surveillance_days, 30);
    }

    #[test]
    fn test_exact_alias_match() {
        let entry = match_procedure("atq").unwrap();
        assert_eq!(entry.canonical, "artroplastia de quadril");
        assert_eq!(entry.surveillance_days, 90);

        let entry = match_procedure("catarata").unwrap();
        assert_eq!(entry.canonical, "facectomia");
    }

    #[test]
    fn test_canonical_substring_match() {
        let entry = match_procedure("cirurgia de cesariana de urgência").unwrap();
        assert_eq!(entry.canonical, "cesariana");
    }

    #[test]
    fn test_alias_substring_match() {
        let entry = match_procedure("paciente submetido a crm eletiva").unwrap();
        assert_eq!(entry.canonical, "revascularização do miocárdio");
    }

    #[test]
    fn test_no_match() {
        assert!(match_procedure("apendicectomia").is_none());
        assert!(match_procedure("").is_none());
    }

    #[test]
    fn test_exact_wins_over_substring() {
        // "facectomia" is both a canonical name and an alias of itself;
        // exact canonical (step 1) must win before any substring pass.
        let entry = match_procedure("facectomia").unwrap();
        assert_eq!(entry.canonical, "facectomia");
    }

    #[test]
    fn test_first_entry_wins_within_step() {
        // A term containing two canonical names resolves to the earlier
        // table entry.
        let entry = match_procedure("cesariana e facectomia no mesmo ato").unwrap();
        assert_eq!(entry.canonical, "cesariana");
    }

    #[test]
    fn test_wound_class_hint_or_default() {
        let entry = match_procedure("facectomia").unwrap();
        assert_eq!(wound_class_for(entry), "Limpa");

        let no_hint = ProcedureEntry {
            canonical: "procedimento de teste",
            surveillance_days: 30,
            aliases: &[],
            wound_class: None,
        };
        assert_eq!(wound_class_for(&no_hint), DEFAULT_WOUND_CLASS);
    }

    #[test]
    fn test_every_entry_has_wound_class_or_default_applies() {
        for entry in PROCEDURES {
            assert!(!wound_class_for(entry).is_empty());
        }
    }
}
