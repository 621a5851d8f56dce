//! Column-level text cleanup applied to every string field at load time.

/// Mojibake sequences left by a double-decoded Latin-1 export, transliterated.
const TRANSLITERATIONS: &[(&str, &str)] = &[
    ("Ã¼", "ue"),
    ("Ã¶", "oe"),
    ("Ã¤", "ae"),
    ("Ã©", "e"),
];

/// Whole-cell corrections for values whose accented characters were lost.
const CORRECTIONS: &[(&str, &str)] = &[
    ("C\u{FFFD}te d'Ivoire", "Côte d'Ivoire"),
    (
        "Maracan\u{FFFD} - Est\u{FFFD}dio Jornalista M\u{FFFD}rio Filho",
        "Maracanã - Estádio Jornalista Mário Filho",
    ),
    (
        "Est\u{FFFD}dio Jornalista M\u{FFFD}rio Filho",
        "Estádio Jornalista Mário Filho",
    ),
    ("Maracan\u{FFFD}", "Maracanã"),
    ("Stade V\u{FFFD}lodrome", "Stade Vélodrome"),
    ("Nou Camp - Estadio Le\u{FFFD}n", "Nou Camp - Estadio León"),
    (
        "Estadio Jos\u{FFFD} Mar\u{FFFD}a Minella",
        "Estadio José María Minella",
    ),
    (
        "Estadio Ol\u{FFFD}mpico Chateau Carreras",
        "Estadio Olímpico Chateau Carreras",
    ),
    (
        "Estadio Municipal de Bala\u{FFFD}dos",
        "Estadio Municipal de Balaídos",
    ),
    (
        "Estadio Ol\u{FFFD}mpico Universitario",
        "Estadio Olímpico Universitario",
    ),
    ("Malm\u{FFFD}", "Malmö"),
    ("Malmo", "Malmö"),
    ("Norrk\u{FFFD}Ping", "Norrköping"),
    ("D\u{FFFD}Sseldorf", "Düsseldorf"),
    ("La Coru\u{FFFD}A", "A Coruña"),
];

/// Clean one cell: strip the `rn">` scrape artifact, trim, transliterate,
/// then apply whole-cell corrections.
pub fn clean_text(raw: &str) -> String {
    let mut s = raw.replace("rn\">", "").trim().to_string();

    for (bad, good) in TRANSLITERATIONS {
        if s.contains(bad) {
            s = s.replace(bad, good);
        }
    }

    match CORRECTIONS.iter().find(|(bad, _)| *bad == s) {
        Some((_, good)) => good.to_string(),
        None => s,
    }
}

/// Clean an optional cell, mapping blank values to `None`.
pub fn clean_opt(raw: Option<&str>) -> Option<String> {
    raw.map(clean_text).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_artifact_and_whitespace() {
        assert_eq!(clean_text("rn\">United Arab Emirates "), "United Arab Emirates");
        assert_eq!(clean_text("  Italy"), "Italy");
    }

    #[test]
    fn test_transliterates_umlauts() {
        assert_eq!(clean_text("MÃ¼LLER"), "MueLLER");
        assert_eq!(clean_text("GÃ¶tze"), "Goetze");
    }

    #[test]
    fn test_whole_cell_corrections() {
        assert_eq!(clean_text("Malmo"), "Malmö");
        assert_eq!(clean_text("C\u{FFFD}te d'Ivoire"), "Côte d'Ivoire");
        // Only whole-cell matches are corrected
        assert_eq!(clean_text("Malmo FF"), "Malmo FF");
    }

    #[test]
    fn test_clean_opt_blank() {
        assert_eq!(clean_opt(Some("   ")), None);
        assert_eq!(clean_opt(None), None);
        assert_eq!(clean_opt(Some(" Rome ")), Some("Rome".to_string()));
    }
}
