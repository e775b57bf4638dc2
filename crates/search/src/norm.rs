use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Accent-insensitive lowercase form used on both the search term and the
/// searched text: NFD decomposition, combining marks dropped, lowercased.
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::fold;

    #[test]
    fn strips_accents_and_case() {
        assert_eq!(fold("Conciliação Bancária"), "conciliacao bancaria");
        assert_eq!(fold("ÀÉÎÕÜ ç"), "aeiou c");
    }

    #[test]
    fn folded_term_matches_folded_text() {
        assert!(fold("Relatório de Vendas").contains(&fold("RELATORIO")));
    }
}
