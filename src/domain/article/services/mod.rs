// src/domain/article/services/mod.rs
use crate::ports::SlugGenerator;

const SUFFIX_HASH_CHARS: usize = 8;
const FALLBACK_HASH_CHARS: usize = 12;

/// Derives a URL-safe slug from `input` after trimming it.
///
/// The readable part comes from the slug generator and is followed by a short
/// blake3 digest of the trimmed input, so titles that differ only in case,
/// punctuation or diacritics still get distinct slugs. Inputs that slugify to
/// nothing fall back to `<prefix>-<hash>`. The result is a pure function of
/// the trimmed input.
pub fn derive_slug(generator: &dyn SlugGenerator, prefix: &str, input: &str) -> String {
    let trimmed = input.trim();
    let digest = blake3::hash(trimmed.as_bytes()).to_hex();
    let base = generator.slugify(trimmed);
    if base.is_empty() {
        return format!("{prefix}-{}", &digest.as_str()[..FALLBACK_HASH_CHARS]);
    }

    format!("{base}-{}", &digest.as_str()[..SUFFIX_HASH_CHARS])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::util::DefaultSlugGenerator;

    fn slug(input: &str) -> String {
        derive_slug(&DefaultSlugGenerator, "article", input)
    }

    #[test]
    fn slug_is_deterministic_in_trimmed_input() {
        let a = slug("Advanced Go Patterns");
        let b = slug("  Advanced Go Patterns\n");
        assert_eq!(a, b);
        assert!(a.starts_with("advanced-go-patterns-"));
        assert_eq!(a.len(), "advanced-go-patterns-".len() + SUFFIX_HASH_CHARS);
    }

    #[test]
    fn distinct_titles_produce_distinct_slugs() {
        assert_ne!(slug("CI/CD Best Practices"), slug("CI CD Best Practices"));
    }

    #[test]
    fn titles_differing_in_case_punctuation_or_accents_do_not_collide() {
        let plain = slug("Hello World");
        let punctuated = slug("hello, world!");
        let accented = slug("Héllo Wörld");
        assert!(plain.starts_with("hello-world-"));
        assert!(punctuated.starts_with("hello-world-"));
        assert!(accented.starts_with("hello-world-"));
        assert_ne!(plain, punctuated);
        assert_ne!(plain, accented);
        assert_ne!(punctuated, accented);
    }

    #[test]
    fn punctuation_only_input_falls_back_to_hash() {
        let a = slug("???");
        let b = slug("!!!");
        assert!(a.starts_with("article-"));
        assert_eq!(a.len(), "article-".len() + FALLBACK_HASH_CHARS);
        assert_ne!(a, b);
        assert_eq!(a, slug(" ??? "));
    }
}
