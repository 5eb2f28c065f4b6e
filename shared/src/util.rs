/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms)
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// URL slug for store and launch names.
///
/// Lower-cases, keeps ASCII alphanumerics, turns whitespace, `-` and `_` into
/// a single hyphen and drops everything else. No uniqueness is implied:
/// "Store #1" and "Store 1" share a slug.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c);
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_hyphen = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("MediaWorld Milano Certosa"), "mediaworld-milano-certosa");
        assert_eq!(slugify("iPhone 16 Pro (Black)"), "iphone-16-pro-black");
        assert_eq!(slugify("  Lancio   Autunno -- 2026 "), "lancio-autunno-2026");
        assert_eq!(slugify("snake_case_name"), "snake-case-name");
    }

    #[test]
    fn test_slugify_strips_punctuation_without_splitting() {
        assert_eq!(slugify("Unieuro's"), "unieuros");
        assert_eq!(slugify("A.B.C"), "abc");
    }

    #[test]
    fn test_slugify_degenerate_inputs() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        let names = [
            "Euronics Roma Est",
            "  Comet -- Bologna  ",
            "iPhone 16 Pro (Black)",
            "Città di Castello",
            "a__b--c  d",
            "",
        ];
        for name in names {
            let once = slugify(name);
            assert_eq!(slugify(&once), once, "slug not idempotent for {name:?}");
        }
    }

    #[test]
    fn test_snowflake_id_positive_and_distinct() {
        let a = snowflake_id();
        let b = snowflake_id();
        assert!(a > 0);
        assert!(b > 0);
        assert!(a < (1i64 << 53));
    }
}
