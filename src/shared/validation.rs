use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Characters that may not appear in a stored object name.
    /// Everything outside `[a-zA-Z0-9._-]` is replaced with an underscore.
    static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^a-zA-Z0-9._-]").unwrap();

    /// Runs of two or more underscores, collapsed after replacement.
    static ref REPEATED_UNDERSCORES: Regex = Regex::new(r"__+").unwrap();
}

/// Normalize a filename for use as a storage path segment.
///
/// Replaces every character outside `[a-zA-Z0-9._-]` with an underscore,
/// lowercases the result and collapses repeated underscores. Accented and
/// other multi-byte characters each collapse to a single underscore.
pub fn normalize_file_name(file_name: &str) -> String {
    let replaced = UNSAFE_FILENAME_CHARS.replace_all(file_name, "_");
    let lowered = replaced.to_lowercase();
    REPEATED_UNDERSCORES.replace_all(&lowered, "_").into_owned()
}

/// Password policy: 8-20 characters with at least one lowercase letter,
/// one uppercase letter, one digit and one non-alphanumeric character.
pub fn is_valid_password(password: &str) -> bool {
    let len = password.chars().count();
    if !(8..=20).contains(&len) {
        return false;
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| !c.is_alphanumeric());

    has_lower && has_upper && has_digit && has_special
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_replaces_unsafe_chars() {
        assert_eq!(normalize_file_name("my report.pdf"), "my_report.pdf");
        assert_eq!(normalize_file_name("a&b#c.txt"), "a_b_c.txt");
        assert_eq!(normalize_file_name("photo (1).png"), "photo_1_.png");
    }

    #[test]
    fn test_normalize_lowercases_and_collapses() {
        assert_eq!(normalize_file_name("REPORT__FINAL.PDF"), "report_final.pdf");
        // Accented characters collapse to a single underscore each,
        // runs are merged afterwards.
        assert_eq!(
            normalize_file_name("Résumé Final.docx"),
            "r_sum_final.docx"
        );
    }

    #[test]
    fn test_normalize_keeps_safe_chars() {
        assert_eq!(normalize_file_name("ok-name_1.2.tar.gz"), "ok-name_1.2.tar.gz");
    }

    #[test]
    fn test_password_valid() {
        assert!(is_valid_password("Abcdef1!"));
        assert!(is_valid_password("Str0ng-Passw0rd!"));
    }

    #[test]
    fn test_password_invalid() {
        assert!(!is_valid_password("short1!")); // too short
        assert!(!is_valid_password("toolongtoolongtoolong1!A")); // too long
        assert!(!is_valid_password("alllower1!")); // no uppercase
        assert!(!is_valid_password("ALLUPPER1!")); // no lowercase
        assert!(!is_valid_password("NoDigits!!")); // no digit
        assert!(!is_valid_password("NoSpecial11")); // no special
    }
}
