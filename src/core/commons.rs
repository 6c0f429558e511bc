// src/core/commons.rs

use crate::constants::PARAM_BRACKET_CHARS;

/// Drops a trailing extension (`run.sh` -> `run`, `[name].sh` -> `[name]`).
/// A leading dot is not an extension, so `.clide` is returned unchanged.
pub fn strip_extension(entry_name: &str) -> &str {
    match entry_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => entry_name,
    }
}

/// Derives the display name and shortcut of an entry or path segment.
///
/// The name is the entry without its extension and bracket characters,
/// lower-cased. The shortcut is every uppercase character of the original
/// text, lower-cased (`DeployProd.sh` -> `dp`).
pub fn name_and_shortcut(original: &str) -> (String, String) {
    let name = strip_extension(original)
        .trim_matches(PARAM_BRACKET_CHARS)
        .to_lowercase();

    let shortcut = original
        .chars()
        .filter(|c| c.is_uppercase())
        .flat_map(char::to_lowercase)
        .collect();

    (name, shortcut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("run.sh"), "run");
        assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
        assert_eq!(strip_extension("[name].sh"), "[name]");
        assert_eq!(strip_extension(".clide"), ".clide");
        assert_eq!(strip_extension("deploy"), "deploy");
    }

    #[test]
    fn test_name_and_shortcut() {
        assert_eq!(
            name_and_shortcut("Deploy"),
            ("deploy".to_string(), "d".to_string())
        );
        assert_eq!(
            name_and_shortcut("{AwsRegion}"),
            ("awsregion".to_string(), "ar".to_string())
        );
        assert_eq!(
            name_and_shortcut("run.sh"),
            ("run".to_string(), String::new())
        );
        assert_eq!(
            name_and_shortcut("[Tag].sh"),
            ("tag".to_string(), "t".to_string())
        );
    }
}
