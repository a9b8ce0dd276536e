//! Input files
//!
//! - Codes: one feedback row per line, each a comma-separated codeword list
//!   (blank lines ignored).
//! - Themes: either JSON (`[{"name": "...", "seeds": ["..."]}]`) or one
//!   `Name: seed, seed` line per theme, `#` starting a comment line.

use std::path::Path;

use anyhow::{Context, Result, bail};
use thematic_core::{ThemeSet, ThemeSpec, collect_codes, normalize_text, unique_codes};

/// Read and normalize codes from `path`
pub fn load_codes(path: &Path, unique: bool) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading codes from {}", path.display()))?;
    let codes = collect_codes(raw.lines());
    Ok(if unique { unique_codes(&codes) } else { codes })
}

/// Read and validate theme definitions from `path`
pub fn load_themes(path: &Path) -> Result<ThemeSet> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading themes from {}", path.display()))?;
    parse_themes(&raw).with_context(|| format!("parsing themes in {}", path.display()))
}

/// Parse either theme format. Seeds are lowercased like codes in both.
pub fn parse_themes(raw: &str) -> Result<ThemeSet> {
    if raw.trim_start().starts_with('[') {
        let declared: ThemeSet = serde_json::from_str(raw)?;
        let themes = declared
            .iter()
            .map(|t| ThemeSpec::new(t.name(), t.seeds().iter().map(|s| normalize_text(s))))
            .collect::<thematic_core::Result<Vec<_>>>()?;
        return Ok(ThemeSet::new(themes)?);
    }

    let mut themes = Vec::new();
    for (number, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((name, seeds)) = line.split_once(':') else {
            bail!("line {}: expected `Theme: seed, seed`", number + 1);
        };
        themes.push(
            ThemeSpec::from_seed_list(name, seeds)
                .with_context(|| format!("line {}", number + 1))?,
        );
    }
    Ok(ThemeSet::new(themes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_text_themes() {
        let themes = parse_themes(
            "# course feedback\nWorkload: heavy workload, Deadlines\n\nSupport: ta help\n",
        )
        .unwrap();
        assert_eq!(themes.names(), vec!["Workload", "Support"]);
        let workload = themes.iter().next().unwrap();
        assert_eq!(workload.seeds(), &["heavy workload".to_string(), "deadlines".to_string()]);
    }

    #[test]
    fn test_parse_json_themes() {
        let themes =
            parse_themes(r#"[{"name": "Positive", "seeds": ["great", "love"]}]"#).unwrap();
        assert_eq!(themes.len(), 1);
    }

    #[test]
    fn test_both_formats_normalize_seeds_alike() {
        let json = parse_themes(
            r#"[{"name": "Workload", "seeds": [" Heavy Workload", "DEADLINES "]}]"#,
        )
        .unwrap();
        let text = parse_themes("Workload: Heavy Workload, DEADLINES").unwrap();

        assert_eq!(json, text);
        let workload = json.iter().next().unwrap();
        assert_eq!(workload.seeds(), &["heavy workload".to_string(), "deadlines".to_string()]);
    }

    #[test]
    fn test_parse_rejects_bad_lines() {
        assert!(parse_themes("no colon here").is_err());
        assert!(parse_themes("Empty: ,  ,").is_err());
        assert!(parse_themes("# only comments\n").is_err());
    }

    #[test]
    fn test_load_codes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Unclear Instructions, TA unavailability").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "unclear instructions").unwrap();

        let all = load_codes(file.path(), false).unwrap();
        assert_eq!(all, vec!["unclear instructions", "ta unavailability", "unclear instructions"]);

        let unique = load_codes(file.path(), true).unwrap();
        assert_eq!(unique, vec!["unclear instructions", "ta unavailability"]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_themes(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(err.to_string().contains("reading themes"));
    }
}
