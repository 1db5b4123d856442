//! Common CLI types shared across commands

use clap::ValueEnum;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - human-optimized rich formatting
    #[default]
    Pretty,
    /// Table format - one row per turn
    Table,
    /// JSON format - structured for scripts
    Json,
}

impl OutputFormat {
    /// Resolve the effective format: explicit flag, then the config
    /// preference, then pretty.
    pub fn resolve(flag: Option<OutputFormat>, preference: Option<&str>) -> OutputFormat {
        flag.or_else(|| preference.and_then(|p| OutputFormat::from_str(p, true).ok()))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_precedence() {
        assert_eq!(
            OutputFormat::resolve(Some(OutputFormat::Table), Some("json")),
            OutputFormat::Table
        );
        assert_eq!(OutputFormat::resolve(None, Some("JSON")), OutputFormat::Json);
        assert_eq!(OutputFormat::resolve(None, Some("bogus")), OutputFormat::Pretty);
        assert_eq!(OutputFormat::resolve(None, None), OutputFormat::Pretty);
    }
}
