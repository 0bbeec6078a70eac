//! Conversion tool selection

use std::fmt;
use std::str::FromStr;

/// Conversion direction, or `Format` for auto-detect and normalize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolId {
    JsonCsv,
    CsvJson,
    YamlJson,
    JsonYaml,
    Format,
}

impl ToolId {
    pub const ALL: [ToolId; 5] = [
        ToolId::JsonCsv,
        ToolId::CsvJson,
        ToolId::YamlJson,
        ToolId::JsonYaml,
        ToolId::Format,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolId::JsonCsv => "json-csv",
            ToolId::CsvJson => "csv-json",
            ToolId::YamlJson => "yaml-json",
            ToolId::JsonYaml => "json-yaml",
            ToolId::Format => "format",
        }
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == needle)
            .ok_or_else(|| {
                format!(
                    "Invalid tool '{}'. Use 'json-csv', 'csv-json', 'yaml-json', 'json-yaml', or 'format'",
                    s
                )
            })
    }
}
