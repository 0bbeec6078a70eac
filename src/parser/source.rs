//! Where caller text comes from

use std::io::Read;
use std::path::PathBuf;

/// Source of input text for a command
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// Literal text given on the command line
    Text(String),
    /// File path
    File(PathBuf),
    /// Standard input stream
    Stdin,
}

impl InputSource {
    /// Resolve a command-line argument: an existing file is read, anything
    /// else is taken as literal text
    pub fn from_arg(arg: Option<&str>, stdin: bool) -> Option<Self> {
        if stdin {
            return Some(Self::Stdin);
        }
        let arg = arg?;
        let path = PathBuf::from(arg);
        if path.is_file() {
            Some(Self::File(path))
        } else {
            Some(Self::Text(arg.to_string()))
        }
    }

    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            InputSource::Text(_) => "text argument".to_string(),
            InputSource::File(path) => format!("file: {}", path.display()),
            InputSource::Stdin => "standard input".to_string(),
        }
    }

    /// Read the whole source into memory
    pub fn read_content(&self) -> Result<String, std::io::Error> {
        match self {
            InputSource::Text(content) => Ok(content.clone()),
            InputSource::File(path) => std::fs::read_to_string(path),
            InputSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                Ok(buffer)
            }
        }
    }
}
