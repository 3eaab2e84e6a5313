use std::path::{Path, PathBuf};

/// Suffix of the firmware artifact produced by the build.
pub const DEFAULT_SUFFIX: &str = ".elf";

/// Where to look for the artifact when no directory is given explicitly.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum SearchMode {
    /// The `build` directory of the project, where the firmware build leaves
    /// its output.
    #[default]
    Build,

    /// The current working directory.
    CurrentDir,
}

impl SearchMode {
    pub fn dir(self) -> &'static Path {
        match self {
            Self::Build => Path::new("./build"),
            Self::CurrentDir => Path::new("."),
        }
    }
}

/// Everything needed for one symbolization run.
#[derive(Clone, Debug)]
pub struct Config {
    /// Validated addresses, in the order they were given.
    pub addresses: Vec<String>,

    /// Directory that must contain exactly one artifact.
    pub search_dir: PathBuf,

    pub artifact_suffix: String,

    /// Symbolizer executable. Chosen from the artifact when `None`.
    pub tool: Option<String>,
}

impl Config {
    pub fn new(addresses: Vec<String>) -> Self {
        Self {
            addresses,
            search_dir: SearchMode::default().dir().to_path_buf(),
            artifact_suffix: DEFAULT_SUFFIX.to_owned(),
            tool: None,
        }
    }

    pub fn search_mode(mut self, mode: SearchMode) -> Self {
        self.search_dir = mode.dir().to_path_buf();
        self
    }

    pub fn search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dir = dir.into();
        self
    }

    pub fn artifact_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.artifact_suffix = suffix.into();
        self
    }

    pub fn tool(mut self, tool: impl Into<Option<String>>) -> Self {
        self.tool = tool.into();
        self
    }
}
