use camino::Utf8PathBuf;

/// Resolved runtime view of one repository.
///
/// Built once per run by a repository loader and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct Repo {
    pub abs_path: Utf8PathBuf,
    pub manifest_path: Utf8PathBuf,
    pub go_mod: GoModFile,
}

/// Parsed `go.mod`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GoModFile {
    pub module: Option<ModuleDecl>,

    /// Value of the `go` directive, verbatim (e.g. `1.21` or `1.22.3`).
    pub go: Option<String>,

    pub toolchain: Option<String>,
    pub godebug: Vec<GoDebug>,

    /// Requirements in declaration order.
    pub requires: Vec<Require>,

    pub excludes: Vec<Exclude>,
    pub replaces: Vec<Replace>,
    pub retracts: Vec<Retract>,

    /// Executables declared with `tool` (Go 1.24+).
    pub tools: Vec<Tool>,

    /// Directories excluded from package patterns with `ignore` (Go 1.25+).
    pub ignores: Vec<Ignore>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleDecl {
    pub path: String,
    pub deprecated: Option<String>,
    pub line: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoDebug {
    pub key: String,
    pub value: String,
    pub line: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Require {
    pub path: String,
    pub version: String,
    /// Marked with a trailing `// indirect` comment.
    pub indirect: bool,
    pub line: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exclude {
    pub path: String,
    pub version: String,
    pub line: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replace {
    pub old_path: String,
    pub old_version: Option<String>,
    pub new_path: String,
    /// `None` when the replacement is a filesystem path.
    pub new_version: Option<String>,
    pub line: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Retract {
    pub low: String,
    pub high: String,
    pub rationale: Option<String>,
    pub line: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tool {
    pub path: String,
    pub line: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ignore {
    pub path: String,
    pub line: u32,
}

impl GoModFile {
    /// First requirement on `module`, if any.
    pub fn find_require(&self, module: &str) -> Option<&Require> {
        self.requires.iter().find(|r| r.path == module)
    }

    pub fn module_path(&self) -> Option<&str> {
        self.module.as_ref().map(|m| m.path.as_str())
    }
}

impl Repo {
    pub fn find_require(&self, module: &str) -> Option<&Require> {
        self.go_mod.find_require(module)
    }
}
