use crate::artifacts::core::error::{HistoryError, Result};

#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd, Hash)]
pub enum FileMode {
    #[default]
    Regular,
    Executable,
}

/// Mode of a tree entry, as written in tree records
#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd, Hash)]
pub enum EntryMode {
    File(FileMode),
    #[default]
    Directory,
    Symlink,
    Submodule,
}

impl EntryMode {
    pub fn as_str(&self) -> &str {
        match self {
            EntryMode::File(FileMode::Regular) => "100644",
            EntryMode::File(FileMode::Executable) => "100755",
            EntryMode::Directory => "40000",
            EntryMode::Symlink => "120000",
            EntryMode::Submodule => "160000",
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, EntryMode::Directory)
    }

    /// Parse the octal mode of a tree record entry
    pub fn from_octal_str(mode: &str) -> Result<Self> {
        match mode {
            "100644" | "100664" | "100666" | "100640" => Ok(EntryMode::File(FileMode::Regular)),
            "100755" => Ok(EntryMode::File(FileMode::Executable)),
            "40000" | "040000" => Ok(EntryMode::Directory),
            "120000" => Ok(EntryMode::Symlink),
            "160000" => Ok(EntryMode::Submodule),
            _ => Err(HistoryError::parse(
                "tree entry mode",
                format!("unknown mode '{}'", mode),
            )),
        }
    }
}

impl From<FileMode> for EntryMode {
    fn from(mode: FileMode) -> Self {
        EntryMode::File(mode)
    }
}
