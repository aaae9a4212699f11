#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveType {
    TarXz,
    Zip,
}

impl ArchiveType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TarXz => "tar.xz",
            Self::Zip => "zip",
        }
    }

    pub fn file_suffix(self) -> &'static str {
        match self {
            Self::TarXz => ".tar.xz",
            Self::Zip => ".zip",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "tar.xz" | "txz" => Some(Self::TarXz),
            "zip" => Some(Self::Zip),
            _ => None,
        }
    }

    /// Archive type named by the last path segment of `url`, ignoring any
    /// query or fragment.
    pub fn infer_from_url(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let file_name = path.rsplit('/').next().unwrap_or(path);
        Self::split_file_name(file_name).map(|(_, archive_type)| archive_type)
    }

    /// Splits `zig-linux-x86_64-0.10.1.tar.xz` into its stem and archive type.
    pub fn split_file_name(file_name: &str) -> Option<(&str, Self)> {
        let (head, extension) = file_name.rsplit_once('.')?;
        let (stem, extension) = match head.strip_suffix(".tar") {
            Some(stem) => (stem, &file_name[stem.len() + 1..]),
            None => (head, extension),
        };
        if stem.is_empty() {
            return None;
        }
        Self::parse(extension).map(|archive_type| (stem, archive_type))
    }
}
