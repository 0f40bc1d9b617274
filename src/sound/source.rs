//! Sound sources and the per-phase asset table.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::SoundError;
use crate::types::Phase;

/// Asset played when a work phase expires.
pub const WORK_ASSET: &str = "chill-chords-143504.mp3";
/// Asset played when a relax phase expires.
pub const RELAX_ASSET: &str = "trance-loop.mp3";

/// Supported audio file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "mp3", "flac", "ogg"];

/// Pitch of the tone played when a file cannot be used.
pub const FALLBACK_TONE_HZ: u32 = 660;

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// An audio file on disk.
    File {
        /// Display name (file stem).
        name: String,
        /// Full path to the file.
        path: PathBuf,
    },
    /// A short synthesized sine tone.
    Tone {
        /// Display name.
        name: String,
        /// Pitch in hertz.
        frequency_hz: u32,
    },
}

impl SoundSource {
    /// Creates a file source named after the file stem.
    ///
    /// The path is not checked; use `file_validated` for that.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::File { name, path }
    }

    /// Creates a file source after checking the extension is supported.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::UnsupportedFormat` for unknown extensions.
    pub fn file_validated(path: impl Into<PathBuf>) -> Result<Self, SoundError> {
        let path = path.into();
        if !has_supported_extension(&path) {
            return Err(SoundError::UnsupportedFormat(path.display().to_string()));
        }
        Ok(Self::file(path))
    }

    /// Creates a tone source.
    #[must_use]
    pub fn tone(name: impl Into<String>, frequency_hz: u32) -> Self {
        Self::Tone {
            name: name.into(),
            frequency_hz,
        }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Tone { name, .. } => name,
        }
    }

    /// Returns true if this is a file source.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Returns the file path if this is a file source.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Tone { .. } => None,
        }
    }
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Maps each phase to the sound played when it expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundAssets {
    /// Played when a work phase expires
    pub work: SoundSource,
    /// Played when a relax phase expires
    pub relax: SoundSource,
}

impl SoundAssets {
    /// Uses the bundled asset names inside `dir`.
    ///
    /// Missing files are not an error here; playback falls back to a tone.
    #[must_use]
    pub fn from_dir(dir: &Path) -> Self {
        let assets = Self {
            work: SoundSource::file(dir.join(WORK_ASSET)),
            relax: SoundSource::file(dir.join(RELAX_ASSET)),
        };
        debug!(?assets, "resolved sound assets");
        assets
    }

    /// Replaces the asset for one phase with a user-supplied file.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::UnsupportedFormat` for unknown extensions.
    pub fn with_override(mut self, phase: Phase, path: &Path) -> Result<Self, SoundError> {
        let source = SoundSource::file_validated(path)?;
        match phase {
            Phase::Work => self.work = source,
            Phase::Relax => self.relax = source,
        }
        Ok(self)
    }

    /// Returns the sound for a phase.
    #[must_use]
    pub fn for_phase(&self, phase: Phase) -> &SoundSource {
        match phase {
            Phase::Work => &self.work,
            Phase::Relax => &self.relax,
        }
    }

    /// Paths of the assets that do not exist on disk.
    #[must_use]
    pub fn missing(&self) -> Vec<&Path> {
        [&self.work, &self.relax]
            .into_iter()
            .filter_map(SoundSource::path)
            .filter(|p| !p.exists())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_source_name_is_stem() {
        let source = SoundSource::file("/sounds/bell.wav");
        assert!(source.is_file());
        assert_eq!(source.name(), "bell");
        assert_eq!(source.path(), Some(Path::new("/sounds/bell.wav")));
    }

    #[test]
    fn test_tone_source() {
        let source = SoundSource::tone("beep", 880);
        assert!(!source.is_file());
        assert_eq!(source.name(), "beep");
        assert!(source.path().is_none());
    }

    #[test]
    fn test_file_validated_extensions() {
        assert!(SoundSource::file_validated("a.MP3").is_ok());
        assert!(SoundSource::file_validated("a.wav").is_ok());
        assert!(matches!(
            SoundSource::file_validated("a.txt"),
            Err(SoundError::UnsupportedFormat(_))
        ));
        assert!(SoundSource::file_validated("noext").is_err());
    }

    #[test]
    fn test_assets_from_dir() {
        let assets = SoundAssets::from_dir(Path::new("assets"));
        assert_eq!(
            assets.for_phase(Phase::Work).path(),
            Some(Path::new("assets/chill-chords-143504.mp3"))
        );
        assert_eq!(
            assets.for_phase(Phase::Relax).path(),
            Some(Path::new("assets/trance-loop.mp3"))
        );
    }

    #[test]
    fn test_with_override() {
        let assets = SoundAssets::from_dir(Path::new("assets"))
            .with_override(Phase::Relax, Path::new("/tmp/gong.ogg"))
            .unwrap();
        assert_eq!(assets.for_phase(Phase::Relax).name(), "gong");
        assert_eq!(assets.for_phase(Phase::Work).name(), "chill-chords-143504");

        let result = SoundAssets::from_dir(Path::new("assets"))
            .with_override(Phase::Work, Path::new("/tmp/gong.doc"));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_assets() {
        let assets = SoundAssets::from_dir(Path::new("/nonexistent/pomotimer"));
        assert_eq!(assets.missing().len(), 2);
    }
}
