//! Session export
//!
//! Serializes a [`SessionRecord`] for storage or external analysis. RON is
//! always available; JSON requires the `serde_json` feature.

use crate::recorder::SessionRecord;
use crate::{Error, Result};
use std::io::Write;

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// RON format (Rust Object Notation)
    Ron,
    /// JSON format (requires the serde_json feature)
    Json,
}

/// Exporter for recorded sessions
pub struct Exporter<'a> {
    record: &'a SessionRecord,
}

impl<'a> Exporter<'a> {
    /// Create a new exporter
    pub fn new(record: &'a SessionRecord) -> Self {
        Self { record }
    }

    /// Export to a string in the specified format
    pub fn export(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Ron => self.to_ron(),
            ExportFormat::Json => self.to_json(),
        }
    }

    /// Export to a writer
    pub fn export_to<W: Write>(&self, writer: &mut W, format: ExportFormat) -> Result<()> {
        let content = self.export(format)?;
        writer
            .write_all(content.as_bytes())
            .map_err(|e| Error::Export(e.to_string()))?;
        Ok(())
    }

    /// Export to RON
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self.record, ron::ser::PrettyConfig::default())
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Export to JSON
    #[cfg(feature = "serde_json")]
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self.record).map_err(|e| Error::Serialization(e.to_string()))
    }

    #[cfg(not(feature = "serde_json"))]
    pub fn to_json(&self) -> Result<String> {
        Err(Error::Export(
            "JSON export requires the 'serde_json' feature".to_string(),
        ))
    }
}

/// Parse a session back from RON
pub fn from_ron(content: &str) -> Result<SessionRecord> {
    ron::from_str(content).map_err(|e| Error::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::Recorder;
    use skirmish_core::EntityId;
    use skirmish_sim::ScenarioDef;

    fn small_record() -> SessionRecord {
        let mut recorder = Recorder::new(ScenarioDef::default());
        recorder.interrupt(EntityId::new(0));
        recorder.end_tick(16);
        recorder.end_tick(16);
        recorder.finish()
    }

    #[test]
    fn test_ron_round_trip() {
        let record = small_record();
        let exported = Exporter::new(&record).to_ron().expect("export");
        let parsed = from_ron(&exported).expect("parse");

        assert_eq!(parsed.tick_count(), record.tick_count());
        assert_eq!(parsed.ticks, record.ticks);
    }

    #[test]
    #[cfg(not(feature = "serde_json"))]
    fn test_json_without_feature_is_an_error() {
        let record = small_record();
        assert!(Exporter::new(&record).to_json().is_err());
    }
}
