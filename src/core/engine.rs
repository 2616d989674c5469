use crate::core::extractor::extract;
use crate::core::ingest::{decode_to_text, FileKind, DEFAULT_MAX_PART_BYTES};
use crate::core::ranker::{rank, top};
use crate::core::{Candidate, RankedSplit, ScoringPolicy};
use crate::utils::error::Result;

/// File bytes in, ranked split out. Shared by the bot and the offline CLI.
#[derive(Debug, Clone, Copy)]
pub struct FancyEngine {
    policy: ScoringPolicy,
    max_part_bytes: u64,
}

impl FancyEngine {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self {
            policy,
            max_part_bytes: DEFAULT_MAX_PART_BYTES,
        }
    }

    /// Bounds how far a compressed upload may expand while decoding.
    pub fn with_max_part_bytes(mut self, max_part_bytes: u64) -> Self {
        self.max_part_bytes = max_part_bytes;
        self
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    pub fn ingest(&self, file_name: &str, data: &[u8]) -> Result<Vec<Candidate>> {
        let kind = FileKind::from_file_name(file_name);
        tracing::debug!("Decoding {} ({:?}, {} bytes)", file_name, kind, data.len());

        let text = decode_to_text(kind, file_name, data, self.max_part_bytes)?;
        let candidates = extract(&text);

        tracing::info!("Found {} candidate numbers in {}", candidates.len(), file_name);
        Ok(candidates)
    }

    pub fn select(&self, candidates: &[Candidate], count: usize) -> RankedSplit {
        let ranked = rank(candidates, self.policy);
        tracing::info!(
            "Ranked {} of {} candidates as fancy ({:?} scoring)",
            ranked.len(),
            candidates.len(),
            self.policy
        );

        let split = top(ranked, count);
        tracing::debug!(
            "Selected {}, remainder {}",
            split.selected.len(),
            split.remainder.len()
        );
        split
    }
}

impl Default for FancyEngine {
    fn default() -> Self {
        Self::new(ScoringPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FancyError;

    #[test]
    fn test_ingest_then_select() {
        let engine = FancyEngine::new(ScoringPolicy::Weighted);
        let data = b"+99999999, 12345678\n91827364 11122233 99999999";

        let candidates = engine.ingest("numbers.TXT", data).unwrap();
        assert_eq!(candidates.len(), 4);

        let split = engine.select(&candidates, 2);
        let selected: Vec<&str> = split
            .selected
            .iter()
            .map(|s| s.candidate.as_str())
            .collect();
        assert_eq!(selected, vec!["99999999", "12345678"]);
        assert_eq!(split.remainder.len(), 1);
        assert_eq!(split.remainder[0].candidate.as_str(), "11122233");
    }

    #[test]
    fn test_ingest_rejects_unsupported_file() {
        let engine = FancyEngine::default();
        assert!(matches!(
            engine.ingest("numbers.pdf", b"12345678"),
            Err(FancyError::UnsupportedFileError { .. })
        ));
    }

    #[test]
    fn test_boolean_policy_engine() {
        let engine = FancyEngine::new(ScoringPolicy::Boolean);
        let candidates = engine.ingest("a.txt", b"99999999 11122233").unwrap();
        let split = engine.select(&candidates, 10);
        assert_eq!(split.selected[0].score, 3);
        assert_eq!(split.selected[1].score, 1);
        assert_eq!(engine.policy(), ScoringPolicy::Boolean);
    }

    #[test]
    fn test_part_limit_applies_to_xlsx_ingest() {
        use std::io::{Cursor, Write};
        use zip::write::{FileOptions, ZipWriter};

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file::<_, ()>("xl/worksheets/sheet1.xml", FileOptions::default())
            .unwrap();
        zip.write_all("<worksheet><v>99999999</v></worksheet>".repeat(100).as_bytes())
            .unwrap();
        let xlsx = zip.finish().unwrap().into_inner();

        let engine = FancyEngine::default().with_max_part_bytes(1024);
        assert!(matches!(
            engine.ingest("book.xlsx", &xlsx),
            Err(FancyError::FileTooLargeError { limit: 1024, .. })
        ));

        let engine = FancyEngine::default();
        assert_eq!(engine.ingest("book.xlsx", &xlsx).unwrap().len(), 1);
    }
}
