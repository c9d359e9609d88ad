//! Collection analysis pipeline: configuration in, ranked sections out.
//!
//! Documents are independent; they may be processed in parallel, and the
//! results are merged back in configuration order before ranking so the
//! output is identical to a sequential run. A failure on one document is
//! logged and skipped; a failure of the embedding collaborator aborts the
//! run.

use std::path::Path;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::decode::Decoder;
use crate::error::{Error, Result};
use crate::model::{RankedSection, Section};
use crate::outline::OutlineExtractor;
use crate::rank::{rank_sections, Embedder};
use crate::section::sectionize;

/// Number of ranked sections reported in `extracted_sections`.
const TOP_SECTIONS: usize = 10;

/// Number of ranked sections reported in `subsection_analysis`.
const TOP_SUBSECTIONS: usize = 5;

/// The persona on whose behalf sections are ranked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// Role description, e.g. "Travel Planner"
    pub role: String,
}

/// The task the persona wants to accomplish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobToBeDone {
    /// Task description, e.g. "Plan a 3-day trip"
    pub task: String,
}

/// A document of the collection, by filename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Filename relative to the collection's PDF directory
    pub filename: String,
}

/// Input configuration for one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Who is asking
    pub persona: Persona,

    /// What they want to accomplish
    pub job_to_be_done: JobToBeDone,

    /// Documents to analyze, in order
    #[serde(default)]
    pub documents: Vec<DocumentRef>,
}

impl CollectionConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&data)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }
}

/// Metadata echoed into the analysis output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Input document filenames, in configuration order
    pub input_documents: Vec<String>,

    /// Persona role from the configuration
    pub persona: String,

    /// Task description from the configuration
    pub job_to_be_done: String,

    /// When the analysis ran
    pub processing_timestamp: DateTime<Utc>,
}

/// One top-ranked section reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSection {
    /// Source document filename
    pub document: String,

    /// Section title
    pub section_title: String,

    /// 1-based relevance rank
    pub importance_rank: usize,

    /// Page number of the section's heading
    pub page_number: u32,
}

/// Full cleaned content of one top-ranked section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    /// Source document filename
    pub document: String,

    /// Cleaned section content
    pub refined_text: String,

    /// Page number of the section's heading
    pub page_number: u32,
}

/// The produced analysis record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutput {
    /// Run metadata
    pub metadata: AnalysisMetadata,

    /// Top sections by rank
    pub extracted_sections: Vec<ExtractedSection>,

    /// Full content of the very top sections
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

/// Runs the outline → section → ranking pipeline over a collection.
pub struct CollectionAnalyzer<'a> {
    decoder: &'a dyn Decoder,
    embedder: &'a dyn Embedder,
    parallel: bool,
}

impl<'a> CollectionAnalyzer<'a> {
    /// Analyzer over the given decoder and embedder collaborators.
    pub fn new(decoder: &'a dyn Decoder, embedder: &'a dyn Embedder) -> Self {
        Self {
            decoder,
            embedder,
            parallel: true,
        }
    }

    /// Process documents one at a time instead of in parallel.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Analyze a collection: extract, sectionize and rank every document's
    /// sections, then assemble the output record.
    pub fn analyze(&self, config: &CollectionConfig, pdf_dir: &Path) -> Result<AnalysisOutput> {
        let per_document: Vec<Vec<Section>> = if self.parallel {
            config
                .documents
                .par_iter()
                .map(|doc| self.document_sections(pdf_dir, &doc.filename))
                .collect()
        } else {
            config
                .documents
                .iter()
                .map(|doc| self.document_sections(pdf_dir, &doc.filename))
                .collect()
        };

        let sections: Vec<Section> = per_document.into_iter().flatten().collect();
        log::debug!("collected {} sections for ranking", sections.len());

        let ranked = rank_sections(
            self.embedder,
            &config.persona.role,
            &config.job_to_be_done.task,
            sections,
        )?;

        Ok(assemble_output(config, &ranked))
    }

    /// Sections of one document; failures are absorbed here so the rest of
    /// the collection keeps processing.
    fn document_sections(&self, pdf_dir: &Path, filename: &str) -> Vec<Section> {
        let path = pdf_dir.join(filename);
        match self.try_document(&path, filename) {
            Ok(sections) => {
                log::debug!("{filename}: {} sections", sections.len());
                sections
            }
            Err(e) => {
                log::warn!("skipping document {filename}: {e}");
                Vec::new()
            }
        }
    }

    fn try_document(&self, path: &Path, filename: &str) -> Result<Vec<Section>> {
        let doc = self.decoder.decode(path)?;
        let outline = OutlineExtractor::new().extract(&doc);
        Ok(sectionize(&doc, &outline, filename))
    }
}

/// Assemble the output record from ranked sections.
fn assemble_output(config: &CollectionConfig, ranked: &[RankedSection]) -> AnalysisOutput {
    let extracted_sections = ranked
        .iter()
        .take(TOP_SECTIONS)
        .enumerate()
        .map(|(index, entry)| ExtractedSection {
            document: entry.section.document.clone(),
            section_title: entry.section.title.clone(),
            importance_rank: index + 1,
            page_number: entry.section.page,
        })
        .collect();

    let subsection_analysis = ranked
        .iter()
        .take(TOP_SUBSECTIONS)
        .map(|entry| SubsectionAnalysis {
            document: entry.section.document.clone(),
            refined_text: entry.section.content.clone(),
            page_number: entry.section.page,
        })
        .collect();

    AnalysisOutput {
        metadata: AnalysisMetadata {
            input_documents: config
                .documents
                .iter()
                .map(|doc| doc.filename.clone())
                .collect(),
            persona: config.persona.role.clone(),
            job_to_be_done: config.job_to_be_done.task.clone(),
            processing_timestamp: Utc::now(),
        },
        extracted_sections,
        subsection_analysis,
    }
}
