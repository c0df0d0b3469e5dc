use crate::core::assemble::ColumnLayout;
use crate::domain::model::{ExportSummary, GameRecord, Partition};
use crate::domain::ports::Storage;
use crate::domain::report::{RunReport, SoftError};
use crate::utils::error::{EtlError, Result};
use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::{FileOptions, ZipWriter};
use zip::ZipArchive;

/// Spreadsheet applications reject longer sheet names.
pub const MAX_SHEET_LABEL: usize = 31;
const FORBIDDEN_LABEL_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

pub const DEFAULT_WORKBOOK: &str = "by_team.zip";
pub const DEFAULT_COMBINED_CSV: &str = "final_draft.csv";
pub const DEFAULT_TARGET_SHEET: &str = "Event";

/// 1-based spreadsheet coordinate of the first cell to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellOrigin {
    pub row: usize,
    pub col: usize,
}

impl Default for CellOrigin {
    fn default() -> Self {
        // row 2, column D
        Self { row: 2, col: 4 }
    }
}

#[derive(Debug, Clone)]
pub struct TemplateSettings {
    /// `.csv` (single sheet) or `.zip` (workbook of csv sheets).
    pub path: String,
    pub target_sheet: String,
    pub origin: CellOrigin,
    pub output_dir: String,
}

#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub workbook: String,
    pub combined_csv: Option<String>,
    pub template: Option<TemplateSettings>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            workbook: DEFAULT_WORKBOOK.to_string(),
            combined_csv: Some(DEFAULT_COMBINED_CSV.to_string()),
            template: None,
        }
    }
}

/// Home team part of a record name (`"A vs. B"` -> `"A"`).
pub fn partition_key(name: &str) -> Option<&str> {
    name.find(" vs").map(|idx| &name[..idx])
}

/// Groups records by home team. Partition order follows first appearance and
/// records keep extraction order. Names without a ` vs` are skipped.
pub fn partition_records(records: &[GameRecord]) -> Vec<Partition<'_>> {
    let mut partitions: Vec<Partition<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let Some(key) = partition_key(&record.name) else {
            tracing::debug!("Skipping record without partition key: {}", record.name);
            continue;
        };
        let slot = *index.entry(key).or_insert_with(|| {
            partitions.push(Partition {
                key: key.to_string(),
                records: Vec::new(),
            });
            partitions.len() - 1
        });
        partitions[slot].records.push(record);
    }
    partitions
}

/// Caps `base` and appends `suffix(n)` until the result is not in `used`.
fn claim_unique(base: &str, used: &mut HashSet<String>, suffix: impl Fn(usize) -> String) -> String {
    let mut candidate: String = base.chars().take(MAX_SHEET_LABEL).collect();
    let mut counter = 2;
    while used.contains(&candidate) {
        let tail = suffix(counter);
        let room = MAX_SHEET_LABEL - tail.chars().count();
        candidate = base.chars().take(room).collect::<String>() + &tail;
        counter += 1;
    }
    used.insert(candidate.clone());
    candidate
}

/// Sheet-safe label: forbidden characters removed, capped, unique within
/// `used`.
pub fn sheet_label(key: &str, used: &mut HashSet<String>) -> String {
    let cleaned: String = key.chars().filter(|c| !FORBIDDEN_LABEL_CHARS.contains(c)).collect();
    let cleaned = cleaned.trim();
    let base = if cleaned.is_empty() { "Sheet" } else { cleaned };
    claim_unique(base, used, |n| format!(" ({})", n))
}

/// File stem for a template artifact: spaces become underscores, and stems
/// that collide after that get a numeric suffix.
pub fn artifact_stem(label: &str, used: &mut HashSet<String>) -> String {
    claim_unique(&label.replace(' ', "_"), used, |n| format!("_{}", n))
}

/// In-memory sheet. Coordinates passed to `set` / `get` are 1-based.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn from_csv(data: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data);
        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        Ok(Self { rows })
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        if row == 0 || col == 0 {
            return None;
        }
        self.rows.get(row - 1)?.get(col - 1).map(String::as_str)
    }

    pub fn set(&mut self, row: usize, col: usize, value: impl Into<String>) {
        let (r, c) = (row.max(1) - 1, col.max(1) - 1);
        if self.rows.len() <= r {
            self.rows.resize_with(r + 1, Vec::new);
        }
        let cells = &mut self.rows[r];
        if cells.len() <= c {
            cells.resize(c + 1, String::new());
        }
        cells[c] = value.into();
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Rows are padded to the widest row so every line has the same arity.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let width = self.width();
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &self.rows {
            let mut padded = row.clone();
            padded.resize(width, String::new());
            writer.write_record(&padded)?;
        }
        writer.into_inner().map_err(|e| EtlError::ProcessingError {
            message: format!("failed to finish csv buffer: {}", e),
        })
    }
}

fn table_csv(layout: &ColumnLayout, records: &[&GameRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(layout.header())?;
    for record in records {
        writer.write_record(layout.row_for(record))?;
    }
    writer.into_inner().map_err(|e| EtlError::ProcessingError {
        message: format!("failed to finish csv buffer: {}", e),
    })
}

enum TemplateKind {
    Sheet,
    Workbook,
}

impl TemplateKind {
    fn of(path: &str) -> Result<Self> {
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(TemplateKind::Sheet),
            Some(ext) if ext.eq_ignore_ascii_case("zip") => Ok(TemplateKind::Workbook),
            _ => Err(EtlError::TemplateError {
                message: format!("unsupported template type: {}", path),
            }),
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            TemplateKind::Sheet => "csv",
            TemplateKind::Workbook => "zip",
        }
    }
}

/// Writes the by-team workbook, the combined flat file and one filled
/// template per partition.
pub struct ExportWriter<S: Storage> {
    storage: S,
    layout: ColumnLayout,
    settings: ExportSettings,
}

impl<S: Storage> ExportWriter<S> {
    pub fn new(storage: S, layout: ColumnLayout, settings: ExportSettings) -> Self {
        Self {
            storage,
            layout,
            settings,
        }
    }

    pub async fn write(&self, records: &[GameRecord], report: &mut RunReport) -> Result<ExportSummary> {
        let partitions = partition_records(records);
        let mut used = HashSet::new();
        let labels: Vec<String> = partitions.iter().map(|p| sheet_label(&p.key, &mut used)).collect();

        tracing::info!("📦 Writing {} partitions to {}", partitions.len(), self.settings.workbook);
        let workbook = self.build_workbook(&partitions, &labels)?;
        self.storage.write_file(&self.settings.workbook, &workbook).await?;

        let mut summary = ExportSummary {
            workbook_path: self.settings.workbook.clone(),
            partitions: partitions.len(),
            records: partitions.iter().map(|p| p.records.len()).sum(),
            ..ExportSummary::default()
        };

        if let Some(path) = &self.settings.combined_csv {
            let all: Vec<&GameRecord> = records.iter().collect();
            self.storage.write_file(path, &table_csv(&self.layout, &all)?).await?;
            tracing::info!("📄 Combined file written: {}", path);
            summary.combined_csv_path = Some(path.clone());
        }

        if let Some(template) = &self.settings.template {
            let mut used_stems = HashSet::new();
            for (partition, label) in partitions.iter().zip(&labels) {
                let stem = artifact_stem(label, &mut used_stems);
                match self.fill_template(template, partition, &stem).await {
                    Ok(path) => {
                        tracing::debug!("📝 Template filled for {}: {}", partition.key, path);
                        summary.template_artifacts.push(path);
                    }
                    Err(e) => {
                        tracing::warn!("⚠️ Template export failed for {}: {}", partition.key, e);
                        report.push(SoftError::SinkWriteFailure {
                            partition: partition.key.clone(),
                            message: e.to_string(),
                        });
                        summary.failed_partitions.push(partition.key.clone());
                    }
                }
            }
        }

        Ok(summary)
    }

    fn build_workbook(&self, partitions: &[Partition<'_>], labels: &[String]) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (partition, label) in partitions.iter().zip(labels) {
            zip.start_file::<_, ()>(format!("{}.csv", label), FileOptions::default())?;
            zip.write_all(&table_csv(&self.layout, &partition.records)?)?;
        }
        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    async fn fill_template(
        &self,
        template: &TemplateSettings,
        partition: &Partition<'_>,
        stem: &str,
    ) -> Result<String> {
        let kind = TemplateKind::of(&template.path)?;
        // fresh copy every time so partitions never see each other's rows
        let original = self.storage.read_file(&template.path).await?;

        let filled = match kind {
            TemplateKind::Sheet => {
                let mut grid = Grid::from_csv(&original)?;
                self.place_records(&mut grid, template.origin, partition);
                grid.to_csv()?
            }
            TemplateKind::Workbook => self.fill_workbook(&original, template, partition)?,
        };

        let path = Path::new(&template.output_dir)
            .join(format!("{}.{}", stem, kind.extension()))
            .to_string_lossy()
            .into_owned();
        self.storage.write_file(&path, &filled).await?;
        Ok(path)
    }

    fn place_records(&self, grid: &mut Grid, origin: CellOrigin, partition: &Partition<'_>) {
        for (offset, record) in partition.records.iter().enumerate() {
            for (col_offset, value) in self.layout.row_for(record).into_iter().enumerate() {
                grid.set(origin.row + offset, origin.col + col_offset, value);
            }
        }
    }

    fn fill_workbook(&self, original: &[u8], template: &TemplateSettings, partition: &Partition<'_>) -> Result<Vec<u8>> {
        let target = format!("{}.csv", template.target_sheet);
        let mut archive = ZipArchive::new(Cursor::new(original))?;
        let mut out = ZipWriter::new(Cursor::new(Vec::new()));
        let mut found = false;

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            let name = entry.name().to_string();
            let mut data = Vec::new();
            entry.read_to_end(&mut data)?;

            if name == target {
                let mut grid = Grid::from_csv(&data)?;
                self.place_records(&mut grid, template.origin, partition);
                data = grid.to_csv()?;
                found = true;
            }
            out.start_file::<_, ()>(name, FileOptions::default())?;
            out.write_all(&data)?;
        }

        if !found {
            return Err(EtlError::TemplateError {
                message: format!("sheet '{}' not found in {}", template.target_sheet, template.path),
            });
        }
        Ok(out.finish()?.into_inner())
    }
}
