//! Folding a batch of reports into one rectangular feature table.
//!
//! Documents are processed strictly in manifest order, one at a time; the
//! fold is sequential on purpose so the last-writer-wins rule below stays
//! tied to manifest order. The DataFrame is only built and written after
//! every document has parsed, so a failing batch leaves no output file.

use crate::error::{Error, Result};
use crate::report::{parse_report, LigandFeatures};
use polars::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Aggregate of all per-ligand records in a batch, keyed by ligand identity.
///
/// Insertion-ordered: a ligand keeps the row position of its first
/// appearance even when a later document overwrites its record wholesale.
/// There is no field-level merging on collision.
#[derive(Debug, Default)]
pub struct FeatureTable {
    order: Vec<String>,
    records: HashMap<String, LigandFeatures>,
}

impl FeatureTable {
    fn insert(&mut self, name: String, record: LigandFeatures) {
        if !self.records.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.records.insert(name, record);
    }

    /// Ligand identity keys in row order.
    pub fn ligands(&self) -> &[String] {
        &self.order
    }

    /// The record for a ligand, if present.
    pub fn get(&self, name: &str) -> Option<&LigandFeatures> {
        self.records.get(name)
    }
}

/// Parse every report named in the manifest and fold the results.
///
/// Manifest lines are trimmed; blank lines are skipped. Any failure while
/// reading or parsing a report aborts the whole batch, wrapped with that
/// report's path.
pub fn aggregate(manifest: &Path) -> Result<FeatureTable> {
    let list = std::fs::read_to_string(manifest).map_err(|source| Error::Io {
        path: manifest.to_path_buf(),
        source,
    })?;

    let mut table = FeatureTable::default();
    for line in list.lines() {
        let entry = line.trim();
        if entry.is_empty() {
            continue;
        }
        info!("Parsing {entry}");
        let path = Path::new(entry);
        let mut ligands = parse_report(path).map_err(|e| match e {
            e @ (Error::Io { .. } | Error::Xml { .. }) => e,
            e => e.in_report(path),
        })?;
        // Row order within a document: identity-key fields after the
        // ligand code, i.e. chain then residue number as text.
        ligands.sort_by(|a, b| suffix_fields(&a.0).cmp(&suffix_fields(&b.0)));
        for (name, record) in ligands {
            table.insert(name, record);
        }
    }
    Ok(table)
}

fn suffix_fields(key: &str) -> Vec<&str> {
    key.split(':').skip(1).collect()
}

/// Render the aggregate as a rectangular DataFrame.
///
/// Columns are `Ligand`, `Receptor`, then the sorted union of ligand
/// property names, residue tags, and interaction keys over all records. A
/// ligand without a given feature gets a null there — absence of an
/// interaction is not a zero count.
pub fn to_dataframe(table: &FeatureTable) -> Result<DataFrame> {
    let records: Vec<&LigandFeatures> = table
        .ligands()
        .iter()
        .map(|name| table.get(name).unwrap())
        .collect();

    let mut property_cols = BTreeSet::new();
    let mut residue_cols = BTreeSet::new();
    let mut interaction_cols = BTreeSet::new();
    for record in &records {
        property_cols.extend(record.properties.keys().copied());
        residue_cols.extend(record.residue_tags.keys().copied());
        interaction_cols.extend(record.interactions.keys().map(String::as_str));
    }

    let mut columns = Vec::with_capacity(
        2 + property_cols.len() + residue_cols.len() + interaction_cols.len(),
    );
    columns.push(Column::new("Ligand".into(), table.ligands().to_vec()));
    columns.push(Column::new(
        "Receptor".into(),
        records
            .iter()
            .map(|r| r.receptor.clone())
            .collect::<Vec<String>>(),
    ));
    for name in property_cols {
        let values: Vec<Option<String>> = records
            .iter()
            .map(|r| r.properties.get(name).cloned())
            .collect();
        columns.push(Column::new(name.into(), values));
    }
    for name in residue_cols {
        let values: Vec<Option<u32>> = records
            .iter()
            .map(|r| r.residue_tags.get(name).copied())
            .collect();
        columns.push(Column::new(name.into(), values));
    }
    for name in interaction_cols {
        let values: Vec<Option<u32>> = records
            .iter()
            .map(|r| r.interactions.get(name).copied())
            .collect();
        columns.push(Column::new(name.into(), values));
    }

    Ok(DataFrame::new(columns)?)
}

/// Run a whole batch: aggregate the manifest's reports and write the table
/// as CSV, header row first. Nulls render as empty fields.
pub fn run(manifest: &Path, output: &Path) -> Result<()> {
    let table = aggregate(manifest)?;
    let mut df = to_dataframe(&table)?;

    let mut file = File::create(output).map_err(|source| Error::Io {
        path: output.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file).finish(&mut df)?;
    info!("Wrote {} ligands to {}", df.height(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn fixture(name: &str) -> String {
        let root = env!("CARGO_MANIFEST_DIR");
        format!("{root}/test-data/{name}")
    }

    /// Write a manifest listing the given fixture reports and return its
    /// path along with a path for the output table.
    fn setup(dir: &tempfile::TempDir, reports: &[&str]) -> (PathBuf, PathBuf) {
        let manifest = dir.path().join("reports.txt");
        let lines: Vec<String> = reports.iter().map(|r| fixture(r)).collect();
        fs::write(&manifest, lines.join("\n")).unwrap();
        (manifest, dir.path().join("out.csv"))
    }

    fn cell<'a>(csv: &'a str, row_label: &str, column: &str) -> &'a str {
        let mut lines = csv.lines();
        let header: Vec<&str> = lines.next().unwrap().split(',').collect();
        let col = header
            .iter()
            .position(|c| *c == column)
            .unwrap_or_else(|| panic!("no column {column}"));
        let row = lines
            .map(|l| l.split(',').collect::<Vec<&str>>())
            .find(|fields| fields[0] == row_label)
            .unwrap_or_else(|| panic!("no row {row_label}"));
        row[col]
    }

    #[test]
    fn columns_are_the_union_over_all_ligands() {
        let dir = tempfile::tempdir().unwrap();
        let (manifest, output) = setup(&dir, &["1eve.xml", "1abc.xml"]);
        run(&manifest, &output).unwrap();
        let csv = fs::read_to_string(&output).unwrap();

        let header = csv.lines().next().unwrap();
        assert!(header.starts_with("Ligand,Receptor,"));
        // Property columns come sorted, before the residue tag columns
        assert!(header.contains("hal,heavy,rotatable"));

        // Features a ligand lacks are empty, not zero
        assert_eq!(cell(&csv, "HEM:A:500", "rotatable"), "");
        assert_eq!(cell(&csv, "HEM:A:500", "hal"), "0");
        assert_eq!(cell(&csv, "E20:B:700", "hal"), "");
        assert_eq!(cell(&csv, "E20:B:700", "sbridge_Asp60B"), "");
        assert_eq!(cell(&csv, "HEM:A:500", "sbridge_Asp60B"), "1");
    }

    #[test]
    fn rows_sort_by_identity_suffix_within_a_document() {
        let dir = tempfile::tempdir().unwrap();
        let (manifest, output) = setup(&dir, &["1eve.xml"]);
        run(&manifest, &output).unwrap();
        let csv = fs::read_to_string(&output).unwrap();

        // 1eve.xml lists E20:B:700 before NAG:A:601; chain A sorts first
        let rows: Vec<&str> = csv
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();
        assert_eq!(rows, ["NAG:A:601", "E20:B:700"]);
    }

    #[test]
    fn receptor_column_is_the_report_path_without_xml() {
        let dir = tempfile::tempdir().unwrap();
        let (manifest, output) = setup(&dir, &["1abc.xml"]);
        run(&manifest, &output).unwrap();
        let csv = fs::read_to_string(&output).unwrap();

        let expected = fixture("1abc.xml").strip_suffix(".xml").unwrap().to_string();
        assert_eq!(cell(&csv, "HEM:A:500", "Receptor"), expected);
    }

    #[test]
    fn later_documents_overwrite_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let (manifest, output) = setup(&dir, &["1eve.xml", "1eve_rerun.xml"]);
        run(&manifest, &output).unwrap();
        let csv = fs::read_to_string(&output).unwrap();

        // The rerun's record replaces the whole row for E20:B:700
        assert_eq!(cell(&csv, "E20:B:700", "heavy"), "29");
        assert_eq!(cell(&csv, "E20:B:700", "pistack_Trp84A"), "1");
        // No field-level merging: the original hydrophobic counts are gone,
        // and with them the column, since no surviving record has them
        let header: Vec<&str> = csv.lines().next().unwrap().split(',').collect();
        assert!(!header.contains(&"hphobic_Trp84A"));
        // The row keeps its first-seen position
        let rows: Vec<&str> = csv
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();
        assert_eq!(rows, ["NAG:A:601", "E20:B:700"]);
    }

    #[test]
    fn reruns_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let (manifest, output) = setup(&dir, &["1eve.xml", "1abc.xml"]);
        run(&manifest, &output).unwrap();
        let first = fs::read(&output).unwrap();

        let output2 = dir.path().join("out2.csv");
        run(&manifest, &output2).unwrap();
        assert_eq!(first, fs::read(&output2).unwrap());
    }

    #[test]
    fn blank_manifest_yields_header_only_table() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("reports.txt");
        fs::write(&manifest, "\n   \n\t\n").unwrap();
        let output = dir.path().join("out.csv");
        run(&manifest, &output).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "Ligand,Receptor\n");
    }

    #[test]
    fn unknown_vocabulary_aborts_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let (manifest, output) = setup(&dir, &["1eve.xml", "bad_residue.xml"]);
        let err = run(&manifest, &output).unwrap_err();

        assert!(matches!(
            &err,
            Error::Report { source, .. }
                if matches!(source.as_ref(), Error::UnknownResidueCode(code) if code == "MSE")
        ));
        // The failing report is named in the diagnostic
        assert!(err.to_string().contains("bad_residue.xml"));
        assert!(!output.exists());
    }

    #[test]
    fn unreadable_report_aborts_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("reports.txt");
        fs::write(&manifest, dir.path().join("nope.xml").to_str().unwrap()).unwrap();
        let output = dir.path().join("out.csv");

        let err = run(&manifest, &output).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(!output.exists());
    }
}
