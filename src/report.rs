//! Parsing of one PLIP XML report into per-ligand feature records.
//!
//! A report is an ordered tree with zero or more `<bindingsite>` children at
//! the top level, one per analyzed ligand. Each binding site carries three
//! sections we read: `lig_properties` (numeric descriptors of the ligand),
//! `bs_residues` (binding-site residues with a contact flag), and
//! `interactions` (typed contacts grouped by interaction kind). Everything
//! else in the tree is ignored.

use crate::error::{Error, Result};
use crate::vocab;
use roxmltree::{Document, Node};
use std::collections::BTreeMap;
use std::path::Path;

/// One ligand's flattened features, ready to become a table row.
///
/// The three families are kept separate so the output stage can type and
/// order their columns independently; they never share column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LigandFeatures {
    /// Source document identity, rendered in the `Receptor` column.
    pub receptor: String,
    /// Renamed ligand properties. Values are carried as text verbatim;
    /// numeric interpretation is left to whoever consumes the table.
    pub properties: BTreeMap<&'static str, String>,
    /// Occurrence counts of residue property tags over contacting residues.
    pub residue_tags: BTreeMap<&'static str, u32>,
    /// Occurrence counts keyed by interaction kind and residue instance,
    /// e.g. `hbond_Asp42A`.
    pub interactions: BTreeMap<String, u32>,
}

/// Parse one report file into `(identity key, features)` pairs in document
/// order.
///
/// The receptor label is the path as written with a trailing `.xml`
/// stripped; other paths are used as-is.
pub fn parse_report(path: &Path) -> Result<Vec<(String, LigandFeatures)>> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = Document::parse(&text).map_err(|source| Error::Xml {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&doc, &receptor_label(path))
}

fn receptor_label(path: &Path) -> String {
    let path = path.to_string_lossy();
    path.strip_suffix(".xml").unwrap_or(&path).to_string()
}

/// Walk the top-level `<bindingsite>` records of a parsed report.
///
/// Sibling elements of other kinds (version stamps, filename echoes, ...)
/// are skipped. Within a record all three sections must be present, though
/// any of them may be empty; a missing section is a hard error rather than
/// an implicit empty one.
pub(crate) fn parse_document(
    doc: &Document,
    receptor: &str,
) -> Result<Vec<(String, LigandFeatures)>> {
    let mut ligands = Vec::new();
    for site in doc
        .root_element()
        .children()
        .filter(|n| n.has_tag_name("bindingsite"))
    {
        let name = identity_key(site)?;

        let mut properties = None;
        let mut residue_tags = None;
        let mut interactions = None;
        for section in site.children().filter(|n| n.is_element()) {
            match section.tag_name().name() {
                "lig_properties" => properties = Some(ligand_properties(section)?),
                "bs_residues" => residue_tags = Some(residue_tally(section)?),
                "interactions" => interactions = Some(interaction_tally(section)?),
                _ => {}
            }
        }
        let missing = |section| Error::MissingSection {
            ligand: name.clone(),
            section,
        };
        let record = LigandFeatures {
            receptor: receptor.to_string(),
            properties: properties.ok_or_else(|| missing("lig_properties"))?,
            residue_tags: residue_tags.ok_or_else(|| missing("bs_residues"))?,
            interactions: interactions.ok_or_else(|| missing("interactions"))?,
        };
        ligands.push((name, record));
    }
    Ok(ligands)
}

/// The composite ligand identity, e.g. `E20:B:700`: text of the first
/// `identifiers` → `members` → `member` descendant.
fn identity_key(site: Node) -> Result<String> {
    site.children()
        .find(|n| n.has_tag_name("identifiers"))
        .and_then(|n| n.children().find(|c| c.has_tag_name("members")))
        .and_then(|n| n.children().find(|c| c.has_tag_name("member")))
        .and_then(|n| n.text())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .ok_or(Error::MissingIdentityKey)
}

/// Rename each property entry through the ligand property table, keeping
/// its value as text.
fn ligand_properties(section: Node) -> Result<BTreeMap<&'static str, String>> {
    let mut properties = BTreeMap::new();
    for entry in section.children().filter(|n| n.is_element()) {
        let tag = entry.tag_name().name();
        let name = vocab::property_name(tag)
            .ok_or_else(|| Error::UnknownPropertyKind(tag.to_string()))?;
        properties.insert(name, entry.text().unwrap_or_default().to_string());
    }
    Ok(properties)
}

/// Tally residue property tags over contacting residues.
///
/// Entries with `contact` other than the literal `True` contribute nothing;
/// their `aa` code is not even looked up, so an exotic non-contacting
/// residue never aborts a run.
fn residue_tally(section: Node) -> Result<BTreeMap<&'static str, u32>> {
    let mut tally = BTreeMap::new();
    for entry in section.children().filter(|n| n.is_element()) {
        let attr = |field| {
            entry.attribute(field).ok_or_else(|| Error::MissingField {
                element: entry.tag_name().name().to_string(),
                field,
            })
        };
        if attr("contact")? != "True" {
            continue;
        }
        let aa = attr("aa")?;
        let tags = vocab::residue_properties(aa)
            .ok_or_else(|| Error::UnknownResidueCode(aa.to_string()))?;
        for tag in tags {
            *tally.entry(*tag).or_insert(0) += 1;
        }
    }
    Ok(tally)
}

/// Tally interactions per (kind, residue instance).
///
/// The section groups entries by kind (`<hydrogen_bonds>` holding
/// `<hydrogen_bond>` entries and so on); the group wrappers themselves are
/// not translated, only the entry tags. Two entries collapse into one
/// counter exactly when kind, residue type, sequence number and chain all
/// match.
fn interaction_tally(section: Node) -> Result<BTreeMap<String, u32>> {
    let mut tally = BTreeMap::new();
    for group in section.children().filter(|n| n.is_element()) {
        for entry in group.children().filter(|n| n.is_element()) {
            let tag = entry.tag_name().name();
            let kind = vocab::interaction_kind(tag)
                .ok_or_else(|| Error::UnknownInteractionKind(tag.to_string()))?;
            let resnr = child_text(entry, "resnr")?;
            let restype = child_text(entry, "restype")?;
            let reschain = child_text(entry, "reschain")?;
            let key = format!("{kind}_{}{resnr}{reschain}", titlecase(restype));
            *tally.entry(key).or_insert(0) += 1;
        }
    }
    Ok(tally)
}

fn child_text<'a>(entry: Node<'a, '_>, field: &'static str) -> Result<&'a str> {
    entry
        .children()
        .find(|n| n.has_tag_name(field))
        .and_then(|n| n.text())
        .ok_or_else(|| Error::MissingField {
            element: entry.tag_name().name().to_string(),
            field,
        })
}

/// `ASP` → `Asp`, matching the residue spelling used in interaction keys.
fn titlecase(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
