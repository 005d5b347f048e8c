//! Fixed translation tables between the report vocabulary and table columns.
//!
//! All three lookups are total over the vocabulary PLIP emits today; a `None`
//! return means the input uses a tag this version does not know about, which
//! callers treat as a hard error rather than dropping the entry.

/// Physicochemical property tags for a three-letter amino acid code.
///
/// Covers the 20 standard residues. One residue carries several tags at
/// once (e.g. `ASP` is simultaneously `acidic`, `charged`, `polar`, ...),
/// so a single contact increments several tally columns.
pub fn residue_properties(aa: &str) -> Option<&'static [&'static str]> {
    let tags: &[&str] = match aa {
        "ASP" => &["acidic", "acyclic", "charged", "medium", "negative", "polar", "surface"],
        "GLU" => &["acidic", "acyclic", "charged", "large", "negative", "polar", "surface"],
        "ALA" => &["acyclic", "aliphatic", "buried", "hydrophobic", "neutral", "small"],
        "GLY" => &["acyclic", "aliphatic", "neutral", "small", "surface"],
        "LEU" => &["acyclic", "aliphatic", "buried", "hydrophobic", "large", "neutral"],
        "SER" => &["acyclic", "neutral", "polar", "small", "surface"],
        "VAL" => &["acyclic", "aliphatic", "buried", "hydrophobic", "medium", "neutral"],
        "THR" => &["acyclic", "medium", "neutral", "polar", "surface"],
        "LYS" => &["acyclic", "basic", "charged", "large", "positive", "surface"],
        "ILE" => &["acyclic", "aliphatic", "buried", "hydrophobic", "large", "neutral", "polar", "surface"],
        "ASN" => &["acyclic", "medium", "neutral", "polar", "surface"],
        "GLN" => &["acyclic", "large", "neutral", "polar", "surface"],
        "CYS" => &["acyclic", "buried", "medium", "neutral", "polar"],
        "MET" => &["acyclic", "buried", "hydrophobic", "large", "neutral"],
        "HIS" => &["aromatic", "basic", "charged", "cyclic", "large", "neutral", "polar", "positive", "surface"],
        "PHE" => &["aromatic", "buried", "cyclic", "hydrophobic", "large", "neutral"],
        "TRP" => &["aromatic", "buried", "cyclic", "hydrophobic", "large", "neutral"],
        "TYR" => &["aromatic", "cyclic", "large", "neutral", "surface"],
        "ARG" => &["basic", "charged", "large", "polar", "positive", "surface"],
        "PRO" => &["cyclic", "hydrophobic", "medium", "neutral", "surface"],
        _ => return None,
    };
    Some(tags)
}

/// Short column prefix for a PLIP interaction element tag.
pub fn interaction_kind(tag: &str) -> Option<&'static str> {
    let short = match tag {
        "hydrophobic_interaction" => "hphobic",
        "hydrogen_bond" => "hbond",
        "water_bridge" => "water",
        "salt_bridge" => "sbridge",
        "pi_stack" => "pistack",
        "pi_cation_interaction" => "pication",
        "halogen_bond" => "halogen",
        "metal_complex" => "metal",
        _ => return None,
    };
    Some(short)
}

/// Short column name for a `lig_properties` element tag.
pub fn property_name(tag: &str) -> Option<&'static str> {
    let short = match tag {
        "num_heavy_atoms" => "heavy",
        "num_hbd" => "hbd",
        "num_unpaired_hbd" => "unpairedhbd",
        "num_unpaired_hba" => "unpairedhba",
        "num_hba" => "hba",
        "num_hal" => "hal",
        "num_unpaired_hal" => "unpairedhal",
        "num_aromatic_rings" => "rings",
        "num_rotatable_bonds" => "rotatable",
        "molweight" => "molweight",
        "logp" => "logp",
        _ => return None,
    };
    Some(short)
}
