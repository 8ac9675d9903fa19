//! The built-in molecule set seeded into `DrugXpert.molecules`.
//!
//! Several entries carry a molecular formula rather than a SMILES string in
//! `smilesStructure`. They are kept as written.

use drugxpert::MoleculeRecord;

/// Number of records in [`molecules`].
pub const MOLECULE_COUNT: usize = MOLECULES.len();

/// (name, structure, weight g/mol, usage)
const MOLECULES: [(&str, &str, f64, &str); 27] = [
    ("Aspirin", "CC(=O)OC1=CC=CC=C1C(O)=O", 180.16, "Pain reliever/NSAID"),
    ("Caffeine", "CN1C=NC2=C1C(=O)N(C(=O)N2C)C", 194.19, "Stimulant"),
    ("Benzene", "C1=CC=CC=C1", 78.11, "Industrial solvent"),
    ("Glucose", "C(C1C(C(C(C(O1)O)O)O)O)O", 180.16, "Energy source/sugar"),
    ("Penicillin", "CC1(C2C(C(C(O2)N1C(=O)COC(=O)C)C)S)C=O", 334.39, "Antibiotic"),
    ("Ibuprofen", "CC(C)CC1=CC=C(C=C1)C(C)C(=O)O", 206.29, "Anti-inflammatory"),
    ("Ethanol", "CCO", 46.07, "Solvent/alcohol"),
    ("Chloroform", "CCl3", 119.38, "Anesthetic"),
    ("Acetone", "CC(=O)C", 58.08, "Solvent"),
    ("Morphine", "C17H19NO3", 285.34, "Analgesic/opioid"),
    ("Vitamin C", "C6H8O6", 176.12, "Antioxidant/nutrient"),
    ("Nicotine", "CN1CCC2=C(C1)C=CN=C2", 162.23, "Stimulant"),
    ("Methanol", "CO", 32.04, "Solvent/alcohol"),
    ("Serotonin", "C10H12N2O", 176.21, "Neurotransmitter"),
    ("Acetylcholine", "CC(=O)OCC[N+](C)(C)C", 146.21, "Neurotransmitter"),
    ("Adrenaline", "C9H13NO3", 183.21, "Hormone/stimulant"),
    ("Histamine", "C5H9N3", 111.15, "Neurotransmitter/immune response"),
    ("Dopamine", "C8H11NO2", 153.18, "Neurotransmitter"),
    ("Progesterone", "C21H30O2", 314.47, "Hormone"),
    ("Estradiol", "C18H24O2", 272.38, "Hormone"),
    ("Cholesterol", "C27H46O", 386.65, "Cell membrane component"),
    ("Cortisone", "C21H28O5", 360.45, "Hormone/anti-inflammatory"),
    ("Urea", "C(N)N=O", 60.06, "Nitrogen excretion"),
    ("Hydrochloric acid", "Cl", 36.46, "Acid/base chemical"),
    ("Nitroglycerin", "C3H5N3O9", 227.09, "Explosive/heart medication"),
    ("Paracetamol", "CC(=O)NC1=CC=C(C=C1)O", 151.16, "Pain reliever/antipyretic"),
    ("Methotrexate", "C20H22N8O5", 454.44, "Chemotherapy/immunosuppressant"),
];

/// Returns the built-in molecules in insertion order.
pub fn molecules() -> Vec<MoleculeRecord> {
    MOLECULES
        .iter()
        .map(|&(name, structure, weight, usage)| {
            MoleculeRecord::new(name, structure, weight, usage)
        })
        .collect()
}
