//! Fixtures shared by tests across the workspace.

use crate::lexicon::{Lexicon, LexiconEntry};

/// A small lexicon covering the phrases the heuristics are tested with
pub fn czech_test_lexicon() -> Lexicon {
    Lexicon::from_entries(
        [
            ("jsem", "být", "VB-S---1P-AA---"),
            ("jsi", "být", "VB-S---2P-AA---"),
            ("je", "být", "VB-S---3P-AA---"),
            ("nejsem", "být", "VB-S---1P-NA---"),
            ("byl", "být", "VpYS---XR-AA---"),
            ("programátor", "programátor", "NNMS1-----A----"),
            ("programátore", "programátor", "NNMS5-----A----"),
            ("programátora", "programátor", "NNMS4-----A----"),
            ("pes", "pes", "NNMS1-----A----"),
            ("psa", "pes", "NNMS4-----A----"),
            ("starý", "starý", "AAMS1----1A----"),
            ("založen", "založit", "VsYS---XX-AP---"),
            ("utlačovanej", "utlačovaný", "AAMS1----1A---6"),
            ("pomoc", "pomoc", "NNFS1-----A----"),
            ("pomoct", "pomoci", "Vf--------A----"),
            ("pomoci", "pomoci", "Vf--------A----"),
            ("pomoz", "pomoci", "Vi-S---2--A----"),
            ("chtěl", "chtít", "VpYS---XR-AA---"),
            ("chci", "chtít", "VB-S---1P-AA---"),
            ("křičel", "křičet", "VpYS---XR-AA---"),
            ("utekl", "utéct", "VpYS---XR-AA---"),
            ("potřebuju", "potřebovat", "VB-S---1P-AA---"),
            ("nepotřebuju", "potřebovat", "VB-S---1P-NA---"),
            ("vím", "vědět", "VB-S---1P-AA---"),
            ("mám", "mít", "VB-S---1P-AA---"),
            ("já", "já", "PP-S1--1-------"),
            ("mi", "já", "PH-S3--1-------"),
            ("jí", "on", "PPFS3--3-------"),
            ("ty", "ty", "PP-S1--2-------"),
            ("on", "on", "PPMS1--3-------"),
            ("to", "ten", "PDNS1----------"),
            ("sám", "sám", "PLYS1----------"),
            ("a", "a", "J^-------------"),
            ("jelikož", "jelikož", "J,-------------"),
            ("jen", "jen", "TT-------------"),
            ("ne", "ne", "TT-------------"),
            ("tady", "tady", "Db-------------"),
            ("ahoj", "ahoj", "II-------------"),
            (",", ",", "Z:-------------"),
            (".", ".", "Z:-------------"),
            ("!", "!", "Z:-------------"),
            ("?", "?", "Z:-------------"),
        ]
        .into_iter()
        .map(|(form, lemma, tag)| LexiconEntry::new(form, lemma, tag)),
    )
}
