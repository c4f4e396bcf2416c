//! Per-locale abbreviation lists (lowercase, without the trailing period).
//!
//! Dotted letter runs such as "e.g." and "z.B." need no entry.

pub(super) const ENGLISH: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "inc", "ltd", "corp",
    "fig", "approx", "dept", "jan", "feb", "apr", "jun", "jul", "aug", "sep", "sept", "oct",
    "nov", "dec", "mt", "gen", "col", "lt", "sgt", "capt", "rev", "hon", "cf", "al", "vol",
    "pp", "ave", "blvd", "ca", "esp",
];

pub(super) const GERMAN: &[&str] = &[
    "dr", "prof", "hr", "fr", "frl", "bzw", "ca", "vgl", "nr", "str", "evtl", "ggf",
    "inkl", "zzgl", "bspw", "sog", "gem", "abs", "jh", "mio", "mrd", "tel", "bzgl", "ff",
    "hrsg", "jan", "feb", "aug", "sept", "okt", "nov", "dez", "mind", "geb", "verh",
];
