pub mod dna;
pub mod growth;
