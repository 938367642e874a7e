//! RDF vocabulary constants for the phenology triplification pipeline.
//!
//! This crate provides a centralized location for the RDF vocabulary IRIs
//! used when generating and describing observation triples.
//!
//! # Organization
//!
//! Constants are organized by vocabulary:
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `rdfs` - RDFS vocabulary (http://www.w3.org/2000/01/rdf-schema#)
//! - `xsd` - XSD vocabulary (http://www.w3.org/2001/XMLSchema#)
//! - `owl` - OWL vocabulary (http://www.w3.org/2002/07/owl#)

/// RDF vocabulary constants
pub mod rdf {
    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:Property IRI
    pub const PROPERTY: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property";
}

/// RDFS vocabulary constants
pub mod rdfs {
    /// rdfs:Class IRI
    pub const CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";

    /// rdfs:isDefinedBy IRI
    pub const IS_DEFINED_BY: &str = "http://www.w3.org/2000/01/rdf-schema#isDefinedBy";

    /// rdfs:label IRI
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
}

/// XSD vocabulary constants
pub mod xsd {
    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:integer IRI
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// xsd:float IRI
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
}

/// OWL vocabulary constants
pub mod owl {
    /// owl:ObjectProperty IRI
    pub const OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";

    /// owl:DatatypeProperty IRI
    pub const DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";

    /// owl:imports IRI
    pub const IMPORTS: &str = "http://www.w3.org/2002/07/owl#imports";
}

/// Subject IRI used for the per-run ontology import statement.
pub const IMPORT_INSTANCE: &str = "urn:importInstance";
