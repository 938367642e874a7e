//! Configuration directory loading.
//!
//! Parses the CSV configuration files into a [`ProjectSchema`], validating
//! referential integrity as it goes: rules must name known kinds and existing
//! lists, mappings and relations must reference declared entity aliases, and
//! every IRI-valued field must resolve to a well-formed IRI.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use pheno_vocab::rdf;

use crate::error::{Result, SchemaError};
use crate::labels::{resolve_label, LabelResolver};
use crate::model::{
    ColumnMapping, Entity, Relation, Rule, RuleKind, Severity, VocabList, VocabTerm,
};

/// List file backing the synthesized default vocabulary rule.
pub const DESCRIPTION_LIST: &str = "phenophase_descriptions.csv";

/// Column the default vocabulary rule applies to.
pub const DEFAULT_VOCAB_COLUMN: &str = "phenophase_name";

#[derive(Debug, Deserialize)]
struct RuleRow {
    rule: String,
    #[serde(default)]
    columns: String,
    #[serde(default)]
    level: String,
    #[serde(default)]
    list: String,
}

#[derive(Debug, Deserialize)]
struct ListRow {
    field: String,
    #[serde(default)]
    defined_by: String,
}

#[derive(Debug, Deserialize)]
struct EntityRow {
    #[serde(default)]
    alias: String,
    #[serde(default)]
    concept_uri: String,
    #[serde(default)]
    unique_key: String,
    #[serde(default)]
    identifier_root: String,
}

#[derive(Debug, Deserialize)]
struct MappingRow {
    #[serde(default)]
    column: String,
    #[serde(default)]
    entity_alias: String,
    #[serde(default)]
    uri: String,
    #[serde(default)]
    substitute: String,
}

#[derive(Debug, Deserialize)]
struct RelationRow {
    #[serde(default)]
    subject_entity_alias: String,
    #[serde(default)]
    predicate: String,
    #[serde(default)]
    object_entity_alias: String,
}

/// The fully-loaded, read-only triplification schema.
///
/// Safe to share by reference across workers after construction.
#[derive(Debug, Clone)]
pub struct ProjectSchema {
    headers: Vec<String>,
    rules: Vec<Rule>,
    lists: HashMap<String, VocabList>,
    entities: Vec<Entity>,
    relations: Vec<Relation>,
    entity_index: HashMap<String, usize>,
}

impl ProjectSchema {
    /// Load a configuration directory.
    ///
    /// Fails fatally (before any data is processed) if a required file is
    /// missing, a required field is blank, a label cannot be resolved, or a
    /// rule references an unknown list.
    pub fn load(config_dir: &Path, resolver: &dyn LabelResolver) -> Result<Self> {
        let headers = load_headers(&config_dir.join("headers.csv"))?;
        let mut rules = load_rules(&config_dir.join("rules.csv"))?;
        let lists = load_lists(config_dir, &rules)?;

        // The default vocabulary rule is always present and always runs last.
        rules.push(Rule {
            kind: RuleKind::ControlledVocabulary,
            columns: vec![DEFAULT_VOCAB_COLUMN.to_string()],
            level: Severity::Error,
            list: Some(DESCRIPTION_LIST.to_string()),
        });

        let mut entities = load_entities(&config_dir.join("entity.csv"), resolver)?;
        let entity_index: HashMap<String, usize> = entities
            .iter()
            .enumerate()
            .map(|(i, e)| (e.alias.clone(), i))
            .collect();

        load_mappings(
            &config_dir.join("mapping.csv"),
            resolver,
            &mut entities,
            &entity_index,
        )?;
        let relations = load_relations(&config_dir.join("relations.csv"), resolver, &entity_index)?;

        Ok(Self {
            headers,
            rules,
            lists,
            entities,
            relations,
            entity_index,
        })
    }

    /// The configured input/output column list.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Validation rules in execution order (declaration order, default rule
    /// last).
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Entities in declaration order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Relations in declaration order.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Look up an entity by alias.
    pub fn entity(&self, alias: &str) -> Option<&Entity> {
        self.entity_index.get(alias).map(|&i| &self.entities[i])
    }

    /// Look up a vocabulary list by name.
    pub fn list(&self, name: &str) -> Option<&VocabList> {
        self.lists.get(name)
    }

    /// The vocabulary list governing `column`: the list of the first
    /// ControlledVocabulary rule whose columns include it.
    pub fn list_for_column(&self, column: &str) -> Option<&VocabList> {
        self.rules
            .iter()
            .filter(|r| r.kind == RuleKind::ControlledVocabulary)
            .find(|r| r.columns.iter().any(|c| c == column))
            .and_then(|r| r.list.as_deref())
            .and_then(|name| self.lists.get(name))
    }
}

fn load_headers(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(SchemaError::MissingFile(path.to_path_buf()));
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)?;
    let mut records = reader.records();
    match records.next() {
        Some(record) => Ok(record?.iter().map(|c| c.to_string()).collect()),
        None => Err(SchemaError::MissingFile(path.to_path_buf())),
    }
}

fn load_rules(path: &Path) -> Result<Vec<Rule>> {
    // A project with no declared rules still gets the default rule.
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file = path.display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut rules = Vec::new();
    for row in reader.deserialize::<RuleRow>() {
        let row = row?;
        let kind = RuleKind::parse(&row.rule).ok_or_else(|| SchemaError::InvalidRule {
            file: file.clone(),
            message: format!(
                "{} is not a valid rule [{}]",
                row.rule,
                RuleKind::VALID_NAMES.join(",")
            ),
        })?;

        let columns: Vec<String> = row
            .columns
            .split('|')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        if columns.is_empty() {
            return Err(SchemaError::InvalidRule {
                file: file.clone(),
                message: "All rules must specify columns".to_string(),
            });
        }

        let list = if row.list.is_empty() {
            None
        } else {
            Some(row.list)
        };
        if kind == RuleKind::ControlledVocabulary && list.is_none() {
            return Err(SchemaError::InvalidRule {
                file: file.clone(),
                message: "ControlledVocabulary rule must specify a list".to_string(),
            });
        }

        rules.push(Rule {
            kind,
            columns,
            level: Severity::parse(&row.level),
            list,
        });
    }
    Ok(rules)
}

/// Load every list referenced by a rule, plus the mandatory description list.
fn load_lists(config_dir: &Path, rules: &[Rule]) -> Result<HashMap<String, VocabList>> {
    let mut lists = HashMap::new();

    let mut names: Vec<&str> = rules.iter().filter_map(|r| r.list.as_deref()).collect();
    names.push(DESCRIPTION_LIST);

    for name in names {
        if lists.contains_key(name) {
            continue;
        }
        let path = config_dir.join(name);
        if !path.exists() {
            return Err(SchemaError::UnknownList(name.to_string()));
        }
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)?;
        let mut terms = Vec::new();
        for row in reader.deserialize::<ListRow>() {
            let row = row?;
            terms.push(VocabTerm {
                field: row.field,
                defined_by: if row.defined_by.is_empty() {
                    None
                } else {
                    Some(row.defined_by)
                },
            });
        }
        lists.insert(
            name.to_string(),
            VocabList {
                name: name.to_string(),
                terms,
            },
        );
    }
    Ok(lists)
}

fn require(file: &Path, field: &str, value: String) -> Result<String> {
    if value.is_empty() {
        return Err(SchemaError::MissingField {
            file: file.display().to_string(),
            field: field.to_string(),
        });
    }
    Ok(value)
}

fn load_entities(path: &Path, resolver: &dyn LabelResolver) -> Result<Vec<Entity>> {
    if !path.exists() {
        return Err(SchemaError::MissingFile(path.to_path_buf()));
    }
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut entities: Vec<Entity> = Vec::new();
    for row in reader.deserialize::<EntityRow>() {
        let row = row?;
        let alias = require(path, "alias", row.alias)?;
        if entities.iter().any(|e| e.alias == alias) {
            return Err(SchemaError::DuplicateAlias(alias));
        }
        let concept_uri = resolve_label(&require(path, "concept_uri", row.concept_uri)?, resolver)?;
        entities.push(Entity {
            alias,
            concept_uri,
            unique_key: require(path, "unique_key", row.unique_key)?,
            identifier_root: row.identifier_root,
            columns: Vec::new(),
        });
    }
    Ok(entities)
}

fn load_mappings(
    path: &Path,
    resolver: &dyn LabelResolver,
    entities: &mut [Entity],
    entity_index: &HashMap<String, usize>,
) -> Result<()> {
    if !path.exists() {
        return Err(SchemaError::MissingFile(path.to_path_buf()));
    }
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    for row in reader.deserialize::<MappingRow>() {
        let row = row?;
        let column = require(path, "column", row.column)?;
        let alias = require(path, "entity_alias", row.entity_alias)?;
        let predicate = resolve_label(&require(path, "uri", row.uri)?, resolver)?;

        let &idx = entity_index
            .get(&alias)
            .ok_or_else(|| SchemaError::UnknownEntity {
                alias,
                file: path.display().to_string(),
            })?;

        // rdf:type mappings always substitute vocabulary IRIs; other mappings
        // opt in through the `substitute` column.
        let substitute = predicate == rdf::TYPE || row.substitute.eq_ignore_ascii_case("true");

        entities[idx].columns.push(ColumnMapping {
            column,
            predicate,
            substitute,
        });
    }
    Ok(())
}

fn load_relations(
    path: &Path,
    resolver: &dyn LabelResolver,
    entity_index: &HashMap<String, usize>,
) -> Result<Vec<Relation>> {
    if !path.exists() {
        return Err(SchemaError::MissingFile(path.to_path_buf()));
    }
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut relations = Vec::new();
    for row in reader.deserialize::<RelationRow>() {
        let row = row?;
        let subject_alias = require(path, "subject_entity_alias", row.subject_entity_alias)?;
        let object_alias = require(path, "object_entity_alias", row.object_entity_alias)?;
        let predicate = resolve_label(&require(path, "predicate", row.predicate)?, resolver)?;

        for alias in [&subject_alias, &object_alias] {
            if !entity_index.contains_key(alias) {
                return Err(SchemaError::UnknownEntity {
                    alias: alias.clone(),
                    file: path.display().to_string(),
                });
            }
        }

        relations.push(Relation {
            subject_alias,
            predicate,
            object_alias,
        });
    }
    Ok(relations)
}
