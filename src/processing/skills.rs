//! Reference skill vocabulary and phrase matching

use crate::error::{Result, ResumeAnalyzerError};
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Cloud,
    DevOps,
    Language,
    Data,
    Platform,
    Practice,
    Collaboration,
    #[default]
    Other,
}

impl SkillCategory {
    pub fn all() -> [SkillCategory; 8] {
        [
            SkillCategory::Cloud,
            SkillCategory::DevOps,
            SkillCategory::Language,
            SkillCategory::Data,
            SkillCategory::Platform,
            SkillCategory::Practice,
            SkillCategory::Collaboration,
            SkillCategory::Other,
        ]
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|category| category.to_string().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SkillCategory::Cloud => "cloud",
            SkillCategory::DevOps => "devops",
            SkillCategory::Language => "language",
            SkillCategory::Data => "data",
            SkillCategory::Platform => "platform",
            SkillCategory::Practice => "practice",
            SkillCategory::Collaboration => "collaboration",
            SkillCategory::Other => "other",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Canonical, lowercase name reported in results
    pub name: String,
    #[serde(default)]
    pub category: SkillCategory,
    /// Alternative spellings that resolve to `name`
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Skill {
    pub fn new(name: &str, category: SkillCategory) -> Self {
        Self {
            name: normalize_term(name),
            category,
            aliases: Vec::new(),
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| normalize_term(a)).collect();
        self
    }
}

#[derive(Debug, Deserialize)]
struct VocabularyFile {
    #[serde(rename = "skill", default)]
    skills: Vec<Skill>,
}

/// The reference list keywords are drawn from
#[derive(Debug, Clone, PartialEq)]
pub struct SkillVocabulary {
    skills: Vec<Skill>,
    index: HashMap<String, usize>,
}

impl SkillVocabulary {
    /// Build from skill entries, normalizing names and merging duplicates
    pub fn new(entries: Vec<Skill>) -> Result<Self> {
        let mut vocabulary = Self {
            skills: Vec::new(),
            index: HashMap::new(),
        };

        for entry in entries {
            vocabulary.insert(entry)?;
        }

        if vocabulary.skills.is_empty() {
            return Err(ResumeAnalyzerError::Vocabulary(
                "skill vocabulary has no entries".to_string(),
            ));
        }

        Ok(vocabulary)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: VocabularyFile = toml::from_str(content)
            .map_err(|e| ResumeAnalyzerError::Vocabulary(format!("Failed to parse skill file: {}", e)))?;
        Self::new(file.skills)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ResumeAnalyzerError::Vocabulary(format!("Failed to read skill file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Built-in vocabulary unless `skills_file` replaces it, plus `extra` names
    pub fn resolve(skills_file: Option<&Path>, extra: &[String]) -> Result<Self> {
        let base = match skills_file {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        base.with_extra_skills(extra)
    }

    /// Add plain skill names on top of this vocabulary
    pub fn with_extra_skills(mut self, names: &[String]) -> Result<Self> {
        for name in names {
            self.insert(Skill::new(name, SkillCategory::Other))?;
        }
        Ok(self)
    }

    fn insert(&mut self, entry: Skill) -> Result<()> {
        let name = normalize_term(&entry.name);
        if name.is_empty() {
            return Err(ResumeAnalyzerError::Vocabulary("skill with an empty name".to_string()));
        }

        let aliases: Vec<String> = entry
            .aliases
            .iter()
            .map(|a| normalize_term(a))
            .filter(|a| !a.is_empty() && *a != name)
            .collect();

        match self.index.get(&name) {
            Some(&idx) => {
                let existing = &mut self.skills[idx];
                for alias in aliases {
                    if !existing.aliases.contains(&alias) {
                        existing.aliases.push(alias);
                    }
                }
            }
            None => {
                self.index.insert(name.clone(), self.skills.len());
                self.skills.push(Skill {
                    name,
                    category: entry.category,
                    aliases,
                });
            }
        }
        Ok(())
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn get(&self, name: &str) -> Option<&Skill> {
        self.index.get(&normalize_term(name)).map(|&idx| &self.skills[idx])
    }

    pub fn category_of(&self, name: &str) -> SkillCategory {
        self.get(name).map(|s| s.category).unwrap_or_default()
    }

    pub fn by_category(&self) -> BTreeMap<SkillCategory, Vec<&Skill>> {
        let mut grouped: BTreeMap<SkillCategory, Vec<&Skill>> = BTreeMap::new();
        for skill in &self.skills {
            grouped.entry(skill.category).or_default().push(skill);
        }
        for skills in grouped.values_mut() {
            skills.sort_by(|a, b| a.name.cmp(&b.name));
        }
        grouped
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    fn builtin_entries() -> Vec<Skill> {
        use SkillCategory::*;

        vec![
            // Azure platform
            Skill::new("azure", Cloud).with_aliases(&["microsoft azure"]),
            Skill::new("azure devops", DevOps).with_aliases(&["azure pipelines"]),
            Skill::new("event grid", Cloud),
            Skill::new("service bus", Cloud),
            Skill::new("functions", Cloud).with_aliases(&["azure functions", "function apps"]),
            Skill::new("landing zone", Cloud).with_aliases(&["landing zones"]),
            Skill::new("microsoft 365", Platform).with_aliases(&["office 365", "m365", "o365"]),
            Skill::new("teams", Collaboration).with_aliases(&["microsoft teams"]),
            Skill::new("paas", Cloud).with_aliases(&["platform as a service"]),
            Skill::new("iaas", Cloud).with_aliases(&["infrastructure as a service"]),
            Skill::new("aws", Cloud).with_aliases(&["amazon web services"]),
            Skill::new("gcp", Cloud).with_aliases(&["google cloud", "google cloud platform"]),
            Skill::new("networking", Cloud),
            Skill::new("infrastructure", Cloud),
            // Infrastructure automation and delivery
            Skill::new("terraform", DevOps),
            Skill::new("bicep", DevOps),
            Skill::new("iac", DevOps).with_aliases(&["infrastructure as code"]),
            Skill::new("ansible", DevOps),
            Skill::new("kubernetes", DevOps).with_aliases(&["k8s"]),
            Skill::new("docker", DevOps),
            Skill::new("helm", DevOps),
            Skill::new("ci/cd", DevOps).with_aliases(&["cicd", "ci-cd", "continuous integration"]),
            Skill::new("github", DevOps).with_aliases(&["github actions"]),
            Skill::new("gitlab", DevOps),
            Skill::new("jenkins", DevOps),
            Skill::new("git", DevOps),
            Skill::new("monitoring", DevOps).with_aliases(&["observability"]),
            Skill::new("prometheus", DevOps),
            Skill::new("grafana", DevOps),
            Skill::new("guardrails", Practice).with_aliases(&["guardrail"]),
            Skill::new("policies", Practice).with_aliases(&["policy", "azure policy"]),
            // Operating systems
            Skill::new("linux", Platform),
            Skill::new("windows", Platform).with_aliases(&["windows server"]),
            // Languages
            Skill::new("python", Language),
            Skill::new("powershell", Language),
            Skill::new("bash", Language).with_aliases(&["shell scripting"]),
            Skill::new("sql", Language),
            Skill::new("rust", Language),
            Skill::new("java", Language),
            Skill::new("javascript", Language).with_aliases(&["js"]),
            Skill::new("typescript", Language),
            Skill::new("c#", Language).with_aliases(&["csharp"]),
            Skill::new("c++", Language).with_aliases(&["cpp"]),
            Skill::new("golang", Language),
            Skill::new("node.js", Platform).with_aliases(&["nodejs"]),
            Skill::new("react.js", Platform).with_aliases(&["reactjs", "react native"]),
            // Data
            Skill::new("postgresql", Data).with_aliases(&["postgres"]),
            Skill::new("mysql", Data),
            Skill::new("mongodb", Data),
            Skill::new("redis", Data),
            Skill::new("kafka", Data).with_aliases(&["apache kafka"]),
            Skill::new("apache spark", Data).with_aliases(&["pyspark", "spark sql"]),
            Skill::new("elasticsearch", Data),
            // Ways of working
            Skill::new("microservices", Practice),
            Skill::new("rest api", Practice).with_aliases(&["rest apis", "restful"]),
            Skill::new("graphql", Practice),
            Skill::new("agile", Practice),
            Skill::new("scrum", Practice),
            Skill::new("leadership", Collaboration),
            Skill::new("mentoring", Collaboration),
            Skill::new("communication", Collaboration),
        ]
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        let mut vocabulary = Self {
            skills: Vec::new(),
            index: HashMap::new(),
        };
        for entry in Self::builtin_entries() {
            // built-in names are non-empty
            let _ = vocabulary.insert(entry);
        }
        vocabulary
    }
}

/// A vocabulary term located in a text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillHit {
    pub skill: String,
    pub matched_text: String,
    pub start: usize,
    pub end: usize,
}

/// Case-insensitive, word-bounded matcher over every vocabulary name and alias
pub struct SkillMatcher {
    automaton: AhoCorasick,
    pattern_skill: Vec<usize>,
    vocabulary: SkillVocabulary,
}

impl SkillMatcher {
    pub fn new(vocabulary: SkillVocabulary) -> Result<Self> {
        let mut patterns = Vec::new();
        let mut pattern_skill = Vec::new();

        for (idx, skill) in vocabulary.skills().iter().enumerate() {
            patterns.push(skill.name.clone());
            pattern_skill.push(idx);
            for alias in &skill.aliases {
                patterns.push(alias.clone());
                pattern_skill.push(idx);
            }
        }

        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .map_err(|e| ResumeAnalyzerError::Processing(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self {
            automaton,
            pattern_skill,
            vocabulary,
        })
    }

    /// Word-bounded hits in text order. A candidate whose span lies inside a
    /// longer candidate is dropped, so "azure devops" is not also reported as
    /// "azure". Partially overlapping candidates are both kept.
    pub fn find_hits(&self, text: &str) -> Vec<SkillHit> {
        let mut candidates: Vec<(usize, usize, usize)> = self
            .automaton
            .find_overlapping_iter(text)
            .filter(|m| is_word_bounded(text, m.start(), m.end()))
            .map(|m| (m.start(), m.end(), self.pattern_skill[m.pattern().as_usize()]))
            .collect();

        candidates.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        candidates
            .iter()
            .filter(|&&(start, end, _)| {
                !candidates
                    .iter()
                    .any(|&(s, e, _)| s <= start && end <= e && e - s > end - start)
            })
            .map(|&(start, end, skill_idx)| SkillHit {
                skill: self.vocabulary.skills()[skill_idx].name.clone(),
                matched_text: text[start..end].to_string(),
                start,
                end,
            })
            .collect()
    }

    /// Canonical names of every skill mentioned in the text
    pub fn find_skills(&self, text: &str) -> BTreeSet<String> {
        self.find_hits(text).into_iter().map(|hit| hit.skill).collect()
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !is_word_char(c));
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !is_word_char(c));
    before_ok && after_ok
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '+' || c == '#'
}

/// Lowercase and collapse internal whitespace
pub fn normalize_term(term: &str) -> String {
    term.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
