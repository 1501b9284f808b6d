//! Policy composition.
//!
//! A policy is an ordered list of compiled rules. Evaluating a policy
//! concatenates the warnings of its rules in declaration order.

use crate::model::Repo;
use crate::params::RuleParams;
use crate::resolver::TagResolver;
use crate::rules::{Rule, RuleError, compile_rule};
use std::collections::BTreeMap;
use thiserror::Error;

/// One `rules[]` entry of a policy, before compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleConfig {
    pub rule: String,
    pub params: RuleParams,
}

/// One `policies[]` entry, before compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyConfig {
    pub id: String,
    pub name: String,
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Error)]
#[error("cannot init policy `{policy}`: cannot init rule `{rule}`")]
pub struct PolicyError {
    pub policy: String,
    pub rule: String,
    #[source]
    pub source: RuleError,
}

#[derive(Debug)]
pub struct Policy {
    id: String,
    name: String,
    rules: Vec<Rule>,
}

impl Policy {
    /// Compile every rule of `config`. The first failing rule aborts compilation.
    pub fn compile(config: &PolicyConfig, resolver: &dyn TagResolver) -> Result<Self, PolicyError> {
        let mut rules = Vec::with_capacity(config.rules.len());
        for rule_config in &config.rules {
            let rule = compile_rule(rule_config, resolver).map_err(|source| PolicyError {
                policy: config.id.clone(),
                rule: rule_config.rule.clone(),
                source,
            })?;
            rules.push(rule);
        }

        Ok(Self {
            id: config.id.clone(),
            name: config.name.clone(),
            rules,
        })
    }

    pub fn new(id: impl Into<String>, name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rules,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn evaluate(&self, repo: &Repo) -> Vec<String> {
        self.rules.iter().flat_map(|rule| rule.evaluate(repo)).collect()
    }
}

/// Compiled policies keyed by ID.
#[derive(Debug, Default)]
pub struct PolicySet {
    policies: BTreeMap<String, Policy>,
}

impl PolicySet {
    /// Compile all policies, all or nothing.
    pub fn compile<'a, I>(configs: I, resolver: &dyn TagResolver) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = &'a PolicyConfig>,
    {
        let mut set = PolicySet::default();
        for config in configs {
            set.insert(Policy::compile(config, resolver)?);
        }
        Ok(set)
    }

    pub fn insert(&mut self, policy: Policy) {
        self.policies.insert(policy.id.clone(), policy);
    }

    pub fn get(&self, id: &str) -> Option<&Policy> {
        self.policies.get(id)
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
